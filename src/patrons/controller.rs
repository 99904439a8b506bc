use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest, AddPatronCommandResponse};
use crate::patrons::command::get_patron_cmd::{GetPatronCommand, GetPatronCommandRequest, GetPatronCommandResponse};
use crate::patrons::command::query_patrons_cmd::{QueryPatronsCommand, QueryPatronsCommandRequest, QueryPatronsCommandResponse};
use crate::patrons::command::toggle_patron_cmd::{TogglePatronCommand, TogglePatronCommandRequest, TogglePatronCommandResponse};
use crate::patrons::command::update_patron_cmd::{UpdatePatronCommand, UpdatePatronCommandRequest, UpdatePatronCommandResponse};
use crate::patrons::domain::PatronService;
use crate::patrons::factory;

async fn build_service(state: AppState) -> Box<dyn PatronService> {
    factory::create_patron_service(&state.config, state.store, state.clock()).await
}

pub(crate) async fn query_patrons(
    State(state): State<AppState>,
    Query(req): Query<QueryPatronsCommandRequest>) -> Result<Json<QueryPatronsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryPatronsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_patron(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddPatronCommandResponse>, ServerError> {
    let req: AddPatronCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddPatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_patron_by_id(
    State(state): State<AppState>,
    Path(patron_id): Path<String>) -> Result<Json<GetPatronCommandResponse>, ServerError> {
    let req = GetPatronCommandRequest { patron_id };
    let svc = build_service(state).await;
    let res = GetPatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_patron(
    State(state): State<AppState>,
    Path(patron_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdatePatronCommandResponse>, ServerError> {
    let mut req: UpdatePatronCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.patron_id = patron_id;
    let svc = build_service(state).await;
    let res = UpdatePatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn toggle_patron(
    State(state): State<AppState>,
    Path(patron_id): Path<String>) -> Result<Json<TogglePatronCommandResponse>, ServerError> {
    let req = TogglePatronCommandRequest { patron_id };
    let svc = build_service(state).await;
    let res = TogglePatronCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
