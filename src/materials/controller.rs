use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::materials::command::add_material_cmd::{AddMaterialCommand, AddMaterialCommandRequest, AddMaterialCommandResponse};
use crate::materials::command::get_material_cmd::{GetMaterialCommand, GetMaterialCommandRequest, GetMaterialCommandResponse};
use crate::materials::command::query_materials_cmd::{QueryMaterialsCommand, QueryMaterialsCommandRequest, QueryMaterialsCommandResponse};
use crate::materials::command::query_reference_cmd::{QueryReferenceCommand, QueryReferenceCommandRequest, QueryReferenceCommandResponse};
use crate::materials::command::remove_material_cmd::{RemoveMaterialCommand, RemoveMaterialCommandRequest, RemoveMaterialCommandResponse};
use crate::materials::domain::MaterialService;
use crate::materials::factory;

async fn build_service(state: AppState) -> Box<dyn MaterialService> {
    factory::create_material_service(&state.config, state.store, state.clock()).await
}

pub(crate) async fn query_materials(
    State(state): State<AppState>,
    Query(req): Query<QueryMaterialsCommandRequest>) -> Result<Json<QueryMaterialsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryMaterialsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn query_available(
    State(state): State<AppState>) -> Result<Json<QueryMaterialsCommandResponse>, ServerError> {
    let req = QueryMaterialsCommandRequest { available: true, ..Default::default() };
    let svc = build_service(state).await;
    let res = QueryMaterialsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_material(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddMaterialCommandResponse>, ServerError> {
    let req: AddMaterialCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddMaterialCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_material_by_id(
    State(state): State<AppState>,
    Path(material_id): Path<String>) -> Result<Json<GetMaterialCommandResponse>, ServerError> {
    let req = GetMaterialCommandRequest { material_id };
    let svc = build_service(state).await;
    let res = GetMaterialCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_from_circulation(
    State(state): State<AppState>,
    Path(material_id): Path<String>) -> Result<Json<RemoveMaterialCommandResponse>, ServerError> {
    let req = RemoveMaterialCommandRequest { material_id };
    let svc = build_service(state).await;
    let res = RemoveMaterialCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn query_material_types(
    State(state): State<AppState>) -> Result<Json<QueryReferenceCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryReferenceCommand::new(svc).execute(QueryReferenceCommandRequest::MaterialTypes).await?;
    Ok(Json(res))
}

pub(crate) async fn query_genres(
    State(state): State<AppState>) -> Result<Json<QueryReferenceCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryReferenceCommand::new(svc).execute(QueryReferenceCommandRequest::Genres).await?;
    Ok(Json(res))
}
