use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::checkout::command::checkout_material_cmd::{CheckoutMaterialCommand, CheckoutMaterialCommandRequest, CheckoutMaterialCommandResponse};
use crate::checkout::command::query_checkouts_cmd::{QueryCheckoutsCommand, QueryCheckoutsCommandRequest, QueryCheckoutsCommandResponse};
use crate::checkout::command::return_material_cmd::{ReturnMaterialCommand, ReturnMaterialCommandRequest, ReturnMaterialCommandResponse};
use crate::checkout::command::settle_payments_cmd::{SettlePaymentsCommand, SettlePaymentsCommandRequest, SettlePaymentsCommandResponse};
use crate::checkout::domain::CheckoutService;
use crate::checkout::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

async fn build_service(state: AppState) -> Box<dyn CheckoutService> {
    factory::create_checkout_service(&state.config, state.store, state.clock()).await
}

pub(crate) async fn checkout_material(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CheckoutMaterialCommandResponse>, ServerError> {
    let req: CheckoutMaterialCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = CheckoutMaterialCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn query_checkouts(
    State(state): State<AppState>,
    Query(req): Query<QueryCheckoutsCommandRequest>) -> Result<Json<QueryCheckoutsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryCheckoutsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn query_overdue(
    State(state): State<AppState>) -> Result<Json<QueryCheckoutsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryCheckoutsCommand::new(svc).execute(QueryCheckoutsCommandRequest { overdue: true }).await?;
    Ok(Json(res))
}

pub(crate) async fn return_material(
    State(state): State<AppState>,
    Path(checkout_id): Path<String>) -> Result<Json<ReturnMaterialCommandResponse>, ServerError> {
    let req = ReturnMaterialCommandRequest::new(checkout_id.as_str());
    let svc = build_service(state).await;
    let res = ReturnMaterialCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn settle_payments(
    State(state): State<AppState>,
    Path(patron_id): Path<String>) -> Result<Json<SettlePaymentsCommandResponse>, ServerError> {
    let req = SettlePaymentsCommandRequest::new(patron_id.as_str());
    let svc = build_service(state).await;
    let res = SettlePaymentsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
