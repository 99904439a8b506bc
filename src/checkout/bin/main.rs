include!("../../lib.rs");
use axum::{
    routing::{get, post, put},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::ddb::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::checkout::controller::{checkout_material, query_checkouts, query_overdue, return_material, settle_payments};

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::LocalDynamoDB)
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB)
    };

    let app = Router::new()
        .route("/checkouts", get(query_checkouts).post(checkout_material))
        .route("/checkouts/overdue", get(query_overdue))
        .route("/checkouts/:id/return", put(return_material))
        .route("/patrons/:id/checkouts/paid", put(settle_payments))
        .with_state(state);

    run(app).await
}
