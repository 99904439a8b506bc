include!("../../lib.rs");
use axum::{
    routing::{get, put},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::ddb::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::core::seed::seed_library;
use crate::materials::controller::{add_material, find_material_by_id, query_available, query_genres, query_material_types, query_materials, remove_from_circulation};

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        let _ = seed_library(RepositoryStore::LocalDynamoDB).await?;
        AppState::new("dev", RepositoryStore::LocalDynamoDB)
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB)
    };

    let app = Router::new()
        .route("/materials", get(query_materials).post(add_material))
        .route("/materials/available", get(query_available))
        .route("/materials/:id", get(find_material_by_id))
        .route("/materials/:id/out-of-circulation", put(remove_from_circulation))
        .route("/material-types", get(query_material_types))
        .route("/genres", get(query_genres))
        .with_state(state);

    run(app).await
}
