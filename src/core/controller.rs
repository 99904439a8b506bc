use std::sync::Arc;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use crate::core::clock::{Clock, SystemClock};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
}

impl AppState {
    pub fn new(branch: &str, store: RepositoryStore) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store,
        }
    }

    // every request evaluates fees and due dates against the wall clock
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::new(SystemClock)
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Access { .. } => StatusCode::BAD_REQUEST,
            CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Conflict { .. } => StatusCode::CONFLICT,
            CommandError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        };
        (status, format!("{:?}", err))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::ServerError;

    #[test]
    fn test_should_map_status_codes() {
        let (status, _) = ServerError::from(CommandError::NotFound { message: "x".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, status);
        let (status, _) = ServerError::from(CommandError::Conflict { message: "x".to_string() });
        assert_eq!(StatusCode::CONFLICT, status);
        let (status, _) = ServerError::from(CommandError::Unprocessable { message: "x".to_string() });
        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
        let (status, _) = ServerError::from(CommandError::Validation { message: "x".to_string(), reason_code: None });
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }
}
