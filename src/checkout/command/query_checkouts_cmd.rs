use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

// QueryCheckoutsCommand lists checkouts with their fees as of today.
pub(crate) struct QueryCheckoutsCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl QueryCheckoutsCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryCheckoutsCommandRequest {
    #[serde(default)]
    pub overdue: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryCheckoutsCommandResponse {
    checkouts: Vec<CheckoutDto>,
}

impl QueryCheckoutsCommandResponse {
    pub fn new(checkouts: Vec<CheckoutDto>) -> Self {
        Self {
            checkouts,
        }
    }
}

#[async_trait]
impl Command<QueryCheckoutsCommandRequest, QueryCheckoutsCommandResponse> for QueryCheckoutsCommand {
    async fn execute(&self, req: QueryCheckoutsCommandRequest) -> Result<QueryCheckoutsCommandResponse, CommandError> {
        let res = if req.overdue {
            self.checkout_service.query_overdue().await
        } else {
            self.checkout_service.find_checkouts().await
        };
        res.map_err(CommandError::from).map(QueryCheckoutsCommandResponse::new)
    }
}
