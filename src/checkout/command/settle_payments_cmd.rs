use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct SettlePaymentsCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl SettlePaymentsCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SettlePaymentsCommandRequest {
    patron_id: String,
}

impl SettlePaymentsCommandRequest {
    pub fn new(patron_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SettlePaymentsCommandResponse {
    settled: Vec<CheckoutDto>,
}

impl SettlePaymentsCommandResponse {
    pub fn new(settled: Vec<CheckoutDto>) -> Self {
        Self {
            settled,
        }
    }
}

#[async_trait]
impl Command<SettlePaymentsCommandRequest, SettlePaymentsCommandResponse> for SettlePaymentsCommand {
    async fn execute(&self, req: SettlePaymentsCommandRequest) -> Result<SettlePaymentsCommandResponse, CommandError> {
        self.checkout_service.settle_payments(req.patron_id.as_str())
            .await.map_err(CommandError::from).map(SettlePaymentsCommandResponse::new)
    }
}
