use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct CheckoutMaterialCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl CheckoutMaterialCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

// the checkout date is always the current day and a new checkout is never paid
#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutMaterialCommandRequest {
    patron_id: String,
    material_id: String,
}

impl CheckoutMaterialCommandRequest {
    pub fn new(patron_id: &str, material_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            material_id: material_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckoutMaterialCommandResponse {
    checkout: CheckoutDto,
}

impl CheckoutMaterialCommandResponse {
    pub fn new(checkout: CheckoutDto) -> Self {
        Self {
            checkout,
        }
    }
}

#[async_trait]
impl Command<CheckoutMaterialCommandRequest, CheckoutMaterialCommandResponse> for CheckoutMaterialCommand {
    async fn execute(&self, req: CheckoutMaterialCommandRequest) -> Result<CheckoutMaterialCommandResponse, CommandError> {
        self.checkout_service.checkout(req.patron_id.as_str(), req.material_id.as_str())
            .await.map_err(CommandError::from).map(CheckoutMaterialCommandResponse::new)
    }
}
