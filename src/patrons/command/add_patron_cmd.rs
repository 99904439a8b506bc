use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;

pub(crate) struct AddPatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl AddPatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddPatronCommandRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
}

impl AddPatronCommandRequest {
    pub fn new(first_name: &str, last_name: &str, address: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: address.to_string(),
            email: email.to_string(),
        }
    }

    pub fn build_patron(&self) -> PatronDto {
        PatronDto::new(self.first_name.as_str(), self.last_name.as_str(),
                       self.address.as_str(), self.email.as_str())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddPatronCommandResponse {
    pub patron: PatronDto,
}

impl AddPatronCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<AddPatronCommandRequest, AddPatronCommandResponse> for AddPatronCommand {
    async fn execute(&self, req: AddPatronCommandRequest) -> Result<AddPatronCommandResponse, CommandError> {
        if !req.email.contains('@') {
            return Err(CommandError::Validation { message: format!("invalid email {}", req.email), reason_code: None });
        }
        self.patron_service.add_patron(&req.build_patron())
            .await.map_err(CommandError::from).map(AddPatronCommandResponse::new)
    }
}
