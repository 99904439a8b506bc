use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;

pub(crate) struct TogglePatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl TogglePatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TogglePatronCommandRequest {
    pub patron_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TogglePatronCommandResponse {
    patron: PatronDto,
}

impl TogglePatronCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<TogglePatronCommandRequest, TogglePatronCommandResponse> for TogglePatronCommand {
    async fn execute(&self, req: TogglePatronCommandRequest) -> Result<TogglePatronCommandResponse, CommandError> {
        self.patron_service.toggle_active(req.patron_id.as_str())
            .await.map_err(CommandError::from).map(TogglePatronCommandResponse::new)
    }
}
