use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::patrons::dto::PatronDto;
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;

pub(crate) struct GetPatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl GetPatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetPatronCommandRequest {
    pub patron_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetPatronCommandResponse {
    patron: PatronDto,
}

impl GetPatronCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<GetPatronCommandRequest, GetPatronCommandResponse> for GetPatronCommand {
    async fn execute(&self, req: GetPatronCommandRequest) -> Result<GetPatronCommandResponse, CommandError> {
        self.patron_service.find_patron_by_id(req.patron_id.as_str())
            .await.map_err(CommandError::from).map(GetPatronCommandResponse::new)
    }
}
