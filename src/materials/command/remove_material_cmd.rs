use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::materials::domain::MaterialService;
use crate::materials::dto::MaterialDto;

// RemoveMaterialCommand takes a material out of circulation, its record is kept.
pub(crate) struct RemoveMaterialCommand {
    material_service: Box<dyn MaterialService>,
}

impl RemoveMaterialCommand {
    pub(crate) fn new(material_service: Box<dyn MaterialService>) -> Self {
        Self {
            material_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveMaterialCommandRequest {
    pub material_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveMaterialCommandResponse {
    material: MaterialDto,
}

impl RemoveMaterialCommandResponse {
    pub fn new(material: MaterialDto) -> Self {
        Self {
            material,
        }
    }
}

#[async_trait]
impl Command<RemoveMaterialCommandRequest, RemoveMaterialCommandResponse> for RemoveMaterialCommand {
    async fn execute(&self, req: RemoveMaterialCommandRequest) -> Result<RemoveMaterialCommandResponse, CommandError> {
        self.material_service.remove_from_circulation(req.material_id.as_str())
            .await.map_err(CommandError::from).map(RemoveMaterialCommandResponse::new)
    }
}
