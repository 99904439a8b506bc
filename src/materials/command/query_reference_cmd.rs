use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::materials::domain::MaterialService;
use crate::materials::dto::{GenreDto, MaterialTypeDto};

// QueryReferenceCommand lists the lookup data materials are classified by.
pub(crate) struct QueryReferenceCommand {
    material_service: Box<dyn MaterialService>,
}

impl QueryReferenceCommand {
    pub(crate) fn new(material_service: Box<dyn MaterialService>) -> Self {
        Self {
            material_service,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
pub(crate) enum QueryReferenceCommandRequest {
    MaterialTypes,
    Genres,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum QueryReferenceCommandResponse {
    MaterialTypes { material_types: Vec<MaterialTypeDto> },
    Genres { genres: Vec<GenreDto> },
}

#[async_trait]
impl Command<QueryReferenceCommandRequest, QueryReferenceCommandResponse> for QueryReferenceCommand {
    async fn execute(&self, req: QueryReferenceCommandRequest) -> Result<QueryReferenceCommandResponse, CommandError> {
        match req {
            QueryReferenceCommandRequest::MaterialTypes => {
                self.material_service.find_material_types().await.map_err(CommandError::from)
                    .map(|material_types| QueryReferenceCommandResponse::MaterialTypes { material_types })
            }
            QueryReferenceCommandRequest::Genres => {
                self.material_service.find_genres().await.map_err(CommandError::from)
                    .map(|genres| QueryReferenceCommandResponse::Genres { genres })
            }
        }
    }
}
