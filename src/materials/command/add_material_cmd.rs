use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::materials::domain::MaterialService;
use crate::materials::dto::MaterialDto;

pub(crate) struct AddMaterialCommand {
    material_service: Box<dyn MaterialService>,
}

impl AddMaterialCommand {
    pub(crate) fn new(material_service: Box<dyn MaterialService>) -> Self {
        Self {
            material_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMaterialCommandRequest {
    pub material_name: String,
    pub material_type_id: String,
    pub genre_id: String,
}

impl AddMaterialCommandRequest {
    pub fn new(material_name: &str, material_type_id: &str, genre_id: &str) -> Self {
        Self {
            material_name: material_name.to_string(),
            material_type_id: material_type_id.to_string(),
            genre_id: genre_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddMaterialCommandResponse {
    material: MaterialDto,
}

impl AddMaterialCommandResponse {
    pub fn new(material: MaterialDto) -> Self {
        Self {
            material,
        }
    }
}

#[async_trait]
impl Command<AddMaterialCommandRequest, AddMaterialCommandResponse> for AddMaterialCommand {
    async fn execute(&self, req: AddMaterialCommandRequest) -> Result<AddMaterialCommandResponse, CommandError> {
        if req.material_name.trim().is_empty() {
            return Err(CommandError::Validation { message: "material name is required".to_string(), reason_code: None });
        }
        let material = MaterialDto::new(req.material_name.as_str(), req.material_type_id.as_str(), req.genre_id.as_str());
        self.material_service.add_material(&material)
            .await.map_err(CommandError::from).map(AddMaterialCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::clock::SystemClock;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::core::seed::seed_library;
    use crate::materials::command::add_material_cmd::{AddMaterialCommand, AddMaterialCommandRequest};
    use crate::materials::factory;

    lazy_static! {
        static ref SUT_CMD: AsyncOnce<AddMaterialCommand> = AsyncOnce::new(async {
                let _ = seed_library(RepositoryStore::Memory).await;
                let svc = factory::create_material_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(SystemClock)).await;
                AddMaterialCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_material() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(AddMaterialCommandRequest::new("Dune", "book", "scifi")).await.expect("should add material");
        assert_eq!("Dune", res.material.material_name.as_str());
        assert_eq!(Some("SciFi".to_string()), res.material.genre.map(|g| g.name));
    }

    #[tokio::test]
    async fn test_should_fail_add_material_with_unknown_genre() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(AddMaterialCommandRequest::new("Dune", "book", "poetry")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
        let res = cmd.execute(AddMaterialCommandRequest::new(" ", "book", "scifi")).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
