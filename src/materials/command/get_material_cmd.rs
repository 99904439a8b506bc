use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::materials::domain::MaterialService;
use crate::materials::dto::MaterialDto;

pub(crate) struct GetMaterialCommand {
    material_service: Box<dyn MaterialService>,
}

impl GetMaterialCommand {
    pub(crate) fn new(material_service: Box<dyn MaterialService>) -> Self {
        Self {
            material_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMaterialCommandRequest {
    pub material_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMaterialCommandResponse {
    material: MaterialDto,
}

impl GetMaterialCommandResponse {
    pub fn new(material: MaterialDto) -> Self {
        Self {
            material,
        }
    }
}

#[async_trait]
impl Command<GetMaterialCommandRequest, GetMaterialCommandResponse> for GetMaterialCommand {
    async fn execute(&self, req: GetMaterialCommandRequest) -> Result<GetMaterialCommandResponse, CommandError> {
        self.material_service.find_material_by_id(req.material_id.as_str())
            .await.map_err(CommandError::from).map(GetMaterialCommandResponse::new)
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
    use crate::materials::command::get_material_cmd::{GetMaterialCommand, GetMaterialCommandRequest};
    use crate::materials::factory;

    lazy_static! {
        static ref SUT_CMD: AsyncOnce<GetMaterialCommand> = AsyncOnce::new(async {
                let _ = seed_library(RepositoryStore::Memory).await;
                let svc = factory::create_material_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(SystemClock)).await;
                GetMaterialCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_get_material() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(GetMaterialCommandRequest { material_id: "material-03".to_string() })
            .await.expect("should get material");
        assert_eq!("National Geographic", res.material.material_name.as_str());
        assert_eq!(Some(7), res.material.material_type.map(|t| t.checkout_days));

        let res = cmd.execute(GetMaterialCommandRequest { material_id: "missing".to_string() }).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
