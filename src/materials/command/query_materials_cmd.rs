use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::materials::domain::MaterialService;
use crate::materials::dto::MaterialDto;

pub(crate) struct QueryMaterialsCommand {
    material_service: Box<dyn MaterialService>,
}

impl QueryMaterialsCommand {
    pub(crate) fn new(material_service: Box<dyn MaterialService>) -> Self {
        Self {
            material_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryMaterialsCommandRequest {
    pub material_type_id: Option<String>,
    pub genre_id: Option<String>,
    // only materials that are not checked out
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryMaterialsCommandResponse {
    materials: Vec<MaterialDto>,
}

impl QueryMaterialsCommandResponse {
    pub fn new(materials: Vec<MaterialDto>) -> Self {
        Self {
            materials,
        }
    }
}

#[async_trait]
impl Command<QueryMaterialsCommandRequest, QueryMaterialsCommandResponse> for QueryMaterialsCommand {
    async fn execute(&self, req: QueryMaterialsCommandRequest) -> Result<QueryMaterialsCommandResponse, CommandError> {
        let res = if req.available {
            self.material_service.find_available().await
        } else {
            self.material_service.find_materials(req.material_type_id.as_deref(), req.genre_id.as_deref()).await
        };
        res.map_err(CommandError::from).map(QueryMaterialsCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::clock::SystemClock;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::core::seed::seed_library;
    use crate::materials::command::query_materials_cmd::{QueryMaterialsCommand, QueryMaterialsCommandRequest};
    use crate::materials::factory;

    lazy_static! {
        static ref SUT_CMD: AsyncOnce<QueryMaterialsCommand> = AsyncOnce::new(async {
                let _ = seed_library(RepositoryStore::Memory).await;
                let svc = factory::create_material_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(SystemClock)).await;
                QueryMaterialsCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_query_materials_by_genre() {
        let cmd = SUT_CMD.get().await;
        let req = QueryMaterialsCommandRequest {
            material_type_id: Some("periodical".to_string()),
            genre_id: Some("history".to_string()),
            available: false,
        };
        let res = cmd.execute(req).await.expect("should query materials");
        assert!(res.materials.iter().any(|m| m.material_id == "material-03"));
        assert!(res.materials.iter().all(|m| m.genre_id == "history" && m.material_type_id == "periodical"));
    }

    #[tokio::test]
    async fn test_should_run_query_available_materials() {
        let cmd = SUT_CMD.get().await;
        let req = QueryMaterialsCommandRequest { available: true, ..Default::default() };
        let res = cmd.execute(req).await.expect("should query available materials");
        assert!(res.materials.iter().all(|m| m.out_of_circulation_since.is_none()));
        assert!(!res.materials.is_empty());
    }
}
