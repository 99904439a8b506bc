use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;

pub(crate) struct QueryPatronsCommand {
    patron_service: Box<dyn PatronService>,
}

impl QueryPatronsCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryPatronsCommandRequest {
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryPatronsCommandResponse {
    patrons: Vec<PatronDto>,
}

impl QueryPatronsCommandResponse {
    pub fn new(patrons: Vec<PatronDto>) -> Self {
        Self {
            patrons,
        }
    }
}

#[async_trait]
impl Command<QueryPatronsCommandRequest, QueryPatronsCommandResponse> for QueryPatronsCommand {
    async fn execute(&self, req: QueryPatronsCommandRequest) -> Result<QueryPatronsCommandResponse, CommandError> {
        let patrons = self.patron_service.find_patrons().await.map_err(CommandError::from)?;
        let patrons = match req.is_active {
            Some(is_active) => patrons.into_iter().filter(|p| p.is_active == is_active).collect(),
            None => patrons,
        };
        Ok(QueryPatronsCommandResponse::new(patrons))
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
    use crate::patrons::command::query_patrons_cmd::{QueryPatronsCommand, QueryPatronsCommandRequest};
    use crate::patrons::factory;

    lazy_static! {
        static ref SUT_CMD: AsyncOnce<QueryPatronsCommand> = AsyncOnce::new(async {
                let _ = seed_library(RepositoryStore::Memory).await;
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(SystemClock)).await;
                QueryPatronsCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_query_patrons() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(QueryPatronsCommandRequest::default()).await.expect("should list patrons");
        assert!(res.patrons.iter().any(|p| p.patron_id == "patron-01"));
        assert!(res.patrons.iter().any(|p| p.patron_id == "patron-02"));
    }
}
