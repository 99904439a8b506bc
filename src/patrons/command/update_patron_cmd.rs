use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::patrons::dto::PatronDto;
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;

// UpdatePatronCommand changes a patron's contact details, absent fields are left as they are.
pub(crate) struct UpdatePatronCommand {
    patron_service: Box<dyn PatronService>,
}

impl UpdatePatronCommand {
    pub(crate) fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatePatronCommandRequest {
    #[serde(default)]
    pub patron_id: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl UpdatePatronCommandRequest {
    pub fn new(patron_id: &str, address: Option<&str>, email: Option<&str>) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            address: address.map(str::to_string),
            email: email.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePatronCommandResponse {
    patron: PatronDto,
}

impl UpdatePatronCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<UpdatePatronCommandRequest, UpdatePatronCommandResponse> for UpdatePatronCommand {
    async fn execute(&self, req: UpdatePatronCommandRequest) -> Result<UpdatePatronCommandResponse, CommandError> {
        self.patron_service.update_contact(req.patron_id.as_str(), req.address.as_deref(), req.email.as_deref())
            .await.map_err(CommandError::from).map(UpdatePatronCommandResponse::new)
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
    use crate::patrons::command::add_patron_cmd::{AddPatronCommand, AddPatronCommandRequest};
    use crate::patrons::command::update_patron_cmd::{UpdatePatronCommand, UpdatePatronCommandRequest};
    use crate::patrons::factory;

    lazy_static! {
        static ref ADD_CMD: AsyncOnce<AddPatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(SystemClock)).await;
                AddPatronCommand::new(svc)
            });
        static ref SUT_CMD: AsyncOnce<UpdatePatronCommand> = AsyncOnce::new(async {
                let svc = factory::create_patron_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(SystemClock)).await;
                UpdatePatronCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_update_patron() {
        let added = ADD_CMD.get().await
            .execute(AddPatronCommandRequest::new("Gator", "Golf", "123 Main St", "john@example.com"))
            .await.expect("should add patron");
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(UpdatePatronCommandRequest::new(
            added.patron.patron_id.as_str(), Some("1 Swamp Rd"), None)).await.expect("should update patron");
        assert_eq!("1 Swamp Rd", res.patron.address.as_str());
        assert_eq!("john@example.com", res.patron.email.as_str());
    }
}
