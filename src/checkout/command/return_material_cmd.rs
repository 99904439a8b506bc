use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ReturnMaterialCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ReturnMaterialCommand {
    pub(crate) fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnMaterialCommandRequest {
    checkout_id: String,
}

impl ReturnMaterialCommandRequest {
    pub fn new(checkout_id: &str) -> Self {
        Self {
            checkout_id: checkout_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnMaterialCommandResponse {
    checkout: CheckoutDto,
}

impl ReturnMaterialCommandResponse {
    pub fn new(checkout: CheckoutDto) -> Self {
        Self {
            checkout,
        }
    }
}

#[async_trait]
impl Command<ReturnMaterialCommandRequest, ReturnMaterialCommandResponse> for ReturnMaterialCommand {
    async fn execute(&self, req: ReturnMaterialCommandRequest) -> Result<ReturnMaterialCommandResponse, CommandError> {
        self.checkout_service.returned(req.checkout_id.as_str())
            .await.map_err(CommandError::from).map(ReturnMaterialCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use rust_decimal_macros::dec;
    use crate::checkout::command::return_material_cmd::{ReturnMaterialCommand, ReturnMaterialCommandRequest};
    use crate::checkout::domain::lifecycle::open_checkout;
    use crate::checkout::factory::{create_checkout_repository, create_checkout_service};
    use crate::core::clock::FixedClock;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::core::seed::seed_library;
    use crate::materials::domain::model::MaterialEntity;
    use crate::materials::factory::create_material_repository;

    lazy_static! {
        static ref SUT_CMD: AsyncOnce<ReturnMaterialCommand> = AsyncOnce::new(async {
                let _ = seed_library(RepositoryStore::Memory).await;
                let svc = create_checkout_service(&Configuration::new("test"), RepositoryStore::Memory,
                    Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 5, 21).unwrap()))).await;
                ReturnMaterialCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_return_material() {
        let cmd = SUT_CMD.get().await;
        let material = MaterialEntity::new("Arthur's New Puppy", "book", "fantasy");
        create_material_repository(RepositoryStore::Memory).await.create(&material).await.expect("should add material");
        let checkout = open_checkout(material.material_id.as_str(), "patron-02",
                                     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        create_checkout_repository(RepositoryStore::Memory).await.create(&checkout).await.expect("should add checkout");

        let res = cmd.execute(ReturnMaterialCommandRequest::new(checkout.checkout_id.as_str()))
            .await.expect("should return material");
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 21), res.checkout.return_date);
        // due 2024-05-15, returned 6 days late
        assert_eq!(Some(dec!(3.00)), res.checkout.late_fee);

        let res = cmd.execute(ReturnMaterialCommandRequest::new(checkout.checkout_id.as_str())).await;
        assert!(matches!(res, Err(CommandError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_return_before_checkout() {
        let cmd = SUT_CMD.get().await;
        let material = MaterialEntity::new("DC Comics", "periodical", "mystery");
        create_material_repository(RepositoryStore::Memory).await.create(&material).await.expect("should add material");
        let checkout = open_checkout(material.material_id.as_str(), "patron-01",
                                     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        create_checkout_repository(RepositoryStore::Memory).await.create(&checkout).await.expect("should add checkout");

        let res = cmd.execute(ReturnMaterialCommandRequest::new(checkout.checkout_id.as_str())).await;
        assert!(matches!(res, Err(CommandError::Unprocessable { .. })));
    }
}
