use std::sync::Arc;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;
use crate::checkout::repository::CheckoutRepository;
use crate::checkout::repository::ddb_checkout_repository::DDBCheckoutRepository;
use crate::checkout::repository::loan_resolver::LoanResolver;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::materials::factory::{create_material_repository, create_material_type_repository};
use crate::patrons::factory::create_patron_repository;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memory::MemoryRepository;

pub(crate) async fn create_checkout_repository(store: RepositoryStore) -> Box<dyn CheckoutRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBCheckoutRepository::new(client, "checkouts", "checkouts_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "checkouts", "checkout_id", Some(("patron_id", "material_id"))).await;
            Box::new(DDBCheckoutRepository::new(client, "checkouts", "checkouts_ndx"))
        }
        RepositoryStore::Memory => Box::new(MemoryRepository::shared("checkouts")),
    }
}

pub(crate) async fn create_loan_resolver(store: RepositoryStore) -> LoanResolver {
    LoanResolver::new(create_material_repository(store).await,
                      create_material_type_repository(store).await)
}

pub(crate) async fn create_checkout_service(config: &Configuration, store: RepositoryStore,
                                            clock: Arc<dyn Clock>) -> Box<dyn CheckoutService> {
    Box::new(CheckoutServiceImpl::new(config,
                                      create_checkout_repository(store).await,
                                      create_material_repository(store).await,
                                      create_patron_repository(store).await,
                                      create_loan_resolver(store).await,
                                      clock))
}
