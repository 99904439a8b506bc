use std::sync::Arc;
use crate::checkout::factory::{create_checkout_repository, create_loan_resolver};
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::patrons::domain::PatronService;
use crate::patrons::domain::service::PatronServiceImpl;
use crate::patrons::repository::PatronRepository;
use crate::patrons::repository::ddb_patron_repository::DDBPatronRepository;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memory::MemoryRepository;

pub(crate) async fn create_patron_repository(store: RepositoryStore) -> Box<dyn PatronRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBPatronRepository::new(client, "patrons", "patrons_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "patrons", "patron_id", Some(("email", "last_name"))).await;
            Box::new(DDBPatronRepository::new(client, "patrons", "patrons_ndx"))
        }
        RepositoryStore::Memory => Box::new(MemoryRepository::shared("patrons")),
    }
}

pub(crate) async fn create_patron_service(config: &Configuration, store: RepositoryStore,
                                          clock: Arc<dyn Clock>) -> Box<dyn PatronService> {
    Box::new(PatronServiceImpl::new(config,
                                    create_patron_repository(store).await,
                                    create_checkout_repository(store).await,
                                    create_loan_resolver(store).await,
                                    clock))
}
