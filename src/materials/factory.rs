use std::sync::Arc;
use crate::checkout::factory::create_checkout_repository;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::materials::domain::MaterialService;
use crate::materials::domain::model::{GenreEntity, MaterialTypeEntity};
use crate::materials::domain::service::MaterialServiceImpl;
use crate::materials::repository::{GenreRepository, MaterialRepository, MaterialTypeRepository};
use crate::materials::repository::ddb_material_repository::DDBMaterialRepository;
use crate::materials::repository::ddb_reference_repository::DDBReferenceRepository;
use crate::patrons::factory::create_patron_repository;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memory::MemoryRepository;

pub(crate) async fn create_material_repository(store: RepositoryStore) -> Box<dyn MaterialRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBMaterialRepository::new(client, "materials", "materials_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "materials", "material_id", Some(("material_type_id", "genre_id"))).await;
            Box::new(DDBMaterialRepository::new(client, "materials", "materials_ndx"))
        }
        RepositoryStore::Memory => Box::new(MemoryRepository::shared("materials")),
    }
}

pub(crate) async fn create_material_type_repository(store: RepositoryStore) -> Box<dyn MaterialTypeRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBReferenceRepository::<MaterialTypeEntity>::new(client, "material_types", "material_type_id"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "material_types", "material_type_id", None).await;
            Box::new(DDBReferenceRepository::<MaterialTypeEntity>::new(client, "material_types", "material_type_id"))
        }
        RepositoryStore::Memory => Box::new(MemoryRepository::shared("material_types")),
    }
}

pub(crate) async fn create_genre_repository(store: RepositoryStore) -> Box<dyn GenreRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBReferenceRepository::<GenreEntity>::new(client, "genres", "genre_id"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "genres", "genre_id", None).await;
            Box::new(DDBReferenceRepository::<GenreEntity>::new(client, "genres", "genre_id"))
        }
        RepositoryStore::Memory => Box::new(MemoryRepository::shared("genres")),
    }
}

pub(crate) async fn create_material_service(config: &Configuration, store: RepositoryStore,
                                            clock: Arc<dyn Clock>) -> Box<dyn MaterialService> {
    Box::new(MaterialServiceImpl::new(config,
                                      create_material_repository(store).await,
                                      create_material_type_repository(store).await,
                                      create_genre_repository(store).await,
                                      create_checkout_repository(store).await,
                                      create_patron_repository(store).await,
                                      clock))
}
