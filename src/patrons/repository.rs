pub mod ddb_patron_repository;

use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;
use crate::utils::memory::MemoryRepository;

pub(crate) trait PatronRepository: Repository<PatronEntity> {
}

impl PatronRepository for MemoryRepository<PatronEntity> {}
