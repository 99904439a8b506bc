pub mod ddb_material_repository;
pub mod ddb_reference_repository;

use crate::core::repository::Repository;
use crate::materials::domain::model::{GenreEntity, MaterialEntity, MaterialTypeEntity};
use crate::utils::memory::MemoryRepository;

pub(crate) trait MaterialRepository: Repository<MaterialEntity> {
}

// material types and genres are reference data, they are created but never updated.
pub(crate) trait MaterialTypeRepository: Repository<MaterialTypeEntity> {
}

pub(crate) trait GenreRepository: Repository<GenreEntity> {
}

impl MaterialRepository for MemoryRepository<MaterialEntity> {}

impl MaterialTypeRepository for MemoryRepository<MaterialTypeEntity> {}

impl GenreRepository for MemoryRepository<GenreEntity> {}
