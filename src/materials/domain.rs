use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::materials::dto::{GenreDto, MaterialDto, MaterialTypeDto};

pub mod availability;
pub mod model;
pub mod service;

#[async_trait]
pub(crate) trait MaterialService: Sync + Send {
    async fn add_material(&self, material: &MaterialDto) -> LibraryResult<MaterialDto>;
    async fn find_material_by_id(&self, id: &str) -> LibraryResult<MaterialDto>;
    async fn find_materials(&self, material_type_id: Option<&str>,
                            genre_id: Option<&str>) -> LibraryResult<Vec<MaterialDto>>;
    async fn find_available(&self) -> LibraryResult<Vec<MaterialDto>>;
    async fn remove_from_circulation(&self, id: &str) -> LibraryResult<MaterialDto>;
    async fn add_material_type(&self, material_type: &MaterialTypeDto) -> LibraryResult<MaterialTypeDto>;
    async fn find_material_types(&self) -> LibraryResult<Vec<MaterialTypeDto>>;
    async fn add_genre(&self, genre: &GenreDto) -> LibraryResult<GenreDto>;
    async fn find_genres(&self) -> LibraryResult<Vec<GenreDto>>;
}
