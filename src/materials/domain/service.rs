use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use crate::checkout::domain::fees::FeePolicy;
use crate::checkout::domain::model::Loan;
use crate::checkout::dto::CheckoutDto;
use crate::checkout::repository::CheckoutRepository;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{fetch_all, predicate_of, Repository};
use crate::materials::domain::availability::available_materials;
use crate::materials::domain::MaterialService;
use crate::materials::domain::model::{GenreEntity, MaterialEntity, MaterialTypeEntity};
use crate::materials::dto::{GenreDto, MaterialDto, MaterialTypeDto};
use crate::materials::repository::{GenreRepository, MaterialRepository, MaterialTypeRepository};
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::PatronRepository;

pub(crate) struct MaterialServiceImpl {
    fee_policy: FeePolicy,
    material_repository: Box<dyn MaterialRepository>,
    material_type_repository: Box<dyn MaterialTypeRepository>,
    genre_repository: Box<dyn GenreRepository>,
    checkout_repository: Box<dyn CheckoutRepository>,
    patron_repository: Box<dyn PatronRepository>,
    clock: Arc<dyn Clock>,
}

impl MaterialServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(config: &Configuration,
                      material_repository: Box<dyn MaterialRepository>,
                      material_type_repository: Box<dyn MaterialTypeRepository>,
                      genre_repository: Box<dyn GenreRepository>,
                      checkout_repository: Box<dyn CheckoutRepository>,
                      patron_repository: Box<dyn PatronRepository>,
                      clock: Arc<dyn Clock>) -> Self {
        Self {
            fee_policy: FeePolicy::from(config),
            material_repository,
            material_type_repository,
            genre_repository,
            checkout_repository,
            patron_repository,
            clock,
        }
    }

    async fn material_types_by_id(&self) -> LibraryResult<HashMap<String, MaterialTypeEntity>> {
        let all = fetch_all(self.material_type_repository.as_ref(), &HashMap::new()).await?;
        Ok(all.into_iter().map(|t| (t.material_type_id.clone(), t)).collect())
    }

    async fn genres_by_id(&self) -> LibraryResult<HashMap<String, GenreEntity>> {
        let all = fetch_all(self.genre_repository.as_ref(), &HashMap::new()).await?;
        Ok(all.into_iter().map(|g| (g.genre_id.clone(), g)).collect())
    }

    // with_reference_data attaches type and genre to every material, sorted by name
    async fn with_reference_data(&self, materials: Vec<MaterialEntity>) -> LibraryResult<Vec<MaterialDto>> {
        let material_types = self.material_types_by_id().await?;
        let genres = self.genres_by_id().await?;
        let mut res: Vec<MaterialDto> = materials.iter().map(|material| {
            let mut dto = MaterialDto::from(material);
            dto.material_type = material_types.get(&material.material_type_id).map(MaterialTypeDto::from);
            dto.genre = genres.get(&material.genre_id).map(GenreDto::from);
            dto
        }).collect();
        res.sort_by(|a, b| a.material_name.cmp(&b.material_name));
        Ok(res)
    }
}

#[async_trait]
impl MaterialService for MaterialServiceImpl {
    async fn add_material(&self, material: &MaterialDto) -> LibraryResult<MaterialDto> {
        let material_type = self.material_type_repository.get(material.material_type_id.as_str()).await?;
        let genre = self.genre_repository.get(material.genre_id.as_str()).await?;
        let entity = MaterialEntity::from(material);
        self.material_repository.create(&entity).await?;
        tracing::info!(material_id = %entity.material_id, material_type = %material_type.name,
            genre = %genre.name, "material added");
        let mut dto = MaterialDto::from(&entity);
        dto.material_type = Some(MaterialTypeDto::from(&material_type));
        dto.genre = Some(GenreDto::from(&genre));
        Ok(dto)
    }

    async fn find_material_by_id(&self, id: &str) -> LibraryResult<MaterialDto> {
        let today = self.clock.today();
        let material = self.material_repository.get(id).await?;
        let material_type = self.material_type_repository.get(material.material_type_id.as_str()).await?;
        let genre = self.genre_repository.get(material.genre_id.as_str()).await?;
        let mut checkouts = fetch_all(self.checkout_repository.as_ref(),
                                      &predicate_of(&[("material_id", id)])).await?;
        checkouts.sort_by(|a, b| a.checkout_date.cmp(&b.checkout_date));

        let mut patrons: HashMap<String, PatronEntity> = HashMap::new();
        let mut checkout_dtos = vec![];
        for checkout in checkouts {
            if !patrons.contains_key(&checkout.patron_id) {
                let patron = self.patron_repository.get(checkout.patron_id.as_str()).await?;
                patrons.insert(checkout.patron_id.clone(), patron);
            }
            let patron = &patrons[&checkout.patron_id];
            let loan = Loan::new(checkout, material.clone(), material_type.clone());
            let mut dto = CheckoutDto::from_loan(&loan, today, &self.fee_policy).with_patron(patron);
            // the material is the parent of this listing
            dto.material = None;
            checkout_dtos.push(dto);
        }

        let mut dto = MaterialDto::from(&material);
        dto.material_type = Some(MaterialTypeDto::from(&material_type));
        dto.genre = Some(GenreDto::from(&genre));
        dto.checkouts = checkout_dtos;
        Ok(dto)
    }

    async fn find_materials(&self, material_type_id: Option<&str>,
                            genre_id: Option<&str>) -> LibraryResult<Vec<MaterialDto>> {
        let mut predicate = HashMap::new();
        if let Some(material_type_id) = material_type_id {
            predicate.insert("material_type_id".to_string(), material_type_id.to_string());
        }
        if let Some(genre_id) = genre_id {
            predicate.insert("genre_id".to_string(), genre_id.to_string());
        }
        let materials = fetch_all(self.material_repository.as_ref(), &predicate).await?
            .into_iter()
            .filter(MaterialEntity::in_circulation)
            .collect();
        self.with_reference_data(materials).await
    }

    async fn find_available(&self) -> LibraryResult<Vec<MaterialDto>> {
        let materials = fetch_all(self.material_repository.as_ref(), &HashMap::new()).await?;
        let checkouts = fetch_all(self.checkout_repository.as_ref(), &HashMap::new()).await?;
        let available = available_materials(materials, &checkouts);
        tracing::debug!(count = available.len(), "available materials evaluated");
        self.with_reference_data(available).await
    }

    async fn remove_from_circulation(&self, id: &str) -> LibraryResult<MaterialDto> {
        let mut material = self.material_repository.get(id).await?;
        if material.in_circulation() {
            let now = self.clock.now();
            material.out_of_circulation_since = Some(now);
            self.material_repository.update(&material).await?;
            material.version += 1;
            tracing::info!(material_id = %id, since = %now, "material taken out of circulation");
        }
        Ok(MaterialDto::from(&material))
    }

    async fn add_material_type(&self, material_type: &MaterialTypeDto) -> LibraryResult<MaterialTypeDto> {
        let entity = MaterialTypeEntity::from(material_type);
        entity.validate()?;
        self.material_type_repository.create(&entity).await?;
        tracing::info!(material_type_id = %entity.material_type_id, checkout_days = entity.checkout_days,
            "material type added");
        Ok(MaterialTypeDto::from(&entity))
    }

    async fn find_material_types(&self) -> LibraryResult<Vec<MaterialTypeDto>> {
        let mut all = fetch_all(self.material_type_repository.as_ref(), &HashMap::new()).await?;
        if all.is_empty() {
            return Err(LibraryError::not_found("no material types found"));
        }
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all.iter().map(MaterialTypeDto::from).collect())
    }

    async fn add_genre(&self, genre: &GenreDto) -> LibraryResult<GenreDto> {
        let entity = GenreEntity::from(genre);
        self.genre_repository.create(&entity).await?;
        tracing::info!(genre_id = %entity.genre_id, "genre added");
        Ok(GenreDto::from(&entity))
    }

    async fn find_genres(&self) -> LibraryResult<Vec<GenreDto>> {
        let mut all = fetch_all(self.genre_repository.as_ref(), &HashMap::new()).await?;
        if all.is_empty() {
            return Err(LibraryError::not_found("no genres found"));
        }
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all.iter().map(GenreDto::from).collect())
    }
}

impl From<&MaterialEntity> for MaterialDto {
    fn from(other: &MaterialEntity) -> MaterialDto {
        MaterialDto {
            material_id: other.material_id.to_string(),
            version: other.version,
            material_name: other.material_name.to_string(),
            material_type_id: other.material_type_id.to_string(),
            genre_id: other.genre_id.to_string(),
            out_of_circulation_since: other.out_of_circulation_since,
            material_type: None,
            genre: None,
            checkouts: vec![],
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MaterialDto> for MaterialEntity {
    fn from(other: &MaterialDto) -> MaterialEntity {
        MaterialEntity {
            material_id: other.material_id.to_string(),
            version: other.version,
            material_name: other.material_name.to_string(),
            material_type_id: other.material_type_id.to_string(),
            genre_id: other.genre_id.to_string(),
            out_of_circulation_since: other.out_of_circulation_since,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MaterialTypeEntity> for MaterialTypeDto {
    fn from(other: &MaterialTypeEntity) -> MaterialTypeDto {
        MaterialTypeDto {
            material_type_id: other.material_type_id.to_string(),
            name: other.name.to_string(),
            checkout_days: other.checkout_days,
        }
    }
}

impl From<&MaterialTypeDto> for MaterialTypeEntity {
    fn from(other: &MaterialTypeDto) -> MaterialTypeEntity {
        MaterialTypeEntity {
            material_type_id: other.material_type_id.to_string(),
            version: 0,
            name: other.name.to_string(),
            checkout_days: other.checkout_days,
        }
    }
}

impl From<&GenreEntity> for GenreDto {
    fn from(other: &GenreEntity) -> GenreDto {
        GenreDto {
            genre_id: other.genre_id.to_string(),
            name: other.name.to_string(),
        }
    }
}

impl From<&GenreDto> for GenreEntity {
    fn from(other: &GenreDto) -> GenreEntity {
        GenreEntity {
            genre_id: other.genre_id.to_string(),
            version: 0,
            name: other.name.to_string(),
        }
    }
}
