use std::collections::HashMap;

use crate::checkout::domain::model::{CheckoutEntity, Loan};
use crate::core::library::LibraryResult;
use crate::materials::domain::model::{MaterialEntity, MaterialTypeEntity};
use crate::materials::repository::{MaterialRepository, MaterialTypeRepository};

// LoanResolver joins checkouts with their material and material type. Every material
// and type is loaded once per call no matter how many checkouts refer to it.
pub(crate) struct LoanResolver {
    material_repository: Box<dyn MaterialRepository>,
    material_type_repository: Box<dyn MaterialTypeRepository>,
}

impl LoanResolver {
    pub(crate) fn new(material_repository: Box<dyn MaterialRepository>,
                      material_type_repository: Box<dyn MaterialTypeRepository>) -> Self {
        Self {
            material_repository,
            material_type_repository,
        }
    }

    pub(crate) async fn resolve(&self, checkouts: Vec<CheckoutEntity>) -> LibraryResult<Vec<Loan>> {
        let mut materials: HashMap<String, MaterialEntity> = HashMap::new();
        let mut material_types: HashMap<String, MaterialTypeEntity> = HashMap::new();
        let mut loans = Vec::with_capacity(checkouts.len());
        for checkout in checkouts {
            if !materials.contains_key(&checkout.material_id) {
                let material = self.material_repository.get(checkout.material_id.as_str()).await?;
                materials.insert(checkout.material_id.clone(), material);
            }
            let material = materials[&checkout.material_id].clone();
            if !material_types.contains_key(&material.material_type_id) {
                let material_type = self.material_type_repository.get(material.material_type_id.as_str()).await?;
                material_types.insert(material.material_type_id.clone(), material_type);
            }
            let material_type = material_types[&material.material_type_id].clone();
            loans.push(Loan::new(checkout, material, material_type));
        }
        Ok(loans)
    }

    pub(crate) async fn resolve_one(&self, checkout: CheckoutEntity) -> LibraryResult<Loan> {
        let material = self.material_repository.get(checkout.material_id.as_str()).await?;
        let material_type = self.material_type_repository.get(material.material_type_id.as_str()).await?;
        Ok(Loan::new(checkout, material, material_type))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::checkout::domain::model::CheckoutEntity;
    use crate::checkout::repository::loan_resolver::LoanResolver;
    use crate::core::repository::Repository;
    use crate::materials::domain::model::{MaterialEntity, MaterialTypeEntity};
    use crate::utils::memory::MemoryRepository;

    #[tokio::test]
    async fn test_should_resolve_loans() {
        let material_repo: MemoryRepository<MaterialEntity> = MemoryRepository::isolated("materials");
        let type_repo: MemoryRepository<MaterialTypeEntity> = MemoryRepository::isolated("material_types");
        let cd = MaterialTypeEntity::new("CD", 10);
        type_repo.create(&cd).await.expect("should create type");
        let material = MaterialEntity::new("Infest by Papa Roach", cd.material_type_id.as_str(), "romance");
        material_repo.create(&material).await.expect("should create material");

        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let resolver = LoanResolver::new(Box::new(material_repo), Box::new(type_repo));
        let loans = resolver.resolve(vec![
            CheckoutEntity::new(material.material_id.as_str(), "p1", day),
            CheckoutEntity::new(material.material_id.as_str(), "p2", day),
        ]).await.expect("should resolve");
        assert_eq!(2, loans.len());
        assert!(loans.iter().all(|loan| loan.checkout_days() == 10));

        let missing = resolver.resolve_one(CheckoutEntity::new("missing", "p1", day)).await;
        assert!(missing.is_err());
    }
}
