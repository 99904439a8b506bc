use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::{opt_serializer, serializer};

// longest loan period a material type may grant
pub(crate) const MAX_CHECKOUT_DAYS: i64 = 3650;

// MaterialTypeEntity defines the loan period shared by every material of that type.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MaterialTypeEntity {
    pub material_type_id: String,
    pub version: i64,
    pub name: String,
    pub checkout_days: i64,
}

impl MaterialTypeEntity {
    pub fn new(name: &str, checkout_days: i64) -> Self {
        Self {
            material_type_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            checkout_days,
        }
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.checkout_days <= 0 || self.checkout_days > MAX_CHECKOUT_DAYS {
            return Err(LibraryError::validation(
                format!("checkout days for {} must be between 1 and {} but was {}",
                        self.name, MAX_CHECKOUT_DAYS, self.checkout_days).as_str(), Some("400".to_string())));
        }
        Ok(())
    }
}

impl Identifiable for MaterialTypeEntity {
    fn id(&self) -> String {
        self.material_type_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct GenreEntity {
    pub genre_id: String,
    pub version: i64,
    pub name: String,
}

impl GenreEntity {
    pub fn new(name: &str) -> Self {
        Self {
            genre_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
        }
    }
}

impl Identifiable for GenreEntity {
    fn id(&self) -> String {
        self.genre_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// MaterialEntity abstracts a single circulating item, a book, periodical or CD.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MaterialEntity {
    pub material_id: String,
    pub version: i64,
    pub material_name: String,
    pub material_type_id: String,
    pub genre_id: String,
    #[serde(with = "opt_serializer")]
    pub out_of_circulation_since: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MaterialEntity {
    pub fn new(material_name: &str, material_type_id: &str, genre_id: &str) -> Self {
        Self {
            material_id: Uuid::new_v4().to_string(),
            version: 0,
            material_name: material_name.to_string(),
            material_type_id: material_type_id.to_string(),
            genre_id: genre_id.to_string(),
            out_of_circulation_since: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn in_circulation(&self) -> bool {
        self.out_of_circulation_since.is_none()
    }
}

impl Identifiable for MaterialEntity {
    fn id(&self) -> String {
        self.material_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::materials::domain::model::{MaterialEntity, MaterialTypeEntity, MAX_CHECKOUT_DAYS};

    #[test]
    fn test_should_build_material() {
        let mut material = MaterialEntity::new("National Geographic", "periodical", "history");
        assert_eq!("periodical", material.material_type_id.as_str());
        assert!(material.in_circulation());
        material.out_of_circulation_since = Some(Utc::now().naive_utc());
        assert!(!material.in_circulation());
    }

    #[test]
    fn test_should_validate_checkout_days() {
        assert!(MaterialTypeEntity::new("Book", 14).validate().is_ok());
        assert!(MaterialTypeEntity::new("Broken", 0).validate().is_err());
        assert!(MaterialTypeEntity::new("Broken", -3).validate().is_err());
        assert!(MaterialTypeEntity::new("Archive", MAX_CHECKOUT_DAYS).validate().is_ok());
        assert!(MaterialTypeEntity::new("Archive", MAX_CHECKOUT_DAYS + 1).validate().is_err());
        assert!(MaterialTypeEntity::new("Archive", i64::MAX / 86_400 + 1).validate().is_err());
    }
}
