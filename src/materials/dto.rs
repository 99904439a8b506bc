use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::checkout::dto::CheckoutDto;
use crate::core::domain::Identifiable;
use crate::utils::date::{opt_serializer, serializer};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MaterialTypeDto {
    pub material_type_id: String,
    pub name: String,
    pub checkout_days: i64,
}

impl MaterialTypeDto {
    pub fn new(name: &str, checkout_days: i64) -> Self {
        Self {
            material_type_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            checkout_days,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct GenreDto {
    pub genre_id: String,
    pub name: String,
}

impl GenreDto {
    pub fn new(name: &str) -> Self {
        Self {
            genre_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

// MaterialDto is a material with whatever relations the caller asked for.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MaterialDto {
    pub material_id: String,
    pub version: i64,
    pub material_name: String,
    pub material_type_id: String,
    pub genre_id: String,
    #[serde(default, with = "opt_serializer")]
    pub out_of_circulation_since: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<MaterialTypeDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<GenreDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checkouts: Vec<CheckoutDto>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MaterialDto {
    pub fn new(material_name: &str, material_type_id: &str, genre_id: &str) -> Self {
        Self {
            material_id: Uuid::new_v4().to_string(),
            version: 0,
            material_name: material_name.to_string(),
            material_type_id: material_type_id.to_string(),
            genre_id: genre_id.to_string(),
            out_of_circulation_since: None,
            material_type: None,
            genre: None,
            checkouts: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MaterialDto {
    fn id(&self) -> String {
        self.material_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
