use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// PatronEntity abstracts a library member; an inactive patron is suspended.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PatronEntity {
    pub patron_id: String,
    pub version: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub is_active: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PatronEntity {
    pub fn new(first_name: &str, last_name: &str, address: &str, email: &str) -> Self {
        Self {
            patron_id: Uuid::new_v4().to_string(),
            version: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: address.to_string(),
            email: email.to_string(),
            is_active: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for PatronEntity {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
