use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::checkout::dto::CheckoutDto;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// PatronDto abstracts a library member, optionally with their checkouts and balance.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PatronDto {
    pub patron_id: String,
    pub version: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checkouts: Vec<CheckoutDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PatronDto {
    pub(crate) fn new(first_name: &str, last_name: &str, address: &str, email: &str) -> Self {
        Self {
            patron_id: Uuid::new_v4().to_string(),
            version: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: address.to_string(),
            email: email.to_string(),
            is_active: true,
            checkouts: vec![],
            balance: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for PatronDto {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::patrons::dto::PatronDto;

    #[test]
    fn test_should_build_patron() {
        let patron = PatronDto::new("Gator", "Golf", "123 Main St", "john@example.com");
        assert_eq!("john@example.com", patron.email.as_str());
        assert!(patron.is_active);
        assert_eq!(None, patron.balance);
        let json = serde_json::to_value(&patron).expect("should serialize");
        assert!(json.get("balance").is_none());
    }
}
