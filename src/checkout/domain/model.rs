use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult};
use crate::materials::domain::model::{MaterialEntity, MaterialTypeEntity};
use crate::utils::date::serializer;

// CheckoutEntity abstracts a single loan of one material to one patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct CheckoutEntity {
    pub checkout_id: String,
    pub version: i64,
    pub material_id: String,
    pub patron_id: String,
    pub checkout_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub paid: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutEntity {
    // timestamps start at midnight of the checkout date until the caller stamps them
    pub fn new(material_id: &str, patron_id: &str, checkout_date: NaiveDate) -> Self {
        let opened_at = checkout_date.and_time(NaiveTime::default());
        Self {
            checkout_id: Uuid::new_v4().to_string(),
            version: 0,
            material_id: material_id.to_string(),
            patron_id: patron_id.to_string(),
            checkout_date,
            return_date: None,
            paid: false,
            created_at: opened_at,
            updated_at: opened_at,
        }
    }

    pub fn stamped(mut self, now: NaiveDateTime) -> Self {
        self.created_at = now;
        self.updated_at = now;
        self
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn status(&self) -> CheckoutStatus {
        match (self.return_date, self.paid) {
            (None, _) => CheckoutStatus::Open,
            (Some(_), false) => CheckoutStatus::Returned,
            (Some(_), true) => CheckoutStatus::Settled,
        }
    }

    // validate checks the record rules that hold for every stored checkout
    pub fn validate(&self) -> LibraryResult<()> {
        if let Some(return_date) = self.return_date {
            if return_date < self.checkout_date {
                return Err(LibraryError::invariant_violation(
                    format!("checkout {} return date {} precedes checkout date {}",
                            self.checkout_id, return_date, self.checkout_date).as_str()));
            }
        } else if self.paid {
            return Err(LibraryError::invariant_violation(
                format!("checkout {} is paid while still open", self.checkout_id).as_str()));
        }
        Ok(())
    }
}

impl Identifiable for CheckoutEntity {
    fn id(&self) -> String {
        self.checkout_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// Loan is a checkout resolved together with its material and the material's type,
// so fee and overdue rules never have to look anything up.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Loan {
    pub checkout: CheckoutEntity,
    pub material: MaterialEntity,
    pub material_type: MaterialTypeEntity,
}

impl Loan {
    pub fn new(checkout: CheckoutEntity, material: MaterialEntity, material_type: MaterialTypeEntity) -> Self {
        Self {
            checkout,
            material,
            material_type,
        }
    }

    pub fn checkout_days(&self) -> i64 {
        self.material_type.checkout_days
    }
}
