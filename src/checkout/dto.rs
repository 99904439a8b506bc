use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::fees::{compute_late_fee, due_date, FeePolicy};
use crate::checkout::domain::model::{CheckoutEntity, Loan};
use crate::core::domain::Identifiable;
use crate::core::library::CheckoutStatus;
use crate::materials::dto::{MaterialDto, MaterialTypeDto};
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::dto::PatronDto;
use crate::utils::date::serializer;

// CheckoutDto is a checkout as shown to callers, with its derived due date and late fee
// when the material type was resolved.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct CheckoutDto {
    pub checkout_id: String,
    pub version: i64,
    pub material_id: String,
    pub patron_id: String,
    pub checkout_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub paid: bool,
    pub checkout_status: CheckoutStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patron: Option<PatronDto>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutDto {
    // from_loan evaluates due date and late fee against `today`
    pub fn from_loan(loan: &Loan, today: NaiveDate, policy: &FeePolicy) -> Self {
        let mut dto = CheckoutDto::from(&loan.checkout);
        let mut material = MaterialDto::from(&loan.material);
        material.material_type = Some(MaterialTypeDto::from(&loan.material_type));
        dto.due_date = Some(due_date(loan.checkout.checkout_date, loan.checkout_days()));
        dto.late_fee = compute_late_fee(&loan.checkout, loan.checkout_days(), today, policy);
        dto.material = Some(material);
        dto
    }

    pub fn with_patron(mut self, patron: &PatronEntity) -> Self {
        self.patron = Some(PatronDto::from(patron));
        self
    }
}

impl From<&CheckoutEntity> for CheckoutDto {
    fn from(other: &CheckoutEntity) -> CheckoutDto {
        CheckoutDto {
            checkout_id: other.checkout_id.to_string(),
            version: other.version,
            material_id: other.material_id.to_string(),
            patron_id: other.patron_id.to_string(),
            checkout_date: other.checkout_date,
            return_date: other.return_date,
            paid: other.paid,
            checkout_status: other.status(),
            due_date: None,
            late_fee: None,
            material: None,
            patron: None,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl Identifiable for CheckoutDto {
    fn id(&self) -> String {
        self.checkout_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use crate::checkout::domain::fees::FeePolicy;
    use crate::checkout::domain::model::{CheckoutEntity, Loan};
    use crate::checkout::dto::CheckoutDto;
    use crate::core::library::CheckoutStatus;
    use crate::materials::domain::model::{MaterialEntity, MaterialTypeEntity};
    use crate::patrons::domain::model::PatronEntity;

    #[test]
    fn test_should_build_from_loan() {
        let material_type = MaterialTypeEntity::new("Book", 14);
        let material = MaterialEntity::new("Clifford", material_type.material_type_id.as_str(), "scifi");
        let patron = PatronEntity::new("Gator", "Golf", "123 Main St", "john@example.com");
        let checkout = CheckoutEntity::new(material.material_id.as_str(), patron.patron_id.as_str(),
                                           NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let loan = Loan::new(checkout, material, material_type);

        let dto = CheckoutDto::from_loan(&loan, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), &FeePolicy::default())
            .with_patron(&patron);
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 15), dto.due_date);
        assert_eq!(Some(dec!(8.00)), dto.late_fee);
        assert_eq!(CheckoutStatus::Open, dto.checkout_status);
        assert_eq!(Some(14), dto.material.as_ref().and_then(|m| m.material_type.as_ref()).map(|t| t.checkout_days));
        assert_eq!(Some("Gator".to_string()), dto.patron.map(|p| p.first_name));
    }

    #[test]
    fn test_should_omit_fee_when_not_late() {
        let checkout = CheckoutEntity::new("m", "p", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let json = serde_json::to_value(CheckoutDto::from(&checkout)).expect("should serialize");
        assert!(json.get("late_fee").is_none());
        assert_eq!("Open", json["checkout_status"]);
        assert_eq!("2024-05-01", json["checkout_date"]);
    }
}
