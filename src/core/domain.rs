use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts config options for the circulation desk
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    // late fee accrued for every day past the due date
    pub late_fee_per_day: Decimal,
    // whether fees of checkouts that were already settled still count towards the balance
    pub balance_includes_paid: bool,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            late_fee_per_day: dec!(0.50),
            balance_includes_paid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use crate::core::domain::Configuration;

    #[test]
    fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!(dec!(0.50), config.late_fee_per_day);
        assert!(config.balance_includes_paid);
    }
}
