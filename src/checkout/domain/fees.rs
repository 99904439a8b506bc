use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::checkout::domain::model::CheckoutEntity;
use crate::core::domain::Configuration;

// FeePolicy carries the fee settings of a branch into the pure fee functions.
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) struct FeePolicy {
    pub rate_per_day: Decimal,
    pub balance_includes_paid: bool,
}

impl FeePolicy {
    pub fn new(rate_per_day: Decimal, balance_includes_paid: bool) -> Self {
        Self {
            rate_per_day,
            balance_includes_paid,
        }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy::new(dec!(0.50), true)
    }
}

impl From<&Configuration> for FeePolicy {
    fn from(config: &Configuration) -> Self {
        FeePolicy::new(config.late_fee_per_day, config.balance_includes_paid)
    }
}

// due_date saturates at the calendar bounds instead of overflowing.
pub(crate) fn due_date(checkout_date: NaiveDate, checkout_days: i64) -> NaiveDate {
    let days = Days::new(checkout_days.unsigned_abs());
    if checkout_days >= 0 {
        checkout_date.checked_add_days(days).unwrap_or(NaiveDate::MAX)
    } else {
        checkout_date.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
    }
}

// days_late counts whole days between the due date and the return date, or `today`
// while the checkout is still open. Negative when the material is not due yet.
pub(crate) fn days_late(checkout: &CheckoutEntity, checkout_days: i64, today: NaiveDate) -> i64 {
    let end = checkout.return_date.unwrap_or(today);
    (end - due_date(checkout.checkout_date, checkout_days)).num_days()
}

/// Computes the late fee owed for a checkout.
///
/// Returns `None` when the checkout is not late rather than a zero amount. An open
/// checkout is evaluated against `today`, so the estimate grows every day it stays out.
pub(crate) fn compute_late_fee(checkout: &CheckoutEntity, checkout_days: i64,
                               today: NaiveDate, policy: &FeePolicy) -> Option<Decimal> {
    let late = days_late(checkout, checkout_days, today);
    if late > 0 {
        Some(Decimal::from(late) * policy.rate_per_day)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;
    use crate::checkout::domain::fees::{compute_late_fee, days_late, due_date, FeePolicy};
    use crate::checkout::domain::model::CheckoutEntity;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    fn returned_on(n: i64) -> CheckoutEntity {
        let mut checkout = CheckoutEntity::new("material", "patron", day(0));
        checkout.return_date = Some(day(n));
        checkout
    }

    #[test]
    fn test_should_add_calendar_days() {
        assert_eq!(day(14), due_date(day(0), 14));
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                   due_date(NaiveDate::from_ymd_opt(2024, 2, 22).unwrap(), 8));
    }

    #[test]
    fn test_should_saturate_huge_loan_period() {
        let checkout = CheckoutEntity::new("material", "patron", day(0));
        assert_eq!(NaiveDate::MAX, due_date(day(0), i64::MAX / 86_400 + 1));
        assert_eq!(NaiveDate::MAX, due_date(day(0), i64::MAX));
        assert_eq!(None, compute_late_fee(&checkout, i64::MAX / 86_400 + 1, day(30), &FeePolicy::default()));
        assert_eq!(day(-3), due_date(day(0), -3));
    }

    #[test]
    fn test_should_charge_returned_late() {
        let fee = compute_late_fee(&returned_on(20), 14, day(100), &FeePolicy::default());
        assert_eq!(Some(dec!(3.00)), fee);
    }

    #[test]
    fn test_should_not_charge_returned_early() {
        let checkout = returned_on(10);
        assert_eq!(-4, days_late(&checkout, 14, day(100)));
        assert_eq!(None, compute_late_fee(&checkout, 14, day(100), &FeePolicy::default()));
    }

    #[test]
    fn test_should_not_charge_on_due_date() {
        assert_eq!(None, compute_late_fee(&returned_on(14), 14, day(100), &FeePolicy::default()));
        assert_eq!(Some(dec!(0.50)), compute_late_fee(&returned_on(15), 14, day(100), &FeePolicy::default()));
    }

    #[test]
    fn test_should_estimate_open_checkout_against_today() {
        let checkout = CheckoutEntity::new("material", "patron", day(0));
        let policy = FeePolicy::default();
        assert_eq!(Some(dec!(8.00)), compute_late_fee(&checkout, 14, day(30), &policy));
        // the estimate moves with the clock
        assert_eq!(Some(dec!(8.50)), compute_late_fee(&checkout, 14, day(31), &policy));
        assert_eq!(None, compute_late_fee(&checkout, 14, day(14), &policy));
    }

    #[test]
    fn test_should_ignore_today_once_returned() {
        let checkout = returned_on(20);
        let policy = FeePolicy::default();
        assert_eq!(compute_late_fee(&checkout, 14, day(21), &policy),
                   compute_late_fee(&checkout, 14, day(400), &policy));
    }

    #[test]
    fn test_should_apply_configured_rate() {
        let policy = FeePolicy::new(dec!(1.25), true);
        assert_eq!(Some(dec!(7.50)), compute_late_fee(&returned_on(20), 14, day(20), &policy));
    }

    #[test]
    fn test_should_match_formula_for_overdue_range() {
        let policy = FeePolicy::default();
        let checkout = CheckoutEntity::new("material", "patron", day(0));
        for checkout_days in [7, 10, 14] {
            for today in (checkout_days + 1)..(checkout_days + 40) {
                let expected = rust_decimal::Decimal::from(today - checkout_days) * dec!(0.50);
                assert_eq!(Some(expected), compute_late_fee(&checkout, checkout_days, day(today), &policy));
            }
        }
    }
}
