use chrono::NaiveDate;
use rust_decimal::Decimal;
use crate::checkout::domain::fees::{compute_late_fee, FeePolicy};
use crate::checkout::domain::model::Loan;

/// Sums the late fees accrued across a patron's loans, open or returned.
///
/// Checkouts without a fee count as zero. Fees of checkouts that were already settled
/// are part of the balance unless the policy says otherwise, the balance is the total
/// late-fee liability accrued to date.
pub(crate) fn compute_balance(loans: &[Loan], today: NaiveDate, policy: &FeePolicy) -> Decimal {
    loans.iter()
        .filter(|loan| policy.balance_includes_paid || !loan.checkout.paid)
        .filter_map(|loan| compute_late_fee(&loan.checkout, loan.checkout_days(), today, policy))
        .sum()
}
