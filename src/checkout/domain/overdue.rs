use chrono::NaiveDate;
use crate::checkout::domain::model::{CheckoutEntity, Loan};

// An open checkout is overdue once the days elapsed since checkout exceed the loan period.
pub(crate) fn is_overdue(checkout: &CheckoutEntity, checkout_days: i64, today: NaiveDate) -> bool {
    checkout.is_open() && (today - checkout.checkout_date).num_days() > checkout_days
}

// find_overdue keeps the overdue loans ordered by checkout id.
pub(crate) fn find_overdue(loans: Vec<Loan>, today: NaiveDate) -> Vec<Loan> {
    let mut overdue: Vec<Loan> = loans.into_iter()
        .filter(|loan| is_overdue(&loan.checkout, loan.checkout_days(), today))
        .collect();
    overdue.sort_by(|a, b| a.checkout.checkout_id.cmp(&b.checkout.checkout_id));
    overdue
}
