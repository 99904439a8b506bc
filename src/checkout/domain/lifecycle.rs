use chrono::NaiveDate;
use crate::checkout::domain::model::CheckoutEntity;
use crate::core::library::{LibraryError, LibraryResult};

// open_checkout starts a loan on `today`, unreturned and unpaid.
pub(crate) fn open_checkout(material_id: &str, patron_id: &str, today: NaiveDate) -> CheckoutEntity {
    CheckoutEntity::new(material_id, patron_id, today)
}

// mark_returned closes an open checkout on `today`. A checkout is returned at most once.
// Timestamps are left to the caller.
pub(crate) fn mark_returned(checkout: &CheckoutEntity, today: NaiveDate) -> LibraryResult<CheckoutEntity> {
    if let Some(returned) = checkout.return_date {
        return Err(LibraryError::invalid_transition(
            format!("checkout {} was already returned on {}", checkout.checkout_id, returned).as_str()));
    }
    if today < checkout.checkout_date {
        return Err(LibraryError::invariant_violation(
            format!("checkout {} cannot be returned on {} before its checkout date {}",
                    checkout.checkout_id, today, checkout.checkout_date).as_str()));
    }
    let mut returned = checkout.clone();
    returned.return_date = Some(today);
    Ok(returned)
}

// settle_payments marks every returned checkout as paid and leaves open ones untouched.
// Applying it again changes nothing.
pub(crate) fn settle_payments(checkouts: &[CheckoutEntity]) -> Vec<CheckoutEntity> {
    checkouts.iter().map(|checkout| {
        let mut settled = checkout.clone();
        if settled.return_date.is_some() {
            settled.paid = true;
        }
        settled
    }).collect()
}

// newly_settled keeps the checkouts whose paid flag `settle_payments` would flip.
pub(crate) fn newly_settled(checkouts: &[CheckoutEntity]) -> Vec<CheckoutEntity> {
    settle_payments(checkouts).into_iter()
        .zip(checkouts.iter())
        .filter(|(after, before)| after.paid != before.paid)
        .map(|(after, _)| after)
        .collect()
}
