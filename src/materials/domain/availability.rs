use std::collections::HashSet;
use crate::checkout::domain::model::CheckoutEntity;
use crate::materials::domain::model::MaterialEntity;

// A material is available while it is in circulation and no open checkout references it.
// Availability is always derived from the checkouts at hand, it is never stored.
pub(crate) fn is_available(material: &MaterialEntity, checkouts: &[CheckoutEntity]) -> bool {
    material.in_circulation() && !checkouts.iter()
        .any(|c| c.material_id == material.material_id && c.is_open())
}

// available_materials keeps the materials of `materials` that are available given `checkouts`,
// which may reference any material.
pub(crate) fn available_materials(materials: Vec<MaterialEntity>,
                                  checkouts: &[CheckoutEntity]) -> Vec<MaterialEntity> {
    let checked_out: HashSet<&str> = checkouts.iter()
        .filter(|c| c.is_open())
        .map(|c| c.material_id.as_str())
        .collect();
    materials.into_iter()
        .filter(|m| m.in_circulation() && !checked_out.contains(m.material_id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use crate::checkout::domain::lifecycle::{mark_returned, open_checkout};
    use crate::materials::domain::availability::{available_materials, is_available};
    use crate::materials::domain::model::MaterialEntity;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_should_be_available_without_checkouts() {
        let material = MaterialEntity::new("Clifford: The Puppy Years", "book", "scifi");
        assert!(is_available(&material, &[]));
    }

    #[test]
    fn test_should_follow_checkout_and_return() {
        let material = MaterialEntity::new("Clifford: The Puppy Years", "book", "scifi");
        let open = open_checkout(material.material_id.as_str(), "patron", day(0));
        assert!(!is_available(&material, &[open.clone()]));

        let returned = mark_returned(&open, day(3)).expect("should return");
        assert!(is_available(&material, &[returned.clone()]));

        let again = open_checkout(material.material_id.as_str(), "other", day(4));
        assert!(!is_available(&material, &[returned, again]));
    }

    #[test]
    fn test_should_ignore_other_materials() {
        let material = MaterialEntity::new("DC Comics", "periodical", "mystery");
        let other = open_checkout("another-material", "patron", day(0));
        assert!(is_available(&material, &[other]));
    }

    #[test]
    fn test_should_exclude_out_of_circulation() {
        let mut material = MaterialEntity::new("Infest", "cd", "romance");
        material.out_of_circulation_since = Some(Utc::now().naive_utc());
        assert!(!is_available(&material, &[]));
    }

    #[test]
    fn test_should_filter_available_materials() {
        let free = MaterialEntity::new("free", "book", "scifi");
        let busy = MaterialEntity::new("busy", "book", "scifi");
        let mut retired = MaterialEntity::new("retired", "book", "scifi");
        retired.out_of_circulation_since = Some(Utc::now().naive_utc());
        let checkouts = vec![
            mark_returned(&open_checkout(free.material_id.as_str(), "p", day(0)), day(1)).unwrap(),
            open_checkout(busy.material_id.as_str(), "p", day(2)),
        ];
        let available = available_materials(vec![free.clone(), busy, retired], &checkouts);
        assert_eq!(vec![free], available);
    }
}
