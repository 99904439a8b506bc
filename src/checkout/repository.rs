pub mod ddb_checkout_repository;
pub mod loan_resolver;

use async_trait::async_trait;
use crate::checkout::domain::model::CheckoutEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::utils::memory::MemoryRepository;

#[async_trait]
pub(crate) trait CheckoutRepository: Repository<CheckoutEntity> {
    // update_all persists every checkout or none of them
    async fn update_all(&self, entities: &[CheckoutEntity]) -> LibraryResult<usize>;
}

#[async_trait]
impl CheckoutRepository for MemoryRepository<CheckoutEntity> {
    async fn update_all(&self, entities: &[CheckoutEntity]) -> LibraryResult<usize> {
        MemoryRepository::update_all(self, entities)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::checkout::domain::lifecycle::{mark_returned, open_checkout, settle_payments};
    use crate::checkout::domain::model::CheckoutEntity;
    use crate::checkout::repository::CheckoutRepository;
    use crate::core::repository::Repository;
    use crate::utils::memory::MemoryRepository;

    #[tokio::test]
    async fn test_should_update_all_or_nothing() {
        let repo: MemoryRepository<CheckoutEntity> = MemoryRepository::isolated("checkouts");
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut returned = vec![];
        for _ in 0..3 {
            let checkout = open_checkout("m", "p", day);
            repo.create(&checkout).await.expect("should create checkout");
            let done = mark_returned(&checkout, day).expect("should return");
            repo.update(&done).await.expect("should update checkout");
            returned.push(repo.get(done.checkout_id.as_str()).await.expect("should load"));
        }
        let mut settled = settle_payments(&returned);
        // a stale version on the last checkout rejects the whole batch
        settled[2].version = 0;
        assert!(CheckoutRepository::update_all(&repo, &settled).await.is_err());
        for checkout in &returned {
            assert!(!repo.get(checkout.checkout_id.as_str()).await.expect("should load").paid);
        }

        let settled = settle_payments(&returned);
        assert_eq!(3, CheckoutRepository::update_all(&repo, &settled).await.expect("should settle"));
        for checkout in &returned {
            assert!(repo.get(checkout.checkout_id.as_str()).await.expect("should load").paid);
        }
    }
}
