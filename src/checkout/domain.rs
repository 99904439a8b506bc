use async_trait::async_trait;
use crate::checkout::dto::CheckoutDto;
use crate::core::library::LibraryResult;

pub mod fees;
pub mod lifecycle;
pub mod model;
pub mod overdue;
pub mod service;

#[async_trait]
pub(crate) trait CheckoutService: Sync + Send {
    async fn checkout(&self, patron_id: &str, material_id: &str) -> LibraryResult<CheckoutDto>;
    async fn returned(&self, checkout_id: &str) -> LibraryResult<CheckoutDto>;
    async fn find_checkouts(&self) -> LibraryResult<Vec<CheckoutDto>>;
    async fn query_overdue(&self) -> LibraryResult<Vec<CheckoutDto>>;
    // settle_payments marks every returned checkout of the patron as paid in one batch
    async fn settle_payments(&self, patron_id: &str) -> LibraryResult<Vec<CheckoutDto>>;
}
