pub mod balance;
pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::patrons::dto::PatronDto;

#[async_trait]
pub(crate) trait PatronService: Sync + Send {
    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn find_patrons(&self) -> LibraryResult<Vec<PatronDto>>;
    // find_patron_by_id loads the patron with every checkout, its late fee and the balance
    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto>;
    async fn update_contact(&self, id: &str, address: Option<&str>, email: Option<&str>) -> LibraryResult<PatronDto>;
    async fn toggle_active(&self, id: &str) -> LibraryResult<PatronDto>;
}
