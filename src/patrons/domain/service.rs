use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use crate::checkout::domain::fees::FeePolicy;
use crate::checkout::dto::CheckoutDto;
use crate::checkout::repository::CheckoutRepository;
use crate::checkout::repository::loan_resolver::LoanResolver;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{fetch_all, predicate_of};
use crate::patrons::domain::balance::compute_balance;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;
use crate::patrons::repository::PatronRepository;

pub(crate) struct PatronServiceImpl {
    fee_policy: FeePolicy,
    patron_repository: Box<dyn PatronRepository>,
    checkout_repository: Box<dyn CheckoutRepository>,
    loan_resolver: LoanResolver,
    clock: Arc<dyn Clock>,
}

impl PatronServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      patron_repository: Box<dyn PatronRepository>,
                      checkout_repository: Box<dyn CheckoutRepository>,
                      loan_resolver: LoanResolver,
                      clock: Arc<dyn Clock>) -> Self {
        PatronServiceImpl {
            fee_policy: FeePolicy::from(config),
            patron_repository,
            checkout_repository,
            loan_resolver,
            clock,
        }
    }

    async fn save(&self, patron: &PatronEntity) -> LibraryResult<PatronDto> {
        self.patron_repository.update(patron).await?;
        let mut dto = PatronDto::from(patron);
        dto.version += 1;
        Ok(dto)
    }
}

#[async_trait]
impl PatronService for PatronServiceImpl {
    async fn add_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        let entity = PatronEntity::from(patron);
        self.patron_repository.create(&entity).await?;
        tracing::info!(patron_id = %entity.patron_id, "patron added");
        Ok(PatronDto::from(&entity))
    }

    async fn find_patrons(&self) -> LibraryResult<Vec<PatronDto>> {
        let mut all = fetch_all(self.patron_repository.as_ref(), &HashMap::new()).await?;
        if all.is_empty() {
            return Err(LibraryError::not_found("no patrons found"));
        }
        all.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(all.iter().map(PatronDto::from).collect())
    }

    async fn find_patron_by_id(&self, id: &str) -> LibraryResult<PatronDto> {
        let today = self.clock.today();
        let patron = self.patron_repository.get(id).await?;
        let mut checkouts = fetch_all(self.checkout_repository.as_ref(),
                                      &predicate_of(&[("patron_id", id)])).await?;
        checkouts.sort_by(|a, b| a.checkout_date.cmp(&b.checkout_date));
        let loans = self.loan_resolver.resolve(checkouts).await?;

        let mut dto = PatronDto::from(&patron);
        dto.balance = Some(compute_balance(&loans, today, &self.fee_policy));
        dto.checkouts = loans.iter()
            .map(|loan| CheckoutDto::from_loan(loan, today, &self.fee_policy))
            .collect();
        tracing::debug!(patron_id = %id, checkouts = dto.checkouts.len(), "patron balance computed");
        Ok(dto)
    }

    async fn update_contact(&self, id: &str, address: Option<&str>, email: Option<&str>) -> LibraryResult<PatronDto> {
        let mut patron = self.patron_repository.get(id).await?;
        if let Some(address) = address {
            patron.address = address.to_string();
        }
        if let Some(email) = email {
            patron.email = email.to_string();
        }
        let dto = self.save(&patron).await?;
        tracing::info!(patron_id = %id, address = address.is_some(), email = email.is_some(), "patron contact updated");
        Ok(dto)
    }

    async fn toggle_active(&self, id: &str) -> LibraryResult<PatronDto> {
        let mut patron = self.patron_repository.get(id).await?;
        patron.is_active = !patron.is_active;
        let dto = self.save(&patron).await?;
        tracing::info!(patron_id = %id, is_active = patron.is_active, "patron status toggled");
        Ok(dto)
    }
}

impl From<&PatronEntity> for PatronDto {
    fn from(other: &PatronEntity) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            address: other.address.to_string(),
            email: other.email.to_string(),
            is_active: other.is_active,
            checkouts: vec![],
            balance: None,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&PatronDto> for PatronEntity {
    fn from(other: &PatronDto) -> Self {
        Self {
            patron_id: other.patron_id.to_string(),
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            address: other.address.to_string(),
            email: other.email.to_string(),
            is_active: other.is_active,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
