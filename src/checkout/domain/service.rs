use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::fees::FeePolicy;
use crate::checkout::domain::lifecycle::{mark_returned, newly_settled, open_checkout};
use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::domain::overdue::find_overdue;
use crate::checkout::dto::CheckoutDto;
use crate::checkout::repository::CheckoutRepository;
use crate::checkout::repository::loan_resolver::LoanResolver;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{fetch_all, predicate_of};
use crate::materials::domain::availability::is_available;
use crate::materials::repository::MaterialRepository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::PatronRepository;

pub(crate) struct CheckoutServiceImpl {
    branch_id: String,
    fee_policy: FeePolicy,
    checkout_repository: Box<dyn CheckoutRepository>,
    material_repository: Box<dyn MaterialRepository>,
    patron_repository: Box<dyn PatronRepository>,
    loan_resolver: LoanResolver,
    clock: Arc<dyn Clock>,
}

impl CheckoutServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      checkout_repository: Box<dyn CheckoutRepository>,
                      material_repository: Box<dyn MaterialRepository>,
                      patron_repository: Box<dyn PatronRepository>,
                      loan_resolver: LoanResolver,
                      clock: Arc<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            fee_policy: FeePolicy::from(config),
            checkout_repository,
            material_repository,
            patron_repository,
            loan_resolver,
            clock,
        }
    }

    async fn with_fees(&self, mut checkouts: Vec<CheckoutEntity>, today: NaiveDate) -> LibraryResult<Vec<CheckoutDto>> {
        checkouts.sort_by(|a, b| (a.checkout_date, &a.checkout_id).cmp(&(b.checkout_date, &b.checkout_id)));
        let loans = self.loan_resolver.resolve(checkouts).await?;
        Ok(loans.iter().map(|loan| CheckoutDto::from_loan(loan, today, &self.fee_policy)).collect())
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn checkout(&self, patron_id: &str, material_id: &str) -> LibraryResult<CheckoutDto> {
        let now = self.clock.now();
        let today = now.date();
        let patron = self.patron_repository.get(patron_id).await?;
        let material = self.material_repository.get(material_id).await?;
        let checkouts = fetch_all(self.checkout_repository.as_ref(),
                                  &predicate_of(&[("material_id", material_id)])).await?;
        if !is_available(&material, &checkouts) {
            return Err(LibraryError::validation(format!("material is not available {}",
                                                        material_id).as_str(), Some("400".to_string())));
        }
        if !patron.is_active {
            tracing::warn!(patron_id = %patron_id, "checkout by inactive patron");
        }
        let checkout = open_checkout(material_id, patron_id, today).stamped(now);
        checkout.validate()?;
        self.checkout_repository.create(&checkout).await?;
        tracing::info!(branch_id = %self.branch_id, checkout_id = %checkout.checkout_id,
            material_id = %material_id, patron_id = %patron_id, checkout_date = %today, "material checked out");
        let loan = self.loan_resolver.resolve_one(checkout).await?;
        Ok(CheckoutDto::from_loan(&loan, today, &self.fee_policy).with_patron(&patron))
    }

    async fn returned(&self, checkout_id: &str) -> LibraryResult<CheckoutDto> {
        let now = self.clock.now();
        let today = now.date();
        let existing = self.checkout_repository.get(checkout_id).await?;
        let mut returned = mark_returned(&existing, today)?;
        returned.updated_at = now;
        returned.validate()?;
        self.checkout_repository.update(&returned).await?;
        let mut loan = self.loan_resolver.resolve_one(returned).await?;
        loan.checkout.version += 1;
        let dto = CheckoutDto::from_loan(&loan, today, &self.fee_policy);
        tracing::info!(branch_id = %self.branch_id, checkout_id = %checkout_id, return_date = %today,
            late_fee = ?dto.late_fee, "material returned");
        Ok(dto)
    }

    async fn find_checkouts(&self) -> LibraryResult<Vec<CheckoutDto>> {
        let today = self.clock.today();
        let checkouts = fetch_all(self.checkout_repository.as_ref(), &HashMap::new()).await?;
        self.with_fees(checkouts, today).await
    }

    async fn query_overdue(&self) -> LibraryResult<Vec<CheckoutDto>> {
        let today = self.clock.today();
        let open: Vec<CheckoutEntity> = fetch_all(self.checkout_repository.as_ref(), &HashMap::new()).await?
            .into_iter()
            .filter(CheckoutEntity::is_open)
            .collect();
        let loans = find_overdue(self.loan_resolver.resolve(open).await?, today);

        let mut patrons: HashMap<String, PatronEntity> = HashMap::new();
        let mut res = Vec::with_capacity(loans.len());
        for loan in &loans {
            let patron_id = &loan.checkout.patron_id;
            if !patrons.contains_key(patron_id) {
                let patron = self.patron_repository.get(patron_id.as_str()).await?;
                patrons.insert(patron_id.clone(), patron);
            }
            res.push(CheckoutDto::from_loan(loan, today, &self.fee_policy).with_patron(&patrons[patron_id]));
        }
        tracing::info!(branch_id = %self.branch_id, today = %today, count = res.len(), "overdue checkouts found");
        Ok(res)
    }

    async fn settle_payments(&self, patron_id: &str) -> LibraryResult<Vec<CheckoutDto>> {
        let _ = self.patron_repository.get(patron_id).await?;
        let checkouts = fetch_all(self.checkout_repository.as_ref(),
                                  &predicate_of(&[("patron_id", patron_id)])).await?;
        let now = self.clock.now();
        let settled: Vec<CheckoutEntity> = newly_settled(&checkouts).into_iter().map(|mut c| {
            c.updated_at = now;
            c
        }).collect();
        if settled.is_empty() {
            return Ok(vec![]);
        }
        self.checkout_repository.update_all(&settled).await?;
        tracing::info!(branch_id = %self.branch_id, patron_id = %patron_id, count = settled.len(), "checkouts settled");
        let stored = settled.into_iter().map(|mut c| {
            c.version += 1;
            c
        }).collect();
        self.with_fees(stored, now.date()).await
    }
}
