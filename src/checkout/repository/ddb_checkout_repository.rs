use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, TransactWriteItem, Update};
use chrono::{NaiveDate, Utc};

use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::repository::CheckoutRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, filter_value, from_ddb, MAX_TRANSACT_ITEMS, opt_string_day, parse_bool_attribute, parse_date_attribute, parse_day_attribute, parse_item, parse_number_attribute, parse_string_attribute, scan_table, string_date, to_ddb_page};

const UPDATE_EXPRESSION: &str = "SET version = :version, return_date = :return_date, paid = :paid, updated_at = :updated_at";
const VERSION_CONDITION: &str = "attribute_exists(version) AND version = :old_version";

#[derive(Debug)]
pub(crate) struct DDBCheckoutRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBCheckoutRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    fn update_values(entity: &CheckoutEntity) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (":old_version".to_string(), AttributeValue::N(entity.version.to_string())),
            (":version".to_string(), AttributeValue::N((entity.version + 1).to_string())),
            (":return_date".to_string(), opt_string_day(entity.return_date)),
            (":paid".to_string(), AttributeValue::Bool(entity.paid)),
            (":updated_at".to_string(), string_date(Utc::now().naive_utc())),
        ])
    }
}

#[async_trait]
impl Repository<CheckoutEntity> for DDBCheckoutRepository {
    async fn create(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(checkout_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("checkout_id", AttributeValue::S(entity.checkout_id.clone()))
            .update_expression(UPDATE_EXPRESSION)
            .set_expression_attribute_values(Some(Self::update_values(entity)))
            .condition_expression(VERSION_CONDITION)
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<CheckoutEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("checkout_id = :checkout_id")
            .expression_attribute_values(":checkout_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            match req.items().and_then(|items| items.first()) {
                Some(map) => Ok(CheckoutEntity::from(map)),
                None => Err(LibraryError::not_found(format!("checkout not found for {}", id).as_str())),
            }
        })
    }

    // checkouts are indexed by patron and material, other predicates fall back to a scan
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<CheckoutEntity>> {
        let Some(patron_id) = predicate.get("patron_id") else {
            let (items, last_key) = scan_table(&self.client, self.table_name.as_str(), predicate, page, page_size).await?;
            let records = items.iter().map(CheckoutEntity::from).collect();
            return Ok(from_ddb(page, page_size, last_key.as_ref(), records));
        };
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(to_ddb_page(page, &HashMap::new()))
            .expression_attribute_values(":patron_id", AttributeValue::S(patron_id.to_string()));
        let mut key_cond = String::from("patron_id = :patron_id");
        if let Some(material_id) = predicate.get("material_id") {
            key_cond.push_str(" AND material_id = :material_id");
            request = request.expression_attribute_values(":material_id", AttributeValue::S(material_id.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != "patron_id" && k != "material_id" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), filter_value(v));
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            let records = req.items().unwrap_or_default().iter()
                .map(CheckoutEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl CheckoutRepository for DDBCheckoutRepository {
    // a single transaction holds at most MAX_TRANSACT_ITEMS updates, larger batches are
    // committed one transaction per chunk
    async fn update_all(&self, entities: &[CheckoutEntity]) -> LibraryResult<usize> {
        if entities.len() > MAX_TRANSACT_ITEMS {
            tracing::warn!(count = entities.len(), "checkout batch exceeds a single transaction");
        }
        let mut total = 0;
        for chunk in entities.chunks(MAX_TRANSACT_ITEMS) {
            let mut request = self.client.transact_write_items();
            for entity in chunk {
                let update = Update::builder()
                    .table_name(self.table_name.as_str())
                    .key("checkout_id", AttributeValue::S(entity.checkout_id.clone()))
                    .update_expression(UPDATE_EXPRESSION)
                    .set_expression_attribute_values(Some(Self::update_values(entity)))
                    .condition_expression(VERSION_CONDITION)
                    .build();
                request = request.transact_items(TransactWriteItem::builder().update(update).build());
            }
            request.send().await.map_err(LibraryError::from)?;
            total += chunk.len();
        }
        Ok(total)
    }
}

impl From<&HashMap<String, AttributeValue>> for CheckoutEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        CheckoutEntity {
            checkout_id: parse_string_attribute("checkout_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            material_id: parse_string_attribute("material_id", map).unwrap_or_default(),
            patron_id: parse_string_attribute("patron_id", map).unwrap_or_default(),
            checkout_date: parse_day_attribute("checkout_date", map).unwrap_or(NaiveDate::MIN),
            return_date: parse_day_attribute("return_date", map),
            paid: parse_bool_attribute("paid", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;

    use crate::checkout::domain::lifecycle::{mark_returned, open_checkout, settle_payments};
    use crate::checkout::repository::CheckoutRepository;
    use crate::checkout::repository::ddb_checkout_repository::DDBCheckoutRepository;
    use crate::core::repository::{fetch_all, predicate_of, Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "checkouts").await;
                let _ = create_table(&client, "checkouts", "checkout_id", Some(("patron_id", "material_id"))).await;
                client
            });
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on port 8000"]
    async fn test_should_create_return_checkout() {
        let checkout_repo = DDBCheckoutRepository::new(CLIENT.get().await.clone(), "checkouts", "checkouts_ndx");
        let checkout = open_checkout("material1", "patron1", day(1));
        assert_eq!(1, checkout_repo.create(&checkout).await.expect("should create checkout"));

        let loaded = checkout_repo.get(checkout.checkout_id.as_str()).await.expect("should return checkout");
        assert_eq!(day(1), loaded.checkout_date);
        assert_eq!(None, loaded.return_date);

        let returned = mark_returned(&loaded, day(20)).expect("should return");
        assert_eq!(1, checkout_repo.update(&returned).await.expect("should update checkout"));
        let loaded = checkout_repo.get(checkout.checkout_id.as_str()).await.expect("should return checkout");
        assert_eq!(Some(day(20)), loaded.return_date);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on port 8000"]
    async fn test_should_settle_patron_checkouts() {
        let checkout_repo = DDBCheckoutRepository::new(CLIENT.get().await.clone(), "checkouts", "checkouts_ndx");
        for i in 0..5 {
            let checkout = open_checkout(format!("material{}", i).as_str(), "patron-settle", day(1));
            checkout_repo.create(&checkout).await.expect("should create checkout");
            let returned = mark_returned(&checkout, day(10)).expect("should return");
            checkout_repo.update(&returned).await.expect("should update checkout");
        }
        let checkouts = fetch_all(&checkout_repo, &predicate_of(&[("patron_id", "patron-settle")])).await.expect("should query");
        assert_eq!(5, checkouts.len());
        let settled = settle_payments(&checkouts);
        assert_eq!(5, checkout_repo.update_all(&settled).await.expect("should settle"));
        let paid = fetch_all(&checkout_repo, &predicate_of(&[("patron_id", "patron-settle"), ("paid", "true")])).await.expect("should query");
        assert_eq!(5, paid.len());
    }
}
