use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::PatronRepository;
use crate::utils::ddb::{add_filter_expr, filter_value, from_ddb, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, scan_table, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBPatronRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBPatronRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<PatronEntity> for DDBPatronRepository {
    async fn create(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(patron_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("patron_id", AttributeValue::S(entity.patron_id.clone()))
            .update_expression("SET version = :version, first_name = :first_name, last_name = :last_name, address = :address, email = :email, is_active = :is_active, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":first_name", AttributeValue::S(entity.first_name.clone()))
            .expression_attribute_values(":last_name", AttributeValue::S(entity.last_name.clone()))
            .expression_attribute_values(":address", AttributeValue::S(entity.address.clone()))
            .expression_attribute_values(":email", AttributeValue::S(entity.email.clone()))
            .expression_attribute_values(":is_active", AttributeValue::Bool(entity.is_active))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<PatronEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("patron_id = :patron_id")
            .expression_attribute_values(":patron_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            match req.items().and_then(|items| items.first()) {
                Some(map) => Ok(PatronEntity::from(map)),
                None => Err(LibraryError::not_found(format!("patron not found for {}", id).as_str())),
            }
        })
    }

    // patrons are indexed by email, other predicates fall back to a scan
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<PatronEntity>> {
        let Some(email) = predicate.get("email") else {
            let (items, last_key) = scan_table(&self.client, self.table_name.as_str(), predicate, page, page_size).await?;
            let records = items.iter().map(PatronEntity::from).collect();
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
            .key_condition_expression("email = :email")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()));
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != "email" {
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
                .map(PatronEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

impl PatronRepository for DDBPatronRepository {}

impl From<&HashMap<String, AttributeValue>> for PatronEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        PatronEntity {
            patron_id: parse_string_attribute("patron_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            first_name: parse_string_attribute("first_name", map).unwrap_or_default(),
            last_name: parse_string_attribute("last_name", map).unwrap_or_default(),
            address: parse_string_attribute("address", map).unwrap_or_default(),
            email: parse_string_attribute("email", map).unwrap_or_default(),
            is_active: parse_bool_attribute("is_active", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::core::repository::{fetch_all, predicate_of, Repository, RepositoryStore};
    use crate::patrons::domain::model::PatronEntity;
    use crate::patrons::repository::ddb_patron_repository::DDBPatronRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "patrons").await;
                let _ = create_table(&client, "patrons", "patron_id", Some(("email", "last_name"))).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on port 8000"]
    async fn test_should_create_update_patron() {
        let patron_repo = DDBPatronRepository::new(CLIENT.get().await.clone(), "patrons", "patrons_ndx");
        let mut patron = PatronEntity::new("Gator", "Golf", "123 Main St", "john@example.com");
        assert_eq!(1, patron_repo.create(&patron).await.expect("should create patron"));

        patron.address = "789 Oak Ave".to_string();
        patron.is_active = false;
        assert_eq!(1, patron_repo.update(&patron).await.expect("should update patron"));

        let loaded = patron_repo.get(patron.patron_id.as_str()).await.expect("should return patron");
        assert_eq!("789 Oak Ave", loaded.address.as_str());
        assert!(!loaded.is_active);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on port 8000"]
    async fn test_should_query_patrons_by_email() {
        let patron_repo = DDBPatronRepository::new(CLIENT.get().await.clone(), "patrons", "patrons_ndx");
        for i in 0..25 {
            let patron = PatronEntity::new("Chicken", format!("Limbo{}", i).as_str(), "456 Elm St", "ddb-query@example.com");
            let _ = patron_repo.create(&patron).await.expect("should create patron");
        }
        let all = fetch_all(&patron_repo, &predicate_of(&[("email", "ddb-query@example.com")])).await.expect("should query");
        assert_eq!(25, all.len());
        let active = fetch_all(&patron_repo, &predicate_of(&[("email", "ddb-query@example.com"), ("is_active", "true")])).await.expect("should query");
        assert_eq!(25, active.len());
    }
}
