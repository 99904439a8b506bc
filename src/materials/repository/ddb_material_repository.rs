use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::materials::domain::model::MaterialEntity;
use crate::materials::repository::MaterialRepository;
use crate::utils::ddb::{add_filter_expr, filter_value, from_ddb, opt_string_date, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, scan_table, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBMaterialRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBMaterialRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<MaterialEntity> for DDBMaterialRepository {
    async fn create(&self, entity: &MaterialEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(material_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &MaterialEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("material_id", AttributeValue::S(entity.material_id.clone()))
            .update_expression("SET version = :version, material_name = :material_name, out_of_circulation_since = :out_of_circulation_since, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":material_name", AttributeValue::S(entity.material_name.clone()))
            .expression_attribute_values(":out_of_circulation_since", opt_string_date(entity.out_of_circulation_since))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn get(&self, id: &str) -> LibraryResult<MaterialEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("material_id = :material_id")
            .expression_attribute_values(":material_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            match req.items().and_then(|items| items.first()) {
                Some(map) => Ok(MaterialEntity::from(map)),
                None => Err(LibraryError::not_found(format!("material not found for {}", id).as_str())),
            }
        })
    }

    // the index is keyed by material type and genre, everything else is a filter
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<MaterialEntity>> {
        let Some(material_type_id) = predicate.get("material_type_id") else {
            let (items, last_key) = scan_table(&self.client, self.table_name.as_str(), predicate, page, page_size).await?;
            let records = items.iter().map(MaterialEntity::from).collect();
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
            .expression_attribute_values(":material_type_id", AttributeValue::S(material_type_id.to_string()));
        let mut key_cond = String::from("material_type_id = :material_type_id");
        if let Some(genre_id) = predicate.get("genre_id") {
            key_cond.push_str(" AND genre_id = :genre_id");
            request = request.expression_attribute_values(":genre_id", AttributeValue::S(genre_id.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != "material_type_id" && k != "genre_id" {
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
                .map(MaterialEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

impl MaterialRepository for DDBMaterialRepository {}

impl From<&HashMap<String, AttributeValue>> for MaterialEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        MaterialEntity {
            material_id: parse_string_attribute("material_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            material_name: parse_string_attribute("material_name", map).unwrap_or_default(),
            material_type_id: parse_string_attribute("material_type_id", map).unwrap_or_default(),
            genre_id: parse_string_attribute("genre_id", map).unwrap_or_default(),
            out_of_circulation_since: parse_date_attribute("out_of_circulation_since", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}
