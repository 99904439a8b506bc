use std::cmp;
use std::collections::HashMap;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::RepositoryStore;
use crate::utils::date::{DATE_FMT, DAY_FMT};

// DynamoDB accepts at most 100 actions in a single transaction
pub(crate) const MAX_TRANSACT_ITEMS: usize = 100;

// create_table builds a table keyed by `pk`, reference tables pass no secondary index.
pub(crate) async fn create_table(client: &Client,
                                 table_name: &str, pk: &str,
                                 gsi_keys: Option<(&str, &str)>) -> LibraryResult<()> {
    let mut request = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(pk)
                .attribute_type(ScalarAttributeType::S)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        );
    if let Some((gsi_pk, gsi_sk)) = gsi_keys {
        let gsi = GlobalSecondaryIndex::builder()
            .index_name(format!("{}_ndx", table_name))
            .key_schema(KeySchemaElement::builder()
                .attribute_name(gsi_pk)
                .key_type(KeyType::Hash).build())
            .key_schema(KeySchemaElement::builder()
                .attribute_name(gsi_sk)
                .key_type(KeyType::Range).build())
            .projection(Projection::builder().projection_type(ProjectionType::All).build())
            .provisioned_throughput(
                ProvisionedThroughput::builder().read_capacity_units(10).write_capacity_units(10).build())
            .build();
        request = request
            .global_secondary_indexes(gsi)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(gsi_pk)
                    .attribute_type(ScalarAttributeType::S)
                    .build(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(gsi_sk)
                    .attribute_type(ScalarAttributeType::S)
                    .build(),
            );
    }

    match request.send().await
    {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to delete {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(LibraryError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

// scan_table walks a table without an index, every predicate entry becomes a filter.
pub(crate) async fn scan_table(client: &Client, table_name: &str,
                               predicate: &HashMap<String, String>,
                               page: Option<&str>, page_size: usize)
                               -> LibraryResult<(Vec<HashMap<String, AttributeValue>>, Option<HashMap<String, AttributeValue>>)> {
    let mut request = client
        .scan()
        .table_name(table_name)
        .limit(cmp::min(page_size, 500) as i32)
        .consistent_read(true)
        .set_exclusive_start_key(to_ddb_page(page, &HashMap::new()));
    let mut filter_expr = String::new();
    for (k, v) in predicate {
        let ks = add_filter_expr(k.as_str(), &mut filter_expr);
        request = request.expression_attribute_values(format!(":{}", ks).as_str(), filter_value(v));
    }
    if !filter_expr.is_empty() {
        request = request.filter_expression(filter_expr);
    }
    let out = request.send().await.map_err(LibraryError::from)?;
    Ok((out.items.clone().unwrap_or_default(), out.last_evaluated_key().cloned()))
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse{:?}", other)),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<String> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        return Some(str.clone());
    }
    None
}

pub(crate) fn parse_bool_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> bool {
    if let Some(AttributeValue::Bool(b)) = map.get(name) {
        return *b;
    }
    false
}

pub(crate) fn parse_date_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<NaiveDateTime> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        // e.g. 2022-09-24T04:40:35.726029
        if let Ok(date) = NaiveDateTime::parse_from_str(str, DATE_FMT) {
            return Some(date);
        }
    }
    None
}

pub(crate) fn parse_day_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Option<NaiveDate> {
    if let Some(AttributeValue::S(str)) = map.get(name) {
        // e.g. 2024-05-14
        if let Ok(day) = NaiveDate::parse_from_str(str, DAY_FMT) {
            return Some(day);
        }
    }
    None
}

pub(crate) fn opt_string_date(opt_date: Option<NaiveDateTime>) -> AttributeValue {
    if let Some(date) = opt_date {
        return string_date(date);
    }
    AttributeValue::S("".to_string())
}

pub(crate) fn string_date(date: NaiveDateTime) -> AttributeValue {
    AttributeValue::S(format!("{}", date.format(DATE_FMT)))
}

pub(crate) fn opt_string_day(opt_day: Option<NaiveDate>) -> AttributeValue {
    if let Some(day) = opt_day {
        return AttributeValue::S(format!("{}", day.format(DAY_FMT)));
    }
    AttributeValue::Null(true)
}

pub(crate) fn parse_number_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> i64 {
    if let Some(AttributeValue::N(str)) = map.get(name) {
        if let Ok(n) = str.parse::<i64>() {
            return n;
        }
    }
    0
}

pub(crate) fn add_filter_expr(k: &str, filter_expr: &mut String) -> String {
    let mut op = "=";
    let mut ks = k;
    let parts = k.split(':').collect::<Vec<&str>>();
    if parts.len() > 1 {
        ks = parts[0];
        op = parts[1];
    }
    if filter_expr.is_empty() {
        filter_expr.push_str(format!("{} {} :{}", ks, op, ks).as_str());
    } else {
        filter_expr.push_str(format!(" AND {} {} :{}", ks, op, ks).as_str());
    }
    ks.to_string()
}

// filter_value keeps boolean attributes comparable, everything else is stored as a string
pub(crate) fn filter_value(v: &str) -> AttributeValue {
    match v {
        "true" => AttributeValue::Bool(true),
        "false" => AttributeValue::Bool(false),
        _ => AttributeValue::S(v.to_string()),
    }
}

pub(crate) fn to_ddb_page(page: Option<&str>,
                          predicate: &HashMap<String, String>) -> Option<HashMap<String, AttributeValue>> {
    if let Some(page) = page {
        if let Ok(str_map) = serde_json::from_str::<HashMap<String, String>>(page) {
            let mut attr_map = HashMap::new();
            for (k, v) in str_map {
                attr_map.insert(k, AttributeValue::S(v));
            }
            for (k, v) in predicate {
                attr_map.insert(k.to_string(), AttributeValue::S(v.to_string()));
            }
            return Some(attr_map);
        }
    }
    None
}

pub(crate) fn from_ddb<T>(page: Option<&str>, page_size: usize,
                          last_evaluated_key: Option<&HashMap<String, AttributeValue>>,
                          records: Vec<T>) -> PaginatedResult<T> {
    let mut next_page: Option<String> = None;
    if let Some(attr_map) = last_evaluated_key {
        let mut str_map = HashMap::new();
        for (k, v) in attr_map {
            if let AttributeValue::S(val) = v {
                str_map.insert(k.clone(), val.to_string());
            }
        }
        if let Ok(j) = serde_json::to_string(&str_map) {
            next_page = Some(j);
        }
    }
    PaginatedResult::new(page, page_size, next_page, records)
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

// helper method to build db-client, the Memory store never talks to DynamoDB
pub(crate) async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::DynamoDB => {
            //Get config from environment.
            let config = aws_config::load_from_env().await;
            //Create the DynamoDB client.
            Client::new(&config)
        }
        RepositoryStore::LocalDynamoDB | RepositoryStore::Memory => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url("http://localhost:8000")
                .build();
            Client::from_conf(dynamodb_local_config)
        }
    }
}

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}

impl From<SdkError<UpdateItemError>> for LibraryError {
    fn from(err: SdkError<UpdateItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        let message = format!("{:?}", err);
        // puts are guarded by attribute_not_exists on the key
        if message.contains("ConditionalCheckFailed") {
            return LibraryError::duplicate_key(message.as_str());
        }
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(message.as_str(), reason, retryable)
    }
}

impl From<SdkError<QueryError>> for LibraryError {
    fn from(err: SdkError<QueryError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<ScanError>> for LibraryError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<TransactWriteItemsError>> for LibraryError {
    fn from(err: SdkError<TransactWriteItemsError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    if let Some(b) = opts {
        return b.windows(6).any(|w| w == b"ceeded");
    }
    false
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::NaiveDate;
    use serde_json::json;
    use crate::utils::ddb::{add_filter_expr, filter_value, from_ddb, has_exceeded_limit, opt_string_day, parse_bool_attribute, parse_day_attribute, parse_item, parse_number_attribute, parse_string_attribute};

    #[test]
    fn test_should_parse_item() {
        let item = parse_item(json!({"checkout_id": "c1", "paid": true, "version": 3,
            "checkout_date": "2024-05-14", "return_date": null})).expect("should parse item");
        assert_eq!(Some("c1".to_string()), parse_string_attribute("checkout_id", &item));
        assert!(parse_bool_attribute("paid", &item));
        assert_eq!(3, parse_number_attribute("version", &item));
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 14), parse_day_attribute("checkout_date", &item));
        assert_eq!(None, parse_day_attribute("return_date", &item));
        assert!(parse_item(json!("scalar")).is_err());
    }

    #[test]
    fn test_should_build_filter_expr() {
        let mut expr = String::new();
        assert_eq!("patron_id", add_filter_expr("patron_id", &mut expr));
        assert_eq!("checkout_date", add_filter_expr("checkout_date:<=", &mut expr));
        assert_eq!("patron_id = :patron_id AND checkout_date <= :checkout_date", expr.as_str());
        assert_eq!(AttributeValue::Bool(true), filter_value("true"));
        assert_eq!(AttributeValue::S("m1".to_string()), filter_value("m1"));
        assert_eq!(AttributeValue::Null(true), opt_string_day(None));
    }

    #[test]
    fn test_should_build_next_page() {
        let key = HashMap::from([("checkout_id".to_string(), AttributeValue::S("c9".to_string()))]);
        let res = from_ddb::<u8>(None, 10, Some(&key), vec![]);
        assert_eq!(Some(r#"{"checkout_id":"c9"}"#.to_string()), res.next_page);
        assert_eq!(None, from_ddb::<u8>(None, 10, None, vec![]).next_page);
    }

    #[test]
    fn test_should_detect_exceeded_limit() {
        assert!(has_exceeded_limit(Some(&b"ProvisionedThroughputExceeded"[..])));
        assert!(!has_exceeded_limit(Some(&b"short"[..])));
        assert!(!has_exceeded_limit(None));
    }
}
