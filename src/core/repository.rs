use async_trait::async_trait;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryResult, PaginatedResult};

// page size used when a caller needs every record matching a predicate
pub(crate) const FETCH_ALL_PAGE_SIZE: usize = 200;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, the stored version must match the entity version
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // find by attribute equality
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

// fetch_all follows next_page tokens until every matching record is loaded.
pub(crate) async fn fetch_all<Entity, R>(repository: &R,
                                         predicate: &HashMap<String, String>) -> LibraryResult<Vec<Entity>>
    where Entity: Send, R: Repository<Entity> + ?Sized {
    let mut records = vec![];
    let mut next_page: Option<String> = None;
    loop {
        let res = repository.query(predicate, next_page.as_deref(), FETCH_ALL_PAGE_SIZE).await?;
        records.extend(res.records);
        match res.next_page {
            Some(page) => next_page = Some(page),
            None => return Ok(records),
        }
    }
}

pub(crate) fn predicate_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    // process-wide in-memory tables, used by tests and local experiments
    Memory,
}
