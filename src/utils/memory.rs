use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::date::DATE_FMT;

type Table = BTreeMap<String, Value>;

// MemoryDatabase keeps every record as a JSON document keyed by table and id,
// which mirrors how the DynamoDB repositories marshal entities into items.
#[derive(Debug, Default)]
pub(crate) struct MemoryDatabase {
    tables: RwLock<HashMap<String, Table>>,
}

lazy_static! {
    static ref SHARED_DATABASE: Arc<MemoryDatabase> = Arc::new(MemoryDatabase::default());
}

pub(crate) struct MemoryRepository<Entity> {
    db: Arc<MemoryDatabase>,
    table_name: String,
    _entity: PhantomData<fn() -> Entity>,
}

impl<Entity> MemoryRepository<Entity>
    where Entity: Identifiable + Serialize + DeserializeOwned {
    // shared tables are visible to every repository created for the Memory store
    pub(crate) fn shared(table_name: &str) -> Self {
        Self::new(SHARED_DATABASE.clone(), table_name)
    }

    pub(crate) fn isolated(table_name: &str) -> Self {
        Self::new(Arc::new(MemoryDatabase::default()), table_name)
    }

    fn new(db: Arc<MemoryDatabase>, table_name: &str) -> Self {
        Self {
            db,
            table_name: table_name.to_string(),
            _entity: PhantomData,
        }
    }

    // update_all applies every update under a single write lock, either all of them
    // land or none does.
    pub(crate) fn update_all(&self, entities: &[Entity]) -> LibraryResult<usize> {
        let mut values = Vec::with_capacity(entities.len());
        for entity in entities {
            values.push((entity.id(), entity.version(), serde_json::to_value(entity)?));
        }
        let mut tables = self.write_tables()?;
        let table = tables.entry(self.table_name.clone()).or_default();
        for (id, version, _) in &values {
            check_version(table, self.table_name.as_str(), id, *version)?;
        }
        for (id, version, value) in values {
            table.insert(id, bump_version(value, version));
        }
        Ok(entities.len())
    }

    fn write_tables(&self) -> LibraryResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Table>>> {
        self.db.tables.write().map_err(|err| LibraryError::runtime(
            format!("memory table {} is poisoned {}", self.table_name, err).as_str(), None))
    }

    fn read_tables(&self) -> LibraryResult<std::sync::RwLockReadGuard<'_, HashMap<String, Table>>> {
        self.db.tables.read().map_err(|err| LibraryError::runtime(
            format!("memory table {} is poisoned {}", self.table_name, err).as_str(), None))
    }
}

fn check_version(table: &Table, table_name: &str, id: &str, version: i64) -> LibraryResult<()> {
    let existing = table.get(id).ok_or_else(|| LibraryError::not_found(
        format!("{} not found for {}", table_name, id).as_str()))?;
    let stored = existing.get("version").and_then(Value::as_i64).unwrap_or(0);
    if stored != version {
        return Err(LibraryError::database(
            format!("conditional check failed for {} {}, version {} != {}",
                    table_name, id, version, stored).as_str(),
            Some("ConditionalCheckFailed".to_string()), false));
    }
    Ok(())
}

fn bump_version(mut value: Value, version: i64) -> Value {
    if let Value::Object(ref mut map) = value {
        map.insert("version".to_string(), Value::from(version + 1));
        if map.contains_key("updated_at") {
            let now = format!("{}", Utc::now().naive_utc().format(DATE_FMT));
            map.insert("updated_at".to_string(), Value::String(now));
        }
    }
    value
}

fn matches(value: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, expected)| {
        match value.get(k) {
            Some(Value::String(s)) => s == expected,
            Some(Value::Null) | None => expected.is_empty(),
            Some(other) => other.to_string() == *expected,
        }
    })
}

#[async_trait]
impl<Entity> Repository<Entity> for MemoryRepository<Entity>
    where Entity: Identifiable + Serialize + DeserializeOwned + 'static {
    async fn create(&self, entity: &Entity) -> LibraryResult<usize> {
        let value = serde_json::to_value(entity)?;
        let mut tables = self.write_tables()?;
        let table = tables.entry(self.table_name.clone()).or_default();
        if table.contains_key(entity.id().as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("{} already exists for {}", self.table_name, entity.id()).as_str()));
        }
        table.insert(entity.id(), value);
        Ok(1)
    }

    async fn update(&self, entity: &Entity) -> LibraryResult<usize> {
        let value = serde_json::to_value(entity)?;
        let mut tables = self.write_tables()?;
        let table = tables.entry(self.table_name.clone()).or_default();
        check_version(table, self.table_name.as_str(), entity.id().as_str(), entity.version())?;
        table.insert(entity.id(), bump_version(value, entity.version()));
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<Entity> {
        let value = {
            let tables = self.read_tables()?;
            tables.get(&self.table_name).and_then(|t| t.get(id)).cloned()
        };
        match value {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(LibraryError::not_found(
                format!("{} not found for {}", self.table_name, id).as_str())),
        }
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>> {
        let mut matched: Vec<(String, Value)> = {
            let tables = self.read_tables()?;
            match tables.get(&self.table_name) {
                Some(table) => {
                    let start = page.map_or(Unbounded, |p| Excluded(p.to_string()));
                    table.range((start, Unbounded))
                        .filter(|(_, v)| matches(v, predicate))
                        .take(page_size + 1)
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect()
                }
                None => vec![],
            }
        };
        let mut next_page = None;
        if matched.len() > page_size {
            matched.truncate(page_size);
            next_page = matched.last().map(|(k, _)| k.clone());
        }
        let mut records = Vec::with_capacity(matched.len());
        for (_, value) in matched {
            records.push(serde_json::from_value(value)?);
        }
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;
    use crate::patrons::domain::model::PatronEntity;
    use crate::utils::memory::MemoryRepository;

    #[tokio::test]
    async fn test_should_create_get_update() {
        let repo: MemoryRepository<PatronEntity> = MemoryRepository::isolated("patrons");
        let mut patron = PatronEntity::new("Gator", "Golf", "123 Main St", "gator@example.com");
        assert_eq!(1, repo.create(&patron).await.expect("should create patron"));
        assert!(matches!(repo.create(&patron).await, Err(LibraryError::DuplicateKey { .. })));

        patron.address = "1 Elm St".to_string();
        assert_eq!(1, repo.update(&patron).await.expect("should update patron"));
        let loaded = repo.get(patron.patron_id.as_str()).await.expect("should get patron");
        assert_eq!("1 Elm St", loaded.address.as_str());
        assert_eq!(patron.version + 1, loaded.version);

        // stale version is rejected
        assert!(matches!(repo.update(&patron).await, Err(LibraryError::Database { .. })));
        assert!(matches!(repo.get("missing").await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_query_pages() {
        let repo: MemoryRepository<PatronEntity> = MemoryRepository::isolated("patrons");
        for i in 0..25 {
            let mut patron = PatronEntity::new("first", "last", "addr", "pages@example.com");
            patron.is_active = i % 5 != 0;
            repo.create(&patron).await.expect("should create patron");
        }
        let predicate = HashMap::from([("is_active".to_string(), "true".to_string())]);
        let first = repo.query(&predicate, None, 10).await.expect("should query");
        assert_eq!(10, first.records.len());
        let second = repo.query(&predicate, first.next_page.as_deref(), 10).await.expect("should query");
        assert_eq!(10, second.records.len());
        assert_eq!(None, second.next_page);
        assert!(second.records.iter().all(|p| p.is_active));
    }

    #[tokio::test]
    async fn test_should_update_all_or_nothing() {
        let repo: MemoryRepository<PatronEntity> = MemoryRepository::isolated("patrons");
        let a = PatronEntity::new("a", "a", "addr", "a@example.com");
        let b = PatronEntity::new("b", "b", "addr", "b@example.com");
        repo.create(&a).await.expect("should create patron");
        repo.create(&b).await.expect("should create patron");

        let mut stale = b.clone();
        stale.version = 7;
        let mut renamed = a.clone();
        renamed.first_name = "changed".to_string();
        assert!(repo.update_all(&[renamed.clone(), stale]).is_err());
        assert_eq!("a", repo.get(a.patron_id.as_str()).await.unwrap().first_name.as_str());

        assert_eq!(2, repo.update_all(&[renamed, b.clone()]).expect("should update all"));
        assert_eq!("changed", repo.get(a.patron_id.as_str()).await.unwrap().first_name.as_str());
    }
}
