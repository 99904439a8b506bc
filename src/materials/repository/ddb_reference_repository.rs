use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;

use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::materials::domain::model::{GenreEntity, MaterialTypeEntity};
use crate::materials::repository::{GenreRepository, MaterialTypeRepository};
use crate::utils::ddb::{from_ddb, parse_item, parse_number_attribute, parse_string_attribute, scan_table};

// DDBReferenceRepository stores small lookup tables keyed by a single id attribute.
#[derive(Debug)]
pub(crate) struct DDBReferenceRepository<Entity> {
    client: Client,
    table_name: String,
    id_attribute: String,
    _entity: PhantomData<fn() -> Entity>,
}

impl<Entity> DDBReferenceRepository<Entity> {
    pub(crate) fn new(client: Client, table_name: &str, id_attribute: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            id_attribute: id_attribute.to_string(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<Entity> Repository<Entity> for DDBReferenceRepository<Entity>
    where Entity: Identifiable + Serialize + for<'a> From<&'a HashMap<String, AttributeValue>> + 'static {
    async fn create(&self, entity: &Entity) -> LibraryResult<usize> {
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression(format!("attribute_not_exists({})", self.id_attribute))
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn update(&self, entity: &Entity) -> LibraryResult<usize> {
        Err(LibraryError::validation(
            format!("{} {} cannot be modified", self.table_name, entity.id()).as_str(), None))
    }

    async fn get(&self, id: &str) -> LibraryResult<Entity> {
        self.client
            .query()
            .table_name(self.table_name.as_str())
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(format!("{} = :id", self.id_attribute))
            .expression_attribute_values(":id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|req| {
            match req.items().and_then(|items| items.first()) {
                Some(map) => Ok(Entity::from(map)),
                None => Err(LibraryError::not_found(format!("{} not found for {}", self.table_name, id).as_str())),
            }
        })
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>> {
        let (items, last_key) = scan_table(&self.client, self.table_name.as_str(), predicate, page, page_size).await?;
        let records = items.iter().map(Entity::from).collect();
        Ok(from_ddb(page, page_size, last_key.as_ref(), records))
    }
}

impl MaterialTypeRepository for DDBReferenceRepository<MaterialTypeEntity> {}

impl GenreRepository for DDBReferenceRepository<GenreEntity> {}

impl From<&HashMap<String, AttributeValue>> for MaterialTypeEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        MaterialTypeEntity {
            material_type_id: parse_string_attribute("material_type_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            name: parse_string_attribute("name", map).unwrap_or_default(),
            checkout_days: parse_number_attribute("checkout_days", map),
        }
    }
}

impl From<&HashMap<String, AttributeValue>> for GenreEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        GenreEntity {
            genre_id: parse_string_attribute("genre_id", map).unwrap_or_default(),
            version: parse_number_attribute("version", map),
            name: parse_string_attribute("name", map).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::core::repository::{fetch_all, Repository, RepositoryStore};
    use crate::materials::domain::model::{GenreEntity, MaterialTypeEntity};
    use crate::materials::repository::ddb_reference_repository::DDBReferenceRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "material_types").await;
                let _ = create_table(&client, "material_types", "material_type_id", None).await;
                let _ = delete_table(&client, "genres").await;
                let _ = create_table(&client, "genres", "genre_id", None).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on port 8000"]
    async fn test_should_create_get_material_type() {
        let type_repo: DDBReferenceRepository<MaterialTypeEntity> = DDBReferenceRepository::new(
            CLIENT.get().await.clone(), "material_types", "material_type_id");
        let book = MaterialTypeEntity::new("Book", 14);
        assert_eq!(1, type_repo.create(&book).await.expect("should create type"));
        let loaded = type_repo.get(book.material_type_id.as_str()).await.expect("should return type");
        assert_eq!(book, loaded);
        assert!(type_repo.update(&book).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on port 8000"]
    async fn test_should_list_genres() {
        let genre_repo: DDBReferenceRepository<GenreEntity> = DDBReferenceRepository::new(
            CLIENT.get().await.clone(), "genres", "genre_id");
        for name in ["SciFi", "History", "Fantasy"] {
            let _ = genre_repo.create(&GenreEntity::new(name)).await.expect("should create genre");
        }
        let all = fetch_all(&genre_repo, &HashMap::new()).await.expect("should list genres");
        assert!(all.len() >= 3);
        assert!(genre_repo.get("missing").await.is_err());
    }
}
