use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;
use crate::materials::domain::model::{GenreEntity, MaterialEntity, MaterialTypeEntity};
use crate::materials::factory::{create_genre_repository, create_material_repository, create_material_type_repository};
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::factory::create_patron_repository;

pub(crate) const MATERIAL_TYPES: [(&str, &str, i64); 3] = [
    ("book", "Book", 14),
    ("periodical", "Periodical", 7),
    ("cd", "CD", 10),
];

pub(crate) const GENRES: [(&str, &str); 5] = [
    ("scifi", "SciFi"),
    ("history", "History"),
    ("fantasy", "Fantasy"),
    ("mystery", "Mystery"),
    ("romance", "Romance"),
];

pub(crate) const MATERIALS: [(&str, &str, &str, &str); 10] = [
    ("material-01", "Clifford: The Puppy Years", "book", "scifi"),
    ("material-02", "Hands-On Programming with C#", "cd", "scifi"),
    ("material-03", "National Geographic", "periodical", "history"),
    ("material-04", "Spice Girls: Greatest Hits", "cd", "romance"),
    ("material-05", "Arthur's New Puppy", "book", "fantasy"),
    ("material-06", "DC Comics", "periodical", "mystery"),
    ("material-07", "Infest by Papa Roach", "cd", "romance"),
    ("material-08", "House of the Dead: Overkill", "book", "mystery"),
    ("material-09", "Edgar Allan Poe: The Complete Tales and Poems", "cd", "mystery"),
    ("material-10", "The Beef Chronicles: Kendrick vs. Drake", "book", "romance"),
];

pub(crate) const PATRONS: [(&str, &str, &str, &str, &str); 2] = [
    ("patron-01", "Gator", "Golf", "123 Main St", "john@example.com"),
    ("patron-02", "Chicken", "Limbo", "456 Elm St", "jane@example.com"),
];

// seed_library loads the starter catalog, records that already exist are left alone.
pub(crate) async fn seed_library(store: RepositoryStore) -> LibraryResult<usize> {
    let mut added = 0;
    let material_type_repo = create_material_type_repository(store).await;
    for (id, name, days) in MATERIAL_TYPES {
        let mut material_type = MaterialTypeEntity::new(name, days);
        material_type.material_type_id = id.to_string();
        added += ignore_existing(material_type_repo.create(&material_type).await)?;
    }
    let genre_repo = create_genre_repository(store).await;
    for (id, name) in GENRES {
        let mut genre = GenreEntity::new(name);
        genre.genre_id = id.to_string();
        added += ignore_existing(genre_repo.create(&genre).await)?;
    }
    let material_repo = create_material_repository(store).await;
    for (id, name, material_type_id, genre_id) in MATERIALS {
        let mut material = MaterialEntity::new(name, material_type_id, genre_id);
        material.material_id = id.to_string();
        added += ignore_existing(material_repo.create(&material).await)?;
    }
    let patron_repo = create_patron_repository(store).await;
    for (id, first_name, last_name, address, email) in PATRONS {
        let mut patron = PatronEntity::new(first_name, last_name, address, email);
        patron.patron_id = id.to_string();
        added += ignore_existing(patron_repo.create(&patron).await)?;
    }
    tracing::info!(store = ?store, added, "library seeded");
    Ok(added)
}

fn ignore_existing(res: LibraryResult<usize>) -> LibraryResult<usize> {
    match res {
        Err(LibraryError::DuplicateKey { .. }) => Ok(0),
        other => other,
    }
}
