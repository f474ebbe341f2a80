//! Startup seeding from the JSON fixture files.
//!
//! Seeding wipes the catalog and reloads it inside a single transaction. It
//! runs once before the listener is bound, so any failure aborts startup.

use std::path::Path;

use anyhow::Context;
use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::FixturePaths,
    entities::{director, genre, movie},
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovieRecord {
    pub pk: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trailer: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genre_id: Option<i32>,
    #[serde(default)]
    pub director_id: Option<i32>,
}

/// Fixture record for directors and genres.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NameRecord {
    pub pk: i32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fixtures {
    pub movies: Vec<MovieRecord>,
    pub directors: Vec<NameRecord>,
    pub genres: Vec<NameRecord>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SeedReport {
    pub movies: usize,
    pub directors: usize,
    pub genres: usize,
}

impl Fixtures {
    pub fn load(paths: &FixturePaths) -> anyhow::Result<Self> {
        Ok(Self {
            movies: read_array(&paths.movies)?,
            directors: read_array(&paths.directors)?,
            genres: read_array(&paths.genres)?,
        })
    }
}

fn read_array<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
}

impl From<MovieRecord> for movie::ActiveModel {
    fn from(rec: MovieRecord) -> Self {
        Self {
            id: Set(rec.pk),
            title: Set(rec.title),
            description: Set(rec.description),
            trailer: Set(rec.trailer),
            year: Set(rec.year),
            rating: Set(rec.rating),
            genre_id: Set(rec.genre_id),
            director_id: Set(rec.director_id),
        }
    }
}

impl From<NameRecord> for director::ActiveModel {
    fn from(rec: NameRecord) -> Self {
        Self { id: Set(rec.pk), name: Set(rec.name) }
    }
}

impl From<NameRecord> for genre::ActiveModel {
    fn from(rec: NameRecord) -> Self {
        Self { id: Set(rec.pk), name: Set(rec.name) }
    }
}

pub async fn seed(db: &DatabaseConnection, fixtures: Fixtures) -> anyhow::Result<SeedReport> {
    let report = SeedReport {
        movies: fixtures.movies.len(),
        directors: fixtures.directors.len(),
        genres: fixtures.genres.len(),
    };

    let txn = db.begin().await?;

    movie::Entity::delete_many().exec(&txn).await?;
    director::Entity::delete_many().exec(&txn).await?;
    genre::Entity::delete_many().exec(&txn).await?;

    // insert_many refuses an empty batch
    if !fixtures.movies.is_empty() {
        movie::Entity::insert_many(fixtures.movies.into_iter().map(movie::ActiveModel::from))
            .exec(&txn)
            .await
            .context("inserting movies")?;
    }
    if !fixtures.directors.is_empty() {
        director::Entity::insert_many(
            fixtures.directors.into_iter().map(director::ActiveModel::from),
        )
        .exec(&txn)
        .await
        .context("inserting directors")?;
    }
    if !fixtures.genres.is_empty() {
        genre::Entity::insert_many(fixtures.genres.into_iter().map(genre::ActiveModel::from))
            .exec(&txn)
            .await
            .context("inserting genres")?;
    }

    txn.commit().await?;

    tracing::info!(
        movies = report.movies,
        directors = report.directors,
        genres = report.genres,
        "catalog seeded"
    );
    Ok(report)
}
