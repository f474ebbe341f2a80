//! Repository over the catalog tables.
//!
//! Reads go straight to the pooled connection. Every write opens its own
//! transaction and commits only on success; any early return drops the
//! transaction, which rolls it back.

mod directors;
mod genres;
mod movies;

use sea_orm::DatabaseConnection;

pub use movies::MovieFilter;

/// Fixed number of movies per listing page.
pub const PAGE_SIZE: u64 = 5;

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
