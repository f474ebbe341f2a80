pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod schemas;
pub mod seed;
pub mod store;

use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}
