use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use tracing::debug;

use super::{PAGE_SIZE, Store};
use crate::{
    entities::movie,
    error::{AppError, AppResult},
    schemas::{MovieChanges, NewMovie, UpdateMode},
};

/// Equality filters for the movie listing; present filters are ANDed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MovieFilter {
    pub director_id: Option<i32>,
    pub genre_id: Option<i32>,
}

impl MovieFilter {
    pub fn is_empty(&self) -> bool {
        self.director_id.is_none() && self.genre_id.is_none()
    }
}

fn not_found() -> AppError {
    AppError::not_found("Movie not found")
}

impl Store {
    pub async fn list_movies(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn filter_movies(&self, filter: MovieFilter) -> AppResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();
        if let Some(director_id) = filter.director_id {
            query = query.filter(movie::Column::DirectorId.eq(director_id));
        }
        if let Some(genre_id) = filter.genre_id {
            query = query.filter(movie::Column::GenreId.eq(genre_id));
        }
        Ok(query.order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    /// `page` is 1-based. Pages beyond what SQLite can address are empty.
    pub async fn movies_page(&self, page: u64) -> AppResult<Vec<movie::Model>> {
        let Some(offset) = page
            .saturating_sub(1)
            .checked_mul(PAGE_SIZE)
            .filter(|offset| *offset <= i64::MAX as u64)
        else {
            return Ok(Vec::new());
        };
        Ok(movie::Entity::find()
            .order_by_asc(movie::Column::Id)
            .offset(offset)
            .limit(PAGE_SIZE)
            .all(&self.db)
            .await?)
    }

    pub async fn find_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or_else(not_found)
    }

    pub async fn create_movie(&self, new: NewMovie) -> AppResult<movie::Model> {
        let txn = self.db.begin().await?;
        let movie = movie::ActiveModel::from(new).insert(&txn).await?;
        txn.commit().await?;

        debug!(id = movie.id, "movie created");
        Ok(movie)
    }

    pub async fn update_movie(
        &self,
        id: i32,
        changes: MovieChanges,
        mode: UpdateMode,
    ) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let movie = movie::Entity::find_by_id(id).one(&txn).await?.ok_or_else(not_found)?;

        let mut active = movie.into_active_model();
        changes.apply_to(&mut active, mode);
        if active.is_changed() {
            active.update(&txn).await?;
        }
        txn.commit().await?;

        debug!(id, ?mode, "movie updated");
        Ok(())
    }

    pub async fn delete_movie(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let res = movie::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(not_found());
        }
        txn.commit().await?;

        debug!(id, "movie deleted");
        Ok(())
    }
}
