use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder, TransactionTrait,
};
use tracing::debug;

use super::Store;
use crate::{
    entities::{genre, movie},
    error::{AppError, AppResult},
    schemas::{NameChanges, NewName, UpdateMode},
};

fn not_found() -> AppError {
    AppError::not_found("Genre not found")
}

impl Store {
    pub async fn list_genres(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(&self.db).await?)
    }

    pub async fn find_genre(&self, id: i32) -> AppResult<genre::Model> {
        genre::Entity::find_by_id(id).one(&self.db).await?.ok_or_else(not_found)
    }

    pub async fn movies_in_genre(&self, id: i32) -> AppResult<Vec<movie::Model>> {
        let genre = self.find_genre(id).await?;
        Ok(genre
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_genre(&self, new: NewName) -> AppResult<genre::Model> {
        let txn = self.db.begin().await?;
        let genre = genre::ActiveModel::from(new).insert(&txn).await?;
        txn.commit().await?;

        debug!(id = genre.id, "genre created");
        Ok(genre)
    }

    pub async fn update_genre(
        &self,
        id: i32,
        changes: NameChanges,
        mode: UpdateMode,
    ) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let genre = genre::Entity::find_by_id(id).one(&txn).await?.ok_or_else(not_found)?;

        let mut active = genre.into_active_model();
        changes.apply_to_genre(&mut active, mode);
        if active.is_changed() {
            active.update(&txn).await?;
        }
        txn.commit().await?;

        debug!(id, ?mode, "genre updated");
        Ok(())
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let res = genre::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(not_found());
        }
        txn.commit().await?;

        debug!(id, "genre deleted");
        Ok(())
    }
}
