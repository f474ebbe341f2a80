use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder, TransactionTrait,
};
use tracing::debug;

use super::Store;
use crate::{
    entities::{director, movie},
    error::{AppError, AppResult},
    schemas::{NameChanges, NewName, UpdateMode},
};

fn not_found() -> AppError {
    AppError::not_found("Director not found")
}

impl Store {
    pub async fn list_directors(&self) -> AppResult<Vec<director::Model>> {
        Ok(director::Entity::find().order_by_asc(director::Column::Id).all(&self.db).await?)
    }

    pub async fn find_director(&self, id: i32) -> AppResult<director::Model> {
        director::Entity::find_by_id(id).one(&self.db).await?.ok_or_else(not_found)
    }

    pub async fn movies_by_director(&self, id: i32) -> AppResult<Vec<movie::Model>> {
        let director = self.find_director(id).await?;
        Ok(director
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn create_director(&self, new: NewName) -> AppResult<director::Model> {
        let txn = self.db.begin().await?;
        let director = director::ActiveModel::from(new).insert(&txn).await?;
        txn.commit().await?;

        debug!(id = director.id, "director created");
        Ok(director)
    }

    pub async fn update_director(
        &self,
        id: i32,
        changes: NameChanges,
        mode: UpdateMode,
    ) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let director =
            director::Entity::find_by_id(id).one(&txn).await?.ok_or_else(not_found)?;

        let mut active = director.into_active_model();
        changes.apply_to_director(&mut active, mode);
        if active.is_changed() {
            active.update(&txn).await?;
        }
        txn.commit().await?;

        debug!(id, ?mode, "director updated");
        Ok(())
    }

    pub async fn delete_director(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let res = director::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(not_found());
        }
        txn.commit().await?;

        debug!(id, "director deleted");
        Ok(())
    }
}
