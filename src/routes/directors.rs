use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::SharedState;
use crate::{
    entities::{director, movie},
    error::{AppError, AppResult},
    schemas::{NameChanges, NewName, Payload, UpdateMode},
};

pub async fn list(State(state): State<SharedState>) -> AppResult<Json<Vec<director::Model>>> {
    Ok(Json(state.store.list_directors().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    Payload(new): Payload<NewName>,
) -> AppResult<(StatusCode, &'static str)> {
    state.store.create_director(new).await?;
    Ok((StatusCode::CREATED, "Director added"))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<Json<director::Model>> {
    Ok(Json(state.store.find_director(id).await?))
}

pub async fn movies(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<movie::Model>>> {
    let movies = state.store.movies_by_director(id).await?;
    if movies.is_empty() {
        return Err(AppError::not_found("Movies not found"));
    }
    Ok(Json(movies))
}

pub async fn replace(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Payload(changes): Payload<NameChanges>,
) -> AppResult<StatusCode> {
    state.store.update_director(id, changes, UpdateMode::Replace).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn merge(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Payload(changes): Payload<NameChanges>,
) -> AppResult<StatusCode> {
    state.store.update_director(id, changes, UpdateMode::Merge).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_director(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
