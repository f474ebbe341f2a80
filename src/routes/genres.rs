use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::SharedState;
use crate::{
    entities::{genre, movie},
    error::{AppError, AppResult},
    schemas::{NameChanges, NewName, Payload, UpdateMode},
};

pub async fn list(State(state): State<SharedState>) -> AppResult<Json<Vec<genre::Model>>> {
    Ok(Json(state.store.list_genres().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    Payload(new): Payload<NewName>,
) -> AppResult<(StatusCode, &'static str)> {
    state.store.create_genre(new).await?;
    Ok((StatusCode::CREATED, "Genre added"))
}

/// Always the genre record itself; the genre's movies are served by [`movies`].
pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<Json<genre::Model>> {
    Ok(Json(state.store.find_genre(id).await?))
}

pub async fn movies(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<movie::Model>>> {
    let movies = state.store.movies_in_genre(id).await?;
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
    state.store.update_genre(id, changes, UpdateMode::Replace).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn merge(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Payload(changes): Payload<NameChanges>,
) -> AppResult<StatusCode> {
    state.store.update_genre(id, changes, UpdateMode::Merge).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
