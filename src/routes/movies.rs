use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::SharedState;
use crate::{
    entities::movie,
    error::{AppError, AppResult},
    schemas::{MovieChanges, NewMovie, Payload, UpdateMode},
    store::MovieFilter,
};

/// Raw listing parameters. Values stay strings so bad input can be reported
/// with our own status instead of the extractor's.
#[derive(Debug, Default, Deserialize)]
pub struct MovieQuery {
    director_id: Option<String>,
    genre_id: Option<String>,
    page: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MovieListing {
    Filtered(MovieFilter),
    Page(u64),
    All,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_id(name: &str, raw: Option<String>) -> AppResult<Option<i32>> {
    non_empty(raw)
        .map(|v| {
            v.parse::<i32>().map_err(|_| AppError::invalid(format!("{name} is not integer")))
        })
        .transpose()
}

impl MovieQuery {
    /// Filters win over `page`, which is only looked at when no filter is
    /// given; an invalid page is therefore ignored on filtered requests.
    pub fn listing(self) -> AppResult<MovieListing> {
        let filter = MovieFilter {
            director_id: parse_id("director_id", self.director_id)?,
            genre_id: parse_id("genre_id", self.genre_id)?,
        };
        if !filter.is_empty() {
            return Ok(MovieListing::Filtered(filter));
        }

        let Some(page) = non_empty(self.page) else {
            return Ok(MovieListing::All);
        };
        let page: i64 =
            page.parse().map_err(|_| AppError::invalid("Page number is not integer"))?;
        if page < 1 {
            return Err(AppError::invalid("Page number must be 1 or greater"));
        }
        Ok(MovieListing::Page(page as u64))
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(q): Query<MovieQuery>,
) -> AppResult<Json<Vec<movie::Model>>> {
    let movies = match q.listing()? {
        MovieListing::Filtered(filter) => {
            let movies = state.store.filter_movies(filter).await?;
            if movies.is_empty() {
                return Err(AppError::not_found("Movies not found"));
            }
            movies
        },
        MovieListing::Page(page) => state.store.movies_page(page).await?,
        MovieListing::All => state.store.list_movies().await?,
    };
    Ok(Json(movies))
}

pub async fn create(
    State(state): State<SharedState>,
    Payload(new): Payload<NewMovie>,
) -> AppResult<(StatusCode, &'static str)> {
    state.store.create_movie(new).await?;
    Ok((StatusCode::CREATED, "Movie added"))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<Json<movie::Model>> {
    Ok(Json(state.store.find_movie(id).await?))
}

pub async fn replace(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Payload(changes): Payload<MovieChanges>,
) -> AppResult<StatusCode> {
    state.store.update_movie(id, changes, UpdateMode::Replace).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn merge(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Payload(changes): Payload<MovieChanges>,
) -> AppResult<StatusCode> {
    state.store.update_movie(id, changes, UpdateMode::Merge).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(director_id: Option<&str>, genre_id: Option<&str>, page: Option<&str>) -> MovieQuery {
        MovieQuery {
            director_id: director_id.map(str::to_string),
            genre_id: genre_id.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn no_parameters_lists_everything() {
        assert_eq!(MovieQuery::default().listing().unwrap(), MovieListing::All);
        assert_eq!(query(Some(""), None, Some("")).listing().unwrap(), MovieListing::All);
    }

    #[test]
    fn filters_combine_and_ignore_page() {
        let listing = query(Some("2"), Some("5"), Some("not-a-number")).listing().unwrap();
        assert_eq!(
            listing,
            MovieListing::Filtered(MovieFilter { director_id: Some(2), genre_id: Some(5) })
        );

        let listing = query(None, Some("5"), Some("3")).listing().unwrap();
        assert_eq!(
            listing,
            MovieListing::Filtered(MovieFilter { director_id: None, genre_id: Some(5) })
        );
    }

    #[test]
    fn page_is_parsed_when_unfiltered() {
        assert_eq!(query(None, None, Some("2")).listing().unwrap(), MovieListing::Page(2));
    }

    #[test]
    fn bad_page_is_a_client_error() {
        for raw in ["two", "1.5", "0", "-3"] {
            let err = query(None, None, Some(raw)).listing().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{raw}: {err:?}");
        }
    }

    #[test]
    fn bad_filter_is_a_client_error() {
        let err = query(Some("abc"), None, None).listing().unwrap_err();
        assert_eq!(err.to_string(), "director_id is not integer");
    }
}
