//! Inbound payloads and how they land on entity rows.
//!
//! Outbound JSON is the `Serialize` derive on each entity `Model`; this module
//! only covers the request side.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use sea_orm::{ActiveValue, NotSet, Set, Value};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Map;

use crate::{
    entities::{director, genre, movie},
    error::AppError,
};

/// JSON body extractor that reports malformed or unexpected payloads as
/// [`AppError::InvalidInput`].
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Derived struct impls also accept JSON arrays positionally, so only
        // objects get as far as `T`.
        let Json(object) = Json::<Map<String, serde_json::Value>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::invalid(format!("Invalid fields: {}", rejection.body_text()))
            })?;
        let value = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|err| AppError::invalid(format!("Invalid fields: {err}")))?;
        Ok(Self(value))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpdateMode {
    /// Every field is written; keys missing from the payload become null.
    Replace,
    /// Only keys present in the payload are written.
    Merge,
}

/// `None` when the key is absent, `Some(None)` when it is explicitly null.
pub type Field<T> = Option<Option<T>>;

fn present<'de, D, T>(deserializer: D) -> Result<Field<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn apply<V>(slot: &mut ActiveValue<Option<V>>, field: Field<V>, mode: UpdateMode)
where
    Option<V>: Into<Value>,
{
    match (mode, field) {
        (UpdateMode::Replace, field) => *slot = Set(field.flatten()),
        (UpdateMode::Merge, Some(value)) => *slot = Set(value),
        (UpdateMode::Merge, None) => {},
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<NewMovie> for movie::ActiveModel {
    fn from(new: NewMovie) -> Self {
        Self {
            id: NotSet,
            title: Set(new.title),
            description: Set(new.description),
            trailer: Set(new.trailer),
            year: Set(new.year),
            rating: Set(new.rating),
            genre_id: Set(new.genre_id),
            director_id: Set(new.director_id),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MovieChanges {
    #[serde(default, deserialize_with = "present")]
    pub title: Field<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Field<String>,
    #[serde(default, deserialize_with = "present")]
    pub trailer: Field<String>,
    #[serde(default, deserialize_with = "present")]
    pub year: Field<i32>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Field<f64>,
    #[serde(default, deserialize_with = "present")]
    pub genre_id: Field<i32>,
    #[serde(default, deserialize_with = "present")]
    pub director_id: Field<i32>,
}

impl MovieChanges {
    pub fn apply_to(self, movie: &mut movie::ActiveModel, mode: UpdateMode) {
        apply(&mut movie.title, self.title, mode);
        apply(&mut movie.description, self.description, mode);
        apply(&mut movie.trailer, self.trailer, mode);
        apply(&mut movie.year, self.year, mode);
        apply(&mut movie.rating, self.rating, mode);
        apply(&mut movie.genre_id, self.genre_id, mode);
        apply(&mut movie.director_id, self.director_id, mode);
    }
}

/// Create payload shared by directors and genres.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewName {
    pub name: Option<String>,
}

impl From<NewName> for director::ActiveModel {
    fn from(new: NewName) -> Self {
        Self { id: NotSet, name: Set(new.name) }
    }
}

impl From<NewName> for genre::ActiveModel {
    fn from(new: NewName) -> Self {
        Self { id: NotSet, name: Set(new.name) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NameChanges {
    #[serde(default, deserialize_with = "present")]
    pub name: Field<String>,
}

impl NameChanges {
    pub fn apply_to_director(self, director: &mut director::ActiveModel, mode: UpdateMode) {
        apply(&mut director.name, self.name, mode);
    }

    pub fn apply_to_genre(self, genre: &mut genre::ActiveModel, mode: UpdateMode) {
        apply(&mut genre.name, self.name, mode);
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, IntoActiveModel, Unchanged};
    use serde_json::json;

    use super::*;

    fn stored_movie() -> movie::Model {
        movie::Model {
            id: 3,
            title: Some("Heat".into()),
            description: Some("Cops and robbers".into()),
            trailer: Some("https://example.com/heat".into()),
            year: Some(1995),
            rating: Some(8.3),
            genre_id: Some(2),
            director_id: Some(7),
        }
    }

    #[test]
    fn new_movie_rejects_unknown_fields() {
        let err = serde_json::from_value::<NewMovie>(json!({ "title": "Heat", "foo": 1 }))
            .unwrap_err();
        assert!(err.to_string().contains("unknown field `foo`"), "{err}");
    }

    #[test]
    fn new_name_rejects_client_supplied_id() {
        assert!(serde_json::from_value::<NewName>(json!({ "id": 9, "name": "Drama" })).is_err());
    }

    #[test]
    fn new_movie_allows_missing_fields() {
        let new: NewMovie = serde_json::from_value(json!({ "title": "Heat" })).unwrap();
        assert_eq!(new.title.as_deref(), Some("Heat"));
        assert_eq!(new.year, None);

        let active: movie::ActiveModel = new.into();
        assert!(active.id.is_not_set());
        assert_eq!(active.year, Set(None));
    }

    #[test]
    fn changes_distinguish_absent_from_null() {
        let changes: MovieChanges =
            serde_json::from_value(json!({ "title": null, "year": 2001, "bogus": true })).unwrap();
        assert_eq!(changes.title, Some(None));
        assert_eq!(changes.year, Some(Some(2001)));
        assert_eq!(changes.rating, None);
    }

    #[test]
    fn merge_touches_only_present_keys() {
        let mut active = stored_movie().into_active_model();
        let changes: MovieChanges = serde_json::from_value(json!({ "rating": 9.0 })).unwrap();
        changes.apply_to(&mut active, UpdateMode::Merge);

        assert_eq!(active.rating, Set(Some(9.0)));
        assert_eq!(active.title, Unchanged(Some("Heat".to_string())));
        assert_eq!(active.id, Unchanged(3));
        assert!(active.is_changed());
    }

    #[test]
    fn merge_with_empty_payload_changes_nothing() {
        let mut active = stored_movie().into_active_model();
        MovieChanges::default().apply_to(&mut active, UpdateMode::Merge);
        assert!(!active.is_changed());
    }

    #[test]
    fn replace_clears_absent_keys() {
        let mut active = stored_movie().into_active_model();
        let changes: MovieChanges = serde_json::from_value(json!({ "title": "Ronin" })).unwrap();
        changes.apply_to(&mut active, UpdateMode::Replace);

        assert_eq!(active.title, Set(Some("Ronin".to_string())));
        assert_eq!(active.description, Set(None));
        assert_eq!(active.director_id, Set(None));
        assert_eq!(active.id, Unchanged(3));
    }

    #[test]
    fn name_changes_apply_to_both_entities() {
        let mut director = director::Model { id: 1, name: Some("Mann".into()) }.into_active_model();
        let changes: NameChanges = serde_json::from_value(json!({ "name": "Michael Mann" })).unwrap();
        changes.clone().apply_to_director(&mut director, UpdateMode::Merge);
        assert_eq!(director.name, Set(Some("Michael Mann".to_string())));

        let mut genre = genre::Model { id: 4, name: Some("Crime".into()) }.into_active_model();
        NameChanges::default().apply_to_genre(&mut genre, UpdateMode::Replace);
        assert_eq!(genre.name, Set(None));
    }
}
