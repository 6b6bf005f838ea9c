//! Field-name based projection of one type onto another.
//!
//! The source is serialized to a JSON object and the target is deserialized
//! from it, so every target field picks up the same-named source field.
//! Target fields missing from the source fall back to `#[serde(default)]`;
//! extra source fields are ignored unless the target denies unknown fields.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Source did not serialize to a JSON object.
    #[error("source is not a struct-like value")]
    NotAnObject,

    /// Target could not be built from the source fields.
    #[error("incompatible projection: {0}")]
    Incompatible(String),
}

/// Copies every field of `source` onto the same-named field of `T`.
pub fn project<S, T>(source: &S) -> Result<T, ProjectionError>
where
    S: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let value =
        serde_json::to_value(source).map_err(|e| ProjectionError::Incompatible(e.to_string()))?;
    if !value.is_object() {
        return Err(ProjectionError::NotAnObject);
    }
    from_object(value)
}

/// Projects every element of `sources`, failing on the first mismatch.
pub fn project_all<'a, S, T, I>(sources: I) -> Result<Vec<T>, ProjectionError>
where
    S: Serialize + 'a,
    T: DeserializeOwned,
    I: IntoIterator<Item = &'a S>,
{
    sources.into_iter().map(project).collect()
}

fn from_object<T: DeserializeOwned>(value: Value) -> Result<T, ProjectionError> {
    serde_json::from_value(value).map_err(|e| ProjectionError::Incompatible(e.to_string()))
}
