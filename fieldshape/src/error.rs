//! Error types for field shaping.

use thiserror::Error;

/// Result type for shaping operations.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors that can occur while shaping an entity.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A field's value could not be converted to JSON.
    #[error("failed to read field `{field}` of `{entity_type}`: {source}")]
    FieldValue {
        entity_type: &'static str,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The selection names fields the entity type does not have.
    #[error("unknown fields for `{entity_type}`: {}", fields.join(", "))]
    UnknownFields {
        entity_type: &'static str,
        fields: Vec<String>,
    },
}
