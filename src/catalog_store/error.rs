//! Error taxonomy for catalog operations.
//!
//! Reads degrade gracefully (a dangling relation reference is omitted from
//! the result), writes fail closed (any of these errors rejects the mutation
//! before it reaches the database).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Field '{field}' is required but was not provided")]
    MissingField { field: &'static str },

    #[error("Field '{field}' has invalid value '{value}'")]
    MalformedField { field: &'static str, value: String },

    #[error("Referenced {entity} '{id}' does not exist")]
    Reference { entity: &'static str, id: String },

    #[error("{entity} with id '{id}' already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Catalog store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
}
