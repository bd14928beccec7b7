//! Identifier types for worldsave.
//!
//! Two kinds of identity flow through a save/restore cycle:
//! - [`EntityId`]: the live identity of an entity inside the running process
//!   (UUID v7, never persisted)
//! - [`ExportedId`]: the fixed-width counter string a snapshot uses to refer to
//!   an entity, assigned fresh on every save

mod ids;

pub use ids::{EntityId, ExportedId, DEFAULT_EXPORTED_ID_WIDTH};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing identifiers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid exported id: {0:?}")]
    InvalidExportedId(String),
}
