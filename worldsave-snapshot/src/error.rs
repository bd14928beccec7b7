//! Error types for saving and restoring snapshots.

use crate::CycleError;
use thiserror::Error;
use worldsave_codec::CodecError;
use worldsave_types::{EntityId, ExportedId};

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that abort a save. No partial snapshot is ever returned.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The ownership graph of the saved entities is not acyclic.
    #[error(transparent)]
    Cycle(#[from] CycleError<EntityId>),

    /// An entity's owner is not being saved and the policy rejects that.
    #[error("entity {entity} is owned by {parent}, which is not part of the save")]
    OrphanedParent { entity: EntityId, parent: EntityId },

    /// A property value could not be captured (it contains itself).
    #[error("property `{property}` of entity {entity} cannot be captured: {source}")]
    Property {
        entity: EntityId,
        property: String,
        #[source]
        source: CodecError,
    },

    /// The save configuration could not be parsed.
    #[error("invalid save configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for restore operations.
pub type RestoreResult<T> = Result<T, RestoreError>;

/// Errors that abort a restore.
#[derive(Debug, Error)]
pub enum RestoreError {
    /// A record names a parent that has not been materialized yet.
    #[error("record {record} refers to parent {parent}, which does not precede it")]
    DanglingParent {
        record: ExportedId,
        parent: ExportedId,
    },

    /// `className` names no known entity kind.
    #[error("record {record} has unknown className {class_name:?}")]
    UnknownKind {
        record: ExportedId,
        class_name: String,
    },

    /// Two records share an exported id.
    #[error("duplicate record id {0}")]
    DuplicateId(ExportedId),

    /// The snapshot does not have the record shape.
    #[error("invalid snapshot record: {0}")]
    InvalidRecord(String),

    /// The entity sink refused a record.
    #[error("record {record} was rejected: {reason}")]
    Rejected { record: ExportedId, reason: String },

    /// The snapshot text could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
