//! Replays a snapshot into an entity sink.

use crate::{
    ExportedRecord, RestoreError, RestoreResult, SaveConfig, Snapshot, CLASS_NAME_KEY, PARENT_KEY,
};
use std::collections::HashMap;
use tracing::debug;
use worldsave_codec::{Mapping, Value};
use worldsave_model::{EntityKind, EntitySink, EntitySpec, IntrinsicProperty};
use worldsave_types::{EntityId, ExportedId};

/// Materializes every record of `snapshot` into `sink`, in snapshot order.
///
/// Data keys naming one of `config`'s intrinsic properties go back into the
/// property bag; any other key (besides `parent` and `className`) becomes a
/// shape option. Returns which entity each record became.
///
/// # Errors
///
/// Fails on the first record that names a parent not materialized before it,
/// carries an unknown `className`, repeats an id, or is refused by the sink.
/// [`RestoreError::Codec`] if a value is too deep to copy.
/// Entities materialized before the failure stay in the sink.
pub fn restore<S: EntitySink + ?Sized>(
    snapshot: &Snapshot,
    config: &SaveConfig,
    sink: &mut S,
) -> RestoreResult<HashMap<ExportedId, EntityId>> {
    let mut materialized: HashMap<ExportedId, EntityId> = HashMap::with_capacity(snapshot.len());

    for record in snapshot {
        if materialized.contains_key(record.id()) {
            return Err(RestoreError::DuplicateId(record.id().clone()));
        }

        let spec = EntitySpec {
            parent: resolve_parent(record, &materialized)?,
            kind: resolve_kind(record, config)?,
            properties: Mapping::new(),
            shape_options: None,
        };
        let spec = split_data(record, config, spec)?;

        let entity = sink
            .materialize(spec)
            .map_err(|reason| RestoreError::Rejected {
                record: record.id().clone(),
                reason,
            })?;
        materialized.insert(record.id().clone(), entity);
    }

    debug!(records = materialized.len(), "restored snapshot");
    Ok(materialized)
}

fn resolve_parent(
    record: &ExportedRecord,
    materialized: &HashMap<ExportedId, EntityId>,
) -> RestoreResult<Option<EntityId>> {
    let Some(value) = record.data().get(PARENT_KEY) else {
        return Ok(None);
    };
    let parent = value
        .as_str()
        .and_then(|s| ExportedId::parse(s).ok())
        .ok_or_else(|| {
            RestoreError::InvalidRecord(format!(
                "record {} has a non-id parent {value:?}",
                record.id()
            ))
        })?;

    match materialized.get(&parent) {
        Some(&entity) => Ok(Some(entity)),
        None => Err(RestoreError::DanglingParent {
            record: record.id().clone(),
            parent,
        }),
    }
}

fn resolve_kind(record: &ExportedRecord, config: &SaveConfig) -> RestoreResult<EntityKind> {
    match record.data().get(CLASS_NAME_KEY) {
        None => Ok(config.default_kind),
        Some(Value::String(name)) => {
            name.parse()
                .map_err(|_| RestoreError::UnknownKind {
                    record: record.id().clone(),
                    class_name: name.clone(),
                })
        }
        Some(other) => Err(RestoreError::InvalidRecord(format!(
            "record {} has a non-string className {other:?}",
            record.id()
        ))),
    }
}

/// Restored values are copies: the new entity shares no container with the
/// snapshot.
fn split_data(
    record: &ExportedRecord,
    config: &SaveConfig,
    mut spec: EntitySpec,
) -> RestoreResult<EntitySpec> {
    for (key, value) in record.data().iter() {
        if key == PARENT_KEY || key == CLASS_NAME_KEY {
            continue;
        }
        let value = value.deep_copy()?;
        match key.parse::<IntrinsicProperty>() {
            Ok(prop) if config.captures(prop) => {
                spec.properties.insert(key, value);
            }
            _ => {
                spec.shape_options
                    .get_or_insert_with(Mapping::new)
                    .insert(key, value);
            }
        }
    }
    Ok(spec)
}
