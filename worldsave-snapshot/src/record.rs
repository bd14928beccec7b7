//! Exported records and snapshots.

use crate::{RestoreError, RestoreResult};
use worldsave_codec::{decode, encode, CodecResult, Mapping, Value};
use worldsave_types::ExportedId;

/// Record data key holding the entity's variant when it is not the default.
pub const CLASS_NAME_KEY: &str = "className";

/// Record data key holding the owner's exported id.
pub const PARENT_KEY: &str = "parent";

const ID_FIELD: &str = "id";
const DATA_FIELD: &str = "data";

/// The persisted form of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedRecord {
    id: ExportedId,
    data: Mapping,
}

impl ExportedRecord {
    pub(crate) fn new(id: ExportedId, data: Mapping) -> Self {
        Self { id, data }
    }

    #[must_use]
    pub fn id(&self) -> &ExportedId {
        &self.id
    }

    /// The record's data. Its containers belong to the snapshot: mutate a
    /// copy, not these handles.
    #[must_use]
    pub fn data(&self) -> &Mapping {
        &self.data
    }

    /// Exported id of the owner, if the record has one.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.data.get(PARENT_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.data.get(CLASS_NAME_KEY).and_then(Value::as_str)
    }

    /// `{"id": "<id>", "data": {...}}`, with data in fresh containers.
    pub fn to_value(&self) -> CodecResult<Value> {
        Ok(Value::object([
            (ID_FIELD, Value::from(self.id.as_str())),
            (DATA_FIELD, Value::from(detach(&self.data)?)),
        ]))
    }

    /// Reads a record from its canonical value form.
    ///
    /// # Errors
    ///
    /// [`RestoreError::InvalidRecord`] if `value` is not an object with a
    /// digit-string `id` and an object `data`. The data is copied, so the
    /// record shares no containers with `value`.
    pub fn from_value(value: &Value) -> RestoreResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| invalid(format!("expected an object, got {value:?}")))?
            .borrow();

        let id = object
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing string `id`".to_string()))?;
        let id = ExportedId::parse(id).map_err(|e| invalid(e.to_string()))?;

        let data = object
            .get(DATA_FIELD)
            .and_then(Value::as_object)
            .ok_or_else(|| invalid(format!("record {id} has no `data` object")))?;
        let data = detach(&data.borrow())?;

        Ok(Self { id, data })
    }
}

fn detach(data: &Mapping) -> CodecResult<Mapping> {
    data.iter()
        .map(|(key, value)| value.deep_copy().map(|copy| (key, copy)))
        .collect()
}

fn invalid(reason: String) -> RestoreError {
    RestoreError::InvalidRecord(reason)
}

/// Exported records in parent-first order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<ExportedRecord>,
}

impl Snapshot {
    pub(crate) fn new(records: Vec<ExportedRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[ExportedRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExportedRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, id: &ExportedId) -> Option<&ExportedRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The snapshot as an array of record objects. Mutating the result does
    /// not touch the snapshot.
    pub fn to_value(&self) -> CodecResult<Value> {
        let records = self
            .records
            .iter()
            .map(ExportedRecord::to_value)
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Value::from(records))
    }

    /// Reads a snapshot from its canonical value form. Record order is kept
    /// as is; [`restore`](crate::restore) checks that it is parent-first.
    pub fn from_value(value: &Value) -> RestoreResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| invalid(format!("expected an array of records, got {value:?}")))?
            .borrow();
        let records = items
            .iter()
            .map(ExportedRecord::from_value)
            .collect::<RestoreResult<Vec<_>>>()?;
        Ok(Self { records })
    }

    /// Encodes the snapshot as canonical text.
    pub fn to_canonical_text(&self) -> CodecResult<String> {
        encode(&self.to_value()?)
    }

    /// Decodes canonical text produced by [`Snapshot::to_canonical_text`].
    pub fn from_canonical_text(text: &str) -> RestoreResult<Self> {
        Self::from_value(&decode(text)?)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ExportedRecord;
    type IntoIter = std::slice::Iter<'a, ExportedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
