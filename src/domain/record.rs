//! The proverb record and its merge rules.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Name of the only field the store owns.
pub const ID_FIELD: &str = "id";

/// Open, caller-supplied field mapping.
pub type Fields = serde_json::Map<String, JsonValue>;

/// Full ordered set of records, the unit of persistence.
pub type Collection = Vec<Record>;

/// One proverb: a store-assigned `id` plus opaque pass-through fields.
///
/// Serialized flat, so `{"id": 1, "text": "..."}` on disk and on the wire.
/// `fields` never contains an `id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: i64,
    #[serde(flatten)]
    fields: Fields,
}

impl Record {
    /// Builds a record, discarding any `id` key the caller put in `fields`.
    /// The remaining fields keep their order.
    pub fn new(id: i64, mut fields: Fields) -> Self {
        fields.shift_remove(ID_FIELD);
        Self { id, fields }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    /// Shallow merge: keys in `update` overwrite in place, absent keys are
    /// kept, new keys are appended. An `id` key in `update` is ignored.
    pub fn merge(&mut self, update: Fields) {
        for (key, value) in update {
            if key == ID_FIELD {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}
