//! Record model and store encodings.
//!
//! A [`Record`] is an unsigned integer key plus `num_fields` generated
//! values, all of one [`DataKind`] within a benchmark group. Records are
//! written once, never mutated, and vanish when the store is cleared at the
//! start of the next group.

use serde_json::{Map, Value};

/// Prefix for every stored record key (`key:{id}`).
pub const KEY_NAME: &str = "key";

/// Prefix for every generated field name (`field_{j}`).
pub const FIELD_NAME: &str = "field";

/// The record id every load guarantees to write, used as the fixed sampling
/// point for per-object memory measurement.
pub const SENTINEL_KEY: u64 = 0;

/// How a record is represented in the store.
///
/// An index built against a given encoding must use a field-path prefix
/// matching that encoding: `field_j` for [`Encoding::Hash`], `$.field_j`
/// for [`Encoding::Json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Flat top-level field map (a Redis hash).
    Hash,
    /// Nested document rooted at `$` (a RedisJSON document).
    Json,
}

impl Encoding {
    /// Human-readable label used in result-table row names.
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Hash => "Hash",
            Encoding::Json => "JSON",
        }
    }

    /// The schema path for field ordinal `j` under this encoding.
    pub fn field_path(&self, ordinal: usize) -> String {
        match self {
            Encoding::Hash => format!("{FIELD_NAME}_{ordinal}"),
            Encoding::Json => format!("$.{FIELD_NAME}_{ordinal}"),
        }
    }
}

/// The value shape shared by all fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Fixed-length alphabetic strings.
    String,
    /// Fixed-digit-count integers.
    Number,
}

impl DataKind {
    pub fn label(&self) -> &'static str {
        match self {
            DataKind::String => "string",
            DataKind::Number => "numeric",
        }
    }
}

/// A single generated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    /// Convert to a JSON value for the nested-document encoding.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::Number((*i).into()),
        }
    }

    /// Approximate encoded size in bytes, used by the in-memory store.
    pub fn encoded_len(&self) -> usize {
        match self {
            FieldValue::Text(s) => s.len(),
            FieldValue::Integer(_) => 8,
        }
    }
}

/// A generated record: key plus ordered field values.
///
/// Field names are derived from the value position: the j-th value is
/// stored under `field_j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: u64,
    pub values: Vec<FieldValue>,
}

impl Record {
    pub fn new(key: u64, values: Vec<FieldValue>) -> Self {
        Record { key, values }
    }

    /// The store key this record is written under.
    pub fn storage_key(&self) -> String {
        storage_key(self.key)
    }

    /// Iterate `(field_name, value)` pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (String, &FieldValue)> {
        self.values
            .iter()
            .enumerate()
            .map(|(j, value)| (format!("{FIELD_NAME}_{j}"), value))
    }

    /// The nested-document form of this record, rooted at `$`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.values.len());
        for (name, value) in self.fields() {
            map.insert(name, value.to_json());
        }
        Value::Object(map)
    }
}

/// Build the store key for a record id.
pub fn storage_key(key: u64) -> String {
    format!("{KEY_NAME}:{key}")
}

/// The key prefix all records share, as passed to index definitions.
pub fn key_prefix() -> String {
    format!("{KEY_NAME}:")
}
