//! Index configurations and schema generation.
//!
//! An [`IndexConfig`] is one cell of the benchmark matrix: a record encoding,
//! an index field kind, and a sortable flag. Its [`IndexConfig::definition`]
//! expands into the full [`IndexDefinition`] submitted to the store, with one
//! [`FieldSpec`] per generated record field.

use serde::{Deserialize, Serialize};

use crate::document::{Encoding, FIELD_NAME, key_prefix};
use crate::error::{Result, SearchBenchError};

/// The index field kind applied to every field of one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Tag,
    Text,
}

impl FieldKind {
    /// Human-readable label used in result-table row names.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "Numeric",
            FieldKind::Tag => "Tag",
            FieldKind::Text => "Text",
        }
    }

    /// The schema type keyword understood by the store.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "NUMERIC",
            FieldKind::Tag => "TAG",
            FieldKind::Text => "TEXT",
        }
    }
}

/// One field declaration inside an index definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Path into the stored record (`field_j` or `$.field_j`).
    pub path: String,
    /// Alias the field is exposed under (`field_j` for both encodings).
    pub alias: String,
    pub kind: FieldKind,
    pub sortable: bool,
}

/// A complete index definition: the encoding it binds to, the shared key
/// prefix, and the per-field schema.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub encoding: Encoding,
    pub prefix: String,
    pub fields: Vec<FieldSpec>,
}

impl IndexDefinition {
    /// Whether any field of this definition is sortable.
    pub fn has_sortable_fields(&self) -> bool {
        self.fields.iter().any(|f| f.sortable)
    }
}

/// One (encoding, field-kind, sortable) combination under test.
///
/// Validated at construction: tag fields are never sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    encoding: Encoding,
    field_kind: FieldKind,
    sortable: bool,
}

impl IndexConfig {
    /// Create a configuration, rejecting the tag + sortable combination.
    pub fn new(encoding: Encoding, field_kind: FieldKind, sortable: bool) -> Result<Self> {
        if field_kind == FieldKind::Tag && sortable {
            return Err(SearchBenchError::schema(
                "tag fields cannot be marked sortable",
            ));
        }
        Ok(IndexConfig {
            encoding,
            field_kind,
            sortable,
        })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn field_kind(&self) -> FieldKind {
        self.field_kind
    }

    pub fn sortable(&self) -> bool {
        self.sortable
    }

    /// The result-table row label, e.g. `"Hash Text Sorted"` or `"JSON Tag"`.
    ///
    /// Tag configurations carry no sorted/unsorted suffix since tags are
    /// unsorted by construction.
    pub fn label(&self) -> String {
        match self.field_kind {
            FieldKind::Tag => format!("{} {}", self.encoding.label(), self.field_kind.label()),
            _ => format!(
                "{} {} {}",
                self.encoding.label(),
                self.field_kind.label(),
                if self.sortable { "Sorted" } else { "Unsorted" }
            ),
        }
    }

    /// Expand into the definition submitted to the store, declaring
    /// `num_fields` fields of this configuration's kind.
    pub fn definition(&self, num_fields: usize) -> IndexDefinition {
        let fields = (0..num_fields)
            .map(|j| FieldSpec {
                path: self.encoding.field_path(j),
                alias: format!("{FIELD_NAME}_{j}"),
                kind: self.field_kind,
                sortable: self.sortable,
            })
            .collect();

        IndexDefinition {
            encoding: self.encoding,
            prefix: key_prefix(),
            fields,
        }
    }
}
