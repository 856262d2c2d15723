//! On-disk form of resolver output.
//!
//! A document is one JSON object:
//!
//! ```json
//! {
//!   "records": [ { "name": "Order", "fields": [ { "name": "id", "type": { "primitive": "string" } } ] } ],
//!   "targets": [ { "name": "OrderRepository", "kind": "interface", "package": "com.example", "members": [] } ]
//! }
//! ```
//!
//! Several documents fold into one [`Corpus`]; records are shared across all
//! targets of the corpus.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{RecordDeclaration, RecordTable, TargetDescriptor};
use crate::path_de;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("at JSON path {path} → {source}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON pointer `{0}` does not select anything")]
    PointerNotFound(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub records: Vec<RecordDeclaration>,
    #[serde(default)]
    pub targets: Vec<TargetDescriptor>,
}

impl Document {
    pub fn parse(src: &str) -> Result<Self, DocumentError> {
        path_de::from_str_with_path(src)
    }

    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        path_de::from_value_with_path(value)
    }
}

/// Narrow a parsed document to the node at `pointer` (RFC 6901).
pub fn select_pointer(mut value: Value, pointer: &str) -> Result<Value, DocumentError> {
    value
        .pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| DocumentError::PointerNotFound(pointer.to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub records: RecordTable,
    pub targets: Vec<TargetDescriptor>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, document: Document) {
        for record in document.records {
            self.records.insert(record);
        }
        self.targets.extend(document.targets);
    }
}
