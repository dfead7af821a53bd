use std::collections::HashMap;

use bson::Document;

use crate::error::StoreError;

/// Conventional high sentinel appended to a key prefix to form the exclusive
/// upper bound of a range query. Sorts after any real key.
pub const KEY_RANGE_END: &str = "\u{10ffff}";

/// One entry of a view range query, before it becomes a domain object.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRow {
    /// The emitted index key (the value of the indexed field).
    pub key: String,
    /// Primary key of the document that emitted this entry.
    pub id: String,
    /// The full document, present when `include_docs` was requested.
    pub doc: Option<Document>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub key_prefix: Option<String>,
    pub limit: Option<usize>,
    pub include_docs: bool,
}

/// Definition of a secondary index: emits `doc[field]` for every document
/// whose `type` field equals `doc_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDef {
    pub doc_type: String,
    pub field: String,
}

impl ViewDef {
    pub fn new(doc_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            field: field.into(),
        }
    }
}

pub trait DocumentStore {
    /// Quiet primary-key lookup: a missing id is `Ok(None)`, not an error.
    fn get(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Resolve many ids in one logical round trip. Per-key misses are
    /// reported as `None` values and never abort the call; duplicate ids
    /// collapse into a single entry.
    fn get_multi(&self, ids: &[String]) -> Result<HashMap<String, Option<Document>>, StoreError>;

    /// Insert a new document. Fails with `AlreadyExists` if `id` is taken.
    fn add(&self, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Unconditional overwrite (insert-or-replace).
    fn set(&self, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Delete a document. Fails with `NotFound` if `id` is absent.
    fn remove(&self, id: &str) -> Result<(), StoreError>;

    /// Range query against the view `design/view`. Rows come back in
    /// ascending key order; a `key_prefix` restricts them to keys in
    /// `[prefix, prefix + KEY_RANGE_END)`.
    fn query(
        &self,
        design: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<Vec<QueryRow>, StoreError>;
}
