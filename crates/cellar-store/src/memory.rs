use std::collections::HashMap;
use std::ops::Bound;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use bson::Document;
use imbl::OrdMap;

use crate::error::StoreError;
use crate::store::{DocumentStore, KEY_RANGE_END, QueryRow, ViewDef, ViewQuery};

type ViewId = (String, String);

/// Index entries are keyed `(emitted key, document id)` so equal keys sort
/// by id and range scans stay deterministic.
type ViewIndex = OrdMap<(String, String), ()>;

#[derive(Clone, Default)]
struct Snapshot {
    docs: OrdMap<String, Document>,
    views: HashMap<ViewId, ViewDef>,
    indexes: HashMap<ViewId, ViewIndex>,
}

impl Snapshot {
    fn index(&mut self, id: &str, doc: &Document) {
        for (view_id, def) in &self.views {
            if let Some(key) = emit_key(def, doc) {
                if let Some(index) = self.indexes.get_mut(view_id) {
                    index.insert((key, id.to_string()), ());
                }
            }
        }
    }

    fn unindex(&mut self, id: &str, doc: &Document) {
        for (view_id, def) in &self.views {
            if let Some(key) = emit_key(def, doc) {
                if let Some(index) = self.indexes.get_mut(view_id) {
                    index.remove(&(key, id.to_string()));
                }
            }
        }
    }
}

/// In-memory document store. Readers load an immutable snapshot (cheap due
/// to imbl structural sharing); writers take the write lock, clone the
/// snapshot, apply, and swap.
pub struct MemoryStore {
    data: ArcSwap<Snapshot>,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: ArcSwap::from_pointee(Snapshot::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Provision a view and backfill it from the documents already present.
    /// Setup-time operation, not part of the request path. Redefining an
    /// existing view rebuilds its index.
    pub fn define_view(&self, design: &str, view: &str, def: ViewDef) -> Result<(), StoreError> {
        self.with_write(|snap| {
            let mut index = ViewIndex::new();
            for (id, doc) in snap.docs.iter() {
                if let Some(key) = emit_key(&def, doc) {
                    index.insert((key, id.clone()), ());
                }
            }
            let view_id = (design.to_string(), view.to_string());
            snap.views.insert(view_id.clone(), def);
            snap.indexes.insert(view_id, index);
            Ok(())
        })
    }

    fn with_write<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Snapshot) -> Result<(), StoreError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Storage(format!("write lock poisoned: {e}")))?;

        let mut snap = (**self.data.load()).clone();
        apply(&mut snap)?;
        self.data.store(Arc::new(snap));
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.data.load().docs.get(id).cloned())
    }

    fn get_multi(&self, ids: &[String]) -> Result<HashMap<String, Option<Document>>, StoreError> {
        let snap = self.data.load();
        let mut out = HashMap::with_capacity(ids.len());
        for id in ids {
            out.insert(id.clone(), snap.docs.get(id).cloned());
        }
        Ok(out)
    }

    fn add(&self, id: &str, doc: Document) -> Result<(), StoreError> {
        self.with_write(|snap| {
            if snap.docs.contains_key(id) {
                return Err(StoreError::AlreadyExists(id.to_string()));
            }
            snap.index(id, &doc);
            snap.docs.insert(id.to_string(), doc);
            Ok(())
        })
    }

    fn set(&self, id: &str, doc: Document) -> Result<(), StoreError> {
        self.with_write(|snap| {
            if let Some(previous) = snap.docs.get(id).cloned() {
                snap.unindex(id, &previous);
            }
            snap.index(id, &doc);
            snap.docs.insert(id.to_string(), doc);
            Ok(())
        })
    }

    fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.with_write(|snap| {
            let Some(previous) = snap.docs.get(id).cloned() else {
                return Err(StoreError::NotFound(id.to_string()));
            };
            snap.unindex(id, &previous);
            snap.docs.remove(id);
            Ok(())
        })
    }

    fn query(
        &self,
        design: &str,
        view: &str,
        query: &ViewQuery,
    ) -> Result<Vec<QueryRow>, StoreError> {
        let snap = self.data.load();
        let index = snap
            .indexes
            .get(&(design.to_string(), view.to_string()))
            .ok_or_else(|| StoreError::ViewNotFound(format!("{design}/{view}")))?;

        let bounds = match &query.key_prefix {
            Some(prefix) => (
                Bound::Included((prefix.clone(), String::new())),
                Bound::Excluded((format!("{prefix}{KEY_RANGE_END}"), String::new())),
            ),
            None => (Bound::Unbounded, Bound::Unbounded),
        };

        let mut rows = Vec::new();
        for (entry, _) in index.range(bounds) {
            if let Some(limit) = query.limit {
                if rows.len() >= limit {
                    break;
                }
            }
            let (key, id) = entry;
            let doc = if query.include_docs {
                snap.docs.get(id).cloned()
            } else {
                None
            };
            rows.push(QueryRow {
                key: key.clone(),
                id: id.clone(),
                doc,
            });
        }

        Ok(rows)
    }
}

fn emit_key(def: &ViewDef, doc: &Document) -> Option<String> {
    if doc.get_str("type").ok()? != def.doc_type {
        return None;
    }
    doc.get_str(&def.field).ok().map(str::to_string)
}
