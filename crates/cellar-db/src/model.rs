use bson::{Bson, Document};
use serde::Serialize;

/// A beer, read-constructed fresh from a document or view row. Holds the
/// underlying free-form document (when available) so callers can probe
/// arbitrary fields without schema coupling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Beer {
    pub id: String,
    pub name: String,
    pub brewery_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
}

impl Beer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brewery_id: None,
            doc: None,
        }
    }

    pub fn from_doc(id: impl Into<String>, doc: Document) -> Self {
        Self {
            id: id.into(),
            name: doc.get_str("name").unwrap_or_default().to_string(),
            brewery_id: doc.get_str("brewery_id").ok().map(str::to_string),
            doc: Some(doc),
        }
    }

    /// Free-form attribute lookup backed by the underlying document.
    pub fn attr(&self, name: &str) -> Option<&Bson> {
        self.doc.as_ref()?.get(name)
    }

    /// Like [`attr`](Self::attr), but with the empty string standing in for
    /// anything absent or non-string.
    pub fn attr_str(&self, name: &str) -> &str {
        self.doc
            .as_ref()
            .and_then(|doc| doc.get_str(name).ok())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
}

impl Brewery {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            doc: None,
        }
    }

    pub fn from_doc(id: impl Into<String>, doc: Document) -> Self {
        Self {
            id: id.into(),
            name: doc.get_str("name").unwrap_or_default().to_string(),
            doc: Some(doc),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&Bson> {
        self.doc.as_ref()?.get(name)
    }

    pub fn attr_str(&self, name: &str) -> &str {
        self.doc
            .as_ref()
            .and_then(|doc| doc.get_str(name).ok())
            .unwrap_or("")
    }
}
