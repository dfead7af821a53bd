use std::fmt;

use cellar_store::StoreError;

#[derive(Debug)]
pub enum CatalogError {
    Validation(String),
    AlreadyExists(String),
    NotFound(String),
    Store(StoreError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation(msg) => write!(f, "validation failed: {msg}"),
            CatalogError::AlreadyExists(id) => write!(f, "already exists: {id}"),
            CatalogError::NotFound(id) => write!(f, "not found: {id}"),
            CatalogError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        // Lift the store's typed conditions so callers match on one enum.
        match e {
            StoreError::NotFound(id) => CatalogError::NotFound(id),
            StoreError::AlreadyExists(id) => CatalogError::AlreadyExists(id),
            other => CatalogError::Store(other),
        }
    }
}
