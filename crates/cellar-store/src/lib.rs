mod error;
mod store;

pub use error::StoreError;
pub use store::{DocumentStore, KEY_RANGE_END, QueryRow, ViewDef, ViewQuery};

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
