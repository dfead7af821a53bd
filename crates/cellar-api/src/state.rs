use std::sync::Arc;

use cellar_db::Catalog;
use cellar_store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog<MemoryStore>>,
    pub page_size: usize,
}
