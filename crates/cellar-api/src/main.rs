use std::sync::Arc;

use cellar_db::{BEER_DESIGN, BREWERY_DESIGN, BY_NAME_VIEW, Catalog};
use cellar_store::{MemoryStore, ViewDef};

use cellar_api::routes;
use cellar_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let api_addr = std::env::var("CELLAR_API_ADDR").unwrap_or_else(|_| "0.0.0.0:9700".into());
    let page_size: usize = std::env::var("CELLAR_PAGE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);

    let store = MemoryStore::new();
    for (design, doc_type) in [(BEER_DESIGN, "beer"), (BREWERY_DESIGN, "brewery")] {
        store
            .define_view(design, BY_NAME_VIEW, ViewDef::new(doc_type, "name"))
            .unwrap_or_else(|e| {
                eprintln!("failed to provision {design}/{BY_NAME_VIEW}: {e}");
                std::process::exit(1);
            });
    }

    let state = AppState {
        catalog: Arc::new(Catalog::new(Arc::new(store))),
        page_size,
    };

    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {api_addr}: {e}");
            std::process::exit(1);
        });

    tracing::info!("cellar-api listening on {api_addr}");
    axum::serve(listener, app).await.unwrap();
}
