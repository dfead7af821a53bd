mod beers;
mod breweries;
mod health;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/v1/beers", get(beers::list).post(beers::create))
        .route("/v1/beers/search", get(beers::search))
        .route(
            "/v1/beers/{id}",
            get(beers::show).put(beers::update).delete(beers::remove),
        )
        .route(
            "/v1/breweries",
            get(breweries::list).post(breweries::create),
        )
        .route("/v1/breweries/search", get(breweries::search))
        .route(
            "/v1/breweries/{id}",
            get(breweries::show)
                .put(breweries::update)
                .delete(breweries::remove),
        )
}
