use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use cellar_db::{Beer, BeerFields};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BeerPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    brewery_id: String,
    #[serde(flatten)]
    extra: bson::Document,
}

impl BeerPayload {
    fn into_fields(self) -> BeerFields {
        BeerFields {
            name: self.name,
            brewery_id: self.brewery_id,
            extra: self.extra,
        }
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    value: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Beer>>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let beers = state.catalog.list_beers(state.page_size)?;
        Ok(Json(beers))
    })
    .await
    .unwrap()
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let beers = state.catalog.search_beers(&params.value, state.page_size)?;
        let rows: Vec<Value> = beers
            .iter()
            .map(|beer| {
                json!({
                    "id": beer.id,
                    "name": beer.name,
                    "brewery": beer.brewery_id,
                })
            })
            .collect();
        Ok(Json(Value::Array(rows)))
    })
    .await
    .unwrap()
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Beer>, ApiError> {
    tokio::task::spawn_blocking(move || match state.catalog.get_beer(&id)? {
        Some(beer) => Ok(Json(beer)),
        None => Err(ApiError::not_found(&id)),
    })
    .await
    .unwrap()
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BeerPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tokio::task::spawn_blocking(move || {
        let id = state.catalog.create_beer(payload.into_fields())?;
        Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
    })
    .await
    .unwrap()
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BeerPayload>,
) -> Result<StatusCode, ApiError> {
    tokio::task::spawn_blocking(move || {
        state.catalog.update_beer(&id, payload.into_fields())?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
    .unwrap()
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tokio::task::spawn_blocking(move || {
        state.catalog.delete(&id)?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
    .unwrap()
}
