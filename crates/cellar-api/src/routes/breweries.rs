use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use cellar_db::{Brewery, BreweryFields};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BreweryPayload {
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    extra: bson::Document,
}

impl BreweryPayload {
    fn into_fields(self) -> BreweryFields {
        BreweryFields {
            name: self.name,
            extra: self.extra,
        }
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    value: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Brewery>>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let breweries = state.catalog.list_breweries(state.page_size)?;
        Ok(Json(breweries))
    })
    .await
    .unwrap()
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let breweries = state
            .catalog
            .search_breweries(&params.value, state.page_size)?;
        let rows: Vec<Value> = breweries
            .iter()
            .map(|brewery| {
                json!({
                    "id": brewery.id,
                    "name": brewery.name,
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
) -> Result<Json<Brewery>, ApiError> {
    tokio::task::spawn_blocking(move || match state.catalog.get_brewery(&id)? {
        Some(brewery) => Ok(Json(brewery)),
        None => Err(ApiError::not_found(&id)),
    })
    .await
    .unwrap()
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BreweryPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tokio::task::spawn_blocking(move || {
        let id = state.catalog.create_brewery(payload.into_fields())?;
        Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
    })
    .await
    .unwrap()
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BreweryPayload>,
) -> Result<StatusCode, ApiError> {
    tokio::task::spawn_blocking(move || {
        state.catalog.update_brewery(&id, payload.into_fields())?;
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
