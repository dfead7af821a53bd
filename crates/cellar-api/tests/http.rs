use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use cellar_api::routes;
use cellar_api::state::AppState;
use cellar_db::{BEER_DESIGN, BREWERY_DESIGN, BY_NAME_VIEW, Catalog};
use cellar_store::{MemoryStore, ViewDef};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let store = MemoryStore::new();
    store
        .define_view(BEER_DESIGN, BY_NAME_VIEW, ViewDef::new("beer", "name"))
        .unwrap();
    store
        .define_view(BREWERY_DESIGN, BY_NAME_VIEW, ViewDef::new("brewery", "name"))
        .unwrap();

    let state = AppState {
        catalog: Arc::new(Catalog::new(Arc::new(store))),
        page_size: 30,
    };
    routes::router().with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_brewery(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/v1/breweries", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = app();
    let (status, body) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_and_fetch_a_beer() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;
    assert_eq!(brewery, "anchor_brewing");

    let (status, body) = send(
        &app,
        "POST",
        "/v1/beers",
        Some(json!({ "name": "Liberty Ale", "brewery_id": brewery, "style": "Pale Ale" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "anchor_brewing-liberty_ale");

    let (status, body) = send(&app, "GET", "/v1/beers/anchor_brewing-liberty_ale", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Liberty Ale");
    assert_eq!(body["brewery_id"], "anchor_brewing");
    assert_eq!(body["doc"]["style"], "Pale Ale");
}

#[tokio::test]
async fn create_beer_without_a_name_is_rejected() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;

    let (status, body) = send(
        &app,
        "POST",
        "/v1/beers",
        Some(json!({ "brewery_id": brewery })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn create_beer_with_unknown_brewery_is_rejected() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/v1/beers",
        Some(json!({ "name": "Liberty Ale", "brewery_id": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_beer_creation_conflicts() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;
    let payload = json!({ "name": "Liberty Ale", "brewery_id": brewery });

    let (status, _) = send(&app, "POST", "/v1/beers", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/v1/beers", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_beer_is_not_found() {
    let app = app();
    let (status, _) = send(&app, "GET", "/v1/beers/no_such_beer", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_missing_id_is_not_found() {
    let app = app();
    let (status, _) = send(&app, "DELETE", "/v1/beers/no_such_beer", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;
    send(
        &app,
        "POST",
        "/v1/beers",
        Some(json!({ "name": "Liberty Ale", "brewery_id": brewery })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/v1/beers/anchor_brewing-liberty_ale", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/v1/beers/anchor_brewing-liberty_ale", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_overwrites_a_beer() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;
    send(
        &app,
        "POST",
        "/v1/beers",
        Some(json!({ "name": "Liberty Ale", "brewery_id": brewery })),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        "/v1/beers/anchor_brewing-liberty_ale",
        Some(json!({ "name": "Liberty Ale 2024", "brewery_id": brewery })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/v1/beers/anchor_brewing-liberty_ale", None).await;
    assert_eq!(body["name"], "Liberty Ale 2024");
}

#[tokio::test]
async fn beer_search_returns_the_wire_shape() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;
    for name in ["IPA", "IPA Citra", "Imperial Stout"] {
        let (status, _) = send(
            &app,
            "POST",
            "/v1/beers",
            Some(json!({ "name": name, "brewery_id": brewery })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/v1/beers/search?value=IPA", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "IPA");
    assert_eq!(rows[0]["brewery"], "anchor_brewing");
    assert_eq!(rows[1]["name"], "IPA Citra");
}

#[tokio::test]
async fn brewery_search_returns_id_and_name_only() {
    let app = app();
    create_brewery(&app, "Anchor Brewing").await;
    create_brewery(&app, "Allagash").await;

    let (status, body) = send(&app, "GET", "/v1/breweries/search?value=An", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], json!({ "id": "anchor_brewing", "name": "Anchor Brewing" }));
}

#[tokio::test]
async fn list_beers_is_ordered_by_name() {
    let app = app();
    let brewery = create_brewery(&app, "Anchor Brewing").await;
    for name in ["Porter", "Liberty Ale", "Steam Beer"] {
        send(
            &app,
            "POST",
            "/v1/beers",
            Some(json!({ "name": name, "brewery_id": brewery })),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/v1/beers", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|beer| beer["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Liberty Ale", "Porter", "Steam Beer"]);
}
