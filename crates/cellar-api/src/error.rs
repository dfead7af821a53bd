use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cellar_db::CatalogError;

pub enum ApiError {
    Catalog(CatalogError),
}

impl ApiError {
    pub fn not_found(id: &str) -> Self {
        ApiError::Catalog(CatalogError::NotFound(id.to_string()))
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Catalog(e) = self;
        let status = match &e {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::AlreadyExists(_) => StatusCode::CONFLICT,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": e.to_string() });
        (status, Json(body)).into_response()
    }
}
