use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::BoxError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::error::SearchError;
use crate::model::Country;
use crate::service::CountryService;

/// JSON error body. `error` is the reason phrase of the status code.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.status.canonical_reason().unwrap_or_default().to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

// Only empty input is a client error; every other lookup failure is reported as not found.
impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        let status = match err {
            SearchError::InvalidInput => StatusCode::BAD_REQUEST,
            SearchError::Upstream(_) | SearchError::NoData(_) => StatusCode::NOT_FOUND,
        };
        ApiError::new(status, err.to_string())
    }
}

/// Converts errors raised by the middleware stack into the JSON error body.
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::new(StatusCode::REQUEST_TIMEOUT, "request timed out")
    } else {
        error!("Unhandled middleware error: {err}");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

/// `GET /api/countries/search?name=<country>`
///
/// When `name` is repeated the first occurrence is used.
pub async fn search_country(
    method: Method,
    uri: Uri,
    State(service): State<Arc<CountryService>>,
) -> Result<Json<Country>, ApiError> {
    if method != Method::GET {
        return Err(ApiError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed",
        ));
    }

    let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map_err(|rejection| ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()))?;

    let country_name = params
        .into_iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value)
        .unwrap_or_default();
    if country_name.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "name query parameter is required",
        ));
    }

    // Fires if this request is dropped before the lookup completes.
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    match service.search_country(&country_name, &cancel).await {
        Ok(country) => Ok(Json(country)),
        Err(err) => {
            error!("Error searching country: {err}");
            Err(err.into())
        }
    }
}
