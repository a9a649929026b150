//! Country search service: looks countries up by name in the REST Countries
//! API and memoizes the simplified result in process memory.

use axum::error_handling::HandleErrorLayer;
use axum::routing::any;
use axum::Router;
use std::sync::Arc;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::timeout::RequestBodyTimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod cache;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod restcountries;
pub mod server;
pub mod service;

use cache::InMemoryCache;
use config::Config;
use error::ClientError;
use restcountries::RestCountriesClient;
use service::CountryService;

pub const SEARCH_PATH: &str = "/api/countries/search";

/// Wires the upstream client, the cache and the service into a router.
pub fn app(config: &Config) -> Result<Router, ClientError> {
    let client = RestCountriesClient::new(&config.countries_url, config.client_timeout())?;
    let service = CountryService::new(Arc::new(client), Arc::new(InMemoryCache::new()));

    Ok(router(Arc::new(service), config))
}

pub fn router(service: Arc<CountryService>, config: &Config) -> Router {
    // Every method reaches the handler so that it can answer 405 with a JSON body.
    Router::new()
        .route(SEARCH_PATH, any(handler::search_country))
        .with_state(service)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handler::handle_middleware_error))
                .layer(TimeoutLayer::new(config.write_timeout()))
                .layer(RequestBodyTimeoutLayer::new(config.read_timeout())),
        )
}
