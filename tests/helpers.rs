#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use country_search::config::Config;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const GERMANY: &str = r#"[{
    "name": {"common": "Germany", "official": "Federal Republic of Germany"},
    "capital": ["Berlin"],
    "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
    "population": 83240525
}]"#;

/// Fake REST Countries API counting the lookups it serves.
pub struct Upstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn upstream_country(
    State(hits): State<Arc<AtomicUsize>>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    hits.fetch_add(1, Ordering::SeqCst);

    if query.get("fullText").map(String::as_str) != Some("true") {
        return (StatusCode::BAD_REQUEST, "fullText missing".to_string());
    }

    match name.to_lowercase().as_str() {
        "germany" => (StatusCode::OK, GERMANY.to_string()),
        "empty" => (StatusCode::OK, "[]".to_string()),
        "broken" => (StatusCode::OK, "{not json".to_string()),
        "unavailable" => (StatusCode::SERVICE_UNAVAILABLE, String::new()),
        "delayed" => {
            tokio::time::sleep(Duration::from_millis(500)).await;
            (StatusCode::OK, GERMANY.to_string())
        }
        "slow" => {
            tokio::time::sleep(Duration::from_secs(10)).await;
            (StatusCode::OK, GERMANY.to_string())
        }
        _ => (
            StatusCode::NOT_FOUND,
            r#"{"status":404,"message":"Not Found"}"#.to_string(),
        ),
    }
}

pub async fn spawn_upstream() -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v3.1/name/:name", get(upstream_country))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    Upstream {
        base_url: format!("http://{addr}"),
        hits,
    }
}

pub fn test_config(upstream: &Upstream) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        countries_url: upstream.base_url.clone(),
        client_timeout: 30,
        ..Config::default()
    }
}

/// Starts the service against `upstream` and returns its base URL.
pub async fn spawn_app(upstream: &Upstream) -> String {
    let cfg = test_config(upstream);
    let app = country_search::app(&cfg).unwrap();

    let listener = TcpListener::bind(&cfg.listen_addr).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    format!("http://{addr}")
}

/// Queries the search endpoint, returning status and parsed body.
pub async fn get_country_info(
    client: &reqwest::Client,
    base_url: &str,
    country_name: &str,
) -> Result<(u16, Value), Box<dyn std::error::Error>> {
    let response = client
        .get(format!("{}/api/countries/search", base_url))
        .query(&[("name", country_name)])
        .send()
        .await?;

    let status = response.status().as_u16();
    let response_text = response.text().await?;
    Ok((status, serde_json::from_str(&response_text)?))
}
