use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::model::RawCountry;

/// Source of upstream country records.
#[async_trait]
pub trait CountryClient: Send + Sync {
    /// Exact-name search. Returns promptly with [`ClientError::Cancelled`]
    /// once `cancel` fires.
    async fn search_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawCountry>, ClientError>;
}

/// Client for the REST Countries v3.1 API.
pub struct RestCountriesClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RestCountriesClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(RestCountriesClient {
            base_url: base_url.to_string(),
            http_client,
        })
    }

    /// `{base}/v3.1/name/{name}?fullText=true` with `name` path-escaped.
    pub fn search_url(&self, name: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ClientError::Request(format!("{}: {err}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::Request(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["v3.1", "name", name]);
        url.query_pairs_mut().append_pair("fullText", "true");

        Ok(url)
    }
}

#[async_trait]
impl CountryClient for RestCountriesClient {
    async fn search_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawCountry>, ClientError> {
        let url = self.search_url(name)?;

        let http_resp = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            resp = self.http_client.get(url).send() => resp.map_err(ClientError::Transport)?,
        };

        match http_resp.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(ClientError::NotFound(name.to_string())),
            status => return Err(ClientError::UnexpectedStatus(status.as_u16())),
        }

        let resp_body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            body = http_resp.bytes() => body.map_err(ClientError::Transport)?,
        };

        serde_json::from_slice(&resp_body).map_err(ClientError::Decode)
    }
}
