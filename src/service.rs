use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cache::Cache;
use crate::error::SearchError;
use crate::model::Country;
use crate::restcountries::CountryClient;

/// Cache-aside lookup of countries by name.
pub struct CountryService {
    client: Arc<dyn CountryClient>,
    cache: Arc<dyn Cache<Country>>,
}

impl CountryService {
    pub fn new(client: Arc<dyn CountryClient>, cache: Arc<dyn Cache<Country>>) -> Self {
        CountryService { client, cache }
    }

    /// Looks up a country, serving from the cache when possible.
    ///
    /// The cache key is the trimmed, lowercased name. The upstream is queried
    /// with the trimmed name as given, and only the first record it returns
    /// is used. Nothing is cached on failure.
    pub async fn search_country(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Country, SearchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SearchError::InvalidInput);
        }

        let cache_key = name.to_lowercase();

        if let Some(country) = self.cache.get(&cache_key).await {
            info!("Cache hit for country: {}", cache_key);
            return Ok(country);
        }

        info!("Cache miss for country: {}, fetching from API", cache_key);
        let records = self.client.search_by_name(name, cancel).await?;

        let Some(record) = records.into_iter().next() else {
            return Err(SearchError::NoData(name.to_string()));
        };
        let country = Country::from_raw(record);

        self.cache.set(cache_key.clone(), country.clone()).await;
        info!("Stored country in cache: {}", cache_key);

        Ok(country)
    }
}
