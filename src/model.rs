use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Simplified country record returned to API clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    pub capital: String,
    pub currency: String,
    pub population: u64,
}

/// One entry of the REST Countries `/name` response.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawCountry {
    pub name: CountryName,
    pub capital: Vec<String>,
    // Ordered by currency code so that currency selection is stable.
    pub currencies: BTreeMap<String, CurrencyInfo>,
    pub population: u64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CurrencyInfo {
    pub name: String,
    pub symbol: String,
}

impl Country {
    /// Normalizes an upstream record.
    ///
    /// The capital is the first listed one. The currency is the first
    /// non-empty symbol in currency-code order, falling back to the first
    /// non-empty currency name.
    pub fn from_raw(raw: RawCountry) -> Self {
        let currency = raw
            .currencies
            .values()
            .find(|info| !info.symbol.is_empty())
            .map(|info| info.symbol.clone())
            .or_else(|| {
                raw.currencies
                    .values()
                    .find(|info| !info.name.is_empty())
                    .map(|info| info.name.clone())
            })
            .unwrap_or_default();

        Country {
            name: raw.name.common,
            capital: raw.capital.into_iter().next().unwrap_or_default(),
            currency,
            population: raw.population,
        }
    }
}
