//! Yahoo Finance spot lookup
//!
//! Best-effort resolution of a ticker symbol to its latest close, using
//! Yahoo Finance's unofficial chart API. Pricers never call this; front-ends
//! use `resolve_spot` and fall back to a manually entered price when the
//! lookup fails.
//!
//! Note: Yahoo Finance data is delayed and intended for personal use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{PricingError, PricingResult};

/// Ticker value meaning "no lookup, use the manual price"
pub const NO_TICKER: &str = "N/A";

/// Source of a latest price for a symbol
pub trait SpotLookup {
    fn get_quote(&self, symbol: &str) -> PricingResult<SpotQuote>;
}

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> PricingResult<Self> {
        Self::with_base_url("https://query1.finance.yahoo.com/v8/finance")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> PricingResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| PricingError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl SpotLookup for YahooClient {
    /// Latest daily close for a symbol
    fn get_quote(&self, symbol: &str) -> PricingResult<SpotQuote> {
        let url = format!("{}/chart/{}?range=1d&interval=1d", self.base_url, symbol);

        let response: YahooChartResponse = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PricingError::network(e.to_string()))?
            .json()
            .map_err(|e| PricingError::data(format!("Failed to parse chart: {}", e)))?;

        parse_chart(symbol, response)
    }
}

fn parse_chart(symbol: &str, response: YahooChartResponse) -> PricingResult<SpotQuote> {
    if let Some(err) = response.chart.error {
        return Err(PricingError::data(format!(
            "{}: {}",
            symbol,
            err.description.unwrap_or_else(|| "unknown symbol".into())
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| PricingError::data(format!("No chart data returned for {}", symbol)))?;

    let last_close = result
        .indicators
        .quote
        .first()
        .and_then(|q| q.close.iter().rev().find_map(|c| *c));

    let price = last_close
        .or(result.meta.regular_market_price)
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| PricingError::data(format!("No usable price for {}", symbol)))?;

    Ok(SpotQuote {
        symbol: symbol.to_string(),
        price,
        currency: result.meta.currency,
        timestamp: Utc::now(),
    })
}

/// Spot price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub currency: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Where a resolved spot came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpotSource {
    /// Looked up for this ticker
    Ticker(String),
    /// Entered by the user, either directly or after a failed lookup
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSpot {
    pub price: f64,
    pub source: SpotSource,
}

/// True when the ticker input asks for a lookup
pub fn wants_lookup(ticker: &str) -> bool {
    let t = ticker.trim();
    !t.is_empty() && !t.eq_ignore_ascii_case(NO_TICKER)
}

/// Resolve the spot price, falling back to `manual` when the lookup is skipped or fails
pub fn resolve_spot(lookup: &impl SpotLookup, ticker: &str, manual: f64) -> ResolvedSpot {
    let manual_spot = ResolvedSpot {
        price: manual,
        source: SpotSource::Manual,
    };

    if !wants_lookup(ticker) {
        return manual_spot;
    }

    let symbol = ticker.trim().to_ascii_uppercase();
    match lookup.get_quote(&symbol) {
        Ok(quote) => {
            tracing::info!("{} spot: {:.2}", symbol, quote.price);
            ResolvedSpot {
                price: quote.price,
                source: SpotSource::Ticker(symbol),
            }
        }
        Err(e) => {
            tracing::warn!("Lookup for {} failed ({}), using manual spot {:.2}", symbol, e, manual);
            manual_spot
        }
    }
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    meta: YahooMeta,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooMeta {
    currency: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLookup(PricingResult<f64>);

    impl SpotLookup for FixedLookup {
        fn get_quote(&self, symbol: &str) -> PricingResult<SpotQuote> {
            match &self.0 {
                Ok(price) => Ok(SpotQuote {
                    symbol: symbol.to_string(),
                    price: *price,
                    currency: Some("USD".into()),
                    timestamp: Utc::now(),
                }),
                Err(e) => Err(PricingError::network(e.to_string())),
            }
        }
    }

    #[test]
    fn test_wants_lookup() {
        assert!(!wants_lookup("N/A"));
        assert!(!wants_lookup("n/a"));
        assert!(!wants_lookup("  "));
        assert!(wants_lookup("aapl"));
    }

    #[test]
    fn test_resolve_uses_ticker() {
        let resolved = resolve_spot(&FixedLookup(Ok(187.5)), "aapl", 100.0);
        assert_eq!(resolved.price, 187.5);
        assert_eq!(resolved.source, SpotSource::Ticker("AAPL".into()));
    }

    #[test]
    fn test_resolve_falls_back_to_manual() {
        let lookup = FixedLookup(Err(PricingError::network("offline")));
        let resolved = resolve_spot(&lookup, "ZZZZ", 42.0);
        assert_eq!(resolved.price, 42.0);
        assert_eq!(resolved.source, SpotSource::Manual);

        // N/A never hits the lookup
        let resolved = resolve_spot(&FixedLookup(Ok(1.0)), "N/A", 42.0);
        assert_eq!(resolved.source, SpotSource::Manual);
    }

    #[test]
    fn test_parse_chart() {
        let json = r#"{"chart":{"result":[{"meta":{"currency":"USD","regularMarketPrice":101.5},
            "indicators":{"quote":[{"close":[99.0,null]}]}}],"error":null}}"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        let quote = parse_chart("TEST", response).unwrap();
        // Last non-null close wins over the meta price
        assert_eq!(quote.price, 99.0);
        assert_eq!(quote.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_parse_chart_error() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        let err = parse_chart("ZZZZ", response).unwrap_err();
        assert!(err.to_string().contains("delisted"));
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_quote() {
        let client = YahooClient::new().unwrap();
        let quote = client.get_quote("SPY").unwrap();

        assert!(quote.price > 0.0);
        println!("SPY price: {}", quote.price);
    }
}
