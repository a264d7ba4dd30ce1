//! Provider client for the exchangerate-api.com v6 endpoint.
//!
//! The endpoint is parameterized by an API key and a base currency and
//! answers with either a success payload carrying the full conversion table
//! and an update timestamp, or an explicit error status with an
//! `error-type` string. Anything else is malformed.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::rates::{RateProviderTrait, RateTable, RatesError};

/// Default HTTP request timeout. A hung fetch surfaces as a failed one and
/// takes the caller's fallback path.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Wire shape of a v6 reply. Everything beyond `result` is optional so a
/// provider-reported error can be told apart from a malformed payload.
#[derive(Debug, Deserialize)]
struct ApiReply {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    conversion_rates: Option<HashMap<String, Decimal>>,
    time_last_update_unix: Option<i64>,
}

pub struct ExchangeRateApiProvider {
    client: Client,
    api_key: String,
}

impl ExchangeRateApiProvider {
    /// Creates a provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    fn interpret_reply(reply: ApiReply) -> Result<RateTable, RatesError> {
        if reply.result != "success" {
            let kind = reply.error_type.unwrap_or_else(|| "unknown".to_string());
            return Err(RatesError::ProviderFailure(kind));
        }

        let conversion_rates = reply.conversion_rates.ok_or_else(|| {
            RatesError::MalformedResponse("missing conversion_rates".to_string())
        })?;
        let time_last_update_unix = reply.time_last_update_unix.ok_or_else(|| {
            RatesError::MalformedResponse("missing time_last_update_unix".to_string())
        })?;

        Ok(RateTable {
            result: reply.result,
            time_last_update_unix,
            conversion_rates,
        })
    }
}

#[async_trait]
impl RateProviderTrait for ExchangeRateApiProvider {
    async fn fetch_latest(&self, base_currency: &str) -> Result<RateTable, RatesError> {
        let url = format!("{}/{}/latest/{}", API_BASE_URL, self.api_key, base_currency);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RatesError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RatesError::FetchFailed(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| RatesError::MalformedResponse(e.to_string()))?;

        Self::interpret_reply(reply)
    }
}
