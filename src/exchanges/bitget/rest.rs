use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::{Granularity, OrderBookLevel};
use crate::exchanges::bitget::types::{
    BitgetCandleRow, BitgetOrderBook, BitgetResponse, BitgetServerTime, BitgetSupportedSymbols,
    BitgetTicker, BitgetTrade, SUCCESS_CODE,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fixed API-version prefix for every endpoint
const API_PREFIX: &str = "/api/v2";

/// Unwrap the standard response envelope, surfacing application-level
/// failures the exchange signals inside a 200 response.
fn unwrap_envelope_optional<T>(response_value: Value) -> Result<Option<T>, ExchangeError>
where
    T: DeserializeOwned,
{
    let response: BitgetResponse<T> = serde_json::from_value(response_value).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to parse Bitget response: {}", e))
    })?;

    if response.code != SUCCESS_CODE {
        return Err(ExchangeError::ApiError {
            status: None,
            code: response.code,
            message: response.msg,
        });
    }

    Ok(response.data)
}

/// Like [`unwrap_envelope_optional`] but for endpoints whose payload is
/// mandatory on success.
fn unwrap_envelope<T>(response_value: Value) -> Result<T, ExchangeError>
where
    T: DeserializeOwned,
{
    unwrap_envelope_optional(response_value)?
        .ok_or_else(|| ExchangeError::InvalidResponseFormat("missing data payload".to_string()))
}

/// Bitget REST API endpoint wrappers
///
/// Holds an injected transport handle; all typing and envelope handling
/// happens here, all HTTP mechanics in the kernel.
#[derive(Debug, Clone)]
pub struct BitgetRest<R: RestClient> {
    rest_client: R,
}

impl<R: RestClient> BitgetRest<R> {
    pub fn new(rest_client: R) -> Self {
        Self { rest_client }
    }

    fn endpoint(path: &str) -> String {
        format!("{}{}", API_PREFIX, path)
    }

    /// Get the exchange server time
    pub async fn get_server_time(&self) -> Result<BitgetServerTime, ExchangeError> {
        let response_value = self
            .rest_client
            .get(&Self::endpoint("/public/time"), &[])
            .await?;
        unwrap_envelope(response_value)
    }

    /// Get all available spot trading pair names
    pub async fn get_supported_symbols(&self) -> Result<BitgetSupportedSymbols, ExchangeError> {
        let response_value = self
            .rest_client
            .get(&Self::endpoint("/spot/market/support-symbols"), &[])
            .await?;
        unwrap_envelope(response_value)
    }

    /// Get ticker information for a single symbol
    ///
    /// The exchange returns a list with one entry for a single symbol.
    pub async fn get_ticker(&self, symbol: &str) -> Result<BitgetTicker, ExchangeError> {
        let query_params = [("symbol", symbol)];
        let response_value = self
            .rest_client
            .get(&Self::endpoint("/spot/market/ticker"), &query_params)
            .await?;

        let tickers: Vec<BitgetTicker> = unwrap_envelope(response_value)?;
        tickers.into_iter().next().ok_or_else(|| {
            ExchangeError::InvalidResponseFormat(format!("no ticker data for symbol {}", symbol))
        })
    }

    /// Fetch one page of public trade fills
    ///
    /// `after_trade_id` is the pagination cursor; a `None` data payload is
    /// treated as an exhausted range.
    pub async fn get_fills_page(
        &self,
        symbol: &str,
        limit: u32,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        after_trade_id: Option<&str>,
    ) -> Result<Vec<BitgetTrade>, ExchangeError> {
        let limit_str = limit.to_string();
        let start_str = start_time.map(|t| t.timestamp_millis().to_string());
        let end_str = end_time.map(|t| t.timestamp_millis().to_string());

        let mut query_params = vec![("symbol", symbol), ("limit", limit_str.as_str())];
        if let Some(ref start_val) = start_str {
            query_params.push(("startTime", start_val.as_str()));
        }
        if let Some(ref end_val) = end_str {
            query_params.push(("endTime", end_val.as_str()));
        }
        if let Some(cursor) = after_trade_id {
            query_params.push(("afterTradeId", cursor));
        }

        let response_value = self
            .rest_client
            .get(&Self::endpoint("/spot/market/fills"), &query_params)
            .await?;

        Ok(unwrap_envelope_optional(response_value)?.unwrap_or_default())
    }

    /// Get historical candlestick rows, oldest to newest
    pub async fn get_candles(
        &self,
        symbol: &str,
        granularity: Granularity,
        limit: u32,
    ) -> Result<Vec<BitgetCandleRow>, ExchangeError> {
        let limit_str = limit.to_string();
        let query_params = [
            ("symbol", symbol),
            ("granularity", granularity.as_str()),
            ("limit", limit_str.as_str()),
        ];

        let response_value = self
            .rest_client
            .get(&Self::endpoint("/spot/market/candles"), &query_params)
            .await?;
        unwrap_envelope(response_value)
    }

    /// Get the order book snapshot for a symbol
    pub async fn get_order_book(
        &self,
        symbol: &str,
        level: OrderBookLevel,
        limit: u32,
    ) -> Result<BitgetOrderBook, ExchangeError> {
        let limit_str = limit.to_string();
        let query_params = [
            ("symbol", symbol),
            ("type", level.as_str()),
            ("limit", limit_str.as_str()),
        ];

        let response_value = self
            .rest_client
            .get(&Self::endpoint("/spot/market/orderbook"), &query_params)
            .await?;
        unwrap_envelope(response_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_unwraps_payload() {
        let raw = json!({
            "code": "00000",
            "msg": "success",
            "requestTime": "1700000000000",
            "data": {"spotList": ["BTCUSDT", "ETHUSDT"]}
        });
        let symbols: BitgetSupportedSymbols = unwrap_envelope(raw).unwrap();
        assert_eq!(symbols.spot_list, vec!["BTCUSDT", "ETHUSDT"]);
    }

    #[test]
    fn test_error_envelope_preserves_code_and_message() {
        let raw = json!({
            "code": "40034",
            "msg": "Parameter does not exist",
            "requestTime": 1_700_000_000_000_i64,
            "data": null
        });
        let err = unwrap_envelope::<Value>(raw).unwrap_err();
        match err {
            ExchangeError::ApiError {
                status,
                code,
                message,
            } => {
                assert_eq!(status, None);
                assert_eq!(code, "40034");
                assert_eq!(message, "Parameter does not exist");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_success_envelope_with_null_data() {
        let raw = json!({
            "code": "00000",
            "msg": "success",
            "requestTime": "1700000000000",
            "data": null
        });
        // Optional form: an exhausted page
        let page: Option<Vec<BitgetTrade>> = unwrap_envelope_optional(raw.clone()).unwrap();
        assert!(page.is_none());
        // Mandatory form: a shape violation
        assert!(unwrap_envelope::<Vec<BitgetTrade>>(raw).is_err());
    }
}
