use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bitget API standard response wrapper
///
/// Every response arrives in this envelope; `code` is the literal string
/// `"00000"` on success, anything else is an application-level failure
/// even when the HTTP status is 200.
#[derive(Debug, Deserialize, Serialize)]
pub struct BitgetResponse<T> {
    pub code: String,
    pub msg: String,
    #[serde(
        rename = "requestTime",
        deserialize_with = "flexible_timestamp::deserialize"
    )]
    pub request_time: DateTime<Utc>,
    pub data: Option<T>,
}

/// Success sentinel for the envelope `code` field
pub const SUCCESS_CODE: &str = "00000";

/// Server time payload from `/public/time`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BitgetServerTime {
    #[serde(
        rename = "serverTime",
        deserialize_with = "flexible_timestamp::deserialize"
    )]
    pub server_time: DateTime<Utc>,
}

/// Payload from `/spot/market/support-symbols`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BitgetSupportedSymbols {
    #[serde(rename = "spotList")]
    pub spot_list: Vec<String>,
}

/// Ticker entry from `/spot/market/ticker` (returned as a list of one)
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BitgetTicker {
    pub symbol: String,
    pub last_pr: String,
    pub bid_pr: String,
    pub ask_pr: String,
    pub bid_sz: String,
    pub ask_sz: String,
    pub high_24h: String,
    pub low_24h: String,
    pub base_volume: String,
    pub quote_volume: String,
    pub ts: Value,
}

/// Trade fill from `/spot/market/fills`
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BitgetTrade {
    pub trade_id: String,
    pub price: String,
    pub size: String,
    pub side: String,
    pub ts: Value,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Order book snapshot from `/spot/market/orderbook`
///
/// Price levels are `[price, size]` string pairs; bids arrive sorted
/// descending, asks ascending.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BitgetOrderBook {
    pub bids: Vec<Vec<String>>,
    pub asks: Vec<Vec<String>>,
    pub ts: Value,
}

/// Candles arrive as fixed-position arrays:
/// `[timestamp_ms, open, high, low, close, volume, quote_volume]`.
pub type BitgetCandleRow = Vec<Value>;

/// Normalize the exchange's three wire forms for instants.
///
/// Numeric and numeric-string values are epoch milliseconds; any other
/// string is parsed as ISO-8601.
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::Number(n) => {
            let ms = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| format!("timestamp out of range: {}", n))?;
            DateTime::from_timestamp_millis(ms).ok_or_else(|| format!("invalid epoch ms: {}", ms))
        }
        Value::String(s) if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() => {
            let ms: i64 = s.parse().map_err(|e| format!("invalid epoch ms: {}", e))?;
            DateTime::from_timestamp_millis(ms).ok_or_else(|| format!("invalid epoch ms: {}", ms))
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("invalid ISO-8601 timestamp '{}': {}", s, e)),
        other => Err(format!("unexpected timestamp value: {}", other)),
    }
}

/// Serde adapter over [`parse_timestamp`] for struct fields
pub(crate) mod flexible_timestamp {
    use super::{parse_timestamp, DateTime, Utc, Value};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        parse_timestamp(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_three_forms_agree() {
        let from_int = parse_timestamp(&json!(1_700_000_000_000_i64)).unwrap();
        let from_numeric_string = parse_timestamp(&json!("1700000000000")).unwrap();
        let from_iso = parse_timestamp(&json!("2023-11-14T22:13:20Z")).unwrap();

        assert_eq!(from_int, from_numeric_string);
        assert_eq!(from_numeric_string, from_iso);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(parse_timestamp(&json!("not a time")).is_err());
        assert!(parse_timestamp(&json!(null)).is_err());
        assert!(parse_timestamp(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_envelope_decodes_with_numeric_request_time() {
        let raw = json!({
            "code": "00000",
            "msg": "success",
            "requestTime": 1_700_000_000_000_i64,
            "data": {"serverTime": "1700000000000"}
        });
        let envelope: BitgetResponse<BitgetServerTime> = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.code, SUCCESS_CODE);
        let data = envelope.data.unwrap();
        assert_eq!(data.server_time, envelope.request_time);
    }

    #[test]
    fn test_envelope_decodes_without_data() {
        let raw = json!({
            "code": "40034",
            "msg": "Parameter does not exist",
            "requestTime": "1700000000000",
            "data": null
        });
        let envelope: BitgetResponse<Value> = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.code, "40034");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_trade_wire_decoding() {
        let raw = json!({
            "tradeId": "123456789",
            "price": "42000.5",
            "size": "0.25",
            "side": "buy",
            "ts": "1700000000000"
        });
        let trade: BitgetTrade = serde_json::from_value(raw).unwrap();
        assert_eq!(trade.trade_id, "123456789");
        assert_eq!(trade.side, "buy");
    }
}
