use crate::core::errors::ExchangeError;
use crate::core::types::{Candle, OrderBook, OrderBookEntry, Ticker, Trade, TradeSide};
use crate::exchanges::bitget::types::{self as bitget_types, parse_timestamp};
use rust_decimal::Decimal;
use serde_json::Value;

fn parse_decimal(s: &str, field: &str) -> Result<Decimal, ExchangeError> {
    s.parse().map_err(|e| {
        ExchangeError::InvalidResponseFormat(format!("bad decimal in '{}' ({}): {}", field, s, e))
    })
}

fn decimal_from_value(value: &Value, field: &str) -> Result<Decimal, ExchangeError> {
    match value {
        Value::String(s) => parse_decimal(s, field),
        Value::Number(n) => parse_decimal(&n.to_string(), field),
        other => Err(ExchangeError::InvalidResponseFormat(format!(
            "expected numeric value in '{}', got {}",
            field, other
        ))),
    }
}

fn timestamp_from_value(value: &Value, field: &str) -> Result<chrono::DateTime<chrono::Utc>, ExchangeError> {
    parse_timestamp(value).map_err(|e| {
        ExchangeError::InvalidResponseFormat(format!("bad timestamp in '{}': {}", field, e))
    })
}

/// Convert a Bitget trade fill to the core trade type
pub fn convert_trade(wire: bitget_types::BitgetTrade) -> Result<Trade, ExchangeError> {
    let side = match wire.side.to_ascii_lowercase().as_str() {
        "buy" => TradeSide::Buy,
        "sell" => TradeSide::Sell,
        other => {
            return Err(ExchangeError::InvalidResponseFormat(format!(
                "unknown trade side '{}'",
                other
            )))
        }
    };

    let price = parse_decimal(&wire.price, "price")?;
    if price <= Decimal::ZERO {
        return Err(ExchangeError::InvalidResponseFormat(format!(
            "trade price must be positive, got {}",
            price
        )));
    }

    let size = parse_decimal(&wire.size, "size")?;
    if size < Decimal::ZERO {
        return Err(ExchangeError::InvalidResponseFormat(format!(
            "trade size must be non-negative, got {}",
            size
        )));
    }

    Ok(Trade {
        trade_id: wire.trade_id,
        price,
        size,
        side,
        timestamp: timestamp_from_value(&wire.ts, "ts")?,
    })
}

/// Convert a fixed-position candle row to the core candle type
///
/// The wire format is `[ts, open, high, low, close, volume, quote_volume]`;
/// anything shorter than 7 elements is malformed.
pub fn convert_candle(row: &[Value]) -> Result<Candle, ExchangeError> {
    if row.len() < 7 {
        return Err(ExchangeError::InvalidResponseFormat(format!(
            "candle row has {} fields, expected at least 7",
            row.len()
        )));
    }

    Ok(Candle {
        timestamp: timestamp_from_value(&row[0], "candle[0]")?,
        open: decimal_from_value(&row[1], "candle[1] open")?,
        high: decimal_from_value(&row[2], "candle[2] high")?,
        low: decimal_from_value(&row[3], "candle[3] low")?,
        close: decimal_from_value(&row[4], "candle[4] close")?,
        volume: decimal_from_value(&row[5], "candle[5] volume")?,
        quote_volume: decimal_from_value(&row[6], "candle[6] quote_volume")?,
    })
}

fn convert_levels(
    levels: Vec<Vec<String>>,
    side: &str,
) -> Result<Vec<OrderBookEntry>, ExchangeError> {
    levels
        .into_iter()
        .map(|level| {
            if level.len() < 2 {
                return Err(ExchangeError::InvalidResponseFormat(format!(
                    "{} level has {} fields, expected [price, size]",
                    side,
                    level.len()
                )));
            }
            Ok(OrderBookEntry {
                price: parse_decimal(&level[0], side)?,
                quantity: parse_decimal(&level[1], side)?,
            })
        })
        .collect()
}

/// Convert a Bitget order book snapshot to the core type
pub fn convert_order_book(wire: bitget_types::BitgetOrderBook) -> Result<OrderBook, ExchangeError> {
    Ok(OrderBook {
        bids: convert_levels(wire.bids, "bid")?,
        asks: convert_levels(wire.asks, "ask")?,
        timestamp: timestamp_from_value(&wire.ts, "ts")?,
    })
}

/// Convert a Bitget ticker entry to the core type
pub fn convert_ticker(wire: bitget_types::BitgetTicker) -> Result<Ticker, ExchangeError> {
    Ok(Ticker {
        last_price: parse_decimal(&wire.last_pr, "lastPr")?,
        bid_price: parse_decimal(&wire.bid_pr, "bidPr")?,
        ask_price: parse_decimal(&wire.ask_pr, "askPr")?,
        bid_quantity: parse_decimal(&wire.bid_sz, "bidSz")?,
        ask_quantity: parse_decimal(&wire.ask_sz, "askSz")?,
        high_24h: parse_decimal(&wire.high_24h, "high24h")?,
        low_24h: parse_decimal(&wire.low_24h, "low24h")?,
        volume_24h: parse_decimal(&wire.base_volume, "baseVolume")?,
        quote_volume_24h: parse_decimal(&wire.quote_volume, "quoteVolume")?,
        timestamp: timestamp_from_value(&wire.ts, "ts")?,
        symbol: wire.symbol,
    })
}
