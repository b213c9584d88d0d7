use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a trade execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A single trade execution, immutable once decoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: String,
    pub price: Decimal,
    pub size: Decimal,
    pub side: TradeSide,
    pub timestamp: DateTime<Utc>,
}

/// A single OHLCV candlestick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub quote_volume: Decimal,
}

/// One price level of an order book side
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderBookEntry {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Order book snapshot: bids sorted descending, asks ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<OrderBookEntry>,
    pub asks: Vec<OrderBookEntry>,
    pub timestamp: DateTime<Utc>,
}

/// 24h ticker snapshot for a single symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub last_price: Decimal,
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub bid_quantity: Decimal,
    pub ask_quantity: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,
    pub volume_24h: Decimal,
    pub quote_volume_24h: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Exchange server time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServerTime {
    pub server_time: DateTime<Utc>,
}

/// Candle period codes accepted by the exchange. Closed set; the `*Utc`
/// variants are aligned to UTC day boundaries instead of local ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Min1,
    Min3,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Hour6,
    Hour12,
    Day1,
    Week1,
    Month1,
    Hour6Utc,
    Hour12Utc,
    Day1Utc,
    Day3Utc,
    Week1Utc,
    Month1Utc,
}

impl Granularity {
    /// Wire code as the exchange expects it in the `granularity` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min3 => "3min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour12 => "12h",
            Self::Day1 => "1day",
            Self::Week1 => "1week",
            Self::Month1 => "1M",
            Self::Hour6Utc => "6Hutc",
            Self::Hour12Utc => "12Hutc",
            Self::Day1Utc => "1Dutc",
            Self::Day3Utc => "3Dutc",
            Self::Week1Utc => "1Wutc",
            Self::Month1Utc => "1Mutc",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1min" => Ok(Self::Min1),
            "3min" => Ok(Self::Min3),
            "5min" => Ok(Self::Min5),
            "15min" => Ok(Self::Min15),
            "30min" => Ok(Self::Min30),
            "1h" => Ok(Self::Hour1),
            "4h" => Ok(Self::Hour4),
            "6h" => Ok(Self::Hour6),
            "12h" => Ok(Self::Hour12),
            "1day" => Ok(Self::Day1),
            "1week" => Ok(Self::Week1),
            "1M" => Ok(Self::Month1),
            "6Hutc" => Ok(Self::Hour6Utc),
            "12Hutc" => Ok(Self::Hour12Utc),
            "1Dutc" => Ok(Self::Day1Utc),
            "3Dutc" => Ok(Self::Day3Utc),
            "1Wutc" => Ok(Self::Week1Utc),
            "1Mutc" => Ok(Self::Month1Utc),
            other => Err(format!("unknown granularity '{}'", other)),
        }
    }
}

/// Order book price-aggregation steps. `Step0` is the most granular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBookLevel {
    Step0,
    Step1,
    Step2,
    Step3,
    Step4,
    Step5,
}

impl OrderBookLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step0 => "step0",
            Self::Step1 => "step1",
            Self::Step2 => "step2",
            Self::Step3 => "step3",
            Self::Step4 => "step4",
            Self::Step5 => "step5",
        }
    }
}

impl fmt::Display for OrderBookLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBookLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "step0" => Ok(Self::Step0),
            "step1" => Ok(Self::Step1),
            "step2" => Ok(Self::Step2),
            "step3" => Ok(Self::Step3),
            "step4" => Ok(Self::Step4),
            "step5" => Ok(Self::Step5),
            other => Err(format!("unknown order book level '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_round_trip() {
        for code in [
            "1min", "3min", "5min", "15min", "30min", "1h", "4h", "6h", "12h", "1day", "1week",
            "1M", "6Hutc", "12Hutc", "1Dutc", "3Dutc", "1Wutc", "1Mutc",
        ] {
            let parsed: Granularity = code.parse().unwrap();
            assert_eq!(parsed.as_str(), code);
        }
        assert!("2h".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_order_book_level_round_trip() {
        for code in ["step0", "step1", "step2", "step3", "step4", "step5"] {
            let parsed: OrderBookLevel = code.parse().unwrap();
            assert_eq!(parsed.as_str(), code);
        }
        assert!("step6".parse::<OrderBookLevel>().is_err());
    }
}
