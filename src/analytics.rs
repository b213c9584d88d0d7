use crate::core::types::{Candle, OrderBook, Trade, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Aggregate statistics over a set of trades
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub buy_trades: usize,
    pub sell_trades: usize,
    /// Total volume of all trades (sum of sizes)
    pub total_volume: Decimal,
    /// Volume of buy-side trades
    pub buy_volume: Decimal,
    /// Volume of sell-side trades
    pub sell_volume: Decimal,
    /// Volume-Weighted Average Price
    pub vwap: Decimal,
}

impl TradeStats {
    fn zeroed() -> Self {
        Self {
            total_trades: 0,
            buy_trades: 0,
            sell_trades: 0,
            total_volume: Decimal::ZERO,
            buy_volume: Decimal::ZERO,
            sell_volume: Decimal::ZERO,
            vwap: Decimal::ZERO,
        }
    }
}

/// Aggregate statistics over a candle window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleStats {
    /// Highest price in the candle period
    pub period_high: Decimal,
    /// Lowest price in the candle period
    pub period_low: Decimal,
    /// Percentage change from first open to last close
    pub price_change_percent: Decimal,
    /// Simple moving average of the closing prices
    pub simple_moving_average: Decimal,
}

impl CandleStats {
    fn zeroed() -> Self {
        Self {
            period_high: Decimal::ZERO,
            period_low: Decimal::ZERO,
            price_change_percent: Decimal::ZERO,
            simple_moving_average: Decimal::ZERO,
        }
    }
}

/// Summary statistics derived from an order book snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookStats {
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub mid_price: Option<Decimal>,
    pub spread: Option<Decimal>,
    /// Cumulative size across all bid levels
    pub bid_depth: Decimal,
    /// Cumulative size across all ask levels
    pub ask_depth: Decimal,
    pub bid_levels: usize,
    pub ask_levels: usize,
}

/// A composite result for all analysis outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub trade_stats: TradeStats,
    pub candle_stats: CandleStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_book_stats: Option<OrderBookStats>,
}

/// Calculate statistics from a list of trades
///
/// Empty input yields zeroed stats rather than an error so downstream
/// reporting stays total.
pub fn trade_stats(trades: &[Trade]) -> TradeStats {
    if trades.is_empty() {
        warn!("Trade list is empty, returning zeroed-out stats");
        return TradeStats::zeroed();
    }

    let mut buy_trades = 0usize;
    let mut buy_volume = Decimal::ZERO;
    let mut sell_volume = Decimal::ZERO;
    let mut weighted_price_sum = Decimal::ZERO;

    for trade in trades {
        match trade.side {
            TradeSide::Buy => {
                buy_trades += 1;
                buy_volume += trade.size;
            }
            TradeSide::Sell => sell_volume += trade.size,
        }
        weighted_price_sum += trade.price * trade.size;
    }

    let total_volume = buy_volume + sell_volume;
    let vwap = if total_volume > Decimal::ZERO {
        weighted_price_sum / total_volume
    } else {
        Decimal::ZERO
    };

    TradeStats {
        total_trades: trades.len(),
        buy_trades,
        sell_trades: trades.len() - buy_trades,
        total_volume,
        buy_volume,
        sell_volume,
        vwap,
    }
}

/// Calculate statistics from a list of candles
///
/// Candles are re-sorted by timestamp before the first-open/last-close
/// comparison, in case the input arrived out of order.
pub fn candle_stats(candles: &[Candle]) -> CandleStats {
    if candles.is_empty() {
        warn!("Candle list is empty, returning zeroed-out stats");
        return CandleStats::zeroed();
    }

    let mut sorted: Vec<&Candle> = candles.iter().collect();
    sorted.sort_by_key(|c| c.timestamp);

    let period_high = sorted.iter().map(|c| c.high).max().unwrap_or_default();
    let period_low = sorted.iter().map(|c| c.low).min().unwrap_or_default();

    let first_open = sorted[0].open;
    let last_close = sorted[sorted.len() - 1].close;
    let price_change_percent = if first_open > Decimal::ZERO {
        (last_close - first_open) / first_open * Decimal::from(100)
    } else {
        Decimal::ZERO
    };

    let close_sum: Decimal = sorted.iter().map(|c| c.close).sum();
    let simple_moving_average = close_sum / Decimal::from(sorted.len() as u64);

    CandleStats {
        period_high,
        period_low,
        price_change_percent,
        simple_moving_average,
    }
}

/// Calculate summary statistics from an order book snapshot
///
/// Relies on the exchange's ordering: bids descending, asks ascending,
/// so the best level is the first entry of each side.
pub fn order_book_stats(book: &OrderBook) -> OrderBookStats {
    let best_bid = book.bids.first().map(|level| level.price);
    let best_ask = book.asks.first().map(|level| level.price);

    let (mid_price, spread) = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => (Some((bid + ask) / Decimal::from(2)), Some(ask - bid)),
        _ => (None, None),
    };

    OrderBookStats {
        best_bid,
        best_ask,
        mid_price,
        spread,
        bid_depth: book.bids.iter().map(|level| level.quantity).sum(),
        ask_depth: book.asks.iter().map(|level| level.quantity).sum(),
        bid_levels: book.bids.len(),
        ask_levels: book.asks.len(),
    }
}

/// Run all analysis functions and assemble the composite report
pub fn run_analysis(
    symbol: &str,
    trades: &[Trade],
    candles: &[Candle],
    order_book: Option<&OrderBook>,
) -> AnalysisReport {
    AnalysisReport {
        symbol: symbol.to_string(),
        trade_stats: trade_stats(trades),
        candle_stats: candle_stats(candles),
        order_book_stats: order_book.map(order_book_stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::OrderBookEntry;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn trade(price: Decimal, size: Decimal, side: TradeSide, secs: i64) -> Trade {
        Trade {
            trade_id: format!("{}", secs),
            price,
            size,
            side,
            timestamp: ts(secs),
        }
    }

    fn candle(open: Decimal, high: Decimal, low: Decimal, close: Decimal, secs: i64) -> Candle {
        Candle {
            timestamp: ts(secs),
            open,
            high,
            low,
            close,
            volume: dec!(1),
            quote_volume: dec!(1),
        }
    }

    #[test]
    fn test_trade_stats_vwap() {
        let trades = vec![
            trade(dec!(10), dec!(2), TradeSide::Buy, 1),
            trade(dec!(20), dec!(1), TradeSide::Sell, 2),
        ];
        let stats = trade_stats(&trades);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.buy_trades, 1);
        assert_eq!(stats.sell_trades, 1);
        assert_eq!(stats.total_volume, dec!(3));
        assert_eq!(stats.buy_volume, dec!(2));
        assert_eq!(stats.sell_volume, dec!(1));
        // (10*2 + 20*1) / 3
        assert_eq!(stats.vwap.round_dp(4), dec!(13.3333));
    }

    #[test]
    fn test_trade_stats_empty_is_zeroed() {
        let stats = trade_stats(&[]);
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.total_volume, Decimal::ZERO);
        assert_eq!(stats.vwap, Decimal::ZERO);
    }

    #[test]
    fn test_trade_stats_zero_volume_vwap() {
        let trades = vec![trade(dec!(10), dec!(0), TradeSide::Buy, 1)];
        let stats = trade_stats(&trades);
        assert_eq!(stats.vwap, Decimal::ZERO);
    }

    #[test]
    fn test_candle_stats_range_and_sma() {
        let candles = vec![
            candle(dec!(1), dec!(1), dec!(0), dec!(1), 1),
            candle(dec!(2), dec!(2), dec!(1), dec!(2), 2),
            candle(dec!(3), dec!(4), dec!(2), dec!(3), 3),
        ];
        let stats = candle_stats(&candles);
        assert_eq!(stats.period_high, dec!(4));
        assert_eq!(stats.period_low, dec!(0));
        assert_eq!(stats.simple_moving_average, dec!(2));
        // ((3 - 1) / 1) * 100
        assert_eq!(stats.price_change_percent, dec!(200));
    }

    #[test]
    fn test_candle_stats_sorts_before_first_last() {
        // Same candles, delivered newest-first
        let candles = vec![
            candle(dec!(3), dec!(4), dec!(2), dec!(3), 3),
            candle(dec!(1), dec!(1), dec!(0), dec!(1), 1),
            candle(dec!(2), dec!(2), dec!(1), dec!(2), 2),
        ];
        let stats = candle_stats(&candles);
        assert_eq!(stats.price_change_percent, dec!(200));
    }

    #[test]
    fn test_candle_stats_empty_and_zero_open() {
        let empty = candle_stats(&[]);
        assert_eq!(empty.simple_moving_average, Decimal::ZERO);
        assert_eq!(empty.price_change_percent, Decimal::ZERO);

        let zero_open = candle_stats(&[candle(dec!(0), dec!(2), dec!(1), dec!(2), 1)]);
        assert_eq!(zero_open.price_change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_order_book_stats() {
        let book = OrderBook {
            bids: vec![
                OrderBookEntry {
                    price: dec!(100),
                    quantity: dec!(2),
                },
                OrderBookEntry {
                    price: dec!(99),
                    quantity: dec!(3),
                },
            ],
            asks: vec![
                OrderBookEntry {
                    price: dec!(101),
                    quantity: dec!(1),
                },
                OrderBookEntry {
                    price: dec!(102),
                    quantity: dec!(4),
                },
            ],
            timestamp: ts(1),
        };
        let stats = order_book_stats(&book);
        assert_eq!(stats.best_bid, Some(dec!(100)));
        assert_eq!(stats.best_ask, Some(dec!(101)));
        assert_eq!(stats.mid_price, Some(dec!(100.5)));
        assert_eq!(stats.spread, Some(dec!(1)));
        assert_eq!(stats.bid_depth, dec!(5));
        assert_eq!(stats.ask_depth, dec!(5));
        assert_eq!(stats.bid_levels, 2);
        assert_eq!(stats.ask_levels, 2);
    }

    #[test]
    fn test_order_book_stats_empty_sides() {
        let book = OrderBook {
            bids: vec![],
            asks: vec![],
            timestamp: ts(1),
        };
        let stats = order_book_stats(&book);
        assert_eq!(stats.best_bid, None);
        assert_eq!(stats.mid_price, None);
        assert_eq!(stats.spread, None);
        assert_eq!(stats.bid_depth, Decimal::ZERO);
    }
}
