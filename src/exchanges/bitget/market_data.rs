use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::{
    Candle, Granularity, OrderBook, OrderBookLevel, ServerTime, Ticker, Trade,
};
use crate::exchanges::bitget::{conversions, rest::BitgetRest};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// The trades endpoint never returns more than this many records per call
const MAX_PAGE_SIZE: u32 = 100;

/// Bitget market data namespace
///
/// Typed wrappers over the public market-data endpoints, including the
/// cursor-paginated trade-history fetch.
#[derive(Debug)]
pub struct MarketData<R: RestClient> {
    rest: BitgetRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BitgetRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> MarketData<R> {
    /// Get the current exchange server time
    pub async fn get_server_time(&self) -> Result<ServerTime, ExchangeError> {
        info!("Fetching server time");
        let wire = self.rest.get_server_time().await?;
        Ok(ServerTime {
            server_time: wire.server_time,
        })
    }

    /// Get a list of all available spot trading pair names
    pub async fn get_supported_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        info!("Fetching all supported spot symbols");
        let wire = self.rest.get_supported_symbols().await?;
        Ok(wire.spot_list)
    }

    /// Get ticker information for a specific symbol
    pub async fn get_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        info!(symbol, "Fetching ticker");
        let wire = self.rest.get_ticker(symbol).await?;
        conversions::convert_ticker(wire)
    }

    /// Retrieve public trades for a spot symbol
    ///
    /// Without a time range this fetches one page of the most recent
    /// trades in the exchange's native recency order. With a range it
    /// walks the `afterTradeId` cursor until the range is exhausted and
    /// returns the accumulated trades sorted by timestamp ascending.
    ///
    /// A request-level failure mid-pagination stops the walk and returns
    /// everything fetched so far rather than discarding it; transport and
    /// decoding failures propagate.
    pub async fn get_trades(
        &self,
        symbol: &str,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<Trade>, ExchangeError> {
        let page_limit = limit.clamp(1, MAX_PAGE_SIZE);

        if start_time.is_none() && end_time.is_none() {
            info!(symbol, limit = page_limit, "Fetching most recent trades");
            let page = self
                .rest
                .get_fills_page(symbol, page_limit, None, None, None)
                .await?;
            return page.into_iter().map(conversions::convert_trade).collect();
        }

        info!(
            symbol,
            ?start_time,
            ?end_time,
            "Fetching all trades in range"
        );

        let mut all_trades: Vec<Trade> = Vec::new();
        let mut last_trade_id: Option<String> = None;
        let mut page_num = 1u32;

        loop {
            debug!(symbol, page_num, cursor = ?last_trade_id, "Fetching trades page");

            let page = match self
                .rest
                .get_fills_page(
                    symbol,
                    page_limit,
                    start_time,
                    end_time,
                    last_trade_id.as_deref(),
                )
                .await
            {
                Ok(page) => page,
                Err(e) if e.is_api_error() => {
                    // Keep what we have; the caller gets best-effort data
                    warn!(symbol, page_num, error = %e, "Trade page request failed, returning partial data");
                    break;
                }
                Err(e) => return Err(e),
            };

            if page.is_empty() {
                break; // No more data in the given range
            }

            let page_len = page.len() as u32;
            last_trade_id = page.last().map(|t| t.trade_id.clone());

            for wire in page {
                all_trades.push(conversions::convert_trade(wire)?);
            }

            // A short page was the last one
            if page_len < page_limit {
                break;
            }
            page_num += 1;
        }

        info!(
            symbol,
            total = all_trades.len(),
            pages = page_num,
            "Trade pagination complete"
        );

        // Page boundaries and cursor order do not guarantee global
        // chronological order, so sort the assembled set.
        all_trades.sort_by_key(|t| t.timestamp);

        Ok(all_trades)
    }

    /// Retrieve historical candlestick data, oldest to newest
    pub async fn get_candles(
        &self,
        symbol: &str,
        granularity: Granularity,
        limit: u32,
    ) -> Result<Vec<Candle>, ExchangeError> {
        info!(symbol, %granularity, limit, "Fetching candles");
        let rows = self.rest.get_candles(symbol, granularity, limit).await?;
        rows.iter().map(|row| conversions::convert_candle(row)).collect()
    }

    /// Retrieve the order book snapshot for a symbol
    pub async fn get_order_book(
        &self,
        symbol: &str,
        level: OrderBookLevel,
        limit: u32,
    ) -> Result<OrderBook, ExchangeError> {
        info!(symbol, %level, limit, "Fetching order book");
        let wire = self.rest.get_order_book(symbol, level, limit).await?;
        conversions::convert_order_book(wire)
    }
}
