use crate::core::kernel::RestClient;
use crate::exchanges::bitget::market_data::MarketData;

/// Bitget connector exposing the API namespaces
///
/// Only public market data exists for this exchange surface; the
/// namespace struct keeps the call sites shaped like
/// `connector.market.get_trades(...)`.
#[derive(Debug)]
pub struct BitgetConnector<R: RestClient> {
    pub market: MarketData<R>,
}

impl<R: RestClient + Clone> BitgetConnector<R> {
    /// Create a new connector over an already-built transport
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
        }
    }
}
