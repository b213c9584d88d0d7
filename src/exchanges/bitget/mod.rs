pub mod builder;
pub mod connector;
pub mod conversions;
pub mod market_data;
pub mod rest;
pub mod signer;
pub mod types;

// Re-export main components
pub use builder::BitgetBuilder;
pub use connector::BitgetConnector;
pub use market_data::MarketData;
pub use rest::BitgetRest;
pub use signer::BitgetSigner;
pub use types::{
    BitgetCandleRow, BitgetOrderBook, BitgetResponse, BitgetServerTime, BitgetSupportedSymbols,
    BitgetTicker, BitgetTrade,
};
