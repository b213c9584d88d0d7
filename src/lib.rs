pub mod analytics;
pub mod core;
pub mod exchanges;

pub use crate::core::errors::ExchangeError;
pub use crate::core::types::*;
pub use crate::exchanges::bitget::{BitgetBuilder, BitgetConnector};
