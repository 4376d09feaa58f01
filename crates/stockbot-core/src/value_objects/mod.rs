//! Value objects - immutable types that represent domain concepts

mod stock_code;

pub use stock_code::{StockCode, StockCodeError};
