//! Value types shared by the pool math: canonical pool keys and ids, square
//! root prices, tick bounds, canonical price pairs and the error type every
//! conversion returns.

pub mod config;
pub mod contract_bindings;
pub mod errors;
pub mod pair_with_price;
pub mod pool_key;
pub mod primitive;
pub mod v3;

pub use config::PoolConfig;
pub use errors::{PoolMathError, Result};
pub use pair_with_price::{PairWithPrice, PriceRange};
pub use pool_key::{make_pool_key, pool_id, PoolKey};
pub use primitive::*;
