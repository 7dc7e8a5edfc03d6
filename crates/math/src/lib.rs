//! Concentrated liquidity math on top of [`pool_types`].
//!
//! Prices go in as `f64`s quoted on an unordered pair and come out as the
//! integers the pool manager takes: Q64.96 sqrt prices, ticks aligned to a
//! spacing, `uint128` liquidity and token amounts rounded the way the
//! on-chain libraries round them.

pub mod full_math;
pub mod liquidity_amounts;
pub mod position;
pub mod price;
pub mod swap;
pub mod tick_math;

pub use liquidity_amounts::{
    amount0_for_liquidity, amount1_for_liquidity, amounts_for_liquidity, liquidity_for_amount0,
    liquidity_for_amount1, liquidity_for_amounts
};
pub use position::{Deposit, Position};
pub use price::{
    canonical_sqrt_price_x96, canonical_tick_range, price_to_sqrt_price_x96, price_to_tick,
    sqrt_price_x96_to_price, tick_to_price
};
pub use swap::{exact_input_params, exact_output_params, sqrt_price_limit};
pub use tick_math::{
    align_tick, max_usable_tick, min_usable_tick, sqrt_ratio_at_tick, tick_at_sqrt_ratio
};
