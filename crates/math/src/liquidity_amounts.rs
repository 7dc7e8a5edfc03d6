use alloy_primitives::U256;
use pool_types::{PoolMathError, Result, SqrtPriceX96, Q96, RESOLUTION};
use tracing::trace;

use crate::full_math::mul_div;

/// Liquidity a position over `[sqrt_a, sqrt_b]` gets from `amount0` alone.
/// The bounds may be passed in either order.
pub fn liquidity_for_amount0(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    amount0: U256
) -> Result<u128> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    to_liquidity(raw_liquidity_for_amount0(lower, upper, amount0)?)
}

/// Liquidity a position over `[sqrt_a, sqrt_b]` gets from `amount1` alone.
pub fn liquidity_for_amount1(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    amount1: U256
) -> Result<u128> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    to_liquidity(raw_liquidity_for_amount1(lower, upper, amount1)?)
}

/// Most liquidity `amount0` and `amount1` can fund at the current price.
///
/// Below the range only token0 is needed, above it only token1. Inside the
/// range both are, and whichever runs out first decides. A current price
/// equal to a bound counts as outside the range.
pub fn liquidity_for_amounts(
    sqrt_current: SqrtPriceX96,
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    amount0: U256,
    amount1: U256
) -> Result<u128> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    let current = sqrt_current.as_u256();

    let liquidity = if current <= lower {
        raw_liquidity_for_amount0(lower, upper, amount0)?
    } else if current < upper {
        let from_amount0 = raw_liquidity_for_amount0(current, upper, amount0)?;
        let from_amount1 = raw_liquidity_for_amount1(lower, current, amount1)?;
        trace!(%from_amount0, %from_amount1, "in range liquidity candidates");
        from_amount0.min(from_amount1)
    } else {
        raw_liquidity_for_amount1(lower, upper, amount1)?
    };

    to_liquidity(liquidity)
}

/// Token0 held by `liquidity` spread over `[sqrt_a, sqrt_b]`, rounded down.
pub fn amount0_for_liquidity(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    liquidity: u128
) -> Result<U256> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    raw_amount0_for_liquidity(lower, upper, liquidity)
}

/// Token1 held by `liquidity` spread over `[sqrt_a, sqrt_b]`, rounded down.
pub fn amount1_for_liquidity(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    liquidity: u128
) -> Result<U256> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    raw_amount1_for_liquidity(lower, upper, liquidity)
}

/// `(amount0, amount1)` backing `liquidity` at the current price. The token
/// a range does not need at this price comes back as zero.
pub fn amounts_for_liquidity(
    sqrt_current: SqrtPriceX96,
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    liquidity: u128
) -> Result<(U256, U256)> {
    let (lower, upper) = sorted_range(sqrt_a, sqrt_b)?;
    let current = sqrt_current.as_u256();

    if current <= lower {
        Ok((raw_amount0_for_liquidity(lower, upper, liquidity)?, U256::ZERO))
    } else if current < upper {
        Ok((
            raw_amount0_for_liquidity(current, upper, liquidity)?,
            raw_amount1_for_liquidity(lower, current, liquidity)?
        ))
    } else {
        Ok((U256::ZERO, raw_amount1_for_liquidity(lower, upper, liquidity)?))
    }
}

/// `amount0 * (lower * upper / Q96) / (upper - lower)`
fn raw_liquidity_for_amount0(lower: U256, upper: U256, amount0: U256) -> Result<U256> {
    let intermediate = mul_div(lower, upper, Q96)?;
    mul_div(amount0, intermediate, upper - lower)
}

/// `amount1 * Q96 / (upper - lower)`
fn raw_liquidity_for_amount1(lower: U256, upper: U256, amount1: U256) -> Result<U256> {
    mul_div(amount1, Q96, upper - lower)
}

/// `(liquidity << 96) * (upper - lower) / upper / lower`
fn raw_amount0_for_liquidity(lower: U256, upper: U256, liquidity: u128) -> Result<U256> {
    let scaled = U256::from(liquidity) << RESOLUTION as usize;
    Ok(mul_div(scaled, upper - lower, upper)? / lower)
}

/// `liquidity * (upper - lower) / Q96`
fn raw_amount1_for_liquidity(lower: U256, upper: U256, liquidity: u128) -> Result<U256> {
    mul_div(U256::from(liquidity), upper - lower, Q96)
}

/// Orders the bounds and rejects ranges the formulas divide by zero on.
fn sorted_range(sqrt_a: SqrtPriceX96, sqrt_b: SqrtPriceX96) -> Result<(U256, U256)> {
    let (lower, upper) = if sqrt_a <= sqrt_b { (sqrt_a, sqrt_b) } else { (sqrt_b, sqrt_a) };
    if lower == upper {
        return Err(PoolMathError::InvalidRange("range has zero width"))
    }
    if lower.is_zero() {
        return Err(PoolMathError::InvalidInput("range bound sqrt price is zero"))
    }
    Ok((lower.as_u256(), upper.as_u256()))
}

fn to_liquidity(value: U256) -> Result<u128> {
    u128::try_from(value).map_err(|_| PoolMathError::ArithmeticOverflow("liquidity exceeds uint128"))
}
