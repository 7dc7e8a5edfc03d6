//! Human prices to pool prices.
//!
//! A price arrives as an `f64`. That `f64` is treated as an exact binary
//! fraction `m * 2^e` and everything after it is integer math, so the only
//! precision lost is whatever the caller lost when producing the `f64`.
//! Going the other way ([`sqrt_price_x96_to_price`], [`tick_to_price`]) is
//! for display only and is lossy.

use alloy_primitives::{Address, U160};
use malachite::{
    num::arithmetic::traits::{FloorSqrt, Pow},
    Natural
};
use pool_types::{
    PairWithPrice, PoolMathError, PriceRange, Result, SqrtPriceX96, Tick, MIN_TICK, RESOLUTION
};
use tracing::{debug, trace};

use crate::tick_math::align_tick;

/// `ln(1.0001)`, rounded to the nearest `f64`.
const LN_TICK_BASE: f64 = 0.000_099_995_000_333_308_34;
/// How close the float log may come to a whole tick before the tick is
/// settled exactly. The float error is below 1e-9 over the whole tick range.
const LOG_TOLERANCE: f64 = 1e-6;

/// `floor(sqrt(price) * 2^96)`.
///
/// `price` must be token1 per token0; see [`canonical_sqrt_price_x96`] for
/// prices quoted on an unordered pair.
pub fn price_to_sqrt_price_x96(price: f64) -> Result<SqrtPriceX96> {
    if !(price.is_finite() && price > 0.0) {
        return Err(PoolMathError::InvalidInput("price must be finite and strictly positive"))
    }

    // price * 2^192 = mantissa * 2^shift, and floor(sqrt(floor(x))) equals
    // floor(sqrt(x)) so truncating a negative shift first is exact
    let (mantissa, exponent) = decompose(price);
    let shift = exponent + 2 * RESOLUTION as i64;
    let scaled = if shift >= 0 {
        Natural::from(mantissa) << shift as u64
    } else {
        Natural::from(mantissa) >> shift.unsigned_abs()
    };

    let root = scaled.floor_sqrt();
    U160::checked_from_limbs_slice(&root.to_limbs_asc())
        .map(SqrtPriceX96::from)
        .ok_or(PoolMathError::ArithmeticOverflow("sqrt price does not fit in uint160"))
}

/// Largest multiple of `tick_spacing` not above `floor(log_1.0001(price))`.
///
/// The unaligned tick `t` always satisfies `1.0001^t <= price < 1.0001^(t+1)`
/// for the `f64` as given. A float log decides it when the result is clearly
/// between two ticks; otherwise the candidate is checked against `price` in
/// exact integer arithmetic.
pub fn price_to_tick(price: f64, tick_spacing: i32) -> Result<Tick> {
    if tick_spacing <= 0 {
        return Err(PoolMathError::InvalidInput("tick spacing must be positive"))
    }

    let sqrt_price = match price_to_sqrt_price_x96(price) {
        Err(PoolMathError::ArithmeticOverflow(_)) => {
            return Err(PoolMathError::OutOfBoundsTick("price above the highest tick"))
        }
        other => other?
    };
    if !sqrt_price.is_within_bounds() {
        return Err(PoolMathError::OutOfBoundsTick("price outside the tick range"))
    }

    let tick = floor_log_tick(price);
    let aligned = align_tick(tick, tick_spacing)?;
    if aligned < MIN_TICK {
        return Err(PoolMathError::OutOfBoundsTick("price rounds below the lowest usable tick"))
    }
    if aligned != tick {
        debug!(price, tick, aligned, tick_spacing, "rounded tick down to spacing");
    }

    Ok(aligned)
}

/// `floor(log_1.0001(price))` for a positive finite `price`.
fn floor_log_tick(price: f64) -> Tick {
    let estimate = price.ln() / LN_TICK_BASE;
    let nearest = estimate.round();
    if (estimate - nearest).abs() > LOG_TOLERANCE {
        return estimate.floor() as Tick
    }

    let nearest = nearest as Tick;
    trace!(price, estimate, nearest, "price within float error of a tick");
    if price_reaches_tick(price, nearest) {
        nearest
    } else {
        nearest - 1
    }
}

/// `price >= 1.0001^tick`, decided exactly with `1.0001 = 10001 / 10000` and
/// `price = m * 2^e`.
fn price_reaches_tick(price: f64, tick: Tick) -> bool {
    let (mantissa, exponent) = decompose(price);
    let power = u64::from(tick.unsigned_abs());
    let growth = Natural::from(10_001u32).pow(power);
    let fives = Natural::from(5u32).pow(4 * power);

    // 10000^k = 5^4k * 2^4k, the twos go into the shift
    let (lhs, rhs, shift) = if tick >= 0 {
        // m * 2^e * 10000^k >= 10001^k
        (Natural::from(mantissa) * fives, growth, exponent + 4 * power as i64)
    } else {
        // m * 2^e * 10001^k >= 10000^k
        (Natural::from(mantissa) * growth, fives, exponent - 4 * power as i64)
    };

    if shift >= 0 {
        (lhs << shift as u64) >= rhs
    } else {
        lhs >= (rhs << shift.unsigned_abs())
    }
}

/// Sqrt price for "1 `token_a` = `price` `token_b`", inverting when
/// `token_a` is not token0.
pub fn canonical_sqrt_price_x96(
    token_a: Address,
    token_b: Address,
    price: f64
) -> Result<SqrtPriceX96> {
    let pair = PairWithPrice::new(token_a, token_b, price)?;
    price_to_sqrt_price_x96(pair.price_1_over_0)
}

/// Tick bounds for a band quoted as `token_b` per `token_a`. The band is
/// inverted (and its ends swapped) when `token_a` is not token0, then both
/// ends are rounded down to `tick_spacing`.
pub fn canonical_tick_range(
    token_a: Address,
    token_b: Address,
    range: PriceRange,
    tick_spacing: i32
) -> Result<(Tick, Tick)> {
    let range = range.canonical(token_a, token_b)?;
    let lower = price_to_tick(range.lower, tick_spacing)?;
    let upper = price_to_tick(range.upper, tick_spacing)?;
    if lower >= upper {
        return Err(PoolMathError::InvalidRange("price band is narrower than one tick spacing"))
    }

    Ok((lower, upper))
}

/// `(sqrt_price / 2^96)^2`, rounded to the nearest `f64`.
pub fn sqrt_price_x96_to_price(sqrt_price: SqrtPriceX96) -> f64 {
    let ratio = sqrt_price
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0_f64, |acc, limb| acc * 2f64.powi(64) + *limb as f64) /
        2f64.powi(RESOLUTION as i32);
    ratio * ratio
}

pub fn tick_to_price(tick: Tick) -> f64 {
    1.0001_f64.powi(tick)
}

/// Splits a positive finite `f64` into `(mantissa, exponent)` with
/// `value == mantissa * 2^exponent` exactly.
fn decompose(value: f64) -> (u64, i64) {
    const FRACTION_BITS: u32 = 52;
    const EXPONENT_BIAS: i64 = 1023 + FRACTION_BITS as i64;

    let bits = value.to_bits();
    let biased = ((bits >> FRACTION_BITS) & 0x7ff) as i64;
    let fraction = bits & ((1 << FRACTION_BITS) - 1);

    if biased == 0 {
        // subnormal
        (fraction, 1 - EXPONENT_BIAS)
    } else {
        (fraction | (1 << FRACTION_BITS), biased - EXPONENT_BIAS)
    }
}
