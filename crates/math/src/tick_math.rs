use pool_types::{PoolMathError, Result, SqrtPriceX96, Tick, MAX_TICK, MIN_TICK};
use uniswap_v3_math::tick_math;

/// `sqrt(1.0001^tick) * 2^96`, bit for bit what `TickMath.getSqrtRatioAtTick`
/// returns.
pub fn sqrt_ratio_at_tick(tick: Tick) -> Result<SqrtPriceX96> {
    let ratio = tick_math::get_sqrt_ratio_at_tick(tick)
        .map_err(|_| PoolMathError::OutOfBoundsTick("no sqrt ratio for tick"))?;
    SqrtPriceX96::try_from(ratio)
}

/// Greatest tick whose sqrt ratio does not exceed `sqrt_price`, i.e. the
/// tick the pool manager reports for that price.
pub fn tick_at_sqrt_ratio(sqrt_price: SqrtPriceX96) -> Result<Tick> {
    tick_math::get_tick_at_sqrt_ratio(sqrt_price.as_u256()).map_err(|_| {
        PoolMathError::OutOfBoundsTick("sqrt price outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO)")
    })
}

/// Rounds `tick` down to a multiple of `tick_spacing`, towards negative
/// infinity for negative ticks as well.
pub fn align_tick(tick: Tick, tick_spacing: i32) -> Result<Tick> {
    ensure_spacing(tick_spacing)?;
    Ok(tick.div_euclid(tick_spacing) * tick_spacing)
}

/// Lowest tick a position on `tick_spacing` can use.
pub fn min_usable_tick(tick_spacing: i32) -> Result<Tick> {
    Ok(-max_usable_tick(tick_spacing)?)
}

/// Highest tick a position on `tick_spacing` can use.
pub fn max_usable_tick(tick_spacing: i32) -> Result<Tick> {
    ensure_spacing(tick_spacing)?;
    Ok(MAX_TICK / tick_spacing * tick_spacing)
}

pub fn is_usable_tick(tick: Tick, tick_spacing: i32) -> bool {
    tick_spacing > 0 && (MIN_TICK..=MAX_TICK).contains(&tick) && tick % tick_spacing == 0
}

fn ensure_spacing(tick_spacing: i32) -> Result<()> {
    if tick_spacing <= 0 {
        return Err(PoolMathError::InvalidInput("tick spacing must be positive"))
    }
    Ok(())
}
