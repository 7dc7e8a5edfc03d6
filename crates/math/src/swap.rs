use alloy_primitives::{Address, I256, U160, U256};
use pool_types::{
    contract_bindings::pool_manager::SwapParams, PoolKey, PoolMathError, Result, MAX_SQRT_RATIO,
    MIN_SQRT_RATIO
};
use tracing::trace;

/// Loosest price limit a swap in this direction can take. The pool manager
/// rejects the bounds themselves, so these sit one inside them.
pub fn sqrt_price_limit(zero_for_one: bool) -> U160 {
    if zero_for_one {
        MIN_SQRT_RATIO + U160::from(1u8)
    } else {
        MAX_SQRT_RATIO - U160::from(1u8)
    }
}

/// Sell exactly `amount_in` of `token_in`. A negative `amountSpecified` is
/// exact input on the pool manager.
pub fn exact_input_params(key: &PoolKey, token_in: Address, amount_in: U256) -> Result<SwapParams> {
    let amount = signed_amount(amount_in)?;
    swap_params(key, token_in, -amount)
}

/// Buy exactly `amount_out` of whatever `token_in` is swapped for.
pub fn exact_output_params(
    key: &PoolKey,
    token_in: Address,
    amount_out: U256
) -> Result<SwapParams> {
    let amount = signed_amount(amount_out)?;
    swap_params(key, token_in, amount)
}

fn swap_params(key: &PoolKey, token_in: Address, amount_specified: I256) -> Result<SwapParams> {
    let zero_for_one = key.zero_for_one(token_in)?;
    trace!(pool_id = %key.pool_id(), zero_for_one, %amount_specified, "swap params");

    Ok(SwapParams {
        zeroForOne: zero_for_one,
        amountSpecified: amount_specified,
        sqrtPriceLimitX96: sqrt_price_limit(zero_for_one)
    })
}

fn signed_amount(amount: U256) -> Result<I256> {
    if amount.is_zero() {
        return Err(PoolMathError::InvalidInput("swap amount is zero"))
    }
    I256::try_from(amount).map_err(|_| PoolMathError::ArithmeticOverflow("swap amount exceeds int256"))
}
