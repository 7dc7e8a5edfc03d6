use alloy_primitives::{
    aliases::I24,
    Address, B256, I256, U256
};
use pool_types::{
    contract_bindings::pool_manager::ModifyLiquidityParams, PairWithPrice, PoolConfig, PoolKey,
    PoolMathError, PriceRange, Result, SqrtPriceX96, Tick
};
use tracing::debug;

use crate::{
    liquidity_amounts::{
        amounts_for_liquidity, liquidity_for_amount0, liquidity_for_amount1, liquidity_for_amounts
    },
    price::{canonical_tick_range, price_to_sqrt_price_x96},
    tick_math::{is_usable_tick, sqrt_ratio_at_tick}
};

/// What a liquidity provider puts into a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deposit {
    /// Up to this much of each token, whichever binds first.
    Amounts(U256, U256),
    /// Exactly this much of token0, as much token1 as the range needs.
    Amount0(U256),
    /// Exactly this much of token1, as much token0 as the range needs.
    Amount1(U256),
    Liquidity(u128)
}

impl Deposit {
    /// Swaps the token sides, for deposits quoted on a pair whose token A
    /// turned out to be token1.
    pub fn flipped(self) -> Self {
        match self {
            Self::Amounts(amount0, amount1) => Self::Amounts(amount1, amount0),
            Self::Amount0(amount) => Self::Amount1(amount),
            Self::Amount1(amount) => Self::Amount0(amount),
            liquidity @ Self::Liquidity(_) => liquidity
        }
    }
}

/// A liquidity position resolved down to the numbers the pool manager takes.
/// `amount0`/`amount1` are rounded down; the pool settles with amounts
/// rounded up, so it can take one more wei of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub key:        PoolKey,
    pub tick_lower: Tick,
    pub tick_upper: Tick,
    pub liquidity:  u128,
    pub amount0:    U256,
    pub amount1:    U256
}

impl Position {
    pub fn new(
        key: PoolKey,
        tick_lower: Tick,
        tick_upper: Tick,
        sqrt_current: SqrtPriceX96,
        deposit: Deposit
    ) -> Result<Self> {
        if tick_lower >= tick_upper {
            return Err(PoolMathError::InvalidRange("lower tick must be below upper tick"))
        }
        let sqrt_lower = sqrt_ratio_at_tick(tick_lower)?;
        let sqrt_upper = sqrt_ratio_at_tick(tick_upper)?;
        let spacing = key.tick_spacing();
        if !is_usable_tick(tick_lower, spacing) || !is_usable_tick(tick_upper, spacing) {
            return Err(PoolMathError::InvalidRange("ticks must be multiples of the tick spacing"))
        }

        let liquidity = match deposit {
            Deposit::Amounts(amount0, amount1) => {
                liquidity_for_amounts(sqrt_current, sqrt_lower, sqrt_upper, amount0, amount1)?
            }
            Deposit::Amount0(amount0) => {
                if sqrt_current >= sqrt_upper {
                    return Err(PoolMathError::InvalidInput(
                        "range is below the current price and holds no token0"
                    ))
                }
                liquidity_for_amount0(sqrt_current.max(sqrt_lower), sqrt_upper, amount0)?
            }
            Deposit::Amount1(amount1) => {
                if sqrt_current <= sqrt_lower {
                    return Err(PoolMathError::InvalidInput(
                        "range is above the current price and holds no token1"
                    ))
                }
                liquidity_for_amount1(sqrt_lower, sqrt_current.min(sqrt_upper), amount1)?
            }
            Deposit::Liquidity(liquidity) => liquidity
        };

        let (amount0, amount1) =
            amounts_for_liquidity(sqrt_current, sqrt_lower, sqrt_upper, liquidity)?;
        debug!(
            pool_id = %key.pool_id(),
            tick_lower,
            tick_upper,
            liquidity,
            %amount0,
            %amount1,
            "resolved position"
        );

        Ok(Self { key, tick_lower, tick_upper, liquidity, amount0, amount1 })
    }

    /// Builds a position from prices quoted as "1 `token_a` = x `token_b`".
    ///
    /// `deposit` is quoted the same way: its first side is token A. The pair
    /// is put in pool order once here, which inverts the prices, swaps the
    /// ends of `range` and swaps the deposit sides when token A is token1.
    pub fn from_price_range(
        config: &PoolConfig,
        token_a: Address,
        token_b: Address,
        price: f64,
        range: PriceRange,
        deposit: Deposit
    ) -> Result<Self> {
        let key = config.pool_key(token_a, token_b)?;
        let pair = PairWithPrice::new(token_a, token_b, price)?;
        let sqrt_current = price_to_sqrt_price_x96(pair.price_1_over_0)?;
        let (tick_lower, tick_upper) =
            canonical_tick_range(token_a, token_b, range, key.tick_spacing())?;

        let deposit = if pair.flipped { deposit.flipped() } else { deposit };
        Self::new(key, tick_lower, tick_upper, sqrt_current, deposit)
    }

    /// Amount of `token` this position takes.
    pub fn amount_of(&self, token: Address) -> Result<U256> {
        if !self.key.contains(token) {
            return Err(PoolMathError::InvalidInput("token is not one of the pool currencies"))
        }
        Ok(if self.key.is_token0(token) { self.amount0 } else { self.amount1 })
    }

    /// Params adding this position's liquidity.
    pub fn modify_liquidity_params(&self, salt: B256) -> ModifyLiquidityParams {
        self.params_with_delta(I256::from_raw(U256::from(self.liquidity)), salt)
    }

    /// Params removing this position's liquidity.
    pub fn remove_liquidity_params(&self, salt: B256) -> ModifyLiquidityParams {
        self.params_with_delta(-I256::from_raw(U256::from(self.liquidity)), salt)
    }

    fn params_with_delta(&self, liquidity_delta: I256, salt: B256) -> ModifyLiquidityParams {
        // both ticks are range checked against MIN_TICK/MAX_TICK in new
        ModifyLiquidityParams {
            tickLower: I24::unchecked_from(self.tick_lower),
            tickUpper: I24::unchecked_from(self.tick_upper),
            liquidityDelta: liquidity_delta,
            salt
        }
    }
}
