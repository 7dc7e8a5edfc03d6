use std::{fmt, ops::Deref};

use alloy_primitives::{B256, U160, U256};

use crate::errors::PoolMathError;

/// keccak256 of the abi encoded pool key. Addresses pool state in the V4
/// pool manager.
pub type PoolId = B256;

/// Signed tick index, `price = 1.0001^tick`.
pub type Tick = i32;

/// Lowest tick the pool contracts accept.
pub const MIN_TICK: Tick = -887272;
/// Highest tick the pool contracts accept.
pub const MAX_TICK: Tick = -MIN_TICK;

/// Smallest `PoolKey.tickSpacing` the pool manager accepts.
pub const MIN_TICK_SPACING: i32 = 1;
/// Largest `PoolKey.tickSpacing` the pool manager accepts.
pub const MAX_TICK_SPACING: i32 = i16::MAX as i32;

/// `sqrt_ratio_at_tick(MIN_TICK)`
pub const MIN_SQRT_RATIO: U160 = U160::from_limbs([4295128739, 0, 0]);
/// `sqrt_ratio_at_tick(MAX_TICK)`
pub const MAX_SQRT_RATIO: U160 =
    U160::from_limbs([6743328256752651558, 17280870778742802505, 4294805859]);

pub const RESOLUTION: u8 = 96;
/// 2^96
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// Square root of a token1/token0 price as a Q64.96 fixed point number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SqrtPriceX96(U160);

impl SqrtPriceX96 {
    pub const MAX: Self = Self(MAX_SQRT_RATIO);
    pub const MIN: Self = Self(MIN_SQRT_RATIO);

    pub const fn new(value: U160) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the pool manager would accept this as a pool price.
    pub fn is_within_bounds(&self) -> bool {
        self.0 >= MIN_SQRT_RATIO && self.0 < MAX_SQRT_RATIO
    }

    pub fn as_u256(&self) -> U256 {
        U256::from(self.0)
    }
}

impl Deref for SqrtPriceX96 {
    type Target = U160;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<U160> for SqrtPriceX96 {
    fn from(value: U160) -> Self {
        Self(value)
    }
}

impl From<SqrtPriceX96> for U160 {
    fn from(value: SqrtPriceX96) -> Self {
        value.0
    }
}

impl From<SqrtPriceX96> for U256 {
    fn from(value: SqrtPriceX96) -> Self {
        value.as_u256()
    }
}

impl TryFrom<U256> for SqrtPriceX96 {
    type Error = PoolMathError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        U160::checked_from_limbs_slice(value.as_limbs())
            .map(Self)
            .ok_or(PoolMathError::ArithmeticOverflow("sqrt price does not fit in uint160"))
    }
}

impl fmt::Display for SqrtPriceX96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
