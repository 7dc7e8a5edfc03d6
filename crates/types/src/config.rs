use alloy_primitives::Address;

use crate::{errors::Result, pool_key::PoolKey};

pub const DEFAULT_FEE: u32 = 3000;
pub const DEFAULT_TICK_SPACING: i32 = 60;

/// Pool parameters that, together with a token pair, pin down a pool key.
/// Missing fields fall back to the 0.3% / spacing 60 / no hook pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PoolConfig {
    pub fee:          u32,
    pub tick_spacing: i32,
    pub hooks:        Address
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { fee: DEFAULT_FEE, tick_spacing: DEFAULT_TICK_SPACING, hooks: Address::ZERO }
    }
}

impl PoolConfig {
    pub fn pool_key(&self, token_a: Address, token_b: Address) -> Result<PoolKey> {
        PoolKey::new(token_a, token_b, self.fee, self.tick_spacing, self.hooks)
    }
}
