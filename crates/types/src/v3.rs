//! Uniswap V3 pools are addressed by their CREATE2 address instead of an id.

use alloy_primitives::{aliases::U24, b256, keccak256, Address, B256};
use alloy_sol_types::SolValue;

use crate::{
    contract_bindings::v3_factory::PoolAddressKey,
    errors::{PoolMathError, Result}
};

/// `keccak256(UniswapV3Pool.creationCode)` as deployed by the canonical
/// factory.
pub const POOL_INIT_CODE_HASH: B256 =
    b256!("e34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54");

/// The fee tiers the V3 factory enables on deployment and their spacing.
pub const FEE_TIERS: [(u32, i32); 4] = [(100, 1), (500, 10), (3000, 60), (10000, 200)];

pub fn v3_tick_spacing(fee: u32) -> Option<i32> {
    FEE_TIERS
        .iter()
        .find_map(|&(tier, spacing)| (tier == fee).then_some(spacing))
}

/// Address of the V3 pool for an unordered pair. Tokens are sorted the same
/// way as for a V4 key.
pub fn compute_v3_pool_address(
    factory: Address,
    token_a: Address,
    token_b: Address,
    fee: u32
) -> Result<Address> {
    if token_a == token_b {
        return Err(PoolMathError::InvalidInput("pool tokens must differ"))
    }
    if v3_tick_spacing(fee).is_none() {
        return Err(PoolMathError::InvalidInput("fee is not an enabled V3 fee tier"))
    }
    let (token0, token1) = if token_a < token_b { (token_a, token_b) } else { (token_b, token_a) };

    let salt = keccak256(PoolAddressKey { token0, token1, fee: U24::from(fee) }.abi_encode());
    Ok(factory.create2(salt, POOL_INIT_CODE_HASH))
}
