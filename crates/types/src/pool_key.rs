use alloy_primitives::{
    aliases::{I24, U24},
    keccak256, Address
};
use alloy_sol_types::SolValue;

use crate::{
    contract_bindings::pool_manager,
    errors::{PoolMathError, Result},
    primitive::{PoolId, MAX_TICK_SPACING, MIN_TICK_SPACING}
};

/// Largest value a `uint24` fee can hold.
pub const MAX_FEE: u32 = 0xFF_FFFF;
/// Fee value marking a pool whose fee is set by its hook.
pub const DYNAMIC_FEE_FLAG: u32 = 0x80_0000;

/// A V4 pool key in canonical form: `currency0 < currency1`. The fields are
/// private so a key can only be built through [`PoolKey::new`], which does
/// the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolKey {
    currency0:    Address,
    currency1:    Address,
    fee:          u32,
    tick_spacing: i32,
    hooks:        Address
}

impl PoolKey {
    /// Orders `token_a`/`token_b` by address and validates the remaining
    /// parameters against what the pool manager accepts.
    pub fn new(
        token_a: Address,
        token_b: Address,
        fee: u32,
        tick_spacing: i32,
        hooks: Address
    ) -> Result<Self> {
        if token_a == token_b {
            return Err(PoolMathError::InvalidInput("pool currencies must differ"))
        }
        if fee > MAX_FEE {
            return Err(PoolMathError::InvalidInput("fee does not fit in uint24"))
        }
        if !(MIN_TICK_SPACING..=MAX_TICK_SPACING).contains(&tick_spacing) {
            return Err(PoolMathError::InvalidInput("tick spacing must be within [1, 32767]"))
        }

        let (currency0, currency1) =
            if token_a < token_b { (token_a, token_b) } else { (token_b, token_a) };

        Ok(Self { currency0, currency1, fee, tick_spacing, hooks })
    }

    pub fn currency0(&self) -> Address {
        self.currency0
    }

    pub fn currency1(&self) -> Address {
        self.currency1
    }

    pub fn fee(&self) -> u32 {
        self.fee
    }

    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    pub fn hooks(&self) -> Address {
        self.hooks
    }

    pub fn has_hooks(&self) -> bool {
        !self.hooks.is_zero()
    }

    pub fn is_dynamic_fee(&self) -> bool {
        self.fee == DYNAMIC_FEE_FLAG
    }

    pub fn contains(&self, token: Address) -> bool {
        token == self.currency0 || token == self.currency1
    }

    /// `true` when `token` is this pool's currency0. Prices quoted against a
    /// token that is not currency0 have to be inverted.
    pub fn is_token0(&self, token: Address) -> bool {
        token == self.currency0
    }

    /// Swap direction when selling `token_in` into the pool.
    pub fn zero_for_one(&self, token_in: Address) -> Result<bool> {
        if !self.contains(token_in) {
            return Err(PoolMathError::InvalidInput("token is not one of the pool currencies"))
        }
        Ok(self.is_token0(token_in))
    }

    /// The abi encoding `PoolIdLibrary.toId` hashes:
    /// `(address,address,uint24,int24,address)`, 5 words.
    pub fn abi_encode(&self) -> Vec<u8> {
        pool_manager::PoolKey::from(*self).abi_encode()
    }

    pub fn pool_id(&self) -> PoolId {
        keccak256(self.abi_encode())
    }
}

/// Canonical key for an unordered pair, the order of `token_a` and `token_b`
/// does not matter.
pub fn make_pool_key(
    token_a: Address,
    token_b: Address,
    fee: u32,
    tick_spacing: i32,
    hooks: Address
) -> Result<PoolKey> {
    PoolKey::new(token_a, token_b, fee, tick_spacing, hooks)
}

pub fn pool_id(key: &PoolKey) -> PoolId {
    key.pool_id()
}

impl From<PoolKey> for pool_manager::PoolKey {
    fn from(value: PoolKey) -> Self {
        // both narrowings are range checked in PoolKey::new
        Self {
            currency0:   value.currency0,
            currency1:   value.currency1,
            fee:         U24::from(value.fee),
            tickSpacing: I24::unchecked_from(value.tick_spacing),
            hooks:       value.hooks
        }
    }
}

impl TryFrom<pool_manager::PoolKey> for PoolKey {
    type Error = PoolMathError;

    /// Keys not already in canonical order are rejected, not reordered.
    fn try_from(value: pool_manager::PoolKey) -> Result<Self> {
        if value.currency0 >= value.currency1 {
            return Err(PoolMathError::InvalidInput("pool key currencies out of order or equal"))
        }
        let fee = value.fee.to::<u32>();
        let tick_spacing = i32::try_from(value.tickSpacing)
            .map_err(|_| PoolMathError::InvalidInput("tick spacing does not fit in int24"))?;

        Self::new(value.currency0, value.currency1, fee, tick_spacing, value.hooks)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, B256};

    use super::*;

    const TOKEN_A: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const TOKEN_B: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
    const HOOK: Address = address!("00000000000000000000000000000000000020c0");

    #[test]
    fn orders_currencies_regardless_of_argument_order() {
        let forward = make_pool_key(TOKEN_A, TOKEN_B, 3000, 60, Address::ZERO).unwrap();
        let backward = make_pool_key(TOKEN_B, TOKEN_A, 3000, 60, Address::ZERO).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.currency0(), TOKEN_A);
        assert_eq!(forward.currency1(), TOKEN_B);
        assert_eq!(pool_id(&forward), pool_id(&backward));
    }

    #[test]
    fn abi_encoding_is_five_left_padded_words() {
        let key = make_pool_key(TOKEN_B, TOKEN_A, 3000, 60, HOOK).unwrap();
        let encoded = key.abi_encode();
        assert_eq!(encoded.len(), 5 * 32);

        let mut expected = [0u8; 160];
        expected[12..32].copy_from_slice(TOKEN_A.as_slice());
        expected[44..64].copy_from_slice(TOKEN_B.as_slice());
        expected[93..96].copy_from_slice(&3000u32.to_be_bytes()[1..]);
        expected[125..128].copy_from_slice(&60u32.to_be_bytes()[1..]);
        expected[140..160].copy_from_slice(HOOK.as_slice());
        assert_eq!(encoded, expected.to_vec());

        assert_eq!(key.pool_id(), keccak256(expected));
    }

    #[test]
    fn every_field_changes_the_id() {
        let base = make_pool_key(TOKEN_A, TOKEN_B, 3000, 60, Address::ZERO).unwrap();
        let variants = [
            make_pool_key(TOKEN_A, HOOK, 3000, 60, Address::ZERO).unwrap(),
            make_pool_key(TOKEN_A, TOKEN_B, 500, 60, Address::ZERO).unwrap(),
            make_pool_key(TOKEN_A, TOKEN_B, 3000, 10, Address::ZERO).unwrap(),
            make_pool_key(TOKEN_A, TOKEN_B, 3000, 60, HOOK).unwrap()
        ];

        for variant in variants {
            assert_ne!(variant.pool_id(), base.pool_id());
        }
        assert_ne!(base.pool_id(), B256::ZERO);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            make_pool_key(TOKEN_A, TOKEN_A, 3000, 60, Address::ZERO),
            Err(PoolMathError::InvalidInput(_))
        ));
        assert!(matches!(
            make_pool_key(TOKEN_A, TOKEN_B, MAX_FEE + 1, 60, Address::ZERO),
            Err(PoolMathError::InvalidInput(_))
        ));
        assert!(matches!(
            make_pool_key(TOKEN_A, TOKEN_B, 3000, 0, Address::ZERO),
            Err(PoolMathError::InvalidInput(_))
        ));
        assert!(matches!(
            make_pool_key(TOKEN_A, TOKEN_B, 3000, -60, Address::ZERO),
            Err(PoolMathError::InvalidInput(_))
        ));
        assert!(matches!(
            make_pool_key(TOKEN_A, TOKEN_B, 3000, MAX_TICK_SPACING + 1, Address::ZERO),
            Err(PoolMathError::InvalidInput(_))
        ));
        assert!(make_pool_key(TOKEN_A, TOKEN_B, 3000, MAX_TICK_SPACING, Address::ZERO).is_ok());
        assert!(make_pool_key(TOKEN_A, TOKEN_B, 3000, MIN_TICK_SPACING, Address::ZERO).is_ok());
    }

    #[test]
    fn sol_round_trip_requires_canonical_order() {
        let key = make_pool_key(TOKEN_A, TOKEN_B, DYNAMIC_FEE_FLAG, 200, HOOK).unwrap();
        let sol = pool_manager::PoolKey::from(key);
        assert_eq!(PoolKey::try_from(sol).unwrap(), key);
        assert!(key.is_dynamic_fee());
        assert!(key.has_hooks());

        let flipped = pool_manager::PoolKey {
            currency0: sol.currency1,
            currency1: sol.currency0,
            ..sol
        };
        assert!(matches!(PoolKey::try_from(flipped), Err(PoolMathError::InvalidInput(_))));
    }

    #[test]
    fn swap_direction_follows_currency_order() {
        let key = make_pool_key(TOKEN_B, TOKEN_A, 3000, 60, Address::ZERO).unwrap();
        assert!(key.zero_for_one(TOKEN_A).unwrap());
        assert!(!key.zero_for_one(TOKEN_B).unwrap());
        assert!(key.zero_for_one(HOOK).is_err());
    }
}
