//! Solidity side of the structs the pool manager and the V3 factory take.
//! These are only used for their abi encoding; the canonical rust types live
//! in [`crate::pool_key`].

#[rustfmt::skip]
pub mod pool_manager {
    alloy_sol_types::sol!(
        #[derive(Copy, Debug, Hash, PartialEq, Eq, Ord, PartialOrd)]
        struct PoolKey {
            /// @notice The lower currency of the pool, sorted numerically
            address currency0;
            /// @notice The higher currency of the pool, sorted numerically
            address currency1;
            /// @notice The pool LP fee, capped at 1_000_000. If the highest bit is 1, the pool has a dynamic fee and must be exactly equal to 0x800000
            uint24 fee;
            /// @notice Ticks that involve positions must be a multiple of tick spacing
            int24 tickSpacing;
            /// @notice The hooks of the pool
            address hooks;
        }

        #[derive(Copy, Debug, PartialEq, Eq)]
        struct ModifyLiquidityParams {
            int24 tickLower;
            int24 tickUpper;
            int256 liquidityDelta;
            bytes32 salt;
        }

        #[derive(Copy, Debug, PartialEq, Eq)]
        struct SwapParams {
            bool zeroForOne;
            int256 amountSpecified;
            uint160 sqrtPriceLimitX96;
        }
    );
}

#[rustfmt::skip]
pub mod v3_factory {
    alloy_sol_types::sol!(
        /// Preimage of the CREATE2 salt the V3 factory deploys pools with.
        #[derive(Copy, Debug, PartialEq, Eq)]
        struct PoolAddressKey {
            address token0;
            address token1;
            uint24 fee;
        }
    );
}
