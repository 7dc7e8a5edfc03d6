//! Fixtures shared by the integration tests: well known mainnet addresses
//! and random pairs, prices and pool configs.

use alloy_primitives::{address, Address};
use pool_types::{PoolConfig, PriceRange, MAX_TICK_SPACING, MIN_TICK_SPACING};
use rand::Rng;

pub const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
pub const V3_FACTORY: Address = address!("1F98431c8aD98523631AE4a59f267346ea31F984");

pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> Address {
    Address::from(rng.gen::<[u8; 20]>())
}

/// Two distinct addresses in no particular order.
pub fn random_pair<R: Rng + ?Sized>(rng: &mut R) -> (Address, Address) {
    let token_a = random_address(rng);
    loop {
        let token_b = random_address(rng);
        if token_b != token_a {
            return (token_a, token_b)
        }
    }
}

/// A price spread evenly in log space over `[10^-min_exp, 10^max_exp]`.
pub fn random_price<R: Rng + ?Sized>(rng: &mut R, min_exp: i32, max_exp: i32) -> f64 {
    10f64.powf(rng.gen_range(f64::from(min_exp)..f64::from(max_exp)))
}

/// A band around `price` between 0.5% and 50% wide on either side.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, price: f64) -> PriceRange {
    let below = rng.gen_range(0.005..0.5);
    let above = rng.gen_range(0.005..0.5);
    PriceRange::new(price * (1.0 - below), price * (1.0 + above))
        .expect("band around a positive price is ordered")
}

pub fn random_pool_config<R: Rng + ?Sized>(rng: &mut R) -> PoolConfig {
    PoolConfig {
        fee:          rng.gen_range(0..=1_000_000),
        tick_spacing: rng.gen_range(MIN_TICK_SPACING..=MAX_TICK_SPACING),
        hooks:        if rng.gen_bool(0.5) { Address::ZERO } else { random_address(rng) }
    }
}

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call from every
/// test, only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
