use std::path::{Path, PathBuf};

use alloy_primitives::{Address, B256, U256};
use clap::{Parser, Subcommand};
use eyre::{bail, WrapErr};
use pool_math::{price_to_sqrt_price_x96, tick_at_sqrt_ratio, Deposit, Position};
use pool_types::{
    v3::{compute_v3_pool_address, v3_tick_spacing},
    PairWithPrice, PoolConfig, PoolKey, PriceRange
};
use serde_json::{json, Value};
use tracing::info;

/// Mainnet Uniswap V3 factory.
const V3_FACTORY: &str = "0x1F98431c8aD98523631AE4a59f267346ea31F984";

/// Prices are always quoted as "1 TOKEN_A = PRICE TOKEN_B"; the pool order of
/// the two tokens is worked out from their addresses.
#[derive(Debug, Parser)]
#[command(name = "pool-cli", version)]
pub struct Args {
    /// JSON file with `fee`, `tickSpacing` and `hooks`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub fee: Option<u32>,

    #[arg(long, global = true)]
    pub tick_spacing: Option<i32>,

    #[arg(long, global = true)]
    pub hooks: Option<Address>,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pool key and id of a V4 pool.
    PoolId { token_a: Address, token_b: Address },
    /// sqrtPriceX96 and tick to initialize a pool at.
    Init {
        token_a: Address,
        token_b: Address,
        /// Token B per token A.
        price:   f64
    },
    /// Ticks, liquidity and amounts for a position over a price band.
    Position {
        token_a:   Address,
        token_b:   Address,
        /// Current price, token B per token A.
        #[arg(long)]
        price:     f64,
        #[arg(long)]
        lower:     f64,
        #[arg(long)]
        upper:     f64,
        /// Token A to deposit, e.g. `1e18` or `1000000`.
        #[arg(long, value_parser = parse_amount)]
        amount_a:  Option<U256>,
        #[arg(long, value_parser = parse_amount)]
        amount_b:  Option<U256>,
        /// Exact liquidity, instead of amounts.
        #[arg(long, conflicts_with_all = ["amount_a", "amount_b"])]
        liquidity: Option<u128>,
        #[arg(long, default_value_t = B256::ZERO)]
        salt:      B256
    },
    /// CREATE2 address of a V3 pool. Takes its fee tier from `--fee`.
    V3Pool {
        token_a: Address,
        token_b: Address,
        #[arg(long, default_value = V3_FACTORY)]
        factory: Address
    }
}

impl Args {
    pub fn run(self) -> eyre::Result<Value> {
        let config = self.pool_config()?;

        match self.command {
            Command::PoolId { token_a, token_b } => {
                let key = config.pool_key(token_a, token_b)?;
                Ok(key_json(&key))
            }
            Command::Init { token_a, token_b, price } => {
                let key = config.pool_key(token_a, token_b)?;
                let pair = PairWithPrice::new(token_a, token_b, price)?;
                let sqrt_price = price_to_sqrt_price_x96(pair.price_1_over_0)
                    .wrap_err("initial price has no sqrtPriceX96")?;
                let tick = tick_at_sqrt_ratio(sqrt_price)
                    .wrap_err("initial price is outside the tick range")?;
                info!(pool_id = %key.pool_id(), %sqrt_price, tick, "initial price");

                Ok(json!({
                    "pool": key_json(&key),
                    "price1Per0": pair.price_1_over_0,
                    "sqrtPriceX96": sqrt_price.to_string(),
                    "tick": tick
                }))
            }
            Command::Position {
                token_a,
                token_b,
                price,
                lower,
                upper,
                amount_a,
                amount_b,
                liquidity,
                salt
            } => {
                let deposit = match (liquidity, amount_a, amount_b) {
                    (Some(liquidity), ..) => Deposit::Liquidity(liquidity),
                    (None, Some(amount_a), Some(amount_b)) => Deposit::Amounts(amount_a, amount_b),
                    (None, Some(amount_a), None) => Deposit::Amount0(amount_a),
                    (None, None, Some(amount_b)) => Deposit::Amount1(amount_b),
                    (None, None, None) => {
                        bail!("one of --amount-a, --amount-b or --liquidity is required")
                    }
                };
                let range = PriceRange::new(lower, upper)?;
                let position =
                    Position::from_price_range(&config, token_a, token_b, price, range, deposit)
                        .wrap_err("could not build position")?;
                let params = position.modify_liquidity_params(salt);

                Ok(json!({
                    "pool": key_json(&position.key),
                    "tickLower": position.tick_lower,
                    "tickUpper": position.tick_upper,
                    "liquidity": position.liquidity.to_string(),
                    "amountA": position.amount_of(token_a)?.to_string(),
                    "amountB": position.amount_of(token_b)?.to_string(),
                    "liquidityDelta": params.liquidityDelta.to_string(),
                    "salt": salt.to_string()
                }))
            }
            Command::V3Pool { token_a, token_b, factory } => {
                let fee = config.fee;
                let address = compute_v3_pool_address(factory, token_a, token_b, fee)?;
                Ok(json!({
                    "pool": address.to_checksum(None),
                    "fee": fee,
                    "tickSpacing": v3_tick_spacing(fee)
                }))
            }
        }
    }

    /// Config file first, then any flags on top of it.
    fn pool_config(&self) -> eyre::Result<PoolConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PoolConfig::default()
        };
        if let Some(fee) = self.fee {
            config.fee = fee;
        }
        if let Some(tick_spacing) = self.tick_spacing {
            config.tick_spacing = tick_spacing;
        }
        if let Some(hooks) = self.hooks {
            config.hooks = hooks;
        }
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> eyre::Result<PoolConfig> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading pool config {}", path.display()))?;
    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("parsing pool config {}", path.display()))
}

fn key_json(key: &PoolKey) -> Value {
    json!({
        "currency0": key.currency0().to_checksum(None),
        "currency1": key.currency1().to_checksum(None),
        "fee": key.fee(),
        "tickSpacing": key.tick_spacing(),
        "hooks": key.hooks().to_checksum(None),
        "poolId": key.pool_id().to_string()
    })
}

/// Integer token amount, optionally written as `<digits>e<exponent>`.
fn parse_amount(value: &str) -> Result<U256, String> {
    let (digits, exponent) = match value.split_once(['e', 'E']) {
        Some((digits, exponent)) => {
            (digits, exponent.parse::<u8>().map_err(|e| format!("bad exponent: {e}"))?)
        }
        None => (value, 0)
    };
    let base = U256::from_str_radix(digits, 10).map_err(|e| format!("bad amount: {e}"))?;
    U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .and_then(|scale| base.checked_mul(scale))
        .ok_or_else(|| format!("{value} does not fit in uint256"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use alloy_primitives::address;
    use assert_matches::assert_matches;
    use clap::CommandFactory;

    use super::*;

    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
    const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

    fn run(args: &[&str]) -> eyre::Result<Value> {
        Args::try_parse_from(std::iter::once("pool-cli").chain(args.iter().copied()))?.run()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn amounts_accept_exponents() {
        assert_eq!(parse_amount("1000").unwrap(), U256::from(1000u16));
        assert_eq!(parse_amount("5000e18").unwrap(), U256::from(5000u64) * U256::from(10u64.pow(18)));
        assert!(parse_amount("1.5e18").is_err());
        assert!(parse_amount("1e200").is_err());
    }

    #[test]
    fn pool_id_is_symmetric() {
        let forward = run(&["pool-id", USDC, WETH]).unwrap();
        let backward = run(&["pool-id", WETH, USDC]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(
            forward["poolId"],
            "0xb9fd8b8b6580b80432037a379071b6fb22bbceff6bafbd57390889c01d8757b9"
        );
    }

    #[test]
    fn flags_override_the_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fee": 500, "tickSpacing": 10 }}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let from_file = run(&["--config", path, "pool-id", USDC, WETH]).unwrap();
        assert_eq!(from_file["fee"], 500);
        assert_eq!(from_file["tickSpacing"], 10);

        let overridden = run(&["--config", path, "--tick-spacing", "60", "pool-id", USDC, WETH]).unwrap();
        assert_eq!(overridden["fee"], 500);
        assert_eq!(overridden["tickSpacing"], 60);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let error = load_config(Path::new("/nonexistent/pool.json")).unwrap_err();
        assert!(error.to_string().contains("reading pool config"));
    }

    #[test]
    fn init_reports_the_canonical_price() {
        let token_low = "0x1000000000000000000000000000000000000001";
        let token_high = "0xf000000000000000000000000000000000000002";
        let output = run(&["init", token_low, token_high, "5000"]).unwrap();
        assert_eq!(output["sqrtPriceX96"], "5602277097478613991873193822745");
        assert_eq!(output["tick"], 85176);
    }

    #[test]
    fn position_needs_a_deposit() {
        let result = run(&[
            "position", USDC, WETH, "--price", "0.0004", "--lower", "0.00035", "--upper", "0.00045"
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn position_reports_amounts_per_token() {
        let output = run(&[
            "position",
            WETH,
            USDC,
            "--price",
            "2500",
            "--lower",
            "2000",
            "--upper",
            "3000",
            "--amount-a",
            "1e18",
            "--amount-b",
            "2500e6"
        ])
        .unwrap();
        let amount_a = U256::from_str_radix(output["amountA"].as_str().unwrap(), 10).unwrap();
        let amount_b = U256::from_str_radix(output["amountB"].as_str().unwrap(), 10).unwrap();
        assert!(amount_a <= U256::from(10u64.pow(18)));
        assert!(amount_b <= U256::from(2500u64 * 10u64.pow(6)));
        assert_eq!(output["pool"]["currency0"], USDC);
    }

    #[test]
    fn v3_pool_defaults_to_the_mainnet_factory() {
        let output = run(&["v3-pool", WETH, USDC, "--fee", "500"]).unwrap();
        assert_eq!(output["pool"], "0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640");
        assert_eq!(output["tickSpacing"], 10);
        assert_matches!(run(&["v3-pool", WETH, USDC, "--fee", "123"]), Err(_));
    }

    #[test]
    fn hooks_flag_changes_the_pool() {
        let plain = run(&["pool-id", USDC, WETH]).unwrap();
        let hooked = run(&[
            "--hooks",
            &address!("0000000000000000000000000000000000000080").to_string(),
            "pool-id",
            USDC,
            WETH
        ])
        .unwrap();
        assert_ne!(plain["poolId"], hooked["poolId"]);
    }
}
