use alloy_primitives::Address;
use tracing::trace;

use crate::errors::{PoolMathError, Result};

/// A price between two tokens re-expressed in pool order.
///
/// Callers think in "1 token A = `price` token B". Pools only ever store
/// token1 per token0, where token0 is the lower address. When token A sorts
/// after token B the pair is swapped and the price inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairWithPrice {
    pub token0:         Address,
    pub token1:         Address,
    pub price_1_over_0: f64,
    /// Whether the caller's token A was token1.
    pub flipped:        bool
}

impl PairWithPrice {
    pub fn new(token_a: Address, token_b: Address, price_b_per_a: f64) -> Result<Self> {
        ensure_positive_price(price_b_per_a)?;
        let (token0, token1, flipped) = order_pair(token_a, token_b)?;

        let price_1_over_0 = if flipped { price_b_per_a.recip() } else { price_b_per_a };
        if flipped {
            trace!(%token_a, %token_b, price_b_per_a, price_1_over_0, "inverted pair price");
        }

        Ok(Self { token0, token1, price_1_over_0, flipped })
    }
}

/// A price band expressed as token B per token A, `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64
}

impl PriceRange {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        ensure_positive_price(lower)?;
        ensure_positive_price(upper)?;
        if lower >= upper {
            return Err(PoolMathError::InvalidRange("lower price must be below upper price"))
        }
        Ok(Self { lower, upper })
    }

    /// Re-expresses the band in token1 per token0. Inverting swaps the ends:
    /// `[lower, upper]` becomes `[1 / upper, 1 / lower]`.
    pub fn canonical(self, token_a: Address, token_b: Address) -> Result<Self> {
        let (.., flipped) = order_pair(token_a, token_b)?;
        if !flipped {
            return Ok(self)
        }
        Self::new(self.upper.recip(), self.lower.recip())
    }
}

/// `(token0, token1, flipped)`
fn order_pair(token_a: Address, token_b: Address) -> Result<(Address, Address, bool)> {
    match token_a.cmp(&token_b) {
        std::cmp::Ordering::Less => Ok((token_a, token_b, false)),
        std::cmp::Ordering::Greater => Ok((token_b, token_a, true)),
        std::cmp::Ordering::Equal => Err(PoolMathError::InvalidInput("pair tokens must differ"))
    }
}

fn ensure_positive_price(price: f64) -> Result<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(PoolMathError::InvalidInput("price must be finite and strictly positive"))
    }
}
