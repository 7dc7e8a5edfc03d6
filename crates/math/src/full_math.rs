use alloy_primitives::U256;
use pool_types::{PoolMathError, Result};
use uniswap_v3_math::full_math;

/// `floor(a * b / denominator)` with the product held in 512 bits, so the
/// only failure is a quotient that does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    // checked here as well, the 512-bit path reports it as an overflow
    if denominator.is_zero() {
        return Err(PoolMathError::InvalidInput("mul_div denominator is zero"))
    }

    full_math::mul_div(a, b, denominator)
        .map_err(|_| PoolMathError::ArithmeticOverflow("mul_div result exceeds uint256"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ONE: U256 = U256::from_limbs([1, 0, 0, 0]);
    const TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
    const THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

    #[test]
    fn small_values_divide_exactly() {
        let result = mul_div(U256::from(1000u16), U256::from(2000u16), U256::from(100u8)).unwrap();
        assert_eq!(result, U256::from(20_000u16));
    }

    #[test]
    fn rounds_down() {
        // 70 / 8 = 8.75
        let result = mul_div(U256::from(7u8), U256::from(10u8), U256::from(8u8)).unwrap();
        assert_eq!(result, U256::from(8u8));
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_matches!(
            mul_div(U256::from(10u8), U256::from(20u8), U256::ZERO),
            Err(PoolMathError::InvalidInput(_))
        );
    }

    #[test]
    fn product_wider_than_256_bits() {
        assert_eq!(mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap(), U256::MAX);

        // (2^200 * 2^100) / 2^150 = 2^150
        let result = mul_div(ONE << 200, ONE << 100, ONE << 150).unwrap();
        assert_eq!(result, ONE << 150);

        let result = mul_div(ONE << 200, THREE << 100, THREE << 50).unwrap();
        assert_eq!(result, ONE << 250);

        // odd denominator with a remainder
        let result =
            mul_div(U256::MAX, U256::from(12345u16), U256::from(987654321u32)).unwrap();
        let expected = U256::from_str_radix(
            "1447321508387010269055445979193212300489310531449933040962318509997879698",
            10
        )
        .unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn quotient_wider_than_256_bits_overflows() {
        assert_matches!(
            mul_div(U256::MAX, TWO, ONE),
            Err(PoolMathError::ArithmeticOverflow(_))
        );
        assert_matches!(
            mul_div(U256::MAX, U256::MAX, U256::MAX - ONE),
            Err(PoolMathError::ArithmeticOverflow(_))
        );
    }
}
