//! # Safe Multiplication and Division
//!
//! Provides overflow-safe multiplication and division operations using
//! 256-bit intermediate arithmetic. This is essential for share/asset
//! conversions where naive multiplication could overflow.
//!
//! ## Rounding Modes
//!
//! - `Down`: Round towards zero (floor)
//! - `Up`: Round away from zero (ceiling)
//!
//! The rounding mode affects financial calculations:
//! - Use `Down` when calculating shares to mint or assets to pay out (favor vault)
//! - Use `Up` when calculating shares to burn or assets to pull in (favor vault)

use uint::construct_uint;

use crate::error::{Error, Result};

construct_uint! {
    pub struct U256(4);
}

/// Rounding direction for division operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Round towards zero (floor division).
    Down,
    /// Round away from zero (ceiling division).
    Up,
}

/// Performs `(x * y) / denominator` with configurable rounding.
///
/// The product is formed in 256 bits and cannot overflow. The call fails with
/// [`Error::ArithmeticOverflow`] when the quotient does not fit in `u128` or
/// the denominator is zero.
///
/// # Example
///
/// ```ignore
/// // shares = (assets * supply) / total_assets, rounded down
/// let shares = mul_div(100_000, 1_000_000, 500_000, Rounding::Down)?;
/// assert_eq!(shares, 200_000);
/// ```
pub fn mul_div(x: u128, y: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(Error::ArithmeticOverflow);
    }

    let numerator = U256::from(x) * U256::from(y);
    let denominator = U256::from(denominator);
    let result = numerator / denominator;
    let remainder = numerator % denominator;

    if result > U256::from(u128::MAX) {
        return Err(Error::ArithmeticOverflow);
    }
    let result = result.as_u128();

    match rounding {
        Rounding::Down => Ok(result),
        Rounding::Up if remainder.is_zero() => Ok(result),
        Rounding::Up => result.checked_add(1).ok_or(Error::ArithmeticOverflow),
    }
}
