use anchor_lang::prelude::*;

use crate::constants::{FIXED_DIGITS, FIXED_ONE};
use crate::errors::PrizePoolErrorCode;

/// ---------------------------------------------------------------------------
/// Fixed
/// ---------------------------------------------------------------------------
///
/// Unsigned fixed-point number carrying exactly `FIXED_DIGITS` (18) fractional
/// decimal digits in a `u128` mantissa.
///
/// Every `u64` token amount fits as a `Fixed` (u64::MAX * 1e18 < u128::MAX), and
/// every operation either returns the exact result floored to 18 digits or a
/// `MathOverflow` error. Nothing wraps.
///
/// Used for rate and share arithmetic only. Draw selection never touches it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed(u128);

impl Fixed {
    pub const DIGITS: u32 = FIXED_DIGITS;
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(FIXED_ONE);

    /// Integer -> fixed. Cannot overflow for any `u64`.
    pub fn new_fixed(value: u64) -> Fixed {
        Fixed(value as u128 * FIXED_ONE)
    }

    /// Wraps a raw mantissa (e.g. a 1e18-scaled rate).
    pub const fn from_mantissa(mantissa: u128) -> Fixed {
        Fixed(mantissa)
    }

    pub fn mantissa(self) -> u128 {
        self.0
    }

    /// `numerator / denominator` as a fixed-point fraction.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Result<Fixed> {
        Fixed::new_fixed(numerator).divide(Fixed::new_fixed(denominator))
    }

    pub fn integer(self) -> u128 {
        self.0 / FIXED_ONE
    }

    pub fn fractional(self) -> u128 {
        self.0 % FIXED_ONE
    }

    pub fn add(self, other: Fixed) -> Result<Fixed> {
        Ok(Fixed(
            self.0
                .checked_add(other.0)
                .ok_or(PrizePoolErrorCode::MathOverflow)?,
        ))
    }

    pub fn sub(self, other: Fixed) -> Result<Fixed> {
        Ok(Fixed(
            self.0
                .checked_sub(other.0)
                .ok_or(PrizePoolErrorCode::MathOverflow)?,
        ))
    }

    /// Product of two fixed values.
    ///
    /// Split as x = x1 + x2, y = y1 + y2 (integer + fractional parts):
    ///   x*y = x1*y1 + x1*y2 + x2*y1 + x2*y2
    /// so no intermediate term is scaled by 1e36.
    pub fn multiply(self, other: Fixed) -> Result<Fixed> {
        let (x1, x2) = (self.integer(), self.fractional());
        let (y1, y2) = (other.integer(), other.fractional());

        let x1y1 = x1
            .checked_mul(y1)
            .and_then(|v| v.checked_mul(FIXED_ONE))
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        let x1y2 = x1.checked_mul(y2).ok_or(PrizePoolErrorCode::MathOverflow)?;
        let x2y1 = x2.checked_mul(y1).ok_or(PrizePoolErrorCode::MathOverflow)?;
        // Both below 1e18, product below 1e36.
        let x2y2 = x2 * y2 / FIXED_ONE;

        let sum = x1y1
            .checked_add(x1y2)
            .and_then(|v| v.checked_add(x2y1))
            .and_then(|v| v.checked_add(x2y2))
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        Ok(Fixed(sum))
    }

    /// Quotient of two fixed values, exact long division to 18 digits.
    pub fn divide(self, other: Fixed) -> Result<Fixed> {
        require!(other.0 != 0, PrizePoolErrorCode::MathOverflow);

        let whole = self.0 / other.0;
        let mut remainder = self.0 % other.0;
        let mut fraction: u128 = 0;
        for _ in 0..FIXED_DIGITS {
            remainder = remainder
                .checked_mul(10)
                .ok_or(PrizePoolErrorCode::MathOverflow)?;
            fraction = fraction * 10 + remainder / other.0;
            remainder %= other.0;
        }

        let mantissa = whole
            .checked_mul(FIXED_ONE)
            .and_then(|v| v.checked_add(fraction))
            .ok_or(PrizePoolErrorCode::MathOverflow)?;
        Ok(Fixed(mantissa))
    }

    /// Floor to an integer amount.
    pub fn to_integer(self) -> Result<u64> {
        u64::try_from(self.integer()).map_err(|_| PrizePoolErrorCode::MathOverflow.into())
    }

    /// `amount * self`, floored.
    pub fn apply_to(self, amount: u64) -> Result<u64> {
        Fixed::new_fixed(amount).multiply(self)?.to_integer()
    }
}
