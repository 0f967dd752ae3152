//! Amount type
//!
//! Domain primitive for transaction amounts with business rule validation.
//! All amounts are validated at construction time, ensuring invalid values
//! cannot exist in the system.

use std::fmt;

/// Maximum allowed magnitude, in the smallest currency unit
const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Amount represents a validated signed transaction amount.
///
/// Deposits are positive, corrections may be negative. Zero is rejected
/// because a zero-amount transaction records nothing.
///
/// # Invariants
/// - Value is never zero
/// - Magnitude is at most 1 trillion units
///
/// # Example
/// ```
/// use waste_bank::domain::Amount;
///
/// let amount = Amount::new(2500).unwrap();
/// assert_eq!(amount.value(), 2500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(i64);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be zero")]
    Zero,

    #[error("Amount exceeds maximum allowed magnitude ({MAX_AMOUNT}), got {0}")]
    OutOfRange(i64),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::Zero` if value == 0
    /// - `AmountError::OutOfRange` if magnitude exceeds 1 trillion
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value == 0 {
            return Err(AmountError::Zero);
        }

        // Bounds are symmetric; comparing directly avoids abs() on i64::MIN.
        if value < -MAX_AMOUNT || value > MAX_AMOUNT {
            return Err(AmountError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    /// Get the underlying signed value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(100);
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), 100);
    }

    #[test]
    fn test_amount_negative_allowed() {
        let amount = Amount::new(-250);
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), -250);
    }

    #[test]
    fn test_amount_zero_rejected() {
        let amount = Amount::new(0);
        assert!(matches!(amount, Err(AmountError::Zero)));
    }

    #[test]
    fn test_amount_overflow() {
        let amount = Amount::new(1_000_000_000_001);
        assert!(matches!(amount, Err(AmountError::OutOfRange(_))));
    }

    #[test]
    fn test_amount_negative_overflow() {
        let amount = Amount::new(-1_000_000_000_001);
        assert!(matches!(amount, Err(AmountError::OutOfRange(_))));
    }

    #[test]
    fn test_amount_max_value_ok() {
        assert!(Amount::new(MAX_AMOUNT).is_ok());
        assert!(Amount::new(-MAX_AMOUNT).is_ok());
    }

    #[test]
    fn test_amount_min_i64_rejected() {
        let amount = Amount::new(i64::MIN);
        assert!(matches!(amount, Err(AmountError::OutOfRange(_))));
    }

    #[test]
    fn test_amount_display() {
        let amount = Amount::new(-42).unwrap();
        assert_eq!(amount.to_string(), "-42");
    }
}
