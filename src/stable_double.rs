//! Stable Double implementation
//!
//! An underflow- and overflow-resistant alternative to floating point. The
//! value is stored as the logarithm of its absolute value plus a sign, so
//! products and quotients of extremely large or small magnitudes stay
//! representable; sums and differences pay one log-sum-exp per operation.
//! Precision is traded away in some ranges in exchange.
//!
//! # Example
//!
//! ```rust
//! use rust_advanced_structures::stable_double::StableDouble;
//!
//! // e^800 overflows f64, but its ratio is exact in log space.
//! let huge = StableDouble::from_log(800.0, true);
//! let ratio = (huge * huge) / huge;
//! assert_eq!(ratio, huge);
//! assert!(((StableDouble::from(2.0) + StableDouble::from(3.0)).to_f64() - 5.0).abs() < 1e-12);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// The stored logarithm that stands in for zero.
const LOG_ZERO: f64 = f64::MIN;

/// A scalar kept in log-transformed space.
#[derive(Debug, Clone, Copy)]
pub struct StableDouble {
    /// Logarithm of the absolute value; [`LOG_ZERO`] encodes zero.
    log_abs: f64,
    positive: bool,
}

impl StableDouble {
    /// Zero.
    pub const ZERO: StableDouble = StableDouble {
        log_abs: LOG_ZERO,
        positive: true,
    };

    /// Constructs from a log-transformed absolute value and a sign.
    #[inline]
    pub fn from_log(log_abs: f64, positive: bool) -> Self {
        Self { log_abs, positive }
    }

    /// Converts back to an ordinary `f64`, saturating to infinity when the
    /// magnitude no longer fits.
    #[inline]
    pub fn to_f64(self) -> f64 {
        if self.positive {
            self.log_abs.exp()
        } else {
            -self.log_abs.exp()
        }
    }

    /// The multiplicative inverse.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::from_log(-self.log_abs, self.positive)
    }

    /// Log of the sum of two log-transformed magnitudes, without leaving
    /// log space.
    #[inline]
    fn add_log(log_x: f64, log_y: f64) -> f64 {
        if log_x > log_y {
            log_x + (1.0 + (log_y - log_x).exp()).ln()
        } else {
            log_y + (1.0 + (log_x - log_y).exp()).ln()
        }
    }

    /// Log of the difference of two log-transformed magnitudes; requires
    /// `log_x > log_y`.
    #[inline]
    fn subtract_log(log_x: f64, log_y: f64) -> f64 {
        log_x + (1.0 - (log_y - log_x).exp()).ln()
    }

    /// Strict less-than in the original (non-log) value order.
    fn is_less_than(&self, other: &Self) -> bool {
        if self.positive != other.positive {
            // Differing signs decide it, unless both are zero with the sign
            // set arbitrarily.
            other.positive && (self.log_abs != LOG_ZERO || other.log_abs != LOG_ZERO)
        } else if self.positive {
            self.log_abs < other.log_abs
        } else {
            self.log_abs > other.log_abs
        }
    }
}

impl Default for StableDouble {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for StableDouble {
    fn from(x: f64) -> Self {
        if x == 0.0 {
            Self::ZERO
        } else if x < 0.0 {
            Self {
                log_abs: (-x).ln(),
                positive: false,
            }
        } else {
            Self {
                log_abs: x.ln(),
                positive: true,
            }
        }
    }
}

impl Neg for StableDouble {
    type Output = StableDouble;

    fn neg(self) -> StableDouble {
        Self::from_log(self.log_abs, !self.positive)
    }
}

impl Mul for StableDouble {
    type Output = StableDouble;

    fn mul(self, other: StableDouble) -> StableDouble {
        Self::from_log(self.log_abs + other.log_abs, self.positive == other.positive)
    }
}

impl Div for StableDouble {
    type Output = StableDouble;

    fn div(self, other: StableDouble) -> StableDouble {
        Self::from_log(self.log_abs - other.log_abs, self.positive == other.positive)
    }
}

impl Add for StableDouble {
    type Output = StableDouble;

    fn add(self, other: StableDouble) -> StableDouble {
        if self.positive == other.positive {
            Self::from_log(Self::add_log(self.log_abs, other.log_abs), self.positive)
        } else if self.log_abs == other.log_abs {
            // Exact cancellation
            Self::ZERO
        } else if self.log_abs > other.log_abs {
            Self::from_log(Self::subtract_log(self.log_abs, other.log_abs), self.positive)
        } else {
            Self::from_log(Self::subtract_log(other.log_abs, self.log_abs), other.positive)
        }
    }
}

impl Sub for StableDouble {
    type Output = StableDouble;

    fn sub(self, other: StableDouble) -> StableDouble {
        self + (-other)
    }
}

macro_rules! f64_variants {
    ($($trait:ident, $method:ident;)*) => {
        $(
            impl $trait<f64> for StableDouble {
                type Output = StableDouble;

                fn $method(self, other: f64) -> StableDouble {
                    self.$method(StableDouble::from(other))
                }
            }
        )*
    };
}

f64_variants! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
}

macro_rules! assign_variants {
    ($($trait:ident, $method:ident, $base:ident, $base_method:ident;)*) => {
        $(
            impl<R> $trait<R> for StableDouble
            where
                StableDouble: $base<R, Output = StableDouble>,
            {
                fn $method(&mut self, other: R) {
                    *self = self.$base_method(other);
                }
            }
        )*
    };
}

assign_variants! {
    AddAssign, add_assign, Add, add;
    SubAssign, sub_assign, Sub, sub;
    MulAssign, mul_assign, Mul, mul;
    DivAssign, div_assign, Div, div;
}

impl PartialEq for StableDouble {
    fn eq(&self, other: &Self) -> bool {
        // Both zeros are equal regardless of their stored signs
        self.log_abs == other.log_abs
            && (self.log_abs == LOG_ZERO || self.positive == other.positive)
    }
}

impl PartialEq<f64> for StableDouble {
    fn eq(&self, other: &f64) -> bool {
        *self == StableDouble::from(*other)
    }
}

impl PartialOrd for StableDouble {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_less_than(other) {
            Some(Ordering::Less)
        } else if other.is_less_than(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl PartialOrd<f64> for StableDouble {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&StableDouble::from(*other))
    }
}

impl fmt::Display for StableDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "exp({})", self.log_abs)
        } else {
            write!(f, "-exp({})", self.log_abs)
        }
    }
}
