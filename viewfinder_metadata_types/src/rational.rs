//! Exact fractions, as EXIF and XMP carry them.

use core::fmt;

/// Error for a [`Rational`] constructed with a denominator of zero.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ZeroDenominator;

impl fmt::Display for ZeroDenominator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("A rational number may not have a denominator of zero.")
    }
}

impl core::error::Error for ZeroDenominator {}

/// A fraction in `numerator/denominator` form.
///
/// EXIF and XMP store physical quantities (exposure times, focal lengths,
/// GPS positions) as exact fractions rather than floats. Construction
/// rejects a zero denominator, so any `Rational` you're holding is a real
/// number.
///
/// Equality is mathematical, by cross-multiplication, so non-reduced forms
/// of the same ratio compare equal:
///
/// ```
/// use viewfinder_metadata_types::Rational;
///
/// let half = Rational::new(1, 2)?;
/// let two_quarters = Rational::new(2, 4)?;
/// assert_eq!(half, two_quarters);
/// # Ok::<(), viewfinder_metadata_types::ZeroDenominator>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    /// Creates a new fraction.
    ///
    /// # Errors
    ///
    /// Returns [`ZeroDenominator`] when `denominator` is zero.
    pub const fn new(numerator: i64, denominator: i64) -> Result<Self, ZeroDenominator> {
        if denominator == 0 {
            return Err(ZeroDenominator);
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The top of the fraction.
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// The bottom of the fraction. Never zero.
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        // cross-multiply in `i128` so extreme `i64` fields can't overflow
        self.numerator as i128 * other.denominator as i128
            == other.numerator as i128 * self.denominator as i128
    }
}

impl Eq for Rational {}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
