use std::fmt;

use crate::common::unit::{EMUS_PER_CM, EMUS_PER_INCH, EMUS_PER_PT, EMUS_PER_TWIP};

/// Length measurement with units.
///
/// Page geometry (margins, page size, column gaps, tab stops) arrives from
/// the parser in document units and leaves the renderer as CSS point values.
/// Internally the value is kept in EMUs (English Metric Units) so that twips,
/// points and inches all convert without drift.
///
/// # Examples
///
/// ```rust
/// use docx_preview::common::Length;
///
/// let width = Length::from_pt(612.0);
/// assert_eq!(width.to_css(), "612pt");
///
/// // 1440 twips = 1 inch = 72pt
/// assert_eq!(Length::from_twips(1440).points(), 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length {
    /// Value in EMUs (English Metric Units)
    /// 1 inch = 914,400 EMUs
    /// 1 pt = 12,700 EMUs
    emus: i64,
}

impl Length {
    /// Zero length.
    pub const ZERO: Self = Self { emus: 0 };

    /// Create a length from EMUs.
    #[inline]
    pub const fn from_emus(emus: i64) -> Self {
        Self { emus }
    }

    /// Create a length from twips (1/20 of a point), the unit used by
    /// `w:pgSz`, `w:pgMar` and `w:cols`.
    #[inline]
    pub const fn from_twips(twips: i64) -> Self {
        Self {
            emus: twips * EMUS_PER_TWIP,
        }
    }

    /// Create a length from points.
    #[inline]
    pub fn from_pt(pt: f64) -> Self {
        Self {
            emus: (pt * EMUS_PER_PT as f64).round() as i64,
        }
    }

    /// Create a length from inches.
    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self {
            emus: (inches * EMUS_PER_INCH as f64).round() as i64,
        }
    }

    /// Create a length from centimeters.
    #[inline]
    pub fn from_cm(cm: f64) -> Self {
        Self {
            emus: (cm * EMUS_PER_CM as f64).round() as i64,
        }
    }

    /// Get the value in EMUs.
    #[inline]
    pub const fn emus(&self) -> i64 {
        self.emus
    }

    /// Convert to points (1/72 inch).
    #[inline]
    pub fn points(&self) -> f64 {
        self.emus as f64 / EMUS_PER_PT as f64
    }

    /// Format as a CSS point length, e.g. `72pt` or `70.5pt`.
    ///
    /// Whole values are printed without a fractional part so that generated
    /// style text stays stable and readable.
    pub fn to_css(&self) -> String {
        let pt = self.points();
        let mut out = String::with_capacity(12);
        if pt.fract() == 0.0 && pt.abs() < i64::MAX as f64 {
            let mut buffer = itoa::Buffer::new();
            out.push_str(buffer.format(pt as i64));
        } else {
            let mut buffer = ryu::Buffer::new();
            out.push_str(buffer.format(pt));
        }
        out.push_str("pt");
        out
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twips_to_points() {
        assert_eq!(Length::from_twips(20).points(), 1.0);
        assert_eq!(Length::from_twips(1440).to_css(), "72pt");
    }

    #[test]
    fn test_fractional_points() {
        assert_eq!(Length::from_pt(70.5).to_css(), "70.5pt");
        assert_eq!(Length::from_twips(1).to_css(), "0.05pt");
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Length::default(), Length::ZERO);
        assert_eq!(Length::ZERO.to_css(), "0pt");
    }
}
