//! Star representation of a 0-5 rating.
//!
//! Ratings are rounded to the nearest half star (ties away from zero), then
//! split into full, half and empty stars that always add up to five.

use std::fmt;

/// Maximum number of stars.
pub const MAX_STARS: u8 = 5;

const FULL: char = '★';
const HALF: char = '⯪';
const EMPTY: char = '☆';

/// A rating rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    /// Number of filled stars.
    pub full: u8,
    /// Whether a half star follows the filled ones.
    pub half: bool,
    /// Number of empty stars.
    pub empty: u8,
}

impl StarRating {
    /// Round a raw rating to the nearest half star.
    ///
    /// Non-finite and out-of-range values are clamped to `0..=5`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "doubled rating is clamped to 0..=10 before the cast"
    )]
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() { rating } else { 0.0 };
        let halves = (rating.clamp(0.0, f64::from(MAX_STARS)) * 2.0).round() as u8;
        let full = halves / 2;
        let half = halves % 2 == 1;
        let empty = MAX_STARS - full - u8::from(half);
        Self { full, half, empty }
    }

    /// The rounded value in stars (e.g. 3.5).
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.full) + if self.half { 0.5 } else { 0.0 }
    }

    /// Render using plain ASCII (`*`, `+`, `.`), for terminals without the glyphs.
    #[must_use]
    pub fn to_ascii(self) -> String {
        let mut s = "*".repeat(usize::from(self.full));
        if self.half {
            s.push('+');
        }
        s.push_str(&".".repeat(usize::from(self.empty)));
        s
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.full {
            write!(f, "{FULL}")?;
        }
        if self.half {
            write!(f, "{HALF}")?;
        }
        for _ in 0..self.empty {
            write!(f, "{EMPTY}")?;
        }
        Ok(())
    }
}
