//! Complex-number helpers shared by the designer crates

use crate::{PzError, PzResult};
pub use num_complex::Complex64;

/// Complex zero
pub const C_ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex one
pub const C_ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Parse a complex literal as typed by the user.
///
/// Accepts Python-style literals (`0.3+0.2j`, `1.5j`, `-0.9`) as well as the
/// `i` suffix. Surrounding whitespace and parentheses are ignored.
pub fn parse_complex(text: &str) -> PzResult<Complex64> {
    let trimmed = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();

    if trimmed.is_empty() {
        return Err(PzError::InvalidParameter("Enter a value".to_string()));
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .parse::<Complex64>()
        .map_err(|e| PzError::Parse(format!("'{}' is not a complex number: {}", text, e)))
}

/// Complex conjugate mirror of a z-plane position
#[inline]
pub fn mirror(position: Complex64) -> Complex64 {
    position.conj()
}

/// Manhattan distance `|Δre| + |Δim|` between two z-plane positions
#[inline]
pub fn manhattan(a: Complex64, b: Complex64) -> f64 {
    let d = a - b;
    d.re.abs() + d.im.abs()
}
