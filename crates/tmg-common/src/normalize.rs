//! Degree precision and longitude normalization.
//!
//! Two longitude forms are used by the grid and they are never mixed
//! implicitly: [`lng180`] maps into (-180, 180] and [`lng360`] maps into
//! [0, 360). Both round the result to [`DEGREE_DIGITS`] decimal places so
//! that points derived along different paths compare equal.

/// Decimal places kept on every degree value (about 1 cm at the equator).
pub const DEGREE_DIGITS: i32 = 7;

/// Round `x` to `digits` places to the right of the decimal point.
pub fn truncate(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

/// Round a degree value to [`DEGREE_DIGITS`].
#[inline]
pub fn truncate_degrees(x: f64) -> f64 {
    truncate(x, DEGREE_DIGITS)
}

/// Whether `a` and `b` agree to within `10^-digits`.
pub fn equal_within_tolerance(a: f64, b: f64, digits: i32) -> bool {
    (a - b).abs() <= 10f64.powi(-digits)
}

/// Normalize a longitude to (-180, 180].
pub fn lng180(lng: f64) -> f64 {
    let mut l = lng % 360.0;
    if l <= -180.0 {
        l += 360.0;
    } else if l > 180.0 {
        l -= 360.0;
    }
    let l = truncate_degrees(l);
    // Rounding can land exactly on the excluded bound.
    if l <= -180.0 {
        l + 360.0
    } else {
        l
    }
}

/// Normalize a longitude to [0, 360).
pub fn lng360(lng: f64) -> f64 {
    let mut l = lng % 360.0;
    if l < 0.0 {
        l += 360.0;
    }
    let l = truncate_degrees(l);
    if l >= 360.0 {
        l - 360.0
    } else {
        l
    }
}
