//! Epsilon-aware scalar comparisons.
//!
//! Every sign or zero decision on velocities, ray parameters and polynomial
//! roots goes through these helpers so that floating-point noise near zero
//! cannot flip a contact decision from one frame to the next.

/// Absolute tolerance below which a scalar is treated as zero.
pub const EPSILON: f64 = 1e-7;

/// `|x| <= EPSILON`.
#[inline]
pub fn is_zero(x: impl Into<f64>) -> bool {
    x.into().abs() <= EPSILON
}

/// Strictly positive and not within tolerance of zero.
#[inline]
pub fn is_pos(x: impl Into<f64>) -> bool {
    let x = x.into();
    !is_zero(x) && x > 0.0
}

/// Strictly negative and not within tolerance of zero.
#[inline]
pub fn is_neg(x: impl Into<f64>) -> bool {
    let x = x.into();
    !is_zero(x) && x < 0.0
}

/// `a` and `b` differ by at most `EPSILON`.
#[inline]
pub fn is_eq(a: impl Into<f64>, b: impl Into<f64>) -> bool {
    is_zero(a.into() - b.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_within_tolerance() {
        assert!(is_zero(0.0_f64));
        assert!(is_zero(1e-8_f64));
        assert!(is_zero(-1e-8_f32));
        assert!(!is_zero(1e-3_f32));
    }

    #[test]
    fn sign_tests_ignore_noise() {
        assert!(is_pos(0.5_f32));
        assert!(!is_pos(1e-9_f64));
        assert!(is_neg(-0.5_f64));
        assert!(!is_neg(-1e-9_f64));
        assert!(!is_pos(-2.0_f32));
        assert!(!is_neg(2.0_f32));
    }

    #[test]
    fn equality_is_tolerant() {
        assert!(is_eq(1.0_f64, 1.0 + 1e-9));
        assert!(!is_eq(1.0_f64, 1.001));
        assert!(is_eq(3.0_f32, 3.0_f32));
    }
}
