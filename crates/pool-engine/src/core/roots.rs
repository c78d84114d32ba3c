//! Real roots of `a·t² + b·t + c = 0`.

use crate::core::numeric::{is_neg, is_zero};

/// The real roots of a quadratic (or degenerate linear) polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roots {
    None,
    One(f64),
    /// Two distinct roots, `(−b + √D) / 2a` first.
    Two(f64, f64),
}

/// Solve `a·t² + b·t + c = 0` over the reals.
///
/// A vanishing `a` degrades to the linear equation `b·t + c = 0`. The
/// discriminant is classified with the shared epsilon so that grazing rays
/// produce a single tangent root instead of two nearly equal ones.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Roots {
    if is_zero(a) {
        if is_zero(b) {
            return Roots::None;
        }
        return Roots::One(-c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if is_neg(discriminant) {
        Roots::None
    } else if is_zero(discriminant) {
        Roots::One(-b / (2.0 * a))
    } else {
        let sqrt_d = discriminant.sqrt();
        Roots::Two((-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_real_roots() {
        match quadratic_roots(1.0, 0.0, -4.0) {
            Roots::Two(t0, t1) => {
                assert!((t0 - 2.0).abs() < 1e-12);
                assert!((t1 + 2.0).abs() < 1e-12);
            }
            other => panic!("expected two roots, got {other:?}"),
        }
    }

    #[test]
    fn double_root_is_reported_once() {
        assert_eq!(quadratic_roots(1.0, -2.0, 1.0), Roots::One(1.0));
    }

    #[test]
    fn negative_discriminant_has_no_roots() {
        assert_eq!(quadratic_roots(1.0, 0.0, 1.0), Roots::None);
    }

    #[test]
    fn zero_leading_coefficient_is_linear() {
        assert_eq!(quadratic_roots(0.0, 2.0, -4.0), Roots::One(2.0));
    }

    #[test]
    fn fully_degenerate_has_no_roots() {
        assert_eq!(quadratic_roots(0.0, 0.0, 5.0), Roots::None);
        assert_eq!(quadratic_roots(0.0, 0.0, 0.0), Roots::None);
    }
}
