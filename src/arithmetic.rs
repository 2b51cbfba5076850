//! F = m·a and its two inversions, in IEEE-754 double precision.
//!
//! Inputs are assumed to be in kg, m/s² and N already. Nothing is rounded.

use crate::error::{SolveError, SolveResult};
use crate::quantity::QuantityKind;

pub fn force(mass: f64, acceleration: f64) -> f64 {
    mass * acceleration
}

/// Fails when `mass` is zero.
pub fn acceleration(force: f64, mass: f64) -> SolveResult<f64> {
    if mass == 0.0 {
        return Err(SolveError::DivisionByZero {
            target: QuantityKind::Acceleration,
            divisor: QuantityKind::Mass,
        });
    }
    Ok(force / mass)
}

/// Fails when `acceleration` is zero.
pub fn mass(force: f64, acceleration: f64) -> SolveResult<f64> {
    if acceleration == 0.0 {
        return Err(SolveError::DivisionByZero {
            target: QuantityKind::Mass,
            divisor: QuantityKind::Acceleration,
        });
    }
    Ok(force / acceleration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn force_is_product() {
        assert_eq!(force(4.0, 3.0), 12.0);
        assert_eq!(force(0.0, 9.81), 0.0);
        assert_eq!(force(-2.0, 5.0), -10.0);
    }

    #[test]
    fn inversions_round_trip() {
        for &(m, a) in &[(4.0, 3.0), (0.25, 9.81), (1500.0, 0.3), (7.0, -2.5)] {
            let f = force(m, a);
            assert!(approx(mass(f, a).unwrap(), m), "mass({f}, {a}) != {m}");
            assert!(approx(acceleration(f, m).unwrap(), a), "accel({f}, {m}) != {a}");
        }
    }

    #[test]
    fn zero_divisor_fails() {
        assert_eq!(
            acceleration(10.0, 0.0),
            Err(SolveError::DivisionByZero {
                target: QuantityKind::Acceleration,
                divisor: QuantityKind::Mass,
            })
        );
        assert!(mass(10.0, 0.0).is_err());
        assert!(mass(10.0, -0.0).is_err());
    }

    #[test]
    fn zero_numerator_is_fine() {
        assert_eq!(acceleration(0.0, 2.0), Ok(0.0));
        assert_eq!(mass(0.0, 2.0), Ok(0.0));
    }
}
