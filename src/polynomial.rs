//! Random polynomial over ℤ/mℤ with a fixed constant term (component C3).
//!
//! Used both to split the private RSA exponent across participants
//! (constant term = `d`) and, in tests, to check the Shamir sharing
//! invariant directly. `Polynomial` is an immutable value: evaluating it
//! never mutates the constant term or any coefficient, unlike the
//! reference implementation's `eval`, which aliases and mutates the
//! constant across calls — that bug is not replicated here.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::thread_rng;
use rand::RngCore;

/// A polynomial `f(x) = c_0 + c_1*x + ... + c_d*x^d` over `ℤ/modulus ℤ`.
#[derive(Clone, Debug)]
pub struct Polynomial {
    coefficients: Vec<BigUint>,
    modulus: BigUint,
}

impl Polynomial {
    /// Builds a degree-`degree` polynomial with `f(0) = constant_term`
    /// and the remaining `degree` coefficients sampled uniformly from
    /// `[0, modulus)`.
    ///
    /// # Arguments
    ///
    /// * `constant_term` - The fixed value of `f(0)`.
    /// * `modulus` - The modulus all coefficients and evaluations are
    ///   reduced against.
    /// * `degree` - The polynomial's degree; `degree` random coefficients
    ///   are generated in addition to the constant term.
    ///
    /// # Returns
    ///
    /// A `Polynomial` instance with the given constant term and randomly
    /// generated remaining coefficients.
    pub fn new(constant_term: BigUint, modulus: BigUint, degree: usize) -> Self {
        let mut rng = thread_rng();
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant_term % &modulus);
        for _ in 0..degree {
            coefficients.push(sample_below(&mut rng, &modulus));
        }
        Polynomial {
            coefficients,
            modulus,
        }
    }

    /// Degree of the polynomial (one less than the number of coefficients).
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The constant term, `f(0)`.
    pub fn constant_term(&self) -> &BigUint {
        &self.coefficients[0]
    }

    /// Evaluates the polynomial at a given point `x`. Pure — never
    /// mutates `self`.
    ///
    /// # Arguments
    ///
    /// * `x` - The point at which to evaluate the polynomial.
    ///
    /// # Returns
    ///
    /// The value of `f(x) mod modulus`.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let mut result = BigUint::zero();
        let mut x_pow = BigUint::one();
        for coef in &self.coefficients {
            result = (result + coef * &x_pow) % &self.modulus;
            x_pow = (x_pow * x) % &self.modulus;
        }
        result
    }
}

fn sample_below(rng: &mut impl RngCore, modulus: &BigUint) -> BigUint {
    use num_bigint::RandBigInt;
    rng.gen_biguint_range(&BigUint::zero(), modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_at_zero_is_constant_term() {
        let poly = Polynomial::new(BigUint::from(42u32), BigUint::from(1000u32), 3);
        assert_eq!(poly.evaluate(&BigUint::zero()), *poly.constant_term());
    }

    #[test]
    fn evaluate_does_not_mutate_polynomial() {
        let poly = Polynomial::new(BigUint::from(7u32), BigUint::from(1009u32), 2);
        let first = poly.evaluate(&BigUint::from(1u32));
        // A second, different evaluation must not perturb the first
        // already-computed value or the polynomial's own state.
        let _ = poly.evaluate(&BigUint::from(2u32));
        let first_again = poly.evaluate(&BigUint::from(1u32));
        assert_eq!(first, first_again);
        assert_eq!(poly.constant_term(), &BigUint::from(7u32));
    }

    #[test]
    fn known_polynomial_matches_hand_computation() {
        // f(x) = 3 + 2x + x^2 over mod 1000
        let poly = Polynomial {
            coefficients: vec![
                BigUint::from(3u32),
                BigUint::from(2u32),
                BigUint::from(1u32),
            ],
            modulus: BigUint::from(1000u32),
        };
        // f(5) = 3 + 10 + 25 = 38
        assert_eq!(poly.evaluate(&BigUint::from(5u32)), BigUint::from(38u32));
    }
}
