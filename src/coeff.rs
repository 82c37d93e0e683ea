//! Finite-precision p-adic coefficients.
//!
//! A coefficient is stored as `p^v * u` with the unit `u` an exact integer
//! coprime to `p`; the zero coefficient has a zero unit. Ring operations are
//! exact on the units. Series normalisation reduces each unit modulo
//! `p^(cap - v)`, so an element never pretends to more digits than its
//! absolute precision cap justifies.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, Zero};

/// `p^valuation * unit` with `unit` coprime to `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coefficient {
    valuation: i64,
    unit: BigInt,
}

/// `prime^k` for a non-negative exponent.
pub(crate) fn pi_pow(prime: &BigInt, k: i64) -> BigInt {
    debug_assert!(k >= 0, "negative power of the uniformizer");
    Pow::pow(prime, k as u32)
}

impl Coefficient {
    /// The zero coefficient.
    pub fn zero() -> Self {
        Self {
            valuation: 0,
            unit: BigInt::zero(),
        }
    }

    /// The unit coefficient 1.
    pub fn one() -> Self {
        Self::pi_power(0)
    }

    /// The exact power `p^k` (unit part 1).
    pub fn pi_power(k: i64) -> Self {
        Self {
            valuation: k,
            unit: BigInt::one(),
        }
    }

    /// Build from a raw integer times `p^valuation`, factoring the prime
    /// out of the integer part.
    pub fn from_parts(valuation: i64, raw: BigInt, prime: &BigInt) -> Self {
        if raw.is_zero() {
            return Self::zero();
        }
        let mut v = valuation;
        let mut u = raw;
        loop {
            let (q, r) = u.div_rem(prime);
            if r.is_zero() {
                u = q;
                v += 1;
            } else {
                break;
            }
        }
        Self { valuation: v, unit: u }
    }

    /// Build from a plain integer.
    pub fn from_integer(n: impl Into<BigInt>, prime: &BigInt) -> Self {
        Self::from_parts(0, n.into(), prime)
    }

    /// Whether this is the zero coefficient.
    pub fn is_zero(&self) -> bool {
        self.unit.is_zero()
    }

    /// The p-adic valuation. Only meaningful for non-zero coefficients.
    pub fn valuation(&self) -> i64 {
        debug_assert!(!self.is_zero(), "valuation of the zero coefficient");
        self.valuation
    }

    /// The unit part `u`.
    pub fn unit_part(&self) -> &BigInt {
        &self.unit
    }

    /// Whether the unit part is exactly 1, i.e. the coefficient is a pure
    /// power of the uniformizer.
    pub fn is_pi_power(&self) -> bool {
        self.unit.is_one()
    }

    /// Exact sum.
    pub fn add(&self, other: &Self, prime: &BigInt) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let v = self.valuation.min(other.valuation);
        let raw = &self.unit * pi_pow(prime, self.valuation - v)
            + &other.unit * pi_pow(prime, other.valuation - v);
        Self::from_parts(v, raw, prime)
    }

    /// Exact product. Units coprime to `p` stay coprime, so no
    /// renormalisation is needed.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Self {
            valuation: self.valuation + other.valuation,
            unit: &self.unit * &other.unit,
        }
    }

    /// Negation.
    pub fn negated(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            valuation: self.valuation,
            unit: -&self.unit,
        }
    }

    /// Multiply by `p^k` (k may be negative).
    pub fn shifted(&self, k: i64) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            valuation: self.valuation + k,
            unit: self.unit.clone(),
        }
    }

    /// Reduce the unit to its canonical representative modulo
    /// `p^digits`. Zero digits (or fewer) clear the coefficient: nothing
    /// about it is known at that precision.
    pub fn reduced(&self, prime: &BigInt, digits: i64) -> Self {
        if self.is_zero() || digits <= 0 {
            return Self::zero();
        }
        let modulus = pi_pow(prime, digits);
        Self {
            valuation: self.valuation,
            unit: self.unit.mod_floor(&modulus),
        }
    }

    /// Inverse of the unit part modulo `p^digits`.
    pub fn inv_unit_mod(&self, prime: &BigInt, digits: i64) -> BigInt {
        assert!(!self.is_zero(), "inverse of a zero coefficient");
        assert!(digits >= 1, "inverse needs at least one digit");
        let modulus = pi_pow(prime, digits);
        let u = self.unit.mod_floor(&modulus);
        let ext = u.extended_gcd(&modulus);
        debug_assert!(ext.gcd.is_one(), "unit part not coprime to the prime");
        ext.x.mod_floor(&modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p3() -> BigInt {
        BigInt::from(3)
    }

    #[test]
    fn from_parts_factors_out_the_prime() {
        let c = Coefficient::from_integer(18, &p3());
        assert_eq!(c.valuation(), 2);
        assert_eq!(c.unit_part(), &BigInt::from(2));
    }

    #[test]
    fn addition_renormalises_cancellation() {
        let p = p3();
        let a = Coefficient::from_integer(5, &p);
        let b = Coefficient::from_integer(4, &p);
        let s = a.add(&b, &p);
        // 5 + 4 = 9 = 3^2
        assert_eq!(s.valuation(), 2);
        assert!(s.is_pi_power());
    }

    #[test]
    fn addition_of_opposites_is_zero() {
        let p = p3();
        let a = Coefficient::from_integer(7, &p);
        let s = a.add(&a.negated(), &p);
        assert!(s.is_zero());
    }

    #[test]
    fn unit_inverse_is_an_inverse() {
        let p = p3();
        let c = Coefficient::from_integer(5, &p);
        let inv = c.inv_unit_mod(&p, 4);
        let prod = (c.unit_part() * inv).mod_floor(&pi_pow(&p, 4));
        assert!(prod.is_one());
    }

    #[test]
    fn reduction_below_one_digit_clears() {
        let p = p3();
        let c = Coefficient::from_integer(5, &p);
        assert!(c.reduced(&p, 0).is_zero());
        assert!(!c.reduced(&p, 1).is_zero());
    }
}
