//! The Tate algebra parent object.
//!
//! A [`TateAlgebra`] bundles the prime, the variable names and the default
//! working precision, and says whether coefficients live in the fraction
//! field Q_p or in its ring of integers Z_p. Parents are cheap handles;
//! series hold one.

use crate::coeff::Coefficient;
use crate::error::{Result, TateError};
use crate::ideal::TateIdeal;
use crate::series::TateSeries;
use crate::term::TateTerm;
use num_bigint::BigInt;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
struct Inner {
    prime: BigInt,
    nvars: usize,
    names: Vec<String>,
    prec: i64,
    integral: bool,
}

/// A Tate algebra `K<x_1, ..., x_n>` (or its integer-ring counterpart)
/// over the `p`-adics at a fixed default precision.
#[derive(Debug, Clone)]
pub struct TateAlgebra {
    inner: Arc<Inner>,
}

impl PartialEq for TateAlgebra {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl TateAlgebra {
    /// Create the Tate algebra over Q_p with the given variables and
    /// default precision.
    pub fn new(prime: u64, names: &[&str], prec: i64) -> Result<Self> {
        if prec <= 0 {
            return Err(TateError::InvalidPrecision { requested: prec });
        }
        assert!(prime >= 2, "the uniformizer must be a prime");
        Ok(Self {
            inner: Arc::new(Inner {
                prime: BigInt::from(prime),
                nvars: names.len(),
                names: names.iter().map(|s| s.to_string()).collect(),
                prec,
                integral: false,
            }),
        })
    }

    /// The same algebra with coefficients restricted to the ring of
    /// integers Z_p.
    pub fn integer_ring(&self) -> Self {
        if self.inner.integral {
            return self.clone();
        }
        Self {
            inner: Arc::new(Inner {
                prime: self.inner.prime.clone(),
                nvars: self.inner.nvars,
                names: self.inner.names.clone(),
                prec: self.inner.prec,
                integral: true,
            }),
        }
    }

    /// The same algebra with coefficients in the fraction field Q_p.
    pub fn fraction_field(&self) -> Self {
        if !self.inner.integral {
            return self.clone();
        }
        Self {
            inner: Arc::new(Inner {
                prime: self.inner.prime.clone(),
                nvars: self.inner.nvars,
                names: self.inner.names.clone(),
                prec: self.inner.prec,
                integral: false,
            }),
        }
    }

    /// The prime (and uniformizer) of the base.
    pub fn prime(&self) -> &BigInt {
        &self.inner.prime
    }

    /// Number of variables.
    pub fn nvars(&self) -> usize {
        self.inner.nvars
    }

    /// Variable names, in order.
    pub fn variable_names(&self) -> &[String] {
        &self.inner.names
    }

    /// Default absolute precision for elements and basis computations.
    pub fn default_precision(&self) -> i64 {
        self.inner.prec
    }

    /// Whether the base ring is the fraction field Q_p.
    pub fn base_is_field(&self) -> bool {
        !self.inner.integral
    }

    /// The multiplicative identity term.
    pub fn term_one(&self) -> TateTerm {
        TateTerm::one(self.inner.nvars)
    }

    /// The zero series at the default precision.
    pub fn zero(&self) -> TateSeries {
        TateSeries::zero(self.clone(), self.inner.prec)
    }

    /// The unit series at the default precision.
    pub fn one(&self) -> TateSeries {
        self.series(&[(1, &[])])
    }

    /// Build a series from integer coefficients and exponent slices.
    ///
    /// Exponent slices shorter than the number of variables are padded
    /// with zeros, so the constant term can be written `(c, &[])`.
    pub fn series(&self, terms: &[(i64, &[u32])]) -> TateSeries {
        let mut out = Vec::with_capacity(terms.len());
        for (c, exps) in terms {
            assert!(
                exps.len() <= self.inner.nvars,
                "exponent slice longer than the number of variables"
            );
            let mut e: SmallVec<[u32; 8]> = SmallVec::from_slice(exps);
            while e.len() < self.inner.nvars {
                e.push(0);
            }
            out.push(TateTerm::new(
                Coefficient::from_integer(*c, &self.inner.prime),
                e,
            ));
        }
        TateSeries::from_terms(self.clone(), out, self.inner.prec)
    }

    /// The ideal generated by the given series.
    pub fn ideal(&self, gens: Vec<TateSeries>) -> TateIdeal {
        TateIdeal::new(self.clone(), gens)
    }
}

impl fmt::Display for TateAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = if self.inner.integral { "Z" } else { "Q" };
        write!(f, "{}_{}<", base, self.inner.prime)?;
        write!(f, "{}>", self.inner.names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_precision() {
        assert!(matches!(
            TateAlgebra::new(3, &["x"], 0),
            Err(TateError::InvalidPrecision { .. })
        ));
    }

    #[test]
    fn integer_ring_round_trips() {
        let a = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let zz = a.integer_ring();
        assert!(!zz.base_is_field());
        assert!(zz.fraction_field().base_is_field());
        assert_eq!(zz.prime(), a.prime());
    }

    #[test]
    fn constant_series_padding() {
        let a = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let one = a.one();
        assert_eq!(one.terms().len(), 1);
        assert_eq!(one.leading_term().unwrap().degree(), 0);
    }
}
