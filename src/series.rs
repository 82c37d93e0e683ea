//! Elements of a Tate algebra at finite precision.
//!
//! A series is an immutable value: a term list sorted leading-first under
//! the Tate term order, together with an absolute precision cap `N` meaning
//! the element is only known modulo `p^N * <x_1, ..., x_n>`. Every
//! operation propagates the cap so that no result ever claims more
//! precision than its inputs justify; term units are kept reduced modulo
//! `p^(N - val)`.

use crate::algebra::TateAlgebra;
use crate::coeff::Coefficient;
use crate::term::{TateTerm, cmp_lex};
use std::cmp::Ordering;
use std::fmt;

/// A Tate series: finitely many known terms plus `O(p^N)`.
#[derive(Debug, Clone)]
pub struct TateSeries {
    parent: TateAlgebra,
    terms: Vec<TateTerm>,
    prec: i64,
}

impl TateSeries {
    /// Build a series from arbitrary terms, merging duplicates, dropping
    /// everything at or above the cap and sorting leading-first.
    pub(crate) fn from_terms(parent: TateAlgebra, mut terms: Vec<TateTerm>, prec: i64) -> Self {
        let prime = parent.prime().clone();
        terms.sort_by(|a, b| cmp_lex(a.exponent(), b.exponent()));
        let mut merged: Vec<TateTerm> = Vec::with_capacity(terms.len());
        for t in terms {
            match merged.last_mut() {
                Some(last) if cmp_lex(last.exponent(), t.exponent()) == Ordering::Equal => {
                    let sum = last.coefficient().add(t.coefficient(), &prime);
                    *last = TateTerm::new(sum, t.exponent().clone());
                }
                _ => merged.push(t),
            }
        }
        let mut out: Vec<TateTerm> = Vec::with_capacity(merged.len());
        for t in merged {
            if t.coefficient().is_zero() {
                continue;
            }
            let val = t.valuation();
            if val >= prec {
                continue;
            }
            let coeff = t.coefficient().reduced(&prime, prec - val);
            if coeff.is_zero() {
                continue;
            }
            out.push(TateTerm::new(coeff, t.exponent().clone()));
        }
        out.sort_by(|a, b| b.order_cmp(a));
        Self {
            parent,
            terms: out,
            prec,
        }
    }

    /// Rebuild from terms already in canonical form.
    fn from_sorted(parent: TateAlgebra, terms: Vec<TateTerm>, prec: i64) -> Self {
        Self {
            parent,
            terms,
            prec,
        }
    }

    /// The zero series at the given cap.
    pub fn zero(parent: TateAlgebra, prec: i64) -> Self {
        Self {
            parent,
            terms: Vec::new(),
            prec,
        }
    }

    /// The parent algebra.
    pub fn parent(&self) -> &TateAlgebra {
        &self.parent
    }

    /// The known terms, leading first.
    pub fn terms(&self) -> &[TateTerm] {
        &self.terms
    }

    /// Absolute precision cap `N` of the `O(p^N)` tail.
    pub fn precision_absolute(&self) -> i64 {
        self.prec
    }

    /// Whether no term is known at this precision.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The leading term, if any.
    pub fn leading_term(&self) -> Option<&TateTerm> {
        self.terms.first()
    }

    /// The leading coefficient, if any.
    pub fn leading_coefficient(&self) -> Option<&Coefficient> {
        self.terms.first().map(|t| t.coefficient())
    }

    /// The Gauss valuation: the minimum term valuation, clamped at the
    /// precision cap for the zero series.
    pub fn valuation(&self) -> i64 {
        match self.terms.first() {
            Some(t) => t.valuation(),
            None => self.prec,
        }
    }

    /// Truncate to absolute precision `n` (never widens).
    pub fn add_bigoh(&self, n: i64) -> Self {
        let cap = self.prec.min(n);
        Self::from_terms(self.parent.clone(), self.terms.clone(), cap)
    }

    /// Sum at the joint precision.
    pub fn add(&self, other: &Self) -> Self {
        debug_assert!(self.parent == other.parent);
        let cap = self.prec.min(other.prec);
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Self::from_terms(self.parent.clone(), terms, cap)
    }

    /// Difference at the joint precision.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negated())
    }

    /// Negation.
    pub fn negated(&self) -> Self {
        let terms = self.terms.iter().map(TateTerm::negated).collect();
        Self::from_sorted(self.parent.clone(), terms, self.prec)
    }

    /// Multiply by a single term. The cap moves with the term's valuation.
    pub fn term_mul(&self, t: &TateTerm) -> Self {
        let cap = self.prec + t.valuation();
        let terms = self.terms.iter().map(|s| s.mul(t)).collect();
        Self::from_terms(self.parent.clone(), terms, cap)
    }

    /// Full product. The error of each factor is scaled by the valuation
    /// of the other, so the cap is `min(Nf + val g, Ng + val f)`.
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert!(self.parent == other.parent);
        let cap = (self.prec + other.valuation()).min(other.prec + self.valuation());
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                terms.push(a.mul(b));
            }
        }
        Self::from_terms(self.parent.clone(), terms, cap)
    }

    /// Multiply by `p^k` for `k >= 0`; raises the cap accordingly.
    pub fn positive_pi_shift(&self, k: i64) -> Self {
        assert!(k >= 0, "negative pi-shift");
        let terms = self
            .terms
            .iter()
            .map(|t| TateTerm::new(t.coefficient().shifted(k), t.exponent().clone()))
            .collect();
        Self::from_sorted(self.parent.clone(), terms, self.prec + k)
    }

    /// Scale so the leading coefficient becomes 1. Lowers the cap by the
    /// leading valuation.
    pub fn monic(&self) -> Self {
        let Some(lead) = self.leading_term() else {
            return self.clone();
        };
        let prime = self.parent.prime();
        let v = lead.valuation();
        let digits = self.prec - v;
        let inv = lead.coefficient().inv_unit_mod(prime, digits);
        let scale = TateTerm::new(
            Coefficient::from_parts(-v, inv, prime),
            TateTerm::one(self.parent.nvars()).exponent().clone(),
        );
        self.term_mul(&scale)
    }

    /// Divide by the unit part of the leading coefficient, so the leading
    /// coefficient becomes an exact power of the uniformizer. This is the
    /// normalisation available over the ring of integers, where the
    /// uniformizer itself cannot be inverted.
    pub fn unit_normalized(&self) -> Self {
        let Some(lead) = self.leading_term() else {
            return self.clone();
        };
        let prime = self.parent.prime();
        let digits = self.prec - self.valuation();
        let inv = lead.coefficient().inv_unit_mod(prime, digits);
        let scale = TateTerm::new(
            Coefficient::from_parts(0, inv, prime),
            TateTerm::one(self.parent.nvars()).exponent().clone(),
        );
        self.term_mul(&scale)
    }

    /// `self - q * d` at the justified precision.
    pub fn subtract_term_multiple(&self, q: &TateTerm, d: &Self) -> Self {
        debug_assert!(self.parent == d.parent);
        let cap = self.prec.min(d.prec + q.valuation());
        let mut terms = self.terms.clone();
        terms.extend(d.terms.iter().map(|t| t.mul(q).negated()));
        Self::from_terms(self.parent.clone(), terms, cap)
    }

    /// The S-polynomial `(t/tf) f - (t/tg) g` with `t` the lcm of the
    /// leading terms. The leading terms cancel exactly.
    pub fn spoly(&self, other: &Self) -> Self {
        let tf = self.leading_term().expect("S-polynomial of a zero series");
        let tg = other.leading_term().expect("S-polynomial of a zero series");
        let prime = self.parent.prime();
        let lcm = tf.lcm(tg);
        let qf = lcm.quotient(tf, prime, self.prec - self.valuation());
        let qg = lcm.quotient(tg, prime, other.prec - other.valuation());
        self.term_mul(&qf).sub(&other.term_mul(&qg))
    }

    /// Split off the leading term; the tail keeps the cap.
    pub(crate) fn split_leading(&self) -> (TateTerm, Self) {
        debug_assert!(!self.is_zero());
        let head = self.terms[0].clone();
        let tail = Self::from_sorted(self.parent.clone(), self.terms[1..].to_vec(), self.prec);
        (head, tail)
    }

    /// Reattach terms previously split off (they stay canonical as long as
    /// they are larger than everything in `self`).
    pub(crate) fn with_parked_terms(&self, parked: Vec<TateTerm>) -> Self {
        let mut terms = parked;
        terms.extend(self.terms.iter().cloned());
        Self::from_terms(self.parent.clone(), terms, self.prec)
    }
}

impl PartialEq for TateSeries {
    /// Equality at the joint precision.
    fn eq(&self, other: &Self) -> bool {
        if self.parent != other.parent {
            return false;
        }
        let cap = self.prec.min(other.prec);
        self.add_bigoh(cap).terms == other.add_bigoh(cap).terms
    }
}

impl std::ops::Add for &TateSeries {
    type Output = TateSeries;
    fn add(self, rhs: &TateSeries) -> TateSeries {
        TateSeries::add(self, rhs)
    }
}

impl std::ops::Sub for &TateSeries {
    type Output = TateSeries;
    fn sub(self, rhs: &TateSeries) -> TateSeries {
        TateSeries::sub(self, rhs)
    }
}

impl std::ops::Mul for &TateSeries {
    type Output = TateSeries;
    fn mul(self, rhs: &TateSeries) -> TateSeries {
        TateSeries::mul(self, rhs)
    }
}

impl std::ops::Neg for &TateSeries {
    type Output = TateSeries;
    fn neg(self) -> TateSeries {
        self.negated()
    }
}

impl fmt::Display for TateSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prime = self.parent.prime();
        for t in &self.terms {
            let c = t.coefficient();
            if c.valuation() >= 0 {
                let value = c.unit_part() * crate::coeff::pi_pow(prime, c.valuation());
                write!(f, "{value}")?;
            } else {
                write!(f, "{}*{}^({})", c.unit_part(), prime, c.valuation())?;
            }
            for (name, &e) in self.parent.variable_names().iter().zip(t.exponent().iter()) {
                match e {
                    0 => {}
                    1 => write!(f, "*{name}")?,
                    _ => write!(f, "*{name}^{e}")?,
                }
            }
            write!(f, " + ")?;
        }
        write!(f, "O({}^{})", prime, self.prec)
    }
}
