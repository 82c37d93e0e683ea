//! Ideals and the operations built on their canonical basis.
//!
//! An ideal is a generator list plus a lazily computed, memoised Gröbner
//! basis. Membership, inclusion, comparison and saturation are thin
//! interpretations of that basis. The cache is keyed by (precision,
//! algorithm) and written exactly once per key; a cancelled computation
//! leaves it untouched.

use crate::algebra::TateAlgebra;
use crate::error::{Result, TateError};
use crate::grobner::buchberger::buchberger;
use crate::grobner::f5::f5;
use crate::grobner::reduce::reduce;
use crate::grobner::{Algorithm, GroebnerOptions};
use crate::series::TateSeries;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BasisKey {
    precision: i64,
    algorithm: Algorithm,
}

type BasisCache = RwLock<FxHashMap<BasisKey, Arc<Vec<TateSeries>>>>;

/// An ideal of a Tate algebra, with a per-instance basis cache.
#[derive(Debug, Clone)]
pub struct TateIdeal {
    parent: TateAlgebra,
    gens: Vec<TateSeries>,
    cache: Arc<BasisCache>,
}

impl TateIdeal {
    pub(crate) fn new(parent: TateAlgebra, gens: Vec<TateSeries>) -> Self {
        for g in &gens {
            assert!(
                g.parent() == &parent,
                "generator from a different Tate algebra"
            );
        }
        Self {
            parent,
            gens,
            cache: Arc::new(RwLock::new(FxHashMap::default())),
        }
    }

    /// The parent algebra.
    pub fn parent(&self) -> &TateAlgebra {
        &self.parent
    }

    /// The generators, as given.
    pub fn generators(&self) -> &[TateSeries] {
        &self.gens
    }

    fn default_algorithm(&self) -> Algorithm {
        if self.parent.base_is_field() {
            Algorithm::Buchberger
        } else {
            Algorithm::BuchbergerIntegral
        }
    }

    /// The canonical Gröbner basis at the parent's default precision with
    /// the base-matched Buchberger variant.
    pub fn groebner_basis(&self) -> Result<Arc<Vec<TateSeries>>> {
        self.groebner_basis_with(&GroebnerOptions::new())
    }

    /// The canonical Gröbner basis with explicit options. Results are
    /// memoised per (precision, algorithm).
    pub fn groebner_basis_with(&self, opts: &GroebnerOptions) -> Result<Arc<Vec<TateSeries>>> {
        let precision = opts.precision.unwrap_or(self.parent.default_precision());
        if precision <= 0 {
            return Err(TateError::InvalidPrecision {
                requested: precision,
            });
        }
        let algorithm = opts.algorithm.unwrap_or_else(|| self.default_algorithm());
        let key = BasisKey {
            precision,
            algorithm,
        };
        if let Some(basis) = self
            .cache
            .read()
            .expect("basis cache poisoned")
            .get(&key)
        {
            return Ok(basis.clone());
        }
        let basis = match algorithm {
            Algorithm::Buchberger => {
                buchberger(&self.parent, &self.gens, precision, false, opts)?
            }
            Algorithm::BuchbergerIntegral => {
                buchberger(&self.parent, &self.gens, precision, true, opts)?
            }
            Algorithm::F5 => f5(&self.parent, &self.gens, precision, opts)?,
        };
        let mut cache = self.cache.write().expect("basis cache poisoned");
        Ok(cache.entry(key).or_insert_with(|| Arc::new(basis)).clone())
    }

    /// Ideal membership: the element reduces to zero against the basis.
    pub fn contains(&self, x: &TateSeries) -> Result<bool> {
        assert!(
            x.parent() == &self.parent,
            "membership test across algebras"
        );
        let basis = self.groebner_basis()?;
        let integral = !self.parent.base_is_field();
        let out = reduce(x, &basis, integral, false, false)?;
        Ok(out.remainder.is_zero())
    }

    /// Whether every generator of `other` lies in this ideal.
    pub fn contains_ideal(&self, other: &TateIdeal) -> Result<bool> {
        for g in &other.gens {
            if !self.contains(g)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Compare by inclusion both ways: `Less` is strict inclusion in
    /// `other`, `None` means the ideals are incomparable.
    pub fn partial_cmp_ideal(&self, other: &TateIdeal) -> Result<Option<Ordering>> {
        let below = other.contains_ideal(self)?;
        let above = self.contains_ideal(other)?;
        Ok(match (below, above) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        })
    }

    /// Equality as ideals (mutual inclusion).
    pub fn equals(&self, other: &TateIdeal) -> Result<bool> {
        Ok(self.partial_cmp_ideal(other)? == Some(Ordering::Equal))
    }

    /// Over a field base every ideal is saturated; over the ring of
    /// integers the ideal is saturated when every basis element has
    /// valuation 0.
    pub fn is_saturated(&self) -> Result<bool> {
        if self.parent.base_is_field() {
            return Ok(true);
        }
        let basis = self.groebner_basis()?;
        Ok(basis.iter().all(|g| g.valuation() == 0))
    }

    /// The saturation `{f : p^n f in I for some n}`: the identity over a
    /// field base, otherwise the ideal generated by the monic rescaling of
    /// each basis element.
    pub fn saturate(&self) -> Result<TateIdeal> {
        if self.parent.base_is_field() {
            return Ok(self.clone());
        }
        let basis = self.groebner_basis()?;
        let gens = basis.iter().map(|g| g.monic()).collect();
        Ok(TateIdeal::new(self.parent.clone(), gens))
    }
}

impl fmt::Display for TateIdeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ideal (")?;
        for (i, g) in self.gens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, ") of {}", self.parent)
    }
}
