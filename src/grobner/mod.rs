//! Gröbner basis computation for ideals in Tate algebras.
//!
//! Two drivers produce the canonical basis: a valuation-aware Buchberger
//! loop (field and integral variants) and a signature-based driver in the
//! F5 family. Both share the pending-pair queue and the multi-divisor
//! reducer, and both finish with the same canonicalisation: minimise,
//! inter-reduce, normalise, sort.
//!
//! ## References
//!
//! - Caruso, Roe, Vaccon: "Gröbner bases over Tate algebras" (ISSAC 2019)
//! - Caruso, Roe, Vaccon: "Signature-based algorithms for Gröbner bases
//!   over Tate algebras" (ISSAC 2020)

pub mod buchberger;
pub mod f5;
pub mod pairs;
pub mod reduce;

pub use pairs::{CriticalPair, PairQueue};
pub use reduce::{Reduction, interreduce, reduce};

use crate::error::{Result, TateError};
use crate::resource::CancelToken;
use crate::series::TateSeries;

/// Basis algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Valuation-aware Buchberger over the fraction field.
    Buchberger,
    /// Buchberger with integral divisibility (Gröbner basis over the ring
    /// of integers of the algebra).
    BuchbergerIntegral,
    /// Signature-based driver.
    F5,
}

impl Algorithm {
    /// Resolve an algorithm name. Unknown names (for example `"F4"`) fail
    /// with [`TateError::NotImplementedAlgorithm`].
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "buchberger" => Ok(Self::Buchberger),
            "buchberger-integral" => Ok(Self::BuchbergerIntegral),
            "F5" => Ok(Self::F5),
            _ => Err(TateError::NotImplementedAlgorithm {
                name: name.to_string(),
            }),
        }
    }

    /// The canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Buchberger => "buchberger",
            Self::BuchbergerIntegral => "buchberger-integral",
            Self::F5 => "F5",
        }
    }

    /// Whether divisibility tests account for the uniformizer.
    pub fn integral(&self) -> bool {
        matches!(self, Self::BuchbergerIntegral)
    }
}

/// Knobs for a basis computation.
#[derive(Debug, Clone, Default)]
pub struct GroebnerOptions {
    /// Absolute working precision; the parent's default when `None`.
    pub precision: Option<i64>,
    /// Algorithm; when `None`, Buchberger in the variant matching the
    /// parent's base ring.
    pub algorithm: Option<Algorithm>,
    /// Progress chatter, 0 (silent) to 4.
    pub verbosity: u32,
    /// Cooperative cancellation flag, checked at each pair pop and each
    /// inter-reduction pass.
    pub cancel: CancelToken,
}

impl GroebnerOptions {
    /// Defaults: parent precision, base-matched Buchberger, silent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working precision.
    pub fn with_precision(mut self, precision: i64) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Set the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the verbosity knob.
    pub fn with_verbosity(mut self, verbosity: u32) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Counters reported by the drivers at verbosity 1 and above.
#[derive(Debug, Clone, Default)]
pub struct GroebnerStats {
    /// Pairs pushed onto the queue.
    pub pairs_pushed: u64,
    /// Pairs popped from the queue.
    pub pairs_popped: u64,
    /// Pairs dropped because a referenced slot was tombstoned.
    pub pairs_stale: u64,
    /// S-polynomials (or J-pairs) that reduced to zero.
    pub zero_reductions: u64,
    /// Elements appended to the working basis.
    pub elements_added: u64,
    /// Elements re-queued while shrinking the working basis.
    pub rescued: u64,
    /// Inter-reduction passes performed.
    pub interreduction_passes: u64,
    /// J-pairs dropped by the syzygy criterion.
    pub syzygy_drops: u64,
    /// J-pairs dropped by the cover criterion.
    pub cover_drops: u64,
}

/// Drop every element whose leading term is divisible, under the mode, by
/// another element's leading term.
pub(crate) fn minimise(basis: &mut Vec<TateSeries>, integral: bool) {
    let mut i = 0;
    'scan: while i < basis.len() {
        let ti = basis[i]
            .leading_term()
            .expect("zero element in a working basis")
            .clone();
        for j in 0..basis.len() {
            if i == j {
                continue;
            }
            let tj = basis[j].leading_term().expect("zero element");
            if tj.divides(&ti, integral) {
                basis.remove(i);
                continue 'scan;
            }
        }
        i += 1;
    }
}

/// Final canonicalisation shared by the drivers.
///
/// Over a field base the integral variant first re-minimises with
/// monomial-only divisibility and runs one more tail-reduction pass; then
/// every element is made monic (valuation 0, leading coefficient 1). Over
/// the ring of integers only the unit part of each leading coefficient is
/// inverted, leaving an exact power of the uniformizer. The basis is
/// returned sorted strictly decreasing by leading term.
pub(crate) fn canonicalize(
    mut basis: Vec<TateSeries>,
    integral: bool,
) -> Result<Vec<TateSeries>> {
    let field_base = basis
        .first()
        .map(|g| g.parent().base_is_field())
        .unwrap_or(true);
    if field_base && integral {
        minimise(&mut basis, false);
        interreduce(&mut basis)?;
    }
    for g in &mut basis {
        *g = if field_base {
            g.monic()
        } else {
            g.unit_normalized()
        };
    }
    basis.sort_by(|a, b| {
        let ta = a.leading_term().expect("zero element in a basis");
        let tb = b.leading_term().expect("zero element in a basis");
        tb.order_cmp(ta)
    });
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip() {
        for a in [
            Algorithm::Buchberger,
            Algorithm::BuchbergerIntegral,
            Algorithm::F5,
        ] {
            assert_eq!(Algorithm::from_name(a.name()).unwrap(), a);
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = Algorithm::from_name("F4").unwrap_err();
        assert_eq!(
            err,
            TateError::NotImplementedAlgorithm {
                name: "F4".to_string()
            }
        );
    }

    #[test]
    fn minimise_keeps_one_of_equal_leads() {
        let a = crate::algebra::TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let mut basis = vec![
            a.series(&[(1, &[1, 0])]),
            a.series(&[(2, &[1, 0])]),
            a.series(&[(1, &[0, 1])]),
        ];
        minimise(&mut basis, false);
        // The two x leads divide each other, so exactly one survives.
        assert_eq!(basis.len(), 2);
    }
}
