//! Signature-based basis driver.
//!
//! Generators are processed one at a time. The incoming generator carries
//! the unit signature; the previously accepted basis is carried along with
//! null signatures and seeds the syzygy set with its leading terms (Koszul
//! syzygies). J-pairs are served in increasing signature order and run
//! through the syzygy and cover filters before a regular reduction, which
//! only uses reducers whose induced signature stays strictly below the
//! pair's. Zero reductions enlarge the syzygy set instead of the basis.

use crate::algebra::TateAlgebra;
use crate::error::{Result, TateError};
use crate::grobner::reduce::interreduce;
use crate::grobner::{GroebnerOptions, GroebnerStats, canonicalize, minimise};
use crate::series::TateSeries;
use crate::term::TateTerm;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A basis element with its signature; `None` tags elements inherited
/// from earlier rounds.
#[derive(Debug, Clone)]
struct SignedSeries {
    sig: Option<TateTerm>,
    elem: TateSeries,
}

/// A pending J-pair, ordered by signature.
#[derive(Debug, Clone)]
struct JPair {
    sig: TateTerm,
    elem: TateSeries,
}

impl PartialEq for JPair {
    fn eq(&self, other: &Self) -> bool {
        self.sig.order_cmp(&other.sig) == Ordering::Equal
    }
}

impl Eq for JPair {}

impl PartialOrd for JPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sig.order_cmp(&other.sig)
    }
}

/// The J-pair of two signed elements: of the two halves of their
/// S-polynomial, the one carrying the larger induced signature. A null
/// signature loses to any other; equal signatures make the pair redundant
/// and it is omitted.
fn jpair(a: &SignedSeries, b: &SignedSeries, parent: &TateAlgebra) -> Option<JPair> {
    if a.elem.is_zero() || b.elem.is_zero() {
        return None;
    }
    let prime = parent.prime();
    let ta = a.elem.leading_term().expect("non-zero element");
    let tb = b.elem.leading_term().expect("non-zero element");
    let lcm = ta.lcm(tb);
    let sig_a = a.sig.as_ref().map(|s| lcm.shape_quotient(ta).shape_mul(s));
    let sig_b = b.sig.as_ref().map(|s| lcm.shape_quotient(tb).shape_mul(s));
    let take = |side: &SignedSeries, lead: &TateTerm, sig: TateTerm| {
        let digits = side.elem.precision_absolute() - side.elem.valuation();
        let q = lcm.quotient(lead, prime, digits);
        Some(JPair {
            sig,
            elem: side.elem.term_mul(&q),
        })
    };
    match (sig_a, sig_b) {
        (None, None) => None,
        (Some(sa), None) => take(a, ta, sa),
        (None, Some(sb)) => take(b, tb, sb),
        (Some(sa), Some(sb)) => match sa.order_cmp(&sb) {
            Ordering::Equal => None,
            Ordering::Greater => take(a, ta, sa),
            Ordering::Less => take(b, tb, sb),
        },
    }
}

/// Cover criterion: some accepted element with signature `S` dividing `s`
/// already handles this signature region with a strictly smaller lead.
fn is_covered(sig: &TateTerm, elem: &TateSeries, sgb: &[SignedSeries]) -> bool {
    let lead = elem.leading_term().expect("non-zero J-pair element");
    sgb.iter().any(|entry| {
        let Some(s) = &entry.sig else {
            return false;
        };
        if entry.elem.is_zero() || !s.divides(sig, false) {
            return false;
        }
        let vlead = entry.elem.leading_term().expect("non-zero element");
        sig.shape_quotient(s).shape_mul(vlead).order_cmp(lead) == Ordering::Less
    })
}

/// Reduce `elem` against the signed basis using only reducers whose
/// induced signature stays strictly below `sig`; irreducible heads are
/// parked so the tail reduces under the same rule.
fn regular_reduce(elem: TateSeries, sig: &TateTerm, sgb: &[SignedSeries]) -> TateSeries {
    let prime = elem.parent().prime().clone();
    let mut rem = elem;
    let mut parked: Vec<TateTerm> = Vec::new();
    while let Some(head) = rem.leading_term().cloned() {
        let hit = sgb.iter().find(|entry| {
            if entry.elem.is_zero() {
                return false;
            }
            let vlead = entry.elem.leading_term().expect("non-zero element");
            if !vlead.divides(&head, false) {
                return false;
            }
            match &entry.sig {
                None => true,
                Some(s) => {
                    head.shape_quotient(vlead).shape_mul(s).order_cmp(sig) == Ordering::Less
                }
            }
        });
        match hit {
            Some(entry) => {
                let d = &entry.elem;
                let dl = d.leading_term().expect("non-zero element");
                let shift = head.valuation() - dl.valuation();
                let cap = rem
                    .precision_absolute()
                    .min(d.precision_absolute() + shift);
                let q = head.quotient(dl, &prime, cap - head.valuation());
                rem = rem.subtract_term_multiple(&q, d);
            }
            None => {
                let (head, tail) = rem.split_leading();
                parked.push(head);
                rem = tail;
            }
        }
    }
    rem.with_parked_terms(parked)
}

/// Compute a Gröbner basis with the signature driver. The output is
/// canonicalised exactly like the Buchberger output in field mode.
pub(crate) fn f5(
    parent: &TateAlgebra,
    gens: &[TateSeries],
    prec: i64,
    opts: &GroebnerOptions,
) -> Result<Vec<TateSeries>> {
    let mut stats = GroebnerStats::default();
    let mut basis: Vec<TateSeries> = Vec::new();
    if opts.verbosity >= 1 {
        tracing::info!(generators = gens.len(), precision = prec, "starting F5");
    }

    for generator in gens {
        if generator.is_zero() {
            continue;
        }
        let f = generator.add_bigoh(generator.valuation() + prec);
        if f.is_zero() {
            continue;
        }
        let mut sgb: Vec<SignedSeries> = basis
            .iter()
            .map(|g| SignedSeries {
                sig: None,
                elem: g.clone(),
            })
            .collect();
        let mut syzygies: Vec<TateTerm> = basis
            .iter()
            .map(|g| g.leading_term().expect("zero element in basis").clone())
            .collect();
        let seed = SignedSeries {
            sig: Some(parent.term_one()),
            elem: f,
        };
        let mut heap: BinaryHeap<Reverse<JPair>> = BinaryHeap::new();
        for q in &sgb {
            if let Some(jp) = jpair(&seed, q, parent) {
                heap.push(Reverse(jp));
                stats.pairs_pushed += 1;
            }
        }
        sgb.push(seed);

        while let Some(Reverse(jp)) = heap.pop() {
            if opts.cancel.is_cancelled() {
                return Err(TateError::Cancelled);
            }
            stats.pairs_popped += 1;
            let JPair { sig, elem } = jp;
            if syzygies.iter().any(|t| t.divides(&sig, false)) {
                stats.syzygy_drops += 1;
                continue;
            }
            if elem.is_zero() {
                stats.zero_reductions += 1;
                continue;
            }
            if is_covered(&sig, &elem, &sgb) {
                stats.cover_drops += 1;
                continue;
            }
            if opts.verbosity >= 2 {
                tracing::debug!(valuation = sig.valuation(), "processing J-pair");
            }
            let reduced = regular_reduce(elem, &sig, &sgb);
            if reduced.is_zero() {
                stats.zero_reductions += 1;
                syzygies.push(sig);
                continue;
            }
            let newcomer = SignedSeries {
                sig: Some(sig),
                elem: reduced,
            };
            for q in &sgb {
                if let Some(next) = jpair(&newcomer, q, parent) {
                    heap.push(Reverse(next));
                    stats.pairs_pushed += 1;
                }
            }
            sgb.push(newcomer);
            stats.elements_added += 1;
        }

        // Forget signatures and canonicalise before the next generator.
        let mut round: Vec<TateSeries> = sgb
            .into_iter()
            .map(|p| p.elem)
            .filter(|g| !g.is_zero())
            .collect();
        minimise(&mut round, false);
        interreduce(&mut round)?;
        basis = canonicalize(round, false)?;
    }

    if opts.verbosity >= 1 {
        tracing::info!(
            basis = basis.len(),
            pairs_popped = stats.pairs_popped,
            syzygy_drops = stats.syzygy_drops,
            cover_drops = stats.cover_drops,
            zero_reductions = stats.zero_reductions,
            "F5 finished"
        );
    }
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeff::Coefficient;
    use smallvec::SmallVec;

    fn algebra() -> TateAlgebra {
        TateAlgebra::new(3, &["x", "y"], 10).unwrap()
    }

    fn shape(val: i64, exps: &[u32]) -> TateTerm {
        TateTerm::new(Coefficient::pi_power(val), SmallVec::from_slice(exps))
    }

    #[test]
    fn jpair_takes_the_larger_signature_side() {
        let a = algebra();
        let g1 = SignedSeries {
            sig: Some(shape(0, &[0, 0])),
            elem: a.series(&[(1, &[2, 0])]),
        };
        let g2 = SignedSeries {
            sig: None,
            elem: a.series(&[(1, &[1, 1])]),
        };
        // lcm = x^2 y; the null signature loses, so the pair multiplies g1
        // by y and carries signature y.
        let jp = jpair(&g1, &g2, &a).unwrap();
        assert_eq!(jp.sig.exponent().as_slice(), &[0, 1]);
        assert_eq!(
            jp.elem.leading_term().unwrap().exponent().as_slice(),
            &[2, 1]
        );
    }

    #[test]
    fn equal_signatures_are_omitted() {
        let a = algebra();
        let g1 = SignedSeries {
            sig: Some(shape(0, &[2, 0])),
            elem: a.series(&[(1, &[2, 0])]),
        };
        let g2 = SignedSeries {
            sig: Some(shape(0, &[0, 1])),
            elem: a.series(&[(1, &[0, 1])]),
        };
        // lcm = x^2 y, quotients y and x^2, both induced signatures x^2 y.
        assert!(jpair(&g1, &g2, &a).is_none());
    }

    #[test]
    fn single_generator_round_trip() {
        let a = algebra();
        let f = a.series(&[(3, &[2, 0]), (5, &[1, 2])]);
        let basis = f5(&a, &[f], 10, &GroebnerOptions::new()).unwrap();
        assert_eq!(basis.len(), 1);
        assert!(basis[0].leading_coefficient().unwrap().is_pi_power());
        assert_eq!(basis[0].valuation(), 0);
    }

    #[test]
    fn agrees_with_buchberger_on_leading_monomials() {
        let a = algebra();
        let f = a.series(&[(3, &[2, 0]), (5, &[1, 2])]);
        let g = a.series(&[(5, &[2, 1]), (3, &[])]);
        let from_f5 = f5(&a, &[f.clone(), g.clone()], 10, &GroebnerOptions::new()).unwrap();
        let from_buchberger = crate::grobner::buchberger::buchberger(
            &a,
            &[f, g],
            10,
            false,
            &GroebnerOptions::new(),
        )
        .unwrap();
        let monomials = |basis: &[TateSeries]| {
            basis
                .iter()
                .map(|b| b.leading_term().unwrap().exponent().to_vec())
                .collect::<Vec<_>>()
        };
        assert_eq!(monomials(&from_f5), monomials(&from_buchberger));
    }
}
