//! Valuation-aware Buchberger driver.
//!
//! The working state is a growing list `gb` of every element ever
//! accepted (tombstoned slots stay in place so queued pair indices remain
//! valid) and a live list `rgb` kept minimal and reduced. After each
//! accepted reduction the whole live basis is inter-reduced with a
//! π-shift: cancellations during reduction can push significant terms
//! behind the precision cap, and the shifted self-copy re-exposes them so
//! the reduced forms stay stable. The shift looks redundant; it is
//! load-bearing.

use crate::algebra::TateAlgebra;
use crate::error::{Result, TateError};
use crate::grobner::pairs::{CriticalPair, PairQueue};
use crate::grobner::reduce::{interreduce, reduce};
use crate::grobner::{GroebnerOptions, GroebnerStats, canonicalize, minimise};
use crate::series::TateSeries;

/// Compute the canonical Gröbner basis of the ideal generated by `gens`
/// at absolute precision `prec`, in field (`integral = false`) or
/// integral mode.
pub(crate) fn buchberger(
    parent: &TateAlgebra,
    gens: &[TateSeries],
    prec: i64,
    integral: bool,
    opts: &GroebnerOptions,
) -> Result<Vec<TateSeries>> {
    let mut stats = GroebnerStats::default();

    // Truncate each generator to `prec` significant digits and drop the
    // ones with nothing left.
    let mut live: Vec<TateSeries> = gens
        .iter()
        .filter(|g| !g.is_zero())
        .map(|g| g.add_bigoh(g.valuation() + prec))
        .filter(|g| !g.is_zero())
        .collect();
    minimise(&mut live, integral);
    let initial = live.len();
    if opts.verbosity >= 1 {
        tracing::info!(
            generators = initial,
            precision = prec,
            integral,
            "starting Buchberger"
        );
    }

    let mut queue = PairQueue::new();
    for i in 0..initial {
        for j in (i + 1)..initial {
            let ti = live[i].leading_term().expect("zero generator survived");
            let tj = live[j].leading_term().expect("zero generator survived");
            if ti.is_coprime_with(tj) {
                continue;
            }
            let s = live[i].spoly(&live[j]);
            if !s.is_zero() {
                queue.push(CriticalPair::spair(i, j, s));
                stats.pairs_pushed += 1;
            }
        }
    }

    let mut gb: Vec<Option<TateSeries>> = live.iter().cloned().map(Some).collect();
    let mut rgb = live;
    let mut idx: Vec<usize> = (0..initial).collect();
    let mut pending_reduce = false;

    while !queue.is_empty() {
        if opts.cancel.is_cancelled() {
            return Err(TateError::Cancelled);
        }
        if pending_reduce {
            pending_reduce = false;
            stats.interreduction_passes += 1;
            if opts.verbosity >= 3 {
                tracing::debug!(basis = rgb.len(), "inter-reducing the working basis");
            }
            interreduce(&mut rgb)?;
        }

        let pair = queue.pop_min().expect("non-empty queue");
        stats.pairs_popped += 1;
        if let Some((i, j)) = pair.slots
            && (gb[i].is_none() || gb[j].is_none())
        {
            stats.pairs_stale += 1;
            continue;
        }
        if opts.verbosity >= 2 {
            tracing::debug!(
                valuation = pair.valuation,
                rescued = pair.slots.is_none(),
                "processing pair"
            );
        }

        let r = reduce(&pair.poly, &rgb, integral, false, false)?.remainder;
        if r.is_zero() {
            stats.zero_reductions += 1;
            continue;
        }

        // New pairs against the live basis. Some of these will go stale
        // immediately when the shrink below tombstones their partner.
        let j_new = gb.len();
        let tr = r.leading_term().expect("non-zero remainder").clone();
        for (pos, g) in rgb.iter().enumerate() {
            let tg = g.leading_term().expect("zero element in live basis");
            if tr.is_coprime_with(tg) {
                continue;
            }
            let s = r.spoly(g);
            if !s.is_zero() {
                queue.push(CriticalPair::spair(idx[pos], j_new, s));
                stats.pairs_pushed += 1;
            }
        }
        gb.push(Some(r.clone()));

        // Shrink: elements whose lead the newcomer divides leave the live
        // basis. Non-initial ones are re-queued so nothing is lost.
        let mut pos = 0;
        while pos < rgb.len() {
            let ti = rgb[pos].leading_term().expect("zero element in live basis");
            if tr.divides(ti, integral) {
                if idx[pos] >= initial {
                    queue.push(CriticalPair::rescued(rgb[pos].clone()));
                    stats.rescued += 1;
                }
                gb[idx[pos]] = None;
                rgb.remove(pos);
                idx.remove(pos);
            } else {
                pos += 1;
            }
        }
        rgb.push(r);
        idx.push(j_new);
        stats.elements_added += 1;
        pending_reduce = true;
        if opts.verbosity >= 4 {
            tracing::trace!(queued = queue.len(), live = rgb.len(), "state after insertion");
        }
    }

    if pending_reduce {
        stats.interreduction_passes += 1;
        interreduce(&mut rgb)?;
    }
    let basis = canonicalize(rgb, integral)?;
    if opts.verbosity >= 1 {
        tracing::info!(
            basis = basis.len(),
            pairs_popped = stats.pairs_popped,
            pairs_stale = stats.pairs_stale,
            zero_reductions = stats.zero_reductions,
            rescued = stats.rescued,
            interreduction_passes = stats.interreduction_passes,
            "Buchberger finished"
        );
    }
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grobner::Algorithm;

    fn algebra() -> TateAlgebra {
        TateAlgebra::new(3, &["x", "y"], 10).unwrap()
    }

    fn run(parent: &TateAlgebra, gens: &[TateSeries], integral: bool) -> Vec<TateSeries> {
        buchberger(
            parent,
            gens,
            parent.default_precision(),
            integral,
            &GroebnerOptions::new(),
        )
        .unwrap()
    }

    #[test]
    fn coprime_generators_pass_through() {
        let a = algebra();
        let basis = run(&a, &[a.series(&[(2, &[1, 0])]), a.series(&[(5, &[0, 1])])], false);
        assert_eq!(basis.len(), 2);
        // Monic, sorted decreasing: x before y.
        assert_eq!(basis[0].leading_term().unwrap().exponent().as_slice(), &[1, 0]);
        assert_eq!(basis[1].leading_term().unwrap().exponent().as_slice(), &[0, 1]);
        for g in &basis {
            assert!(g.leading_coefficient().unwrap().is_pi_power());
            assert_eq!(g.valuation(), 0);
        }
    }

    #[test]
    fn unit_generator_collapses_the_basis() {
        let a = algebra();
        let basis = run(&a, &[a.one(), a.series(&[(5, &[2, 1])])], false);
        assert_eq!(basis.len(), 1);
        assert_eq!(basis[0].leading_term().unwrap().degree(), 0);
    }

    #[test]
    fn zero_generators_are_dropped() {
        let a = algebra();
        let f = a.series(&[(7, &[1, 1])]);
        let with_zero = run(&a, &[a.zero(), f.clone()], false);
        let without = run(&a, &[f], false);
        assert_eq!(with_zero.len(), without.len());
        assert!(with_zero[0] == without[0]);
    }

    #[test]
    fn empty_input_gives_empty_basis() {
        let a = algebra();
        assert!(run(&a, &[], false).is_empty());
    }

    #[test]
    fn cancellation_aborts_before_work() {
        let a = algebra();
        let f = a.series(&[(3, &[2, 0]), (5, &[1, 2])]);
        let g = a.series(&[(5, &[2, 1]), (3, &[])]);
        let token = crate::resource::CancelToken::new();
        token.cancel();
        let opts = GroebnerOptions::new()
            .with_algorithm(Algorithm::Buchberger)
            .with_cancel(token);
        let err = buchberger(&a, &[f, g], 10, false, &opts).unwrap_err();
        assert_eq!(err, TateError::Cancelled);
    }
}
