//! Multi-divisor reduction.
//!
//! Repeatedly rewrites the largest term of a running remainder by the
//! first divisor whose leading term divides it under the active mode.
//! Without tail reduction the loop stops at the first irreducible head;
//! with it, irreducible heads are parked and the tail keeps reducing.
//! Every step caps the remainder at the precision its operands justify.

use crate::error::{Result, TateError};
use crate::series::TateSeries;
use crate::term::TateTerm;

/// Outcome of a reduction: the per-divisor quotients and the remainder.
#[derive(Debug, Clone)]
pub struct Reduction {
    /// One quotient per divisor, in the family's order.
    pub quotients: Vec<TateSeries>,
    /// The reduced remainder.
    pub remainder: TateSeries,
}

/// Reduce `f` against the family `divisors`.
///
/// The remainder is zero or has a leading term not divisible (under the
/// mode) by any divisor's leading term; with `reduce_tail` no term at all
/// is divisible. With `require_nonzero` a zero remainder is reported as
/// [`TateError::PrecisionExhausted`] instead. Divisors must be non-zero;
/// callers filter.
pub fn reduce(
    f: &TateSeries,
    divisors: &[TateSeries],
    integral: bool,
    reduce_tail: bool,
    require_nonzero: bool,
) -> Result<Reduction> {
    let parent = f.parent().clone();
    let prime = parent.prime().clone();
    let mut rem = f.clone();
    let mut parked: Vec<TateTerm> = Vec::new();
    let mut quotient_terms: Vec<Vec<TateTerm>> = vec![Vec::new(); divisors.len()];

    while let Some(head) = rem.leading_term().cloned() {
        let hit = divisors.iter().position(|d| {
            debug_assert!(!d.is_zero(), "zero divisor in a reduction family");
            d.leading_term()
                .is_some_and(|t| t.divides(&head, integral))
        });
        match hit {
            Some(i) => {
                let d = &divisors[i];
                let dl = d.leading_term().expect("non-zero divisor");
                let shift = head.valuation() - dl.valuation();
                let cap = rem
                    .precision_absolute()
                    .min(d.precision_absolute() + shift);
                let q = head.quotient(dl, &prime, cap - head.valuation());
                rem = rem.subtract_term_multiple(&q, d);
                quotient_terms[i].push(q);
            }
            None => {
                if !reduce_tail {
                    break;
                }
                let (head, tail) = rem.split_leading();
                parked.push(head);
                rem = tail;
            }
        }
    }

    let remainder = rem.with_parked_terms(parked);
    if require_nonzero && remainder.is_zero() {
        return Err(TateError::PrecisionExhausted);
    }
    let quotients = divisors
        .iter()
        .zip(quotient_terms)
        .map(|(d, ts)| {
            let cap = remainder.precision_absolute() - d.valuation();
            TateSeries::from_terms(parent.clone(), ts, cap)
        })
        .collect();
    Ok(Reduction {
        quotients,
        remainder,
    })
}

/// One inter-reduction pass over a working basis.
///
/// Each slot is temporarily replaced by the π-shifted copy of its element
/// while the element itself is tail-reduced against the whole family: the
/// shifted copy can then rewrite deep tail terms that are multiples of the
/// element's own leading monomial at higher valuation, without cancelling
/// the head. The pass always uses integral divisibility (a monomial-only
/// test would let the shifted copy swallow its own head). An element
/// vanishing here means its significant digits are spent.
pub fn interreduce(basis: &mut Vec<TateSeries>) -> Result<()> {
    for i in 0..basis.len() {
        let g = basis[i].clone();
        basis[i] = g.positive_pi_shift(1);
        let out = reduce(&g, basis, true, true, true)?;
        basis[i] = out.remainder;
    }
    Ok(())
}
