//! Algebraic laws of the basis engine and the ideal surface.

use oxitate::{GroebnerOptions, TateAlgebra, TateError, TateSeries};
use proptest::prelude::*;

fn q3() -> TateAlgebra {
    TateAlgebra::new(3, &["x", "y"], 10).unwrap()
}

fn q3_pair(a: &TateAlgebra) -> (TateSeries, TateSeries) {
    (
        a.series(&[(3, &[2, 0]), (5, &[1, 2])]),
        a.series(&[(5, &[2, 1]), (3, &[])]),
    )
}

fn build_series(a: &TateAlgebra, terms: &[(i64, u32, u32)]) -> TateSeries {
    let mut out = a.zero();
    for &(c, e0, e1) in terms {
        out = out.add(&a.series(&[(c, &[e0, e1])]));
    }
    out
}

#[test]
fn basis_elements_are_minimal_and_monic() {
    let a = q3();
    let (f, g) = q3_pair(&a);
    let basis = a.ideal(vec![f, g]).groebner_basis().unwrap();
    for (i, gi) in basis.iter().enumerate() {
        assert!(gi.leading_coefficient().unwrap().is_pi_power());
        assert_eq!(gi.valuation(), 0);
        for (j, gj) in basis.iter().enumerate() {
            if i != j {
                let ti = gi.leading_term().unwrap();
                let tj = gj.leading_term().unwrap();
                assert!(!tj.divides(ti, false), "lead {j} divides lead {i}");
            }
        }
    }
}

#[test]
fn all_basis_spolynomials_reduce_to_zero() {
    let a = q3();
    let (f, g) = q3_pair(&a);
    let ideal = a.ideal(vec![f, g]);
    let basis = ideal.groebner_basis().unwrap();
    for i in 0..basis.len() {
        for j in (i + 1)..basis.len() {
            let s = basis[i].spoly(&basis[j]);
            if s.is_zero() {
                continue;
            }
            let out = oxitate::grobner::reduce(&s, &basis, false, false, false).unwrap();
            assert!(
                out.remainder.is_zero(),
                "S-polynomial of {i}, {j} does not reduce to zero"
            );
        }
    }
}

#[test]
fn basis_is_deterministic() {
    let a = q3();
    let (f, g) = q3_pair(&a);
    let first = a.ideal(vec![f.clone(), g.clone()]).groebner_basis().unwrap();
    let second = a.ideal(vec![f, g]).groebner_basis().unwrap();
    assert_eq!(first.len(), second.len());
    for (x, y) in first.iter().zip(second.iter()) {
        assert!(x == y);
    }
}

#[test]
fn saturation_is_idempotent_over_z3() {
    let zz = q3().integer_ring();
    let (f, g) = q3_pair(&zz);
    let ideal = zz.ideal(vec![f, g]);
    let once = ideal.saturate().unwrap();
    let twice = once.saturate().unwrap();
    assert!(once.equals(&twice).unwrap());
    assert!(once.is_saturated().unwrap());
}

#[test]
fn field_saturation_is_identity() {
    let a = q3();
    let (f, g) = q3_pair(&a);
    let ideal = a.ideal(vec![f, g]);
    assert!(ideal.saturate().unwrap().equals(&ideal).unwrap());
}

#[test]
fn strict_inclusion_is_antisymmetric() {
    use std::cmp::Ordering;
    let a = q3();
    let (f, g) = q3_pair(&a);
    let small = a.ideal(vec![f.clone()]);
    let big = a.ideal(vec![f, g]);
    let down = small.partial_cmp_ideal(&big).unwrap();
    let up = big.partial_cmp_ideal(&small).unwrap();
    assert_eq!(down, Some(Ordering::Less));
    assert_eq!(up, Some(Ordering::Greater));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Products of a generator with arbitrary series stay in the ideal.
    #[test]
    fn membership_is_closed_under_multiplication(
        terms in proptest::collection::vec((-30i64..30, 0u32..3, 0u32..3), 1..4)
    ) {
        let a = q3();
        let (f, g) = q3_pair(&a);
        let ideal = a.ideal(vec![f.clone(), g]);
        let h = build_series(&a, &terms);
        prop_assert!(ideal.contains(&f.mul(&h)).unwrap());
    }

    /// Sums of two members are members.
    #[test]
    fn membership_is_closed_under_addition(
        terms1 in proptest::collection::vec((-30i64..30, 0u32..3, 0u32..3), 1..4),
        terms2 in proptest::collection::vec((-30i64..30, 0u32..3, 0u32..3), 1..4),
    ) {
        let a = q3();
        let (f, g) = q3_pair(&a);
        let ideal = a.ideal(vec![f.clone(), g.clone()]);
        let u = f.mul(&build_series(&a, &terms1));
        let v = g.mul(&build_series(&a, &terms2));
        prop_assert!(ideal.contains(&u.add(&v)).unwrap());
    }

    /// Every generator of a random small ideal is a member, and the basis
    /// leads are pairwise non-dividing.
    #[test]
    fn random_ideals_satisfy_the_basic_invariants(
        terms1 in proptest::collection::vec((-20i64..20, 0u32..3, 0u32..3), 1..3),
        terms2 in proptest::collection::vec((-20i64..20, 0u32..3, 0u32..3), 1..3),
    ) {
        let a = q3();
        let f = build_series(&a, &terms1);
        let g = build_series(&a, &terms2);
        let ideal = a.ideal(vec![f.clone(), g.clone()]);
        match ideal.groebner_basis_with(&GroebnerOptions::new().with_precision(6)) {
            Ok(basis) => {
                for (i, gi) in basis.iter().enumerate() {
                    for (j, gj) in basis.iter().enumerate() {
                        if i != j {
                            prop_assert!(
                                !gj.leading_term().unwrap().divides(gi.leading_term().unwrap(), false)
                            );
                        }
                    }
                }
            }
            // Random inputs may legitimately run out of digits.
            Err(TateError::PrecisionExhausted) => {}
            Err(e) => return Err(TestCaseError::fail(format!("{e}"))),
        }
    }
}
