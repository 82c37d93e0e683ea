//! Gröbner bases for ideals in Tate algebras over p-adic fields.
//!
//! A Tate algebra over Q_p is the ring of power series in finitely many
//! variables whose coefficients tend to zero as the total degree grows.
//! Elements carry a Gauss valuation and a finite absolute precision, and
//! the term order weighs the coefficient valuation before the monomial.
//! This crate computes canonical Gröbner bases for ideals of such
//! algebras, over the fraction field or over its ring of integers, and
//! builds membership, inclusion, comparison and saturation on top.
//!
//! Two drivers are provided: a valuation-aware Buchberger loop (the
//! reference) and a signature-based driver in the F5 family. Both are
//! precision-safe: no result ever claims more p-adic digits than its
//! inputs justify.
//!
//! # Example
//!
//! ```
//! use oxitate::TateAlgebra;
//!
//! // Q_3<x, y> at precision O(3^10).
//! let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
//! let x = algebra.series(&[(1, &[1, 0])]);
//! let y = algebra.series(&[(1, &[0, 1])]);
//!
//! let ideal = algebra.ideal(vec![x.clone(), y.clone()]);
//! let basis = ideal.groebner_basis().unwrap();
//! assert_eq!(basis.len(), 2);
//! assert!(ideal.contains(&x.add(&y)).unwrap());
//! ```
//!
//! Over the ring of integers Z_3 the integral variant of the divisibility
//! test is used and saturation by the uniformizer becomes meaningful:
//!
//! ```
//! use oxitate::TateAlgebra;
//!
//! let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap().integer_ring();
//! let ideal = algebra.ideal(vec![algebra.series(&[(3, &[1, 0])])]);
//! assert!(!ideal.is_saturated().unwrap());
//! assert!(ideal.saturate().unwrap().is_saturated().unwrap());
//! ```
//!
//! ## References
//!
//! - Caruso, Roe, Vaccon: "Gröbner bases over Tate algebras" (ISSAC 2019)
//! - Caruso, Roe, Vaccon: "Signature-based algorithms for Gröbner bases
//!   over Tate algebras" (ISSAC 2020)

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod algebra;
pub mod coeff;
pub mod error;
pub mod grobner;
pub mod ideal;
pub mod resource;
pub mod series;
pub mod term;

pub use algebra::TateAlgebra;
pub use coeff::Coefficient;
pub use error::{Result, TateError};
pub use grobner::{Algorithm, GroebnerOptions, GroebnerStats};
pub use ideal::TateIdeal;
pub use resource::CancelToken;
pub use series::TateSeries;
pub use term::TateTerm;
