//! GF2 Math - Boolean Polynomials and Gröbner Bases
//!
//! This crate implements algebra over the two-element field:
//! - Packed [`BitVector`]s
//! - Squarefree [`Monomial`]s and a family of [`MonomialOrder`]s
//! - [`Polynomial`]s of the Boolean ring `GF(2)[x_0, ..., x_{n-1}] / (x_i^2 - x_i)`
//!   with geobucket-based multiplication and division
//! - Polynomial systems ([`Ideal`]) with self-reduction, a Gröbner basis check
//!   and solution counting through the quotient ring
//! - An incremental [`Buchberger`] engine
//!
//! # Examples
//!
//! ## Arithmetic
//!
//! ```
//! use gf2_math::{MonomialOrder, Polynomial};
//!
//! let order = MonomialOrder::GRevLex;
//! let p = Polynomial::parse("x0 x1 + x2", 3, order.clone()).unwrap();
//! let q = Polynomial::parse("x0 + 1", 3, order).unwrap();
//! // (x0 x1 + x2)(x0 + 1) = x0 x1 + x0 x2 + x0 x1 + x2
//! assert_eq!((&p * &q).to_string(), "x0 x2 + x2");
//! ```
//!
//! ## Counting solutions
//!
//! ```
//! use gf2_math::{Buchberger, Ideal, MonomialOrder};
//! use num_bigint::BigUint;
//!
//! let order = MonomialOrder::GRevLex;
//! let system = Ideal::parse("{x0 x1 + x2, x0 + x1 + 1}", 3, order.clone()).unwrap();
//! let mut bb = Buchberger::new(3, order);
//! bb.update_ideal(&system);
//! bb.process();
//! let gb = bb.done();
//! assert!(gb.is_gb());
//! // (x0, x1, x2) in {(0, 1, 0), (1, 0, 0)}
//! assert_eq!(gb.quotient_basis_dim(), BigUint::from(2u32));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bitvec;
pub mod error;
pub mod grobner;
pub mod ideal;
pub mod monomial;
pub mod order;
pub mod parse;
pub mod polynomial;

pub use bitvec::BitVector;
pub use error::{ParseError, ParseResult};
pub use grobner::{
    Buchberger, BuchbergerConfig, BuchbergerReport, BuchbergerStats, CriticalPair, PairSide,
    PolyFilter, PolyId,
};
pub use ideal::Ideal;
pub use monomial::Monomial;
pub use order::{AlexMatrix, MonomialOrder};
pub use parse::TextReader;
pub use polynomial::{Geobucket, Polynomial};
