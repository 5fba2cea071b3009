//! GF2 Func - Boolean Functions and S-boxes
//!
//! Truth-table representations of functions over GF(2) and their
//! translation into the polynomial world of [`gf2_math`]:
//! - [`BooleanFunction`]: algebraic normal form, Walsh-Hadamard spectrum,
//!   nonlinearity and bentness
//! - [`VectorFunction`]: coordinate functions, differential and linear
//!   characteristics, and the graph ideal used for algebraic attacks
//! - [`Substitution`]: bijective vector functions (S-boxes)
//!
//! # Examples
//!
//! ```
//! use gf2_func::Substitution;
//! use gf2_math::{Buchberger, MonomialOrder};
//! use num_bigint::BigUint;
//!
//! let sbox = Substitution::from_table(3, &[1, 2, 3, 4, 6, 7, 5, 0]).unwrap();
//! let order = MonomialOrder::GRevLex;
//! let ideal = sbox.function().to_ideal(order.clone());
//!
//! let mut bb = Buchberger::new(6, order);
//! bb.update_ideal(&ideal);
//! bb.process();
//! let gb = bb.done();
//! // one solution per input
//! assert_eq!(gb.quotient_basis_dim(), BigUint::from(8u32));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod boolean;
pub mod error;
pub mod vector;

pub use boolean::BooleanFunction;
pub use error::{FuncError, FuncResult};
pub use vector::{Substitution, VectorFunction};
