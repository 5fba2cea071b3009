//! Boolean functions given by truth tables.
//!
//! Entry `x` of the table is the value at the point whose coordinate `i` is
//! bit `i` of `x`, so the algebraic normal form uses `x_i` for that bit.

use gf2_math::{BitVector, Monomial, MonomialOrder, Polynomial};
use rand::Rng;
use tracing::trace;

use crate::error::{FuncError, FuncResult};

/// Largest supported number of variables.
pub const MAX_VARS: usize = 30;

/// Boolean function of `nvars` variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BooleanFunction {
    nvars: usize,
    table: BitVector,
}

// In-place Möbius transform: truth table <-> ANF coefficients.
fn moebius(table: &mut BitVector, nvars: usize) {
    for i in 0..nvars {
        let step = 1usize << i;
        for x in 0..table.len() {
            if x & step != 0 && table.test(x ^ step) {
                table.flip(x);
            }
        }
    }
}

impl BooleanFunction {
    /// The zero function.
    ///
    /// # Panics
    /// Panics if `nvars > MAX_VARS`.
    pub fn new(nvars: usize) -> Self {
        assert!(nvars <= MAX_VARS, "too many variables: {nvars}");
        Self {
            nvars,
            table: BitVector::zeros(1 << nvars),
        }
    }

    /// Function with the given truth table of length `2^nvars`.
    pub fn from_table(nvars: usize, table: BitVector) -> FuncResult<Self> {
        assert!(nvars <= MAX_VARS, "too many variables: {nvars}");
        if table.len() != 1 << nvars {
            return Err(FuncError::TableSize {
                expected: 1 << nvars,
                found: table.len(),
            });
        }
        Ok(Self { nvars, table })
    }

    /// Function whose value at `x` is `f(x)`.
    pub fn from_fn(nvars: usize, mut f: impl FnMut(u64) -> bool) -> Self {
        let mut bf = Self::new(nvars);
        for x in 0..bf.size() {
            bf.table.set(x, f(x as u64));
        }
        bf
    }

    /// Function evaluating `poly`.
    pub fn from_polynomial(poly: &Polynomial) -> Self {
        let nvars = poly.nvars();
        Self::from_fn(nvars, |x| poly.eval(&BitVector::from_index(nvars, x)))
    }

    /// Uniformly random function.
    pub fn random<R: Rng + ?Sized>(nvars: usize, rng: &mut R) -> Self {
        assert!(nvars <= MAX_VARS, "too many variables: {nvars}");
        Self {
            nvars,
            table: BitVector::random(1 << nvars, rng),
        }
    }

    /// Number of variables.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Number of table entries, `2^nvars`.
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// The truth table.
    #[inline]
    pub fn table(&self) -> &BitVector {
        &self.table
    }

    /// Value at `x`.
    #[inline]
    pub fn get(&self, x: u64) -> bool {
        self.table.test(x as usize)
    }

    /// Set the value at `x`.
    #[inline]
    pub fn set(&mut self, x: u64, value: bool) {
        self.table.set(x as usize, value);
    }

    /// Number of points where the function is 1.
    pub fn weight(&self) -> usize {
        self.table.weight()
    }

    /// Whether the function takes both values equally often.
    pub fn is_balanced(&self) -> bool {
        2 * self.weight() == self.size()
    }

    /// ANF coefficients: entry `m` is the coefficient of the monomial whose
    /// variables are the bits of `m`.
    fn anf_table(&self) -> BitVector {
        let mut coeffs = self.table.clone();
        moebius(&mut coeffs, self.nvars);
        coeffs
    }

    /// Algebraic normal form under `order`.
    pub fn to_polynomial(&self, order: MonomialOrder) -> Polynomial {
        let nvars = self.nvars;
        let coeffs = self.anf_table();
        let monomials = coeffs
            .ones_iter()
            .map(|m| Monomial::from_bits(BitVector::from_index(nvars, m as u64)));
        Polynomial::from_monomials(nvars, order, monomials)
    }

    /// Degree of the algebraic normal form; `None` for the zero function.
    pub fn degree(&self) -> Option<usize> {
        self.anf_table()
            .ones_iter()
            .map(|m| m.count_ones() as usize)
            .max()
    }

    /// Walsh-Hadamard spectrum: `W(u) = sum_x (-1)^(f(x) + u.x)`.
    pub fn walsh_hadamard(&self) -> Vec<i64> {
        let mut spectrum: Vec<i64> = (0..self.size())
            .map(|x| if self.table.test(x) { -1 } else { 1 })
            .collect();
        for i in 0..self.nvars {
            let half = 1usize << i;
            for block in (0..spectrum.len()).step_by(2 * half) {
                for k in block..block + half {
                    let (a, b) = (spectrum[k], spectrum[k + half]);
                    spectrum[k] = a + b;
                    spectrum[k + half] = a - b;
                }
            }
            trace!("walsh_hadamard: level {} of {}", i + 1, self.nvars);
        }
        spectrum
    }

    /// Largest absolute Walsh-Hadamard coefficient.
    pub fn max_walsh(&self) -> u64 {
        self.walsh_hadamard()
            .into_iter()
            .map(i64::unsigned_abs)
            .max()
            .unwrap_or(0)
    }

    /// Hamming distance to the nearest affine function.
    pub fn nonlinearity(&self) -> usize {
        (self.size() - self.max_walsh() as usize) / 2
    }

    /// Whether every Walsh-Hadamard coefficient has absolute value
    /// `2^(nvars / 2)`; only possible for an even number of variables.
    pub fn is_bent(&self) -> bool {
        if self.nvars % 2 != 0 {
            return false;
        }
        let flat = 1u64 << (self.nvars / 2);
        self.walsh_hadamard()
            .into_iter()
            .all(|w| w.unsigned_abs() == flat)
    }
}
