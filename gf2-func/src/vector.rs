//! Vector Boolean functions and substitutions.
//!
//! A [`VectorFunction`] maps `n` input bits to `m` output bits and is stored
//! as a table of `2^n` images; bit `i` of an image is coordinate function
//! `i`. A [`Substitution`] is a bijective vector function with `n = m`, the
//! usual model of an S-box.

use gf2_math::{BitVector, Ideal, Monomial, MonomialOrder, Polynomial};
use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::boolean::{BooleanFunction, MAX_VARS};
use crate::error::{FuncError, FuncResult};

/// Largest supported number of output bits.
pub const MAX_OUTPUTS: usize = 64;

#[inline]
fn image_mask(m: usize) -> u64 {
    if m == 64 { u64::MAX } else { (1u64 << m) - 1 }
}

#[inline]
fn parity(x: u64) -> bool {
    x.count_ones() % 2 == 1
}

/// Function from `n` to `m` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorFunction {
    n: usize,
    m: usize,
    images: Vec<u64>,
}

impl VectorFunction {
    /// The zero function.
    ///
    /// # Panics
    /// Panics if `n > MAX_VARS` or `m > MAX_OUTPUTS`.
    pub fn new(n: usize, m: usize) -> Self {
        assert!(n <= MAX_VARS, "too many inputs: {n}");
        assert!(m <= MAX_OUTPUTS, "too many outputs: {m}");
        Self {
            n,
            m,
            images: vec![0; 1 << n],
        }
    }

    /// Function with the images `table[x]`.
    pub fn from_table(n: usize, m: usize, table: &[u64]) -> FuncResult<Self> {
        let mut f = Self::new(n, m);
        if table.len() != f.images.len() {
            return Err(FuncError::TableSize {
                expected: f.images.len(),
                found: table.len(),
            });
        }
        let mask = image_mask(m);
        if let Some((index, &value)) = table.iter().enumerate().find(|(_, y)| **y & !mask != 0) {
            return Err(FuncError::ImageOutOfRange {
                index,
                value,
                bits: m,
            });
        }
        f.images.copy_from_slice(table);
        Ok(f)
    }

    /// Uniformly random function.
    pub fn random<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Self {
        let mut f = Self::new(n, m);
        let mask = image_mask(m);
        for y in f.images.iter_mut() {
            *y = rng.random::<u64>() & mask;
        }
        f
    }

    /// Number of input bits.
    #[inline]
    pub fn inputs(&self) -> usize {
        self.n
    }

    /// Number of output bits.
    #[inline]
    pub fn outputs(&self) -> usize {
        self.m
    }

    /// The images, indexed by preimage.
    #[inline]
    pub fn images(&self) -> &[u64] {
        &self.images
    }

    /// Image of `x`.
    #[inline]
    pub fn get(&self, x: u64) -> u64 {
        self.images[x as usize]
    }

    /// Set the image of `x`.
    ///
    /// # Panics
    /// Panics if `y` has more than `m` bits.
    pub fn set(&mut self, x: u64, y: u64) {
        assert_eq!(y & !image_mask(self.m), 0, "image {y} wider than {} bits", self.m);
        self.images[x as usize] = y;
    }

    /// Coordinate function `pos`.
    pub fn coordinate(&self, pos: usize) -> BooleanFunction {
        assert!(pos < self.m, "coordinate {pos} out of range");
        BooleanFunction::from_fn(self.n, |x| (self.get(x) >> pos) & 1 == 1)
    }

    /// Replace coordinate function `pos` by `f`.
    pub fn set_coordinate(&mut self, pos: usize, f: &BooleanFunction) {
        assert!(pos < self.m, "coordinate {pos} out of range");
        assert_eq!(f.nvars(), self.n, "input count mismatch");
        for (x, y) in self.images.iter_mut().enumerate() {
            *y &= !(1 << pos);
            *y |= u64::from(f.get(x as u64)) << pos;
        }
    }

    /// Sum of the coordinate functions selected by the bits of `mask`.
    pub fn coordinate_combination(&self, mask: u64) -> BooleanFunction {
        BooleanFunction::from_fn(self.n, |x| parity(self.get(x) & mask))
    }

    fn combinations(&self) -> impl Iterator<Item = BooleanFunction> + '_ {
        (1..=image_mask(self.m)).map(|mask| self.coordinate_combination(mask))
    }

    /// Maximum degree of the coordinate functions; `None` if all are zero.
    pub fn degree(&self) -> Option<usize> {
        (0..self.m)
            .filter_map(|pos| self.coordinate(pos).degree())
            .max()
    }

    /// Minimum degree of the nonzero combinations of coordinate functions;
    /// `None` if some combination vanishes.
    pub fn degree_span(&self) -> Option<usize> {
        self.combinations().map(|f| f.degree()).min().flatten()
    }

    /// Minimum nonlinearity of the nonzero combinations of coordinate
    /// functions.
    pub fn nonlinearity(&self) -> usize {
        self.combinations()
            .map(|f| f.nonlinearity())
            .min()
            .unwrap_or(0)
    }

    /// Largest number of solutions of `f(x + a) + f(x) = b` over nonzero
    /// input differences `a` and all output differences `b`.
    pub fn differential_uniformity(&self) -> usize {
        let mut record = 0;
        let mut count: FxHashMap<u64, usize> = FxHashMap::default();
        for a in 1..self.images.len() {
            count.clear();
            for x in 0..self.images.len() {
                *count.entry(self.images[x ^ a] ^ self.images[x]).or_insert(0) += 1;
            }
            record = record.max(count.values().copied().max().unwrap_or(0));
        }
        record
    }

    /// Whether distinct inputs have distinct images and `n = m`.
    pub fn is_bijection(&self) -> bool {
        if self.n != self.m {
            return false;
        }
        let mut seen = BitVector::zeros(self.images.len());
        for &y in &self.images {
            if seen.test(y as usize) {
                return false;
            }
            seen.set(y as usize, true);
        }
        true
    }

    /// Graph of the function as an ideal in `n + m` variables.
    ///
    /// Inputs are `x_0..x_{n-1}`, outputs `x_n..x_{n+m-1}`; coordinate `i`
    /// contributes `ANF(f_i)(x) + x_{n+i}`.
    pub fn to_ideal(&self, order: MonomialOrder) -> Ideal {
        let nvars = self.n + self.m;
        let mut ideal = Ideal::new(nvars, order.clone());
        for pos in 0..self.m {
            let mut poly = self
                .coordinate(pos)
                .to_polynomial(order.clone())
                .resized(nvars);
            poly += &Polynomial::from_monomial(Monomial::var(nvars, self.n + pos), order.clone());
            ideal.insert(poly);
        }
        debug!(
            "VectorFunction::to_ideal: {} polys in {} vars",
            ideal.len(),
            nvars
        );
        ideal
    }
}

/// Bijection on `n`-bit words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Substitution(VectorFunction);

impl Substitution {
    /// The identity on `n` bits.
    pub fn identity(n: usize) -> Self {
        let mut f = VectorFunction::new(n, n);
        for (x, y) in f.images.iter_mut().enumerate() {
            *y = x as u64;
        }
        Self(f)
    }

    /// Substitution with the images `table[x]`.
    pub fn from_table(n: usize, table: &[u64]) -> FuncResult<Self> {
        let f = VectorFunction::from_table(n, n, table)?;
        if !f.is_bijection() {
            return Err(FuncError::NotBijective);
        }
        Ok(Self(f))
    }

    /// Uniformly random substitution.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut s = Self::identity(n);
        for x in (1..s.0.images.len()).rev() {
            let y = rng.random_range(0..=x);
            s.0.images.swap(x, y);
        }
        s
    }

    /// The underlying vector function.
    #[inline]
    pub fn function(&self) -> &VectorFunction {
        &self.0
    }

    /// Number of bits.
    #[inline]
    pub fn bits(&self) -> usize {
        self.0.n
    }

    /// Image of `x`.
    #[inline]
    pub fn get(&self, x: u64) -> u64 {
        self.0.get(x)
    }

    /// Swap the images of `x` and `y`.
    pub fn transpose(&mut self, x: u64, y: u64) {
        self.0.images.swap(x as usize, y as usize);
    }

    /// The inverse substitution.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut inv = self.clone();
        for (x, &y) in self.0.images.iter().enumerate() {
            inv.0.images[y as usize] = x as u64;
        }
        inv
    }

    /// Whether this is the identity.
    pub fn is_identity(&self) -> bool {
        self.0.images.iter().enumerate().all(|(x, &y)| x as u64 == y)
    }

    /// Whether the substitution is a single cycle through all words.
    pub fn is_full_cycle(&self) -> bool {
        let mut x = self.get(0);
        let mut len = 1;
        while x != 0 {
            x = self.get(x);
            len += 1;
        }
        len == self.0.images.len()
    }

    /// Advance to the next substitution in lexicographic order of image
    /// tables.
    ///
    /// Returns `false` after the last one, which is replaced by the
    /// identity.
    pub fn next(&mut self) -> bool {
        let images = &mut self.0.images;
        let Some(i) = (0..images.len().saturating_sub(1))
            .rev()
            .find(|&i| images[i] < images[i + 1])
        else {
            *self = Self::identity(self.bits());
            return false;
        };
        let j = (i + 1..images.len())
            .rev()
            .find(|&j| images[j] > images[i])
            .unwrap_or(i + 1);
        images.swap(i, j);
        images[i + 1..].reverse();
        true
    }
}

impl From<Substitution> for VectorFunction {
    fn from(s: Substitution) -> Self {
        s.0
    }
}
