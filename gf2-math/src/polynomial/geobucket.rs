//! Geobuckets.
//!
//! A geobucket [Yan, "The geobucket data structure for polynomials", 1998]
//! accumulates many polynomial sums with amortized cost. Bucket `i` holds at
//! most `d^(i+1)` monomials for a growth factor `d`. A summand is merged into
//! the first bucket large enough to hold it, and a bucket that overflows is
//! merged into the next one. The leading monomial of the sum is found by
//! comparing the leading monomials of all buckets.

use std::cmp::Ordering;

use crate::monomial::Monomial;
use crate::order::MonomialOrder;

use super::Polynomial;

/// Polynomial sum spread over buckets of geometrically growing capacity.
#[derive(Debug, Clone)]
pub struct Geobucket {
    factor: usize,
    nvars: usize,
    order: MonomialOrder,
    buckets: Vec<Polynomial>,
    max_sizes: Vec<usize>,
}

impl Geobucket {
    /// Empty geobucket with growth factor `factor`.
    ///
    /// # Panics
    /// Panics if `factor < 2`.
    pub fn new(factor: usize, nvars: usize, order: MonomialOrder) -> Self {
        assert!(factor >= 2, "geobucket growth factor must be at least 2");
        Self {
            factor,
            nvars,
            buckets: vec![Polynomial::zero(nvars, order.clone())],
            order,
            max_sizes: vec![factor],
        }
    }

    /// Geobucket holding `poly`.
    pub fn from_polynomial(factor: usize, mut poly: Polynomial) -> Self {
        let mut gb = Self::new(factor, poly.nvars(), poly.order().clone());
        gb.sym_diff_splice(&mut poly);
        gb
    }

    /// Number of buckets allocated so far.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the accumulated sum is zero.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Polynomial::is_zero)
    }

    fn new_bucket(&mut self) {
        self.buckets
            .push(Polynomial::zero(self.nvars, self.order.clone()));
        let last = self.max_sizes[self.max_sizes.len() - 1];
        self.max_sizes.push(self.factor * last);
    }

    // Bucket `j` overflowed the capacity of bucket `i >= j`: fold the next
    // buckets into it until it fits, then store it at the index it reached.
    fn carry(&mut self, j: usize, mut i: usize) {
        while self.buckets[j].len() > self.max_sizes[i] {
            if i + 1 == self.max_sizes.len() {
                self.new_bucket();
            }
            i += 1;
            let (lo, hi) = self.buckets.split_at_mut(i);
            lo[j].sym_diff_splice(&mut hi[0]);
        }
        self.buckets.swap(i, j);
    }

    /// Add (XOR) a single monomial.
    pub fn sym_diff(&mut self, m: &Monomial) {
        self.buckets[0].sym_diff_monomial(m);
        self.carry(0, 0);
    }

    /// Add (XOR) `poly`, leaving it empty.
    ///
    /// `poly` must be sorted under the geobucket's order.
    pub fn sym_diff_splice(&mut self, poly: &mut Polynomial) {
        debug_assert_eq!(poly.order(), &self.order);
        let mut i = 0;
        while poly.len() > self.max_sizes[i] {
            i += 1;
            if i == self.max_sizes.len() {
                self.new_bucket();
            }
        }
        self.buckets[i].sym_diff_splice(poly);
        self.carry(i, i);
    }

    /// Remove and return the leading monomial of the sum.
    ///
    /// Equal leading monomials of two buckets cancel each other, so the
    /// returned monomial really occurs in the sum.
    pub fn pop_lm(&mut self) -> Option<Monomial> {
        'scan: loop {
            let mut best: Option<usize> = None;
            for j in (0..self.buckets.len()).rev() {
                let Some(lm) = self.buckets[j].leading_monomial() else {
                    continue;
                };
                let Some(i) = best else {
                    best = Some(j);
                    continue;
                };
                match self.order.compare(lm, self.buckets[i].lm()) {
                    Ordering::Greater => best = Some(j),
                    Ordering::Equal => {
                        self.buckets[i].pop_lm();
                        self.buckets[j].pop_lm();
                        continue 'scan;
                    }
                    Ordering::Less => {}
                }
            }
            return best.and_then(|i| self.buckets[i].pop_lm());
        }
    }

    /// Collect the sum into a single polynomial.
    pub fn mount(self) -> Polynomial {
        let mut buckets = self.buckets.into_iter();
        let mut out = buckets
            .next()
            .unwrap_or_else(|| Polynomial::zero(self.nvars, self.order.clone()));
        for mut bucket in buckets {
            out.sym_diff_splice(&mut bucket);
        }
        out
    }
}
