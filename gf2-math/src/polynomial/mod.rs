//! Polynomials of the Boolean ring GF(2)[x_0, ..., x_{n-1}] / (x_i^2 - x_i).
//!
//! A polynomial is a set of squarefree monomials (coefficients live in GF(2),
//! so a monomial is either present or not). The set is kept sorted strictly
//! descending under the polynomial's [`MonomialOrder`]; the first monomial is
//! the leading monomial. Addition is the symmetric difference of the sets.
//!
//! Set operations come in two flavors. When both operands are sorted under
//! the same order they are merged linearly. Otherwise the other operand is
//! scanned with a cursor that moves back and forth over `self`, which stays
//! cheap as long as the two orders are close.

mod arith;
pub mod geobucket;

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign};

use rand::Rng;

use crate::bitvec::BitVector;
use crate::monomial::Monomial;
use crate::order::MonomialOrder;

pub use geobucket::Geobucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetOp {
    Union,
    Diff,
    SymDiff,
}

/// Polynomial over GF(2) with squarefree monomials.
#[derive(Clone)]
pub struct Polynomial {
    nvars: usize,
    order: MonomialOrder,
    monomials: VecDeque<Monomial>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero(nvars: usize, order: MonomialOrder) -> Self {
        Self {
            nvars,
            order,
            monomials: VecDeque::new(),
        }
    }

    /// The constant `1`.
    pub fn one(nvars: usize, order: MonomialOrder) -> Self {
        Self::from_monomial(Monomial::one(nvars), order)
    }

    /// A single monomial.
    pub fn from_monomial(m: Monomial, order: MonomialOrder) -> Self {
        Self {
            nvars: m.nvars(),
            order,
            monomials: VecDeque::from([m]),
        }
    }

    /// Sum of the given monomials; pairs of equal monomials cancel.
    pub fn from_monomials(
        nvars: usize,
        order: MonomialOrder,
        monomials: impl IntoIterator<Item = Monomial>,
    ) -> Self {
        let mut p = Self {
            nvars,
            order,
            monomials: monomials.into_iter().collect(),
        };
        debug_assert!(p.monomials.iter().all(|m| m.nvars() == nvars));
        p.normalize();
        p
    }

    /// Random polynomial: every monomial is present with probability 1/2.
    ///
    /// All `2^nvars` monomials are visited, so keep `nvars` small.
    pub fn random<R: Rng + ?Sized>(nvars: usize, order: MonomialOrder, rng: &mut R) -> Self {
        let walk = if order.supports_next() {
            order.clone()
        } else {
            MonomialOrder::Lex
        };
        let mut p = Self::zero(nvars, order);
        let mut m = walk.first(nvars);
        loop {
            if rng.random_bool(0.5) {
                p.monomials.push_front(m.clone());
            }
            if !walk.next(&mut m) {
                break;
            }
        }
        if walk != p.order {
            p.normalize();
        }
        p
    }

    // Accessors

    /// Number of variables.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// The monomial order.
    #[inline]
    pub fn order(&self) -> &MonomialOrder {
        &self.order
    }

    /// Number of monomials.
    #[inline]
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    /// Whether the polynomial is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Whether the polynomial is the constant `1`.
    pub fn is_one(&self) -> bool {
        self.monomials.len() == 1 && self.monomials[0].is_one()
    }

    /// Whether the polynomial equals the monomial `m`.
    pub fn is_monomial(&self, m: &Monomial) -> bool {
        self.monomials.len() == 1 && self.monomials[0] == *m
    }

    /// Monomials in descending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Monomial> + ExactSizeIterator {
        self.monomials.iter()
    }

    /// The leading monomial.
    ///
    /// # Panics
    /// Panics if the polynomial is zero.
    #[inline]
    pub fn lm(&self) -> &Monomial {
        self.monomials
            .front()
            .unwrap_or_else(|| panic!("zero polynomial has no leading monomial"))
    }

    /// The leading monomial, if any.
    #[inline]
    pub fn leading_monomial(&self) -> Option<&Monomial> {
        self.monomials.front()
    }

    /// Remove and return the leading monomial.
    #[inline]
    pub fn pop_lm(&mut self) -> Option<Monomial> {
        self.monomials.pop_front()
    }

    /// Monomial at position `i` in descending order.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&Monomial> {
        self.monomials.get(i)
    }

    /// Remove and return the smallest monomial.
    #[inline]
    pub fn pop_trailing(&mut self) -> Option<Monomial> {
        self.monomials.pop_back()
    }

    // Append a monomial smaller than every present one.
    pub(crate) fn push_trailing(&mut self, m: Monomial) {
        debug_assert!(
            self.monomials
                .back()
                .is_none_or(|last| self.order.greater(last, &m))
        );
        self.monomials.push_back(m);
    }

    /// Copy without the leading monomial.
    pub fn tail(&self) -> Self {
        let mut t = self.clone();
        t.monomials.pop_front();
        t
    }

    /// Total degree, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.monomials.iter().map(Monomial::degree).max()
    }

    /// Whether `m` occurs.
    pub fn contains(&self, m: &Monomial) -> bool {
        self.find(m).is_ok()
    }

    fn find(&self, m: &Monomial) -> Result<usize, usize> {
        // descending storage: search with the reversed comparison
        self.monomials
            .binary_search_by(|other| self.order.compare(m, other))
    }

    /// Value at a point of GF(2)^n.
    pub fn eval(&self, point: &BitVector) -> bool {
        self.monomials
            .iter()
            .fold(false, |acc, m| acc ^ m.eval(point))
    }

    /// Whether none of the variables selected by `vars` occurs.
    pub fn is_insufficient(&self, vars: &BitVector) -> bool {
        self.monomials.iter().all(|m| m.bits().is_disjoint(vars))
    }

    /// Mask of the variables that occur.
    pub fn vars(&self) -> BitVector {
        let mut mask = BitVector::zeros(self.nvars);
        for m in &self.monomials {
            mask |= m.bits();
        }
        mask
    }

    /// Whether every monomial is divisible by `m`.
    pub fn is_divisible_by(&self, m: &Monomial) -> bool {
        self.monomials.iter().all(|x| x.is_divisible_by(m))
    }

    // Normalization and orders

    /// Sort descending and cancel equal pairs.
    pub fn normalize(&mut self) {
        let order = &self.order;
        self.monomials
            .make_contiguous()
            .sort_by(|a, b| order.compare(b, a));
        let mut out: VecDeque<Monomial> = VecDeque::with_capacity(self.monomials.len());
        for m in self.monomials.drain(..) {
            if out.back() == Some(&m) {
                out.pop_back();
            } else {
                out.push_back(m);
            }
        }
        self.monomials = out;
    }

    /// Whether the monomials are strictly descending.
    pub fn is_normalized(&self) -> bool {
        self.monomials
            .iter()
            .zip(self.monomials.iter().skip(1))
            .all(|(a, b)| self.order.greater(a, b))
    }

    /// Re-sort under another order.
    pub fn set_order(&mut self, order: MonomialOrder) {
        if order != self.order {
            self.order = order;
            self.normalize();
        }
    }

    /// Copy sorted under another order.
    #[must_use]
    pub fn with_order(&self, order: MonomialOrder) -> Self {
        let mut p = self.clone();
        p.set_order(order);
        p
    }

    /// Copy in a ring of `nvars` variables.
    ///
    /// Monomials involving dropped variables are truncated before the
    /// result is normalized.
    #[must_use]
    pub fn resized(&self, nvars: usize) -> Self {
        Self::from_monomials(
            nvars,
            self.order.clone(),
            self.monomials.iter().map(|m| m.resized(nvars)),
        )
    }

    /// Reset to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.monomials.clear();
    }

    /// Whether `other` is sorted under the same order.
    #[inline]
    pub fn is_consistent(&self, other: &Self) -> bool {
        self.order == other.order
    }

    // Set operations

    fn merge(&mut self, other: impl IntoIterator<Item = Monomial>, op: SetOp) {
        let order = &self.order;
        let mut left = std::mem::take(&mut self.monomials).into_iter().peekable();
        let mut out = VecDeque::with_capacity(left.len());
        for m in other {
            while let Some(l) = left.next_if(|l| order.greater(l, &m)) {
                out.push_back(l);
            }
            match left.next_if(|l| *l == m) {
                Some(l) if op == SetOp::Union => out.push_back(l),
                Some(_) => {}
                None if op != SetOp::Diff => out.push_back(m),
                None => {}
            }
        }
        out.extend(left);
        self.monomials = out;
    }

    fn merge_nc<'a>(&mut self, other: impl IntoIterator<Item = &'a Monomial>, op: SetOp) {
        let mut pos = 0;
        for m in other {
            while pos > 0 && !self.order.greater(&self.monomials[pos - 1], m) {
                pos -= 1;
            }
            while pos < self.monomials.len() && self.order.greater(&self.monomials[pos], m) {
                pos += 1;
            }
            let present = pos < self.monomials.len() && self.monomials[pos] == *m;
            match (present, op) {
                (true, SetOp::Diff | SetOp::SymDiff) => {
                    self.monomials.remove(pos);
                }
                (false, SetOp::Union | SetOp::SymDiff) => {
                    self.monomials.insert(pos, m.clone());
                }
                _ => {}
            }
        }
    }

    fn apply_monomial(&mut self, m: &Monomial, op: SetOp) {
        debug_assert_eq!(m.nvars(), self.nvars);
        match (self.find(m), op) {
            (Ok(pos), SetOp::Diff | SetOp::SymDiff) => {
                self.monomials.remove(pos);
            }
            (Err(pos), SetOp::Union | SetOp::SymDiff) => {
                self.monomials.insert(pos, m.clone());
            }
            _ => {}
        }
    }

    fn apply(&mut self, other: &Self, op: SetOp) {
        debug_assert_eq!(other.nvars, self.nvars, "polynomials of different rings");
        if self.is_consistent(other) {
            self.merge(other.monomials.iter().cloned(), op);
        } else {
            self.merge_nc(other.monomials.iter(), op);
        }
    }

    /// Add `m` unless present.
    pub fn union_monomial(&mut self, m: &Monomial) {
        self.apply_monomial(m, SetOp::Union);
    }

    /// Remove `m` if present.
    pub fn diff_monomial(&mut self, m: &Monomial) {
        self.apply_monomial(m, SetOp::Diff);
    }

    /// Add `m` over GF(2): insert if absent, remove if present.
    pub fn sym_diff_monomial(&mut self, m: &Monomial) {
        self.apply_monomial(m, SetOp::SymDiff);
    }

    /// Set union with `other`.
    pub fn union(&mut self, other: &Self) {
        self.apply(other, SetOp::Union);
    }

    /// Set difference with `other`.
    pub fn diff(&mut self, other: &Self) {
        self.apply(other, SetOp::Diff);
    }

    /// Add `other` over GF(2).
    pub fn sym_diff(&mut self, other: &Self) {
        self.apply(other, SetOp::SymDiff);
    }

    /// Add `other` over GF(2), moving its monomials and leaving it zero.
    pub fn sym_diff_splice(&mut self, other: &mut Self) {
        if self.is_consistent(other) {
            let taken = std::mem::take(&mut other.monomials);
            self.merge(taken, SetOp::SymDiff);
        } else {
            self.merge_nc(other.monomials.iter(), SetOp::SymDiff);
            other.clear();
        }
    }

    // Comparison

    /// Compare with a polynomial sorted under the same order.
    ///
    /// Monomials are compared pairwise from the leading one; a proper prefix
    /// is smaller.
    pub fn compare(&self, other: &Self) -> Ordering {
        debug_assert!(self.is_consistent(other));
        for (a, b) in self.monomials.iter().zip(other.monomials.iter()) {
            match self.order.compare(a, b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.monomials.len().cmp(&other.monomials.len())
    }

    /// Compare with a polynomial sorted under any order, using this one's.
    pub fn compare_nc(&self, other: &Self) -> Ordering {
        if self.is_consistent(other) {
            self.compare(other)
        } else {
            self.compare(&other.with_order(self.order.clone()))
        }
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        if self.nvars != other.nvars || self.len() != other.len() {
            return false;
        }
        if self.is_consistent(other) {
            self.monomials == other.monomials
        } else {
            self.compare_nc(other) == Ordering::Equal
        }
    }
}

impl Eq for Polynomial {}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        for (k, m) in self.monomials.iter().enumerate() {
            if k > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial[{}; {}]({self})", self.nvars, self.order)
    }
}

// Operators. `+` is addition over GF(2), `%` and `/` are remainder and
// quotient of the geobucket division.

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        self.sym_diff(rhs);
    }
}

impl AddAssign<&Monomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Monomial) {
        self.sym_diff_monomial(rhs);
    }
}

impl MulAssign<&Polynomial> for Polynomial {
    fn mul_assign(&mut self, rhs: &Polynomial) {
        self.multiply(rhs);
    }
}

impl MulAssign<&Monomial> for Polynomial {
    fn mul_assign(&mut self, rhs: &Monomial) {
        self.mul_monomial(rhs);
    }
}

impl RemAssign<&Polynomial> for Polynomial {
    fn rem_assign(&mut self, rhs: &Polynomial) {
        self.remainder(rhs);
    }
}

impl RemAssign<&Monomial> for Polynomial {
    fn rem_assign(&mut self, rhs: &Monomial) {
        self.remainder_monomial(rhs);
    }
}

impl DivAssign<&Polynomial> for Polynomial {
    fn div_assign(&mut self, rhs: &Polynomial) {
        self.quotient(rhs);
    }
}

impl DivAssign<&Monomial> for Polynomial {
    fn div_assign(&mut self, rhs: &Monomial) {
        self.quotient_monomial(rhs);
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $assign:ident) => {
        impl $trait<&Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Polynomial {
                let mut out = self.clone();
                out.$assign(rhs);
                out
            }
        }

        impl $trait<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(mut self, rhs: &Polynomial) -> Polynomial {
                self.$assign(rhs);
                self
            }
        }
    };
}

binary_op!(Add, add, add_assign);
binary_op!(Mul, mul, mul_assign);
binary_op!(Rem, rem, rem_assign);
binary_op!(Div, div, div_assign);
