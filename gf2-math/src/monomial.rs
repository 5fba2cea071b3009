//! Squarefree monomials over GF(2).
//!
//! Since `x^2 = x` holds for every variable of the Boolean ring, a monomial is
//! fully described by the set of variables it contains. It is stored as an
//! exponent vector of 0/1 entries, one coordinate per variable.
//!
//! Multiplication is bitwise OR, the gcd is AND and the lcm is OR. A monomial
//! `a` divides `b` when every variable of `a` occurs in `b`.

use std::fmt;

use crate::bitvec::BitVector;

/// Squarefree product of variables `x_0 .. x_{n-1}`.
///
/// The derived [`Ord`] is the lexicographic order; use a
/// [`MonomialOrder`](crate::order::MonomialOrder) for the other orders.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Monomial {
    bits: BitVector,
}

impl Monomial {
    /// The identity monomial `1` over `nvars` variables.
    #[inline]
    pub fn one(nvars: usize) -> Self {
        Self {
            bits: BitVector::zeros(nvars),
        }
    }

    /// The single variable `x_i`.
    pub fn var(nvars: usize, i: usize) -> Self {
        let mut m = Self::one(nvars);
        m.set(i, true);
        m
    }

    /// Product of the listed variables (repetitions collapse).
    pub fn from_vars(nvars: usize, vars: &[usize]) -> Self {
        Self {
            bits: BitVector::from_indices(nvars, vars),
        }
    }

    /// Wrap an exponent vector.
    #[inline]
    pub fn from_bits(bits: BitVector) -> Self {
        Self { bits }
    }

    /// The exponent vector.
    #[inline]
    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    /// Consume the monomial, returning its exponent vector.
    #[inline]
    pub fn into_bits(self) -> BitVector {
        self.bits
    }

    /// Number of variables of the ambient ring.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.bits.len()
    }

    /// Whether this is the identity monomial.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.bits.is_all_zero()
    }

    /// Whether `x_i` occurs.
    #[inline]
    pub fn test(&self, i: usize) -> bool {
        self.bits.test(i)
    }

    /// Include or drop `x_i`.
    #[inline]
    pub fn set(&mut self, i: usize, present: bool) {
        self.bits.set(i, present);
    }

    /// Toggle `x_i`.
    #[inline]
    pub fn flip(&mut self, i: usize) {
        self.bits.flip(i);
    }

    /// Total degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.bits.weight()
    }

    /// Indices of the occurring variables, ascending.
    pub fn vars(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones_iter()
    }

    /// Product `self * other`.
    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        Self {
            bits: &self.bits | &other.bits,
        }
    }

    /// Multiply in place.
    pub fn multiply(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self {
            bits: &self.bits & &other.bits,
        }
    }

    /// Least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        self.product(other)
    }

    /// Whether `self | other`.
    #[inline]
    pub fn divides(&self, other: &Self) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Whether `other | self`.
    #[inline]
    pub fn is_divisible_by(&self, other: &Self) -> bool {
        other.divides(self)
    }

    /// Whether the two monomials share no variable.
    #[inline]
    pub fn is_rel_prime(&self, other: &Self) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    /// Quotient `self / other`.
    ///
    /// # Panics
    /// Panics in debug builds unless `other` divides `self`.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Self {
        debug_assert!(other.divides(self), "{other} does not divide {self}");
        Self {
            bits: &self.bits ^ &other.bits,
        }
    }

    /// Value at a point of GF(2)^n.
    pub fn eval(&self, point: &BitVector) -> bool {
        self.bits.is_subset(point)
    }

    /// Rename `x_i` to `x_{n-1-i}`.
    pub fn reverse(&mut self) {
        self.bits.reverse();
    }

    /// Restriction to the first `m` variables.
    #[must_use]
    pub fn left(&self, m: usize) -> Self {
        Self {
            bits: self.bits.left(m),
        }
    }

    /// Restriction to the last `m` variables, renumbered from 0.
    #[must_use]
    pub fn right(&self, m: usize) -> Self {
        Self {
            bits: self.bits.right(m),
        }
    }

    /// Overwrite the first `part.nvars()` variables.
    pub fn set_left(&mut self, part: &Self) {
        self.bits.set_left(&part.bits);
    }

    /// Overwrite the last `part.nvars()` variables.
    pub fn set_right(&mut self, part: &Self) {
        self.bits.set_right(&part.bits);
    }

    /// The same monomial in a ring of `nvars` variables.
    ///
    /// Variables at or past `nvars` are dropped.
    #[must_use]
    pub fn resized(&self, nvars: usize) -> Self {
        Self {
            bits: self.bits.resized(nvars),
        }
    }

    /// Keep the variables selected by `mask`, renumbered `0, 1, ...`.
    pub fn pack(&mut self, mask: &BitVector) {
        self.bits.pack(mask);
    }

    /// Inverse of [`pack`](Self::pack).
    pub fn unpack(&mut self, mask: &BitVector) {
        self.bits.unpack(mask);
    }

    /// Substitute `x_i -> x_{pi[i]}` read backwards: the new exponent of `x_i`
    /// is the old exponent of `x_{pi[i]}`, or zero for `None`.
    pub fn permute(&mut self, pi: &[Option<usize>]) {
        self.bits.permute(pi);
    }
}

impl From<BitVector> for Monomial {
    fn from(bits: BitVector) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return f.write_str("1");
        }
        for (k, i) in self.vars().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            write!(f, "x{i}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Monomial({self})")
    }
}
