//! Critical pairs.
//!
//! The first member of a pair is either an implicit field equation
//! `x_i^2 + x_i` or a stored polynomial; the second one is always a stored
//! polynomial inserted later than the first. Leading monomials are copied
//! into the pair when it is created, together with their LCM.

use std::cmp::Ordering;
use std::fmt;

use crate::monomial::Monomial;
use crate::order::MonomialOrder;
use crate::polynomial::Polynomial;

use super::basis::{Basis, PolyId};

/// First member of a critical pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairSide {
    /// The field equation `x_i^2 + x_i` of variable `i`
    Field(usize),
    /// A stored polynomial
    Poly(PolyId),
}

/// Pair of polynomials whose S-polynomial is still to be reduced.
#[derive(Debug, Clone)]
pub struct CriticalPair {
    first: PairSide,
    second: PolyId,
    lm1: Monomial,
    lm2: Monomial,
    lcm: Monomial,
}

impl CriticalPair {
    /// Pair of two stored polynomials.
    pub(crate) fn new(first: PolyId, second: PolyId, basis: &Basis) -> Self {
        let lm1 = basis.lm(first).clone();
        let lm2 = basis.lm(second).clone();
        let lcm = lm1.lcm(&lm2);
        Self {
            first: PairSide::Poly(first),
            second,
            lm1,
            lm2,
            lcm,
        }
    }

    /// Pair of the field equation of `var` and a stored polynomial.
    pub(crate) fn field(var: usize, second: PolyId, basis: &Basis) -> Self {
        let lm1 = Monomial::var(basis.nvars(), var);
        let lm2 = basis.lm(second).clone();
        let lcm = lm1.lcm(&lm2);
        Self {
            first: PairSide::Field(var),
            second,
            lm1,
            lm2,
            lcm,
        }
    }

    /// First member.
    #[inline]
    pub fn first(&self) -> PairSide {
        self.first
    }

    /// Second member.
    #[inline]
    pub fn second(&self) -> PolyId {
        self.second
    }

    /// Leading monomial of the first member (`x_i` for a field equation).
    #[inline]
    pub fn lm1(&self) -> &Monomial {
        &self.lm1
    }

    /// Leading monomial of the second member.
    #[inline]
    pub fn lm2(&self) -> &Monomial {
        &self.lm2
    }

    /// LCM of the leading monomials.
    #[inline]
    pub fn lcm(&self) -> &Monomial {
        &self.lcm
    }

    fn field_var(&self) -> Option<usize> {
        match self.first {
            PairSide::Field(var) => Some(var),
            PairSide::Poly(_) => None,
        }
    }

    /// Whether both pairs have the same LCM.
    ///
    /// The LCM of a field pair carries an implicit extra factor `x_i`, so
    /// pairs of different kinds or variables never compare equal.
    pub fn same_lcm(&self, other: &Self) -> bool {
        self.field_var() == other.field_var() && self.lcm == other.lcm
    }

    /// Whether the LCM of `self` divides the LCM of `other`, with the same
    /// convention as [`same_lcm`](Self::same_lcm).
    pub fn divides(&self, other: &Self) -> bool {
        let var = self.field_var();
        (var.is_none() || var == other.field_var()) && self.lcm.divides(&other.lcm)
    }

    /// Whether the leading monomials are coprime.
    pub fn is_rel_prime(&self) -> bool {
        match self.first {
            PairSide::Field(var) => !self.lm2.test(var),
            PairSide::Poly(_) => self.lm1.is_rel_prime(&self.lm2),
        }
    }

    /// Whether the second leading monomial divides the first one.
    pub fn is_r_pair(&self) -> bool {
        self.lm2.divides(&self.lm1)
    }

    /// Order of pairs by LCM.
    pub fn compare(&self, other: &Self, order: &MonomialOrder) -> Ordering {
        order.compare(&self.lcm, &other.lcm)
    }

    /// S-polynomial of the pair, built from the current contents of its
    /// members.
    pub(crate) fn s_polynomial(&self, basis: &Basis) -> Polynomial {
        let second = basis.get(self.second);
        match self.first {
            PairSide::Poly(first) => {
                let mut spoly = second.clone();
                spoly.s_poly_assign(basis.get(first));
                spoly
            }
            PairSide::Field(var) => {
                let mut spoly = Polynomial::s_poly_field(var, second);
                // x_i divides LM(second): its multiple keeps the leader
                if spoly.leading_monomial() == Some(second.lm()) {
                    spoly += second;
                }
                spoly
            }
        }
    }
}

impl fmt::Display for CriticalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first {
            PairSide::Field(var) => write!(f, "[x{var}^2 + x{var}, {}]", self.lm2),
            PairSide::Poly(_) => write!(f, "[{}, {}]", self.lm1, self.lm2),
        }
    }
}
