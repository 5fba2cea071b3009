//! Multiplicative operations: products, division with remainder, variable
//! substitution and S-polynomials.
//!
//! The products, divisions and substitutions exist in two forms. The
//! `_classic` form accumulates into a plain polynomial; the default form
//! accumulates into a [`Geobucket`], which is faster for large operands.

use std::collections::VecDeque;

use crate::bitvec::BitVector;
use crate::monomial::Monomial;

use super::{Geobucket, Polynomial};

/// Growth factor for accumulation without leading monomial extraction.
const MULT_FACTOR: usize = 3;
/// Growth factor for division, which extracts leading monomials.
const DIV_FACTOR: usize = 4;

impl Polynomial {
    /// Multiply by a monomial.
    pub fn mul_monomial(&mut self, m: &Monomial) {
        for x in self.monomials.iter_mut() {
            x.multiply(m);
        }
        self.normalize();
    }

    /// Multiply by `rhs`, summing the partial products in a geobucket.
    pub fn multiply(&mut self, rhs: &Polynomial) {
        debug_assert_eq!(self.nvars, rhs.nvars);
        let mut gb = Geobucket::new(MULT_FACTOR, self.nvars, self.order.clone());
        for m in rhs.iter().rev() {
            let mut part = self.clone();
            part.mul_monomial(m);
            gb.sym_diff_splice(&mut part);
        }
        *self = gb.mount();
    }

    /// Multiply by `rhs`, summing the partial products directly.
    pub fn mul_classic(&mut self, rhs: &Polynomial) {
        debug_assert_eq!(self.nvars, rhs.nvars);
        let save = self.clone();
        self.clear();
        for m in rhs.iter().rev() {
            let mut part = save.clone();
            part.mul_monomial(m);
            self.sym_diff_splice(&mut part);
        }
    }

    // Leading monomial of the divisor under its own order and the rest of
    // the divisor under ours.
    fn split_divisor(&self, divisor: &Polynomial) -> (Monomial, Polynomial) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        debug_assert_eq!(self.nvars, divisor.nvars);
        let lm = divisor.lm().clone();
        let mut tail = divisor.with_order(self.order.clone());
        tail.diff_monomial(&lm);
        (lm, tail)
    }

    /// Replace `self` by its remainder modulo `divisor`.
    ///
    /// Returns whether anything changed.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn remainder(&mut self, divisor: &Polynomial) -> bool {
        let (dlm, tail) = self.split_divisor(divisor);
        let empty = Polynomial::zero(self.nvars, self.order.clone());
        let dividend = std::mem::replace(self, empty);
        let mut gb = Geobucket::from_polynomial(DIV_FACTOR, dividend);
        let mut changed = false;
        while let Some(lm) = gb.pop_lm() {
            if dlm.divides(&lm) {
                changed = true;
                let mut part = tail.clone();
                part.mul_monomial(&lm.divide(&dlm));
                gb.sym_diff_splice(&mut part);
            } else {
                self.monomials.push_back(lm);
            }
        }
        if !self.is_consistent(divisor) {
            self.normalize();
        }
        changed
    }

    /// Remainder without a geobucket, restarting the scan after every step.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn remainder_classic(&mut self, divisor: &Polynomial) -> bool {
        let (dlm, _) = self.split_divisor(divisor);
        let full = divisor.with_order(self.order.clone());
        let mut changed = false;
        let mut pos = 0;
        while pos < self.monomials.len() {
            if dlm.divides(&self.monomials[pos]) {
                let mut part = full.clone();
                part.mul_monomial(&self.monomials[pos].divide(&dlm));
                self.sym_diff_splice(&mut part);
                changed = true;
                pos = 0;
            } else {
                pos += 1;
            }
        }
        changed
    }

    /// Replace `self` by its quotient by `divisor`.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn quotient(&mut self, divisor: &Polynomial) {
        let (dlm, tail) = self.split_divisor(divisor);
        let empty = Polynomial::zero(self.nvars, self.order.clone());
        let dividend = std::mem::replace(self, empty);
        let mut gb = Geobucket::from_polynomial(DIV_FACTOR, dividend);
        while let Some(lm) = gb.pop_lm() {
            if dlm.divides(&lm) {
                let q = lm.divide(&dlm);
                let mut part = tail.clone();
                part.mul_monomial(&q);
                gb.sym_diff_splice(&mut part);
                self.monomials.push_back(q);
            }
        }
        if !self.is_consistent(divisor) {
            self.normalize();
        }
    }

    /// Quotient without a geobucket.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn quotient_classic(&mut self, divisor: &Polynomial) {
        let (dlm, _) = self.split_divisor(divisor);
        let full = divisor.with_order(self.order.clone());
        let empty = Polynomial::zero(self.nvars, self.order.clone());
        let mut rest = std::mem::replace(self, empty);
        let mut quot = Vec::new();
        let mut pos = 0;
        while pos < rest.monomials.len() {
            if dlm.divides(&rest.monomials[pos]) {
                let q = rest.monomials[pos].divide(&dlm);
                let mut part = full.clone();
                part.mul_monomial(&q);
                rest.sym_diff_splice(&mut part);
                quot.push(q);
                pos = 0;
            } else {
                pos += 1;
            }
        }
        self.monomials = quot.into();
        self.normalize();
    }

    /// Drop the monomials divisible by `m`.
    pub fn remainder_monomial(&mut self, m: &Monomial) {
        self.monomials.retain(|x| !x.is_divisible_by(m));
    }

    /// Keep the monomials divisible by `m`, divided by it.
    pub fn quotient_monomial(&mut self, m: &Monomial) {
        let kept: VecDeque<Monomial> = self
            .monomials
            .iter()
            .filter(|x| x.is_divisible_by(m))
            .map(|x| x.divide(m))
            .collect();
        self.monomials = kept;
    }

    // Substitutions

    /// Substitute the polynomial `with` for the variable `x_pos`.
    pub fn replace(&mut self, pos: usize, with: &Polynomial) {
        let with = with.with_order(self.order.clone());
        let mut gb = Geobucket::new(MULT_FACTOR, self.nvars, self.order.clone());
        for mut m in std::mem::take(&mut self.monomials) {
            if m.test(pos) {
                m.flip(pos);
                let mut part = with.clone();
                part.mul_monomial(&m);
                gb.sym_diff_splice(&mut part);
            } else {
                gb.sym_diff(&m);
            }
        }
        *self = gb.mount();
    }

    /// Substitution without a geobucket.
    pub fn replace_classic(&mut self, pos: usize, with: &Polynomial) {
        let with = with.with_order(self.order.clone());
        let source = std::mem::take(&mut self.monomials);
        for mut m in source {
            if m.test(pos) {
                m.flip(pos);
                let mut part = with.clone();
                part.mul_monomial(&m);
                self.sym_diff_splice(&mut part);
            } else {
                self.sym_diff_monomial(&m);
            }
        }
    }

    /// Substitute `x_new` for `x_pos`.
    pub fn replace_var(&mut self, pos: usize, new: usize) {
        if pos == new {
            return;
        }
        for m in self.monomials.iter_mut() {
            if m.test(pos) {
                m.flip(pos);
                m.set(new, true);
            }
        }
        self.normalize();
    }

    /// Rename variables: `x_i` takes the exponent of `x_{pi[i]}`.
    pub fn permute(&mut self, pi: &[Option<usize>]) {
        for m in self.monomials.iter_mut() {
            m.permute(pi);
        }
        self.normalize();
    }

    /// Substitute the constant `value` for `x_pos`.
    pub fn set_var(&mut self, pos: usize, value: bool) {
        if value {
            for m in self.monomials.iter_mut() {
                m.set(pos, false);
            }
            self.normalize();
        } else {
            self.monomials.retain(|m| !m.test(pos));
        }
    }

    /// Renumber the variables selected by `mask` as `x_0, x_1, ...`, dropping
    /// the others.
    pub fn pack(&mut self, mask: &BitVector) {
        for m in self.monomials.iter_mut() {
            m.pack(mask);
        }
        self.normalize();
    }

    /// Inverse of [`pack`](Self::pack).
    pub fn unpack(&mut self, mask: &BitVector) {
        for m in self.monomials.iter_mut() {
            m.unpack(mask);
        }
        self.normalize();
    }

    // S-polynomials

    /// S-polynomial of two nonzero polynomials under the same order:
    /// `tail(p) * L/LM(p) + tail(q) * L/LM(q)` with `L = lcm(LM(p), LM(q))`.
    pub fn s_poly(p: &Polynomial, q: &Polynomial) -> Polynomial {
        debug_assert!(p.is_consistent(q));
        let lcm = p.lm().lcm(q.lm());
        let fp = lcm.divide(p.lm());
        let fq = lcm.divide(q.lm());
        let monomials = p
            .iter()
            .skip(1)
            .map(|m| m.product(&fp))
            .chain(q.iter().skip(1).map(|m| m.product(&fq)));
        Polynomial::from_monomials(p.nvars, p.order.clone(), monomials)
    }

    /// S-polynomial of the field equation `x_i^2 + x_i` and `p`: `p * x_i`.
    pub fn s_poly_field(i: usize, p: &Polynomial) -> Polynomial {
        let mut out = p.clone();
        out.s_poly_field_assign(i);
        out
    }

    /// Replace `self` by the S-polynomial of `self` and `other`.
    pub fn s_poly_assign(&mut self, other: &Polynomial) {
        debug_assert!(self.is_consistent(other));
        let lcm = self.lm().lcm(other.lm());
        let factor = lcm.divide(self.lm());
        self.monomials.pop_front();
        for m in self.monomials.iter_mut() {
            m.multiply(&factor);
        }
        let factor = lcm.divide(other.lm());
        self.monomials
            .extend(other.iter().skip(1).map(|m| m.product(&factor)));
        self.normalize();
    }

    /// Replace `self` by the S-polynomial of `x_i^2 + x_i` and `self`.
    pub fn s_poly_field_assign(&mut self, i: usize) {
        for m in self.monomials.iter_mut() {
            m.set(i, true);
        }
        self.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::MonomialOrder;

    fn poly(nvars: usize, order: MonomialOrder, terms: &[&[usize]]) -> Polynomial {
        Polynomial::from_monomials(
            nvars,
            order,
            terms.iter().map(|vars| Monomial::from_vars(nvars, vars)),
        )
    }

    #[test]
    fn test_multiply_forms_agree() {
        let order = MonomialOrder::GRevLex;
        let p = poly(4, order.clone(), &[&[0], &[1], &[]]);
        let q = poly(4, order.clone(), &[&[0, 2], &[3], &[]]);
        let mut a = p.clone();
        a.multiply(&q);
        let mut b = p.clone();
        b.mul_classic(&q);
        assert_eq!(a, b);
        // (x0 + x1 + 1)(x0 x2 + x3 + 1)
        let expected = poly(
            4,
            order,
            &[&[0, 2], &[0, 3], &[0], &[0, 1, 2], &[1, 3], &[1], &[0, 2], &[3], &[]],
        );
        assert_eq!(a, expected);
    }

    #[test]
    fn test_square_is_identity() {
        // p^2 = p in the Boolean ring
        let order = MonomialOrder::Lex;
        let p = poly(3, order, &[&[0, 1], &[2], &[]]);
        assert_eq!(&p * &p, p);
    }

    #[test]
    fn test_division() {
        let order = MonomialOrder::GrLex;
        let p = poly(4, order.clone(), &[&[0, 1, 2], &[1, 3], &[0], &[]]);
        let d = poly(4, order.clone(), &[&[1], &[2]]);
        for classic in [false, true] {
            let (mut r, mut q) = (p.clone(), p.clone());
            if classic {
                assert!(r.remainder_classic(&d));
                q.quotient_classic(&d);
            } else {
                assert!(r.remainder(&d));
                q.quotient(&d);
            }
            assert!(r.iter().all(|m| !d.lm().divides(m)));
            assert_eq!(&(&q * &d) + &r, p);
        }
    }

    #[test]
    fn test_remainder_unchanged() {
        let order = MonomialOrder::Lex;
        let mut p = poly(3, order.clone(), &[&[0], &[]]);
        let d = poly(3, order, &[&[2], &[1]]);
        assert!(!p.remainder(&d));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_monomial_division() {
        let order = MonomialOrder::Lex;
        let p = poly(3, order.clone(), &[&[0, 1], &[1, 2], &[0]]);
        let x1 = Monomial::var(3, 1);
        let mut r = p.clone();
        r %= &x1;
        assert_eq!(r, poly(3, order.clone(), &[&[0]]));
        let mut q = p.clone();
        q /= &x1;
        assert_eq!(q, poly(3, order, &[&[0], &[2]]));
    }

    #[test]
    fn test_replace() {
        let order = MonomialOrder::GRevLex;
        let p = poly(3, order.clone(), &[&[0, 1], &[1], &[2]]);
        let with = poly(3, order.clone(), &[&[2], &[]]);
        let mut a = p.clone();
        a.replace(1, &with);
        let mut b = p.clone();
        b.replace_classic(1, &with);
        assert_eq!(a, b);
        // x0 (x2 + 1) + (x2 + 1) + x2
        assert_eq!(a, poly(3, order, &[&[0, 2], &[0], &[]]));
    }

    #[test]
    fn test_substitutions() {
        let order = MonomialOrder::Lex;
        let p = poly(3, order.clone(), &[&[0, 1], &[1], &[2]]);

        let mut r = p.clone();
        r.replace_var(1, 2);
        assert_eq!(r, poly(3, order.clone(), &[&[0, 2]]));

        let mut s = p.clone();
        s.set_var(1, false);
        assert_eq!(s, poly(3, order.clone(), &[&[2]]));
        let mut s = p.clone();
        s.set_var(1, true);
        assert_eq!(s, poly(3, order.clone(), &[&[0], &[], &[2]]));

        let mut t = p.clone();
        t.permute(&[Some(2), Some(0), Some(1)]);
        assert_eq!(t, poly(3, order.clone(), &[&[1, 2], &[2], &[0]]));

        let mask = BitVector::from_indices(3, &[1, 2]);
        let mut u = poly(3, order.clone(), &[&[1, 2], &[2]]);
        u.pack(&mask);
        assert_eq!(u, poly(3, order.clone(), &[&[0, 1], &[1]]));
        u.unpack(&mask);
        assert_eq!(u, poly(3, order, &[&[1, 2], &[2]]));
    }

    #[test]
    fn test_s_poly_forms() {
        let order = MonomialOrder::GRevLex;
        let p = poly(4, order.clone(), &[&[0, 1], &[2], &[]]);
        let q = poly(4, order.clone(), &[&[1, 3], &[0]]);
        let s = Polynomial::s_poly(&p, &q);
        // lcm = x0 x1 x3: (x2 + 1) x3 + x0 x0
        assert_eq!(s, poly(4, order.clone(), &[&[2, 3], &[3], &[0]]));
        let mut t = p.clone();
        t.s_poly_assign(&q);
        assert_eq!(t, s);

        let f = Polynomial::s_poly_field(2, &p);
        assert_eq!(f, poly(4, order, &[&[0, 1, 2]]));
    }
}
