//! Systems of Boolean polynomials.
//!
//! An [`Ideal`] is a duplicate-free list of nonzero polynomials sharing one
//! monomial order, sorted ascending by [`Polynomial::compare`]. Since the
//! comparison starts with the leading monomials, the leading monomials are
//! ascending too, and a scan for a divisor of some monomial `m` can stop at
//! the first element whose leading monomial exceeds `m`.
//!
//! The field equations `x_i^2 = x_i` are implicit: monomials are squarefree,
//! and Gröbner basis checks add the S-polynomials against them explicitly.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::trace;

use crate::bitvec::BitVector;
use crate::monomial::Monomial;
use crate::order::MonomialOrder;
use crate::polynomial::{Geobucket, Polynomial};

/// Growth factor of the reduction geobuckets.
const REDUCE_FACTOR: usize = 2;
/// Trace period of the quotient basis loops.
const TRACE_PERIOD: usize = 23;

/// Normal form of `poly` modulo `divisors`, which must be sorted ascending.
///
/// Every monomial of the result is irreducible. Returns whether `poly`
/// changed.
pub(crate) fn reduce_by<'a, I>(divisors: I, poly: &mut Polynomial) -> bool
where
    I: Iterator<Item = &'a Polynomial> + Clone,
{
    let order = poly.order().clone();
    let empty = Polynomial::zero(poly.nvars(), order.clone());
    let mut gb = Geobucket::from_polynomial(REDUCE_FACTOR, std::mem::replace(poly, empty));
    let mut changed = false;
    while let Some(lm) = gb.pop_lm() {
        let mut divided = false;
        for g in divisors.clone() {
            let glm = g.lm();
            if order.greater(glm, &lm) {
                break;
            }
            if glm.divides(&lm) {
                let mut part = g.tail();
                part.mul_monomial(&lm.divide(glm));
                gb.sym_diff_splice(&mut part);
                changed = true;
                divided = true;
                break;
            }
        }
        if !divided {
            poly.push_trailing(lm);
        }
    }
    changed
}

/// Reduce the leading monomial of `poly` modulo `divisors` until it is
/// irreducible; the tail is left alone.
pub(crate) fn minimize_by<'a, I>(divisors: I, poly: &mut Polynomial) -> bool
where
    I: Iterator<Item = &'a Polynomial> + Clone,
{
    let order = poly.order().clone();
    let empty = Polynomial::zero(poly.nvars(), order.clone());
    let mut gb = Geobucket::from_polynomial(REDUCE_FACTOR, std::mem::replace(poly, empty));
    let mut changed = false;
    'pop: while let Some(lm) = gb.pop_lm() {
        for g in divisors.clone() {
            let glm = g.lm();
            if order.greater(glm, &lm) {
                break;
            }
            if glm.divides(&lm) {
                let mut part = g.tail();
                part.mul_monomial(&lm.divide(glm));
                gb.sym_diff_splice(&mut part);
                changed = true;
                continue 'pop;
            }
        }
        gb.sym_diff(&lm);
        break;
    }
    *poly = gb.mount();
    changed
}

fn reduce_classic_by<'a, I>(divisors: I, poly: &mut Polynomial) -> bool
where
    I: Iterator<Item = &'a Polynomial> + Clone,
{
    let order = poly.order().clone();
    let mut changed = false;
    let mut pos = 0;
    while let Some(m) = poly.get(pos).cloned() {
        let divisor = divisors
            .clone()
            .take_while(|g| !order.greater(g.lm(), &m))
            .find(|g| g.lm().divides(&m));
        match divisor {
            Some(g) => {
                let mut part = g.clone();
                part.mul_monomial(&m.divide(g.lm()));
                poly.sym_diff_splice(&mut part);
                changed = true;
                pos = 0;
            }
            None => pos += 1,
        }
    }
    changed
}

fn minimize_classic_by<'a, I>(divisors: I, poly: &mut Polynomial) -> bool
where
    I: Iterator<Item = &'a Polynomial> + Clone,
{
    let order = poly.order().clone();
    let mut changed = false;
    while let Some(lm) = poly.leading_monomial().cloned() {
        let divisor = divisors
            .clone()
            .take_while(|g| !order.greater(g.lm(), &lm))
            .find(|g| g.lm().divides(&lm));
        let Some(g) = divisor else {
            break;
        };
        let mut part = g.clone();
        part.mul_monomial(&lm.divide(g.lm()));
        poly.sym_diff_splice(&mut part);
        changed = true;
    }
    changed
}

type Others<'a> =
    std::iter::Chain<std::slice::Iter<'a, Polynomial>, std::slice::Iter<'a, Polynomial>>;

/// Sorted system of nonzero Boolean polynomials.
#[derive(Clone)]
pub struct Ideal {
    nvars: usize,
    order: MonomialOrder,
    polys: Vec<Polynomial>,
}

impl Ideal {
    /// Empty system.
    pub fn new(nvars: usize, order: MonomialOrder) -> Self {
        Self {
            nvars,
            order,
            polys: Vec::new(),
        }
    }

    /// System generated by `polys`; zero polynomials and repetitions are
    /// dropped and the rest is re-sorted under `order`.
    pub fn from_polynomials(
        nvars: usize,
        order: MonomialOrder,
        polys: impl IntoIterator<Item = Polynomial>,
    ) -> Self {
        let mut ideal = Self {
            nvars,
            order,
            polys: polys.into_iter().collect(),
        };
        ideal.normalize();
        ideal
    }

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

    /// Number of polynomials.
    #[inline]
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// Whether the system is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// Polynomials in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Polynomial> {
        self.polys.iter()
    }

    /// Polynomials as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Polynomial] {
        &self.polys
    }

    /// Polynomial at position `pos`.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&Polynomial> {
        self.polys.get(pos)
    }

    /// Leading monomial of the polynomial at `pos`.
    #[inline]
    pub fn lm(&self, pos: usize) -> &Monomial {
        self.polys[pos].lm()
    }

    /// Remove all polynomials.
    pub fn clear(&mut self) {
        self.polys.clear();
    }

    // Ordering

    /// Re-express every polynomial under the system's order, drop zeros and
    /// duplicates, and sort.
    pub fn normalize(&mut self) {
        let order = self.order.clone();
        self.polys.retain(|p| !p.is_zero());
        for p in self.polys.iter_mut() {
            debug_assert_eq!(p.nvars(), self.nvars);
            p.set_order(order.clone());
        }
        self.polys.sort_by(Polynomial::compare);
        self.polys.dedup();
    }

    /// Whether the polynomials are nonzero, sorted under the system's order
    /// and strictly ascending.
    pub fn is_normalized(&self) -> bool {
        self.polys
            .iter()
            .all(|p| !p.is_zero() && *p.order() == self.order)
            && self
                .polys
                .windows(2)
                .all(|w| w[0].compare(&w[1]) == Ordering::Less)
    }

    /// Switch to another order.
    pub fn set_order(&mut self, order: MonomialOrder) {
        if order != self.order {
            self.order = order;
            self.normalize();
        }
    }

    /// Copy under another order.
    #[must_use]
    pub fn with_order(&self, order: MonomialOrder) -> Self {
        let mut ideal = self.clone();
        ideal.set_order(order);
        ideal
    }

    /// Locate `poly`: `Ok(pos)` if present, `Err(pos)` for the insertion
    /// point otherwise.
    pub fn find(&self, poly: &Polynomial) -> Result<usize, usize> {
        if *poly.order() == self.order {
            self.polys.binary_search_by(|p| p.compare(poly))
        } else {
            let poly = poly.with_order(self.order.clone());
            self.polys.binary_search_by(|p| p.compare(&poly))
        }
    }

    /// Whether `poly` belongs to the system.
    pub fn contains(&self, poly: &Polynomial) -> bool {
        self.find(poly).is_ok()
    }

    // Insertion and removal

    /// Insert `poly` unless present; returns its position.
    ///
    /// # Panics
    /// Panics if `poly` is zero.
    pub fn insert(&mut self, mut poly: Polynomial) -> usize {
        assert!(!poly.is_zero(), "zero polynomial inserted into an ideal");
        debug_assert_eq!(poly.nvars(), self.nvars);
        poly.set_order(self.order.clone());
        match self.find(&poly) {
            Ok(pos) => pos,
            Err(pos) => {
                self.polys.insert(pos, poly);
                pos
            }
        }
    }

    /// Insert every nonzero polynomial of `other`.
    pub fn insert_all(&mut self, other: &Ideal) {
        for p in other.iter() {
            self.insert(p.clone());
        }
    }

    /// Remove `poly` if present.
    pub fn remove(&mut self, poly: &Polynomial) -> bool {
        match self.find(poly) {
            Ok(pos) => {
                self.polys.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove every polynomial of `other`.
    pub fn remove_all(&mut self, other: &Ideal) {
        for p in other.iter() {
            self.remove(p);
        }
    }

    /// Remove and return the polynomial at `pos`.
    pub fn remove_at(&mut self, pos: usize) -> Polynomial {
        self.polys.remove(pos)
    }

    /// Remove the polynomials whose degree satisfies `pred`.
    pub fn remove_degree(&mut self, mut pred: impl FnMut(usize) -> bool) {
        self.polys
            .retain(|p| !p.degree().is_some_and(&mut pred));
    }

    /// Count the polynomials whose degree satisfies `pred`.
    pub fn count_degree(&self, mut pred: impl FnMut(usize) -> bool) -> usize {
        self.polys
            .iter()
            .filter(|p| p.degree().is_some_and(&mut pred))
            .count()
    }

    /// Restore the order after the polynomial at `pos` was changed in place.
    ///
    /// Returns its new position. If it now equals another element it is
    /// dropped and the position of that element is returned.
    pub fn move_at(&mut self, pos: usize) -> usize {
        let poly = self.polys.remove(pos);
        assert!(!poly.is_zero(), "zero polynomial in an ideal");
        match self.find(&poly) {
            Ok(existing) => existing,
            Err(at) => {
                self.polys.insert(at, poly);
                at
            }
        }
    }

    /// Move the polynomial at `pos` of `other` into `self`.
    ///
    /// If `self` already contains it, it is just removed from `other`.
    /// Returns its position in `self`.
    pub fn splice_from(&mut self, other: &mut Ideal, pos: usize) -> usize {
        let poly = other.remove_at(pos);
        self.insert(poly)
    }

    // Gathering

    /// Minimum degree of the polynomials.
    pub fn min_degree(&self) -> Option<usize> {
        self.polys.iter().filter_map(Polynomial::degree).min()
    }

    /// Maximum degree of the polynomials.
    pub fn max_degree(&self) -> Option<usize> {
        self.polys.iter().filter_map(Polynomial::degree).max()
    }

    /// Mask of the variables that occur in some polynomial.
    pub fn gather_vars(&self) -> BitVector {
        let mut mask = BitVector::zeros(self.nvars);
        for p in &self.polys {
            mask |= &p.vars();
        }
        mask
    }

    /// All monomials that occur in some polynomial.
    pub fn gather_monomials(&self) -> Polynomial {
        let mut all = Polynomial::zero(self.nvars, self.order.clone());
        for p in &self.polys {
            all.union(p);
        }
        all
    }

    /// The leading monomials.
    pub fn gather_lms(&self) -> Polynomial {
        let mut lms = Polynomial::zero(self.nvars, self.order.clone());
        for p in &self.polys {
            lms.union_monomial(p.lm());
        }
        lms
    }

    /// The leading monomials that are not multiples of other leading
    /// monomials.
    pub fn gather_min_lms(&self) -> Polynomial {
        let mut kept: Vec<&Monomial> = Vec::new();
        for p in &self.polys {
            let lm = p.lm();
            if !kept.iter().any(|k| k.divides(lm)) {
                kept.push(lm);
            }
        }
        Polynomial::from_monomials(self.nvars, self.order.clone(), kept.into_iter().cloned())
    }

    // Reduction

    /// Normal form of an external polynomial modulo the system.
    ///
    /// Returns whether `poly` changed.
    pub fn reduce(&self, poly: &mut Polynomial) -> bool {
        poly.set_order(self.order.clone());
        reduce_by(self.polys.iter(), poly)
    }

    /// [`reduce`](Self::reduce) without a geobucket.
    pub fn reduce_classic(&self, poly: &mut Polynomial) -> bool {
        poly.set_order(self.order.clone());
        reduce_classic_by(self.polys.iter(), poly)
    }

    /// Reduce the leading monomial of `poly` until no leading monomial of
    /// the system divides it.
    pub fn minimize(&self, poly: &mut Polynomial) -> bool {
        poly.set_order(self.order.clone());
        minimize_by(self.polys.iter(), poly)
    }

    /// [`minimize`](Self::minimize) without a geobucket.
    pub fn minimize_classic(&self, poly: &mut Polynomial) -> bool {
        poly.set_order(self.order.clone());
        minimize_classic_by(self.polys.iter(), poly)
    }

    // Applies `f` to the polynomial at `pos` with every other element as
    // divisor. The polynomial may be left zero or out of place; see
    // `move_at`.
    fn at_with<F>(&mut self, pos: usize, f: F) -> bool
    where
        F: for<'a> FnOnce(Others<'a>, &mut Polynomial) -> bool,
    {
        let empty = Polynomial::zero(self.nvars, self.order.clone());
        let mut poly = std::mem::replace(&mut self.polys[pos], empty);
        let (before, rest) = self.polys.split_at(pos);
        let changed = f(before.iter().chain(rest[1..].iter()), &mut poly);
        self.polys[pos] = poly;
        changed
    }

    /// Reduce the element at `pos` modulo the others, in place.
    ///
    /// Afterwards remove it if it became zero, otherwise call
    /// [`move_at`](Self::move_at).
    pub fn reduce_at(&mut self, pos: usize) -> bool {
        self.at_with(pos, |others, poly| reduce_by(others, poly))
    }

    /// [`reduce_at`](Self::reduce_at) without a geobucket.
    pub fn reduce_at_classic(&mut self, pos: usize) -> bool {
        self.at_with(pos, |others, poly| reduce_classic_by(others, poly))
    }

    /// Minimize the element at `pos` modulo the others, in place.
    pub fn minimize_at(&mut self, pos: usize) -> bool {
        self.at_with(pos, |others, poly| minimize_by(others, poly))
    }

    /// [`minimize_at`](Self::minimize_at) without a geobucket.
    pub fn minimize_at_classic(&mut self, pos: usize) -> bool {
        self.at_with(pos, |others, poly| minimize_classic_by(others, poly))
    }

    fn self_apply(&mut self, what: &str, step: fn(&mut Self, usize) -> bool) {
        debug_assert!(self.is_normalized());
        loop {
            let mut changed = false;
            let mut pos = self.polys.len();
            while pos > 0 {
                pos -= 1;
                if !step(self, pos) {
                    continue;
                }
                changed = true;
                trace!(
                    "{}: {} polys ({} mons)",
                    what,
                    self.polys.len(),
                    self.polys[pos].len()
                );
                if self.polys[pos].is_zero() {
                    self.polys.remove(pos);
                } else if self.move_at(pos) < pos {
                    // the element below `pos` moved up by one
                    pos += 1;
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// Replace every element by its normal form modulo the others until
    /// nothing changes; zero forms are dropped.
    pub fn self_reduce(&mut self) {
        self.self_apply("self_reduce", Self::reduce_at);
    }

    /// Minimize every element modulo the others until no leading monomial
    /// divides another one; zero results are dropped.
    pub fn self_minimize(&mut self) {
        self.self_apply("self_minimize", Self::minimize_at);
    }

    // Substitutions

    fn map_all(&mut self, mut f: impl FnMut(&mut Polynomial)) {
        for p in self.polys.iter_mut() {
            f(p);
        }
        self.normalize();
    }

    /// Substitute `with` for `x_pos` in every element.
    pub fn replace(&mut self, pos: usize, with: &Polynomial) {
        self.map_all(|p| p.replace(pos, with));
    }

    /// Substitute `x_new` for `x_pos` in every element.
    pub fn replace_var(&mut self, pos: usize, new: usize) {
        if pos != new {
            self.map_all(|p| p.replace_var(pos, new));
        }
    }

    /// Rename the variables of every element, see [`Polynomial::permute`].
    pub fn permute(&mut self, pi: &[Option<usize>]) {
        self.map_all(|p| p.permute(pi));
    }

    /// Substitute a constant for `x_pos` in every element.
    pub fn set_var(&mut self, pos: usize, value: bool) {
        self.map_all(|p| p.set_var(pos, value));
    }

    /// Pack the variables of every element, see [`Polynomial::pack`].
    pub fn pack(&mut self, mask: &BitVector) {
        self.map_all(|p| p.pack(mask));
    }

    /// Inverse of [`pack`](Self::pack).
    pub fn unpack(&mut self, mask: &BitVector) {
        self.map_all(|p| p.unpack(mask));
    }

    // Gröbner bases

    /// Buchberger's criterion: whether the system is a Gröbner basis of the
    /// ideal it generates together with the field equations.
    pub fn is_gb(&self) -> bool {
        for (k, f) in self.polys.iter().enumerate().rev() {
            for i in f.lm().vars() {
                let mut s = Polynomial::s_poly_field(i, f);
                self.reduce(&mut s);
                if !s.is_zero() {
                    return false;
                }
            }
            for g in self.polys[..k].iter().rev() {
                if f.lm().is_rel_prime(g.lm()) {
                    continue;
                }
                let mut s = Polynomial::s_poly(f, g);
                self.reduce(&mut s);
                if !s.is_zero() {
                    return false;
                }
            }
            trace!("is_gb: {} polys checked", self.polys.len() - k);
        }
        true
    }

    /// Monomials not divisible by any leading monomial, in the essential
    /// variables, sorted under `order`.
    ///
    /// The system must be a Gröbner basis. The result spans the quotient
    /// ring as a vector space; its size is the number of solutions of the
    /// system in the essential variables.
    pub fn quotient_basis(&self, order: MonomialOrder) -> Polynomial {
        let mut basis = Polynomial::zero(self.nvars, order.clone());
        if self.is_empty() {
            return basis;
        }
        let vars = self.gather_vars();
        if vars.is_all_zero() {
            return basis;
        }
        let mons = self.gather_min_lms();
        let mut tosee = Polynomial::one(self.nvars, order);
        while let Some(mon) = tosee.pop_trailing() {
            if !mons.iter().any(|m| m.divides(&mon)) && !basis.contains(&mon) {
                basis.union_monomial(&mon);
                for cur in vars.ones_iter().filter(|&v| !mon.test(v)) {
                    let mut next = mon.clone();
                    next.set(cur, true);
                    tosee.union_monomial(&next);
                }
            }
            if tosee.len() % TRACE_PERIOD == 0 {
                trace!(
                    "quotient_basis: {} elems ({} to see)",
                    basis.len(),
                    tosee.len()
                );
            }
        }
        basis
    }

    /// Dimension of the quotient ring over GF(2), counted in the essential
    /// variables.
    ///
    /// The system must be a Gröbner basis. Counts the solutions of
    /// `m = 0` for the minimal leading monomials `m` by branching on one
    /// variable at a time.
    pub fn quotient_basis_dim(&self) -> BigUint {
        let mut dim = BigUint::zero();
        if self.is_empty() {
            return dim;
        }
        let mons = self.gather_min_lms();
        if mons.is_one() {
            return dim;
        }
        let pow2 = |k: usize| BigUint::one() << k;
        let mut pending: Vec<(BitVector, Polynomial)> = vec![(self.gather_vars(), mons)];
        while let Some((vars, mons)) = pending.pop() {
            let free = vars.weight();
            match mons.len() {
                0 => dim += pow2(free),
                1 => dim += pow2(free) - pow2(free - mons.lm().degree()),
                _ => {
                    let pick = mons
                        .iter()
                        .rev()
                        .find(|m| m.degree() == 1)
                        .or_else(|| mons.leading_monomial())
                        .cloned()
                        .unwrap_or_default();
                    let Some(var) = pick.vars().next() else {
                        // the constant 1 leaves no solutions
                        continue;
                    };
                    let mut rest = vars.clone();
                    rest.set(var, false);
                    let mut zero = mons.clone();
                    zero.set_var(var, false);
                    if pick.degree() > 1 {
                        let mut one = zero.clone();
                        for m in mons.iter().filter(|m| m.test(var)) {
                            let mut cleared = m.clone();
                            cleared.set(var, false);
                            one.union_monomial(&cleared);
                        }
                        pending.push((rest.clone(), one));
                    }
                    // on top, so `var = 0` is counted first
                    pending.push((rest, zero));
                }
            }
            if pending.len() % TRACE_PERIOD == 0 {
                trace!("quotient_basis_dim: {} branches remain", pending.len());
            }
        }
        dim
    }
}

impl PartialEq for Ideal {
    fn eq(&self, other: &Self) -> bool {
        if self.nvars != other.nvars || self.len() != other.len() {
            return false;
        }
        if self.order == other.order {
            self.polys == other.polys
        } else {
            other.iter().all(|p| self.contains(p))
        }
    }
}

impl Eq for Ideal {}

impl fmt::Display for Ideal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}\n");
        }
        for (k, p) in self.polys.iter().enumerate() {
            f.write_str(if k == 0 { "{\n  " } else { ",\n  " })?;
            write!(f, "{p}")?;
        }
        f.write_str("\n}\n")
    }
}

impl fmt::Debug for Ideal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ideal[{}; {}]{self}", self.nvars, self.order)
    }
}
