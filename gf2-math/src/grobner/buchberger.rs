//! Buchberger's algorithm over GF(2).
//!
//! Typical use:
//!
//! ```
//! use gf2_math::{Buchberger, Ideal, MonomialOrder};
//!
//! let order = MonomialOrder::GRevLex;
//! let system = Ideal::parse("{x0 x1 + 1}", 2, order.clone()).unwrap();
//! let mut bb = Buchberger::new(2, order);
//! bb.update_ideal(&system);
//! bb.process();
//! let gb = bb.done();
//! assert!(gb.is_gb());
//! assert_eq!(gb.len(), 2);
//! ```
//!
//! Generators may be added after [`process`](Buchberger::process) and the
//! queue drained again; the basis is extended incrementally.

use std::fmt;

use tracing::{debug, trace};

use crate::ideal::Ideal;
use crate::order::MonomialOrder;
use crate::polynomial::Polynomial;

use super::basis::{Basis, PolyId};
use super::pair::CriticalPair;
use super::{BuchbergerConfig, BuchbergerReport, BuchbergerStats};

/// Predicate deciding whether a polynomial may enter the basis.
pub type PolyFilter = Box<dyn FnMut(&Polynomial) -> bool>;

/// Incremental Gröbner basis engine.
///
/// The basis is kept reduced as it grows: a new element is reduced modulo
/// the basis, and every older element is reduced modulo the new one or
/// retired to the reserve if its leading monomial became divisible.
pub struct Buchberger {
    config: BuchbergerConfig,
    basis: Basis,
    pairs: Vec<CriticalPair>,
    processed: Vec<CriticalPair>,
    stats: BuchbergerStats,
    pre_filter: Option<PolyFilter>,
    post_filter: Option<PolyFilter>,
}

impl Buchberger {
    /// Empty engine for `nvars` variables under `order`.
    pub fn new(nvars: usize, order: MonomialOrder) -> Self {
        Self::with_config(nvars, order, BuchbergerConfig::default())
    }

    /// Empty engine with an explicit configuration.
    pub fn with_config(nvars: usize, order: MonomialOrder, config: BuchbergerConfig) -> Self {
        Self {
            config,
            basis: Basis::new(nvars, order),
            pairs: Vec::new(),
            processed: Vec::new(),
            stats: BuchbergerStats::default(),
            pre_filter: None,
            post_filter: None,
        }
    }

    /// Drop the basis, the reserve, all pairs and statistics, and switch to
    /// `order`. Filters and configuration are kept.
    pub fn init(&mut self, order: MonomialOrder) {
        let nvars = self.basis.nvars();
        self.basis.reset(nvars, order);
        self.pairs.clear();
        self.processed.clear();
        self.stats = BuchbergerStats::default();
    }

    /// Reset and load `gb` as the current basis.
    ///
    /// `gb` is trusted to be a Gröbner basis: no pairs are formed and the
    /// filters are not consulted.
    pub fn init_with_basis(&mut self, gb: &Ideal) {
        self.basis.reset(gb.nvars(), gb.order().clone());
        for poly in gb.iter() {
            self.basis.insert(poly.clone());
        }
        self.pairs.clear();
        self.processed.clear();
        self.stats = BuchbergerStats::default();
    }

    /// Install a check run on candidates before reduction.
    pub fn set_pre_filter<F>(&mut self, filter: F)
    where
        F: FnMut(&Polynomial) -> bool + 'static,
    {
        self.pre_filter = Some(Box::new(filter));
    }

    /// Install a check run on candidates after reduction.
    pub fn set_post_filter<F>(&mut self, filter: F)
    where
        F: FnMut(&Polynomial) -> bool + 'static,
    {
        self.post_filter = Some(Box::new(filter));
    }

    /// The configuration.
    #[inline]
    pub fn config(&self) -> &BuchbergerConfig {
        &self.config
    }

    /// The monomial order of the basis.
    #[inline]
    pub fn order(&self) -> &MonomialOrder {
        self.basis.order()
    }

    /// Number of variables.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.basis.nvars()
    }

    /// Counters so far.
    #[inline]
    pub fn stats(&self) -> &BuchbergerStats {
        &self.stats
    }

    /// Number of polynomials in the current basis.
    #[inline]
    pub fn basis_len(&self) -> usize {
        self.basis.active_len()
    }

    /// Number of retired polynomials.
    #[inline]
    pub fn reserve_len(&self) -> usize {
        self.basis.reserve_len()
    }

    /// Pairs waiting to be processed, ascending by LCM.
    #[inline]
    pub fn pending_pairs(&self) -> &[CriticalPair] {
        &self.pairs
    }

    /// Pairs processed so far, in processing order.
    #[inline]
    pub fn processed_pairs(&self) -> &[CriticalPair] {
        &self.processed
    }

    fn accept_pre(&mut self, poly: &Polynomial) -> bool {
        self.pre_filter.as_mut().is_none_or(|f| f(poly))
    }

    fn accept_post(&mut self, poly: &Polynomial) -> bool {
        self.post_filter.as_mut().is_none_or(|f| f(poly))
    }

    fn sort_pairs(pairs: &mut [CriticalPair], order: &MonomialOrder) {
        pairs.sort_by(|a, b| a.compare(b, order));
    }

    // Stable merge of sorted `new` into the sorted queue: on equal LCMs the
    // queued pairs stay first.
    fn merge_pairs(&mut self, mut new: Vec<CriticalPair>) {
        let order = self.basis.order().clone();
        Self::sort_pairs(&mut new, &order);
        self.pairs.append(&mut new);
        Self::sort_pairs(&mut self.pairs, &order);
    }

    /// Add a generator.
    ///
    /// It is reduced modulo the current basis; a nonzero remainder that
    /// passes both filters enters the basis and forms new pairs. Returns
    /// whether the basis was extended.
    pub fn update(&mut self, poly: &Polynomial) -> bool {
        assert_eq!(poly.nvars(), self.nvars(), "variable count mismatch");
        if poly.is_zero() {
            return false;
        }
        let mut poly = poly.with_order(self.order().clone());
        if self.basis.contains(&poly) || !self.accept_pre(&poly) {
            return false;
        }
        self.basis.reduce(&mut poly);
        if poly.is_zero() || !self.accept_post(&poly) {
            return false;
        }
        let id = self.basis.insert(poly);
        self.update_pairs(id);
        true
    }

    /// Add all generators of `ideal`.
    ///
    /// A copy of `ideal` is self-reduced first, then its elements are added
    /// in ascending order.
    pub fn update_ideal(&mut self, ideal: &Ideal) {
        assert_eq!(ideal.nvars(), self.nvars(), "variable count mismatch");
        let mut polys = ideal.with_order(self.order().clone());
        polys.self_reduce();
        while !polys.is_empty() {
            let mut poly = polys.remove_at(0);
            if !self.accept_pre(&poly) {
                continue;
            }
            self.basis.reduce(&mut poly);
            if poly.is_zero() {
                continue;
            }
            if self.accept_post(&poly) {
                let id = self.basis.insert(poly);
                self.update_pairs(id);
            }
            trace!("Buchberger::update: {} polys left", polys.len());
        }
    }

    /// Pair bookkeeping after `id` entered the basis.
    fn update_pairs(&mut self, id: PolyId) {
        let lm = self.basis.lm(id).clone();

        // A: LM(poly) | lcm(f, g) makes (f, g) redundant unless it is an r-pair
        let before = self.pairs.len();
        self.pairs
            .retain(|pair| !lm.divides(pair.lcm()) || pair.is_r_pair());
        self.stats.a_criterion += (before - self.pairs.len()) as u64;

        // R: retire multiples of LM(poly), reduce the rest by poly
        let mut new_pairs: Vec<CriticalPair> = Vec::new();
        for g in self.basis.active_ids() {
            if g == id {
                continue;
            }
            if lm.divides(self.basis.lm(g)) {
                self.basis.retire(g);
                new_pairs.insert(0, CriticalPair::new(g, id, &self.basis));
                self.stats.r_criterion += 1;
            } else {
                self.basis.reduce_member(g, id);
            }
        }
        self.merge_pairs(new_pairs);

        // field equations of the variables of LM(poly)
        let mut new_pairs: Vec<CriticalPair> = Vec::new();
        for var in lm.vars() {
            new_pairs.insert(0, CriticalPair::field(var, id, &self.basis));
        }

        // B and C against the pairs found so far
        for g in self.basis.active_ids() {
            if g == id {
                continue;
            }
            let candidate = CriticalPair::new(g, id, &self.basis);
            let glm = self.basis.lm(g).clone();
            let mut eliminated = false;
            let mut k = 0;
            while k < new_pairs.len() {
                let pair = &new_pairs[k];
                if pair.divides(&candidate) && !lm.divides(&pair.lm1().lcm(&glm)) {
                    if !pair.same_lcm(&candidate) {
                        self.stats.b_criterion += 1;
                        eliminated = true;
                        break;
                    }
                    self.stats.c_criterion += 1;
                    if pair.is_rel_prime() || !candidate.is_rel_prime() {
                        eliminated = true;
                        break;
                    }
                    new_pairs.remove(k);
                } else {
                    k += 1;
                }
            }
            if eliminated {
                continue;
            }
            let before = new_pairs.len();
            new_pairs.retain(|pair| {
                !(candidate.divides(pair)
                    && !candidate.same_lcm(pair)
                    && !lm.divides(&pair.lm1().lcm(&glm)))
            });
            self.stats.b_criterion += (before - new_pairs.len()) as u64;
            new_pairs.push(candidate);
        }

        // Buchberger's first criterion
        let before = new_pairs.len();
        new_pairs.retain(|pair| !pair.is_rel_prime());
        self.stats.buchberger_criterion += (before - new_pairs.len()) as u64;

        self.merge_pairs(new_pairs);
    }

    fn accept_s_poly(&mut self, spoly: &Polynomial) -> bool {
        if let Some(max) = self.config.max_degree
            && spoly.degree().is_some_and(|d| d > max)
        {
            return false;
        }
        self.accept_pre(spoly)
    }

    /// Process pending pairs until none remain.
    ///
    /// If no candidate was rejected by a filter or the degree cutoff, the
    /// basis is then the reduced Gröbner basis of the generators.
    pub fn process(&mut self) {
        let order = self.basis.order().clone();
        while !self.pairs.is_empty() {
            let pair = self.pairs.remove(0);
            let mut spoly = pair.s_polynomial(&self.basis);
            self.stats.pairs_processed += 1;
            self.processed.push(pair);
            Self::sort_pairs(&mut self.pairs, &order);
            if spoly.is_zero() || !self.accept_s_poly(&spoly) {
                continue;
            }
            self.basis.reduce(&mut spoly);
            if spoly.is_zero() {
                self.stats.zero_reductions += 1;
            } else if self.accept_post(&spoly) {
                let degree = spoly.degree().unwrap_or(0);
                let id = self.basis.insert(spoly);
                self.update_pairs(id);
                self.stats.max_s_degree = self.stats.max_s_degree.max(degree);
            }
            let interval = self.config.trace_interval;
            if interval > 0 && self.stats.pairs_processed % interval == 0 {
                debug!(
                    "Buchberger: {} cp / {} poly / {} cp left",
                    self.stats.pairs_processed,
                    self.basis.active_len(),
                    self.pairs.len()
                );
            }
        }
    }

    /// The current basis as an ideal. The engine state is left untouched.
    pub fn done(&self) -> Ideal {
        debug!(
            "Buchberger: done with {} polys after {} pairs",
            self.basis.active_len(),
            self.stats.pairs_processed
        );
        Ideal::from_polynomials(
            self.basis.nvars(),
            self.basis.order().clone(),
            self.basis.to_vec(),
        )
    }

    /// Summary of the current basis and the counters.
    pub fn report(&self) -> BuchbergerReport {
        let degrees = self.basis.active_polys().filter_map(Polynomial::degree);
        let (min_degree, max_degree) = degrees.fold((None, None), |(lo, hi), d| {
            (
                Some(lo.map_or(d, |lo: usize| lo.min(d))),
                Some(hi.map_or(d, |hi: usize| hi.max(d))),
            )
        });
        BuchbergerReport {
            basis_len: self.basis.active_len(),
            min_degree,
            max_degree,
            stats: self.stats.clone(),
        }
    }
}

impl fmt::Debug for Buchberger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buchberger")
            .field("config", &self.config)
            .field("basis", &self.basis)
            .field("pairs", &self.pairs.len())
            .field("processed", &self.processed.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal(text: &str, nvars: usize, order: MonomialOrder) -> Ideal {
        Ideal::parse(text, nvars, order).unwrap()
    }

    #[test]
    fn test_single_equation() {
        let order = MonomialOrder::Lex;
        let mut bb = Buchberger::new(2, order.clone());
        assert!(bb.update(&Polynomial::parse("x0 x1 + 1", 2, order.clone()).unwrap()));
        assert_eq!(bb.pending_pairs().len(), 2);
        bb.process();
        assert!(bb.pending_pairs().is_empty());
        let gb = bb.done();
        assert_eq!(gb, ideal("{x0 + 1, x1 + 1}", 2, order));
        assert_eq!(bb.reserve_len(), 1);
        assert_eq!(bb.processed_pairs().len() as u64, bb.stats().pairs_processed);
        assert_eq!(bb.stats().a_criterion, 1);
        assert_eq!(bb.stats().buchberger_criterion, 1);
    }

    #[test]
    fn test_update_rejects_known_and_reducible() {
        let order = MonomialOrder::GRevLex;
        let mut bb = Buchberger::new(3, order.clone());
        let p = Polynomial::parse("x0 + x1", 3, order.clone()).unwrap();
        assert!(bb.update(&p));
        assert!(!bb.update(&p));
        assert!(!bb.update(&Polynomial::zero(3, order.clone())));
        // x0 x2 + x1 x2 = x2 (x0 + x1)
        let q = Polynomial::parse("x0 x2 + x1 x2", 3, order).unwrap();
        assert!(!bb.update(&q));
        assert_eq!(bb.basis_len(), 1);
    }

    #[test]
    fn test_incremental_updates_match_batch() {
        let order = MonomialOrder::GRevLex;
        let system = ideal("{x0 x1 + x2, x1 x2 + x0 + 1, x0 x2 + x1}", 3, order.clone());

        let mut batch = Buchberger::new(3, order.clone());
        batch.update_ideal(&system);
        batch.process();
        let expected = batch.done();
        assert!(expected.is_gb());

        let mut inc = Buchberger::new(3, order.clone());
        for p in system.iter() {
            inc.update(p);
            inc.process();
        }
        let mut got = inc.done();
        got.self_reduce();
        let mut want = expected.clone();
        want.self_reduce();
        assert_eq!(got, want);
        assert_eq!(got.quotient_basis_dim(), expected.quotient_basis_dim());
    }

    #[test]
    fn test_init_with_basis_keeps_basis() {
        let order = MonomialOrder::Lex;
        let gb = ideal("{x0 + 1, x1 + 1}", 2, order.clone());
        let mut bb = Buchberger::new(2, MonomialOrder::GrLex);
        bb.init_with_basis(&gb);
        assert_eq!(bb.order(), &order);
        bb.process();
        assert_eq!(bb.done(), gb);
        assert_eq!(bb.stats(), &BuchbergerStats::default());

        bb.init(MonomialOrder::GRevLex);
        assert_eq!(bb.basis_len(), 0);
        assert!(bb.done().is_empty());
    }

    #[test]
    fn test_filters_limit_basis() {
        let order = MonomialOrder::GRevLex;
        let mut bb = Buchberger::new(3, order.clone());
        bb.set_post_filter(|p| p.degree().is_some_and(|d| d >= 2));
        bb.update_ideal(&ideal("{x0 x1 + x2, x1 x2 + x0}", 3, order.clone()));
        bb.process();
        let filtered = bb.done();
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|p| p.lm().degree() >= 2));

        let config = BuchbergerConfig {
            max_degree: Some(0),
            ..Default::default()
        };
        let mut bb = Buchberger::with_config(2, order.clone(), config);
        bb.update(&Polynomial::parse("x0 x1 + 1", 2, order).unwrap());
        bb.process();
        // every S-polynomial has degree 1 and is cut off
        assert_eq!(bb.basis_len(), 1);
        assert_eq!(bb.stats().zero_reductions, 0);
    }

    #[test]
    fn test_report() {
        let order = MonomialOrder::Lex;
        let mut bb = Buchberger::new(2, order.clone());
        bb.update(&Polynomial::parse("x0 x1 + 1", 2, order).unwrap());
        bb.process();
        let report = bb.report();
        assert_eq!(report.basis_len, 2);
        assert_eq!(report.min_degree, Some(1));
        assert_eq!(report.max_degree, Some(1));
        assert_eq!(report.stats.max_s_degree, 1);
    }
}
