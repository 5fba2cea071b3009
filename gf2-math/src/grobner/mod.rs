//! Gröbner bases of Boolean polynomial systems.
//!
//! The engine runs Buchberger's algorithm with the Gebauer-Möller criteria
//! and an additional r-criterion that retires basis elements whose leading
//! monomial became divisible by a newer one. Field equations `x_i^2 + x_i`
//! are never stored; they take part through [`PairSide::Field`] pairs.

use std::fmt;

mod basis;
mod buchberger;
mod pair;

pub use basis::PolyId;
pub use buchberger::{Buchberger, PolyFilter};
pub use pair::{CriticalPair, PairSide};

/// Configuration of the Buchberger engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuchbergerConfig {
    /// Reject S-polynomials of larger degree before reduction; the result is
    /// then not guaranteed to be a Gröbner basis
    pub max_degree: Option<usize>,
    /// Emit a progress event every this many processed pairs (0 disables)
    pub trace_interval: u64,
}

impl Default for BuchbergerConfig {
    fn default() -> Self {
        Self {
            max_degree: None,
            trace_interval: 23,
        }
    }
}

/// Counters of the Buchberger engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuchbergerStats {
    /// Critical pairs taken from the queue
    pub pairs_processed: u64,
    /// S-polynomials reduced to zero
    pub zero_reductions: u64,
    /// Maximum degree of an S-polynomial that entered the basis
    pub max_s_degree: usize,
    /// Pending pairs dropped by the A-criterion
    pub a_criterion: u64,
    /// New pairs dropped by the B-criterion
    pub b_criterion: u64,
    /// Ties resolved by the C-criterion
    pub c_criterion: u64,
    /// Pairs dropped by Buchberger's first (coprime) criterion
    pub buchberger_criterion: u64,
    /// Polynomials moved to the reserve
    pub r_criterion: u64,
}

/// Summary of a Buchberger run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuchbergerReport {
    /// Number of basis polynomials
    pub basis_len: usize,
    /// Minimum degree of the basis polynomials
    pub min_degree: Option<usize>,
    /// Maximum degree of the basis polynomials
    pub max_degree: Option<usize>,
    /// Engine counters
    pub stats: BuchbergerStats,
}

impl fmt::Display for BuchbergerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deg = |d: Option<usize>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        let s = &self.stats;
        writeln!(f, "Buchberger: {} polynomials in the Groebner basis", self.basis_len)?;
        writeln!(
            f,
            "  {}/{} - min/max degree of the basis polynomials",
            deg(self.min_degree),
            deg(self.max_degree)
        )?;
        writeln!(f, "  {} - critical pairs processed", s.pairs_processed)?;
        writeln!(f, "  {} S-polynomials were reduced to 0", s.zero_reductions)?;
        writeln!(f, "  {} - max degree of S-polynomials", s.max_s_degree)?;
        writeln!(
            f,
            "  {}/{}/{} times the A/B/C criteria were applied",
            s.a_criterion, s.b_criterion, s.c_criterion
        )?;
        writeln!(
            f,
            "  {} applications of the 1st Buchberger criterion",
            s.buchberger_criterion
        )?;
        writeln!(f, "  {} polynomials were moved to the reserve", s.r_criterion)
    }
}
