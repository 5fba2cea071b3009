//! Result rendering for the command line.

use anyhow::{Context, Result};
use clap::ValueEnum;
use gf2_math::{BuchbergerReport, Ideal};
use num_bigint::BigUint;
use serde::Serialize;

/// Output format for results
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text format (default)
    Text,
    /// JSON format
    Json,
}

/// Engine counters as written to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub pairs_processed: u64,
    pub zero_reductions: u64,
    pub max_s_degree: usize,
    pub a_criterion: u64,
    pub b_criterion: u64,
    pub c_criterion: u64,
    pub buchberger_criterion: u64,
    pub r_criterion: u64,
    pub min_degree: Option<usize>,
    pub max_degree: Option<usize>,
}

impl From<&BuchbergerReport> for StatsOutput {
    fn from(report: &BuchbergerReport) -> Self {
        let s = &report.stats;
        Self {
            pairs_processed: s.pairs_processed,
            zero_reductions: s.zero_reductions,
            max_s_degree: s.max_s_degree,
            a_criterion: s.a_criterion,
            b_criterion: s.b_criterion,
            c_criterion: s.c_criterion,
            buchberger_criterion: s.buchberger_criterion,
            r_criterion: s.r_criterion,
            min_degree: report.min_degree,
            max_degree: report.max_degree,
        }
    }
}

/// Outcome of a Gröbner basis run.
#[derive(Debug, Clone, Serialize)]
pub struct GroebnerOutput {
    pub nvars: usize,
    pub order: String,
    pub basis: Vec<String>,
    pub is_gb: bool,
    /// Decimal, since the dimension may exceed 64 bits; counted over the
    /// variables occurring in the basis
    pub dimension: String,
    /// Number of solutions over all `nvars` variables
    pub solutions: String,
    pub stats: StatsOutput,
    #[serde(skip)]
    report: String,
}

impl GroebnerOutput {
    pub fn new(gb: &Ideal, is_gb: bool, dimension: &BigUint, report: &BuchbergerReport) -> Self {
        Self {
            nvars: gb.nvars(),
            order: gb.order().to_string(),
            basis: gb.iter().map(ToString::to_string).collect(),
            is_gb,
            dimension: dimension.to_string(),
            solutions: solution_count(gb, dimension).to_string(),
            stats: report.into(),
            report: report.to_string(),
        }
    }

    fn to_text(&self, quiet: bool, verbose: bool) -> String {
        let mut text = String::new();
        if !quiet {
            if self.basis.is_empty() {
                text.push_str("{}\n");
            } else {
                text.push_str("{\n  ");
                text.push_str(&self.basis.join(",\n  "));
                text.push_str("\n}\n");
            }
            text.push_str(&format!("Groebner basis: {}\n", self.is_gb));
        }
        text.push_str(&format!("Quotient dimension: {}\n", self.dimension));
        text.push_str(&format!("Solutions over {} variables: {}\n", self.nvars, self.solutions));
        if verbose {
            text.push_str(&self.report);
        }
        text
    }
}

/// Scale the quotient dimension by the variables absent from `gb`.
fn solution_count(gb: &Ideal, dimension: &BigUint) -> BigUint {
    if gb.is_empty() {
        return BigUint::from(1u32) << gb.nvars();
    }
    let free = gb.nvars() - gb.gather_vars().weight();
    dimension << free
}

/// Print `result` to stdout.
pub fn print_result(
    result: &GroebnerOutput,
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", result.to_text(quiet, verbose)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).context("failed to encode JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}
