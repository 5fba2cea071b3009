//! GF2 CLI - Command-line Gröbner basis computations over GF(2)

mod output;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use gf2_func::Substitution;
use gf2_math::{Buchberger, BuchbergerConfig, Ideal, MonomialOrder};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use output::{GroebnerOutput, OutputFormat, print_result};

/// Monomial order of the computation
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OrderArg {
    /// Lexicographic
    Lex,
    /// Degree, then lexicographic
    Grlex,
    /// Degree, then reverse lexicographic
    Grevlex,
}

impl From<OrderArg> for MonomialOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Lex => MonomialOrder::Lex,
            OrderArg::Grlex => MonomialOrder::GrLex,
            OrderArg::Grevlex => MonomialOrder::GRevLex,
        }
    }
}

/// Verbosity level
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// Results only
    Quiet,
    /// Basis and dimension
    Normal,
    /// Also the engine report
    Verbose,
    /// Debug output
    Debug,
    /// Trace output
    Trace,
}

/// Gröbner bases of Boolean polynomial systems
#[derive(Parser, Debug)]
#[command(name = "gf2")]
#[command(version)]
#[command(about = "Groebner bases of Boolean polynomial systems")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value = "normal", global = true)]
    verbosity: Verbosity,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the Gröbner basis of an ideal such as `{x0 x1 + 1, x2}`
    Groebner {
        /// Input file (stdin if omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Number of variables
        #[arg(short = 'n', long)]
        vars: usize,

        /// Monomial order
        #[arg(short, long, value_enum, default_value = "grevlex")]
        order: OrderArg,

        /// Reject S-polynomials above this degree
        #[arg(long)]
        max_degree: Option<usize>,
    },
    /// Compute the Gröbner basis of the graph of an S-box
    Sbox {
        /// Images of 0, 1, 2, ... separated by commas
        #[arg(short, long, value_delimiter = ',', required = true)]
        table: Vec<u64>,

        /// Monomial order
        #[arg(short, long, value_enum, default_value = "grevlex")]
        order: OrderArg,

        /// Reject S-polynomials above this degree
        #[arg(long)]
        max_degree: Option<usize>,
    },
}

fn init_tracing(verbosity: Verbosity) -> Result<()> {
    if verbosity >= Verbosity::Verbose {
        let level = match verbosity {
            Verbosity::Trace => Level::TRACE,
            Verbosity::Debug => Level::DEBUG,
            _ => Level::INFO,
        };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("failed to set tracing subscriber")?;
    }
    Ok(())
}

fn read_ideal(file: Option<&PathBuf>, nvars: usize, order: MonomialOrder) -> Result<Ideal> {
    let text = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read stdin")?,
    };
    Ideal::parse(&text, nvars, order).context("failed to parse the ideal")
}

/// Number of bits of an S-box table with `len` entries.
fn sbox_bits(len: usize) -> Result<usize> {
    if len < 2 || !len.is_power_of_two() {
        bail!("S-box table must have 2^n entries with n > 0, got {}", len);
    }
    Ok(len.trailing_zeros() as usize)
}

fn groebner(ideal: &Ideal, max_degree: Option<usize>) -> GroebnerOutput {
    let config = BuchbergerConfig {
        max_degree,
        ..Default::default()
    };
    let mut bb = Buchberger::with_config(ideal.nvars(), ideal.order().clone(), config);
    bb.update_ideal(ideal);
    bb.process();
    let gb = bb.done();
    let report = bb.report();
    let is_gb = gb.is_gb();
    let dimension = gb.quotient_basis_dim();
    info!(
        "{} polys, Groebner basis: {}, quotient dimension {}",
        gb.len(),
        is_gb,
        dimension
    );
    let out = GroebnerOutput::new(&gb, is_gb, &dimension, &report);
    info!("{} solutions over {} variables", out.solutions, out.nvars);
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbosity)?;

    let result = match &args.command {
        Command::Groebner {
            file,
            vars,
            order,
            max_degree,
        } => {
            let ideal = read_ideal(file.as_ref(), *vars, (*order).into())?;
            groebner(&ideal, *max_degree)
        }
        Command::Sbox {
            table,
            order,
            max_degree,
        } => {
            let bits = sbox_bits(table.len())?;
            let sbox = Substitution::from_table(bits, table).context("invalid S-box table")?;
            let ideal = sbox.function().to_ideal((*order).into());
            groebner(&ideal, *max_degree)
        }
    };

    print_result(
        &result,
        args.format,
        args.verbosity == Verbosity::Quiet,
        args.verbosity >= Verbosity::Verbose,
    )
}
