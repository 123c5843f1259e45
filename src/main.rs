//! Debug harness for the washing machine controller.
//!
//! Every subcommand calls one library function with the given arguments and
//! prints the call followed by its return value.

use std::fmt::{Debug, Display};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fuzzy_washer::{
    combine, fuzzify, temperature, weighted_average, AndOp, Connective, OrOp, RuleId, WashTerm, Washer,
    WasherConfig,
};

#[derive(Parser)]
#[command(name = "fuzzy-washer", version, about, arg_required_else_help = true)]
struct Cli {
    /// TOML file overriding the controller's shapes, weights and operators
    #[arg(long, global = true, env = "FUZZY_WASHER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Degree to which VALUE belongs to fuzzy set SET
    #[command(allow_negative_numbers = true)]
    Fuzzify { set: WashTerm, value: f64 },

    /// Fuzzy AND (min) of two degrees
    Conjunction { a: f64, b: f64 },

    /// Fuzzy OR (max) of two degrees
    Disjunction { a: f64, b: f64 },

    /// Strength of a flat antecedent: OP is AND, OR or SINGLE
    #[command(allow_negative_numbers = true)]
    Antecedent {
        op: Connective,
        set_a: WashTerm,
        val_a: f64,
        #[arg(requires = "val_b")]
        set_b: Option<WashTerm>,
        val_b: Option<f64>,
    },

    /// Weighted output level of rule RULE firing with STRENGTH
    RuleOutput { rule: u32, strength: f64 },

    /// Strengths and weighted outputs of every rule
    #[command(allow_negative_numbers = true)]
    Infer { dirt_amount: f64, fabric_weight: f64 },

    /// Weighted average of rule outputs
    WeightedAverage {
        #[arg(long, value_delimiter = ',', required = true)]
        strengths: Vec<f64>,
        #[arg(long, value_delimiter = ',', required = true)]
        outputs: Vec<f64>,
    },

    /// Wash temperature for already inferred strengths and outputs
    Temperature {
        #[arg(long, value_delimiter = ',', required = true)]
        strengths: Vec<f64>,
        #[arg(long, value_delimiter = ',', required = true)]
        outputs: Vec<f64>,
    },

    /// Full pipeline: crisp inputs to wash temperature
    #[command(allow_negative_numbers = true)]
    Wash { dirt_amount: f64, fabric_weight: f64 },

    /// Membership curve of SET sampled across its variable's universe
    Curve {
        set: WashTerm,
        #[arg(long, default_value_t = 11)]
        points: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        },
    };

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => WasherConfig::load(path)?,
        None => WasherConfig::default(),
    };
    let washer = Washer::new(&config).context("invalid controller configuration")?;

    match cli.command {
        Command::Fuzzify { set, value } => {
            let fuzzy_set = configured_set(&washer, set)?;

            report(format_args!("fuzzify({set}, {value:?})"), fuzzify(fuzzy_set, value));
        },
        Command::Conjunction { a, b } => {
            report(format_args!("conjunction({a:?}, {b:?})"), AndOp::Min.call(a, b));
        },
        Command::Disjunction { a, b } => {
            report(format_args!("disjunction({a:?}, {b:?})"), OrOp::Max.call(a, b));
        },
        Command::Antecedent {
            op,
            set_a,
            val_a,
            set_b,
            val_b,
        } => {
            let a = Some((configured_set(&washer, set_a)?, val_a));
            let (b, call) = match set_b.zip(val_b) {
                Some((set_b, val_b)) => (
                    Some((configured_set(&washer, set_b)?, val_b)),
                    format!("antecedent({op}, {set_a}, {val_a:?}, {set_b}, {val_b:?})"),
                ),
                None => (None, format!("antecedent({op}, {set_a}, {val_a:?})")),
            };

            report(call, combine(op, a, b));
        },
        Command::RuleOutput { rule, strength } => {
            let output = washer.rules().output_value(RuleId(rule), strength)?;

            report(format_args!("rule_output({rule}, {strength:?})"), output);
        },
        Command::Infer {
            dirt_amount,
            fabric_weight,
        } => {
            let result = washer.infer(dirt_amount, fabric_weight)?;

            report(format_args!("infer({dirt_amount:?}, {fabric_weight:?})"), result.into_parts());
        },
        Command::WeightedAverage { strengths, outputs } => {
            let average = weighted_average(&strengths, &outputs)?;

            report(format_args!("weighted_average({strengths:?}, {outputs:?})"), average);
        },
        Command::Temperature { strengths, outputs } => {
            let temperature = temperature(&strengths, &outputs)?;

            report(format_args!("temperature({strengths:?}, {outputs:?})"), temperature);
        },
        Command::Wash {
            dirt_amount,
            fabric_weight,
        } => {
            let temperature = washer.temperature(dirt_amount, fabric_weight)?;

            report(format_args!("wash({dirt_amount:?}, {fabric_weight:?})"), temperature);
        },
        Command::Curve { set, points } => {
            let fuzzy_set = configured_set(&washer, set)?;
            let universe = washer
                .universe(set)
                .with_context(|| format!("no universe configured for `{set}`"))?;

            println!("debug run: curve({set}, {points})");

            for (x, degree) in fuzzy_set.sample(*universe.start(), *universe.end(), points) {
                println!("{x:>10.4} {degree:.4}");
            }
        },
    }

    Ok(())
}

fn configured_set(washer: &Washer, set: WashTerm) -> Result<&fuzzy_washer::FuzzySet> {
    washer
        .fuzzy_set(set)
        .with_context(|| format!("fuzzy set `{set}` is not configured"))
}

fn report(call: impl Display, ret: impl Debug) {
    println!("debug run: {call}");
    println!("ret value: {ret:?}");
}
