//! Schemer batch runner
//!
//! Evaluates a file, inline expressions, or standard input, printing the
//! written form of each top-level result. The first failure ends the run.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use schemer::{parse_top_level, Environment, EvalContext, Reader, SchemeError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Run Scheme programs.
#[derive(Debug, Parser)]
#[command(name = "schemer", version, about)]
struct Cli {
    /// Source file to run; standard input when omitted and no -e is given
    file: Option<PathBuf>,

    /// Evaluate an expression (repeatable, runs before FILE)
    #[arg(short, long = "eval", value_name = "EXPR")]
    eval: Vec<String>,

    /// Log every evaluate/apply step
    #[arg(long)]
    trace: bool,

    /// Fail once this many continuation frames are pending
    #[arg(long, value_name = "N")]
    max_stack_depth: Option<usize>,

    /// Do not print results
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Evaluate every source in order; the exit status on success.
fn run(cli: &Cli) -> anyhow::Result<u8> {
    let ctx = EvalContext {
        max_stack_depth: cli.max_stack_depth,
        trace: cli.trace,
    };
    let env = Environment::global();

    let mut sources = cli.eval.clone();
    match &cli.file {
        Some(path) => sources.push(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
        ),
        None if cli.eval.is_empty() => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading standard input")?;
            sources.push(input);
        }
        None => {}
    }

    let mut out = io::stdout().lock();
    for source in &sources {
        match run_source(source, &env, &ctx, cli.quiet, &mut out) {
            Ok(()) => {}
            Err(err) => match err.downcast_ref::<SchemeError>().and_then(SchemeError::exit_code) {
                Some(code) => {
                    tracing::debug!(code, "exiting");
                    return Ok(u8::try_from(code).unwrap_or(1));
                }
                None => return Err(err),
            },
        }
    }
    Ok(0)
}

fn run_source(
    source: &str,
    env: &Environment,
    ctx: &EvalContext,
    quiet: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for datum in Reader::new(source) {
        let expr = parse_top_level(&datum.map_err(SchemeError::from)?)
            .map_err(SchemeError::from)?;
        let value = schemer::evaluate_with(&expr, env, ctx).map_err(SchemeError::from)?;
        if !quiet && !value.is_void() {
            writeln!(out, "{:?}", value).context("writing result")?;
        }
    }
    Ok(())
}
