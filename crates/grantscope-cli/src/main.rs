//! grantscope - command-line front end for authorization constraints.
//!
//! # Configuration
//!
//! The caller context for `check` and `derive` is taken from, highest
//! priority first:
//!
//! 1. `--local` / `--active` / `--no-session` arguments
//! 2. `--context <FILE>` or `GRANTSCOPE_CONTEXT` (JSON caller snapshot)
//! 3. Default: a caller in a session whose properties are unknown
//!
//! # Logging
//!
//! Logs go to stderr. `--debug` > `--verbose` > `RUST_LOG` > `warn`.

mod context;
mod report;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use context::ContextArgs;
use grantscope_auth::AuthorizationConstraint;
use report::ConstraintReport;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line front end for authorization constraints.
#[derive(Parser, Debug)]
#[command(name = "grantscope")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show what a constraint token requires.
    Describe {
        /// Constraint token: none, local, active or local+active.
        token: String,
    },

    /// List every constraint.
    List,

    /// Check whether a caller context satisfies a constraint.
    Check {
        /// Constraint token: none, local, active or local+active.
        token: String,

        #[command(flatten)]
        context: ContextArgs,

        /// Exit with status 1 when the constraint is not satisfied.
        #[arg(long)]
        strict: bool,
    },

    /// Derive the tightest constraint for a caller context.
    Derive {
        #[command(flatten)]
        context: ContextArgs,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);

    match args.command {
        Command::Describe { token } => {
            let constraint = parse_token(&token)?;
            emit(&ConstraintReport::describe(constraint), args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List => {
            for constraint in AuthorizationConstraint::CANONICAL {
                emit(&ConstraintReport::describe(constraint), args.json)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            token,
            context,
            strict,
        } => {
            let constraint = parse_token(&token)?;
            let caller = context.resolve()?;
            let satisfied = constraint.is_satisfied_by_caller(&caller);
            info!(constraint = %constraint, satisfied, "checked caller");

            emit(&ConstraintReport::check(constraint, satisfied), args.json)?;
            if strict && !satisfied {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Derive { context } => {
            let caller = context.resolve()?;
            let constraint = AuthorizationConstraint::from_caller(&caller);
            info!(constraint = %constraint, "derived constraint");

            emit(&ConstraintReport::derive(constraint), args.json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(args: &Args) {
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_token(token: &str) -> Result<AuthorizationConstraint> {
    token
        .parse()
        .with_context(|| format!("invalid constraint argument '{token}'"))
}

fn emit(report: &ConstraintReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report).context("encode report")?);
    } else {
        println!("{}", report.render()?);
    }
    Ok(())
}
