use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;

use tapcalc::config::{read_config, Config};
use tapcalc::{evaluate, format_result, EvalError, ERROR_TEXT};

#[cfg(feature = "line")]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

#[derive(Parser, Debug)]
#[command(version, about = "Keypad calculator for the terminal")]
struct Args {
    #[arg(short, long, help = "Evaluate one expression, print the result and exit")]
    eval: Option<String>,

    #[arg(long, help = "Use the raw line driver instead of the full-screen one")]
    line: bool,

    #[arg(short, long, help = "A toml file containing configuration")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "The file to write logs to, by default they are swallowed")]
    log_file: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count,
          help = "Show more in logs, may be provided multiple times")]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = read_config(args.config.as_deref())?;

    if let Some(expr) = &args.eval {
        return run_eval(expr, &mut io::stdout().lock());
    }

    run_interactive(&args, config)?;
    Ok(ExitCode::SUCCESS)
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(log_file) = &args.log_file else {
        // The terminal belongs to the driver, nowhere else to write.
        return Ok(());
    };

    let log_level_filter = if args.verbose == 0 {
        tracing_subscriber::filter::LevelFilter::INFO
    } else if args.verbose == 1 {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::TRACE
    };
    let file = fs::File::create(log_file).context("unable to create log file")?;

    tracing_subscriber::registry()
        .with(log_level_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Evaluates a command-line expression, accepting `*` and `/` for `×` and `÷`.
fn eval_arg(expr: &str) -> Result<String, EvalError> {
    let expr = expr.replace('*', "×").replace('/', "÷");
    evaluate(&expr).map(format_result)
}

fn run_eval(expr: &str, out: &mut impl Write) -> Result<ExitCode> {
    match eval_arg(expr) {
        Ok(text) => {
            writeln!(out, "{}", text)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::info!(error = %e, "one-shot evaluation failed");
            writeln!(out, "{}", ERROR_TEXT)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_interactive(args: &Args, config: Config) -> Result<()> {
    if args.line {
        #[cfg(feature = "line")]
        return line_mode::run_line(&config);
        #[cfg(not(feature = "line"))]
        anyhow::bail!("built without the `line` feature");
    }

    #[cfg(feature = "tui")]
    return tui_mode::run_tui(config);
    #[cfg(not(feature = "tui"))]
    anyhow::bail!("built without the `tui` feature, try --line or --eval");
}
