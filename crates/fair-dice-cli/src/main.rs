//! Fair Dice
//!
//! Terminal game of non-transitive dice against the house. Every random
//! decision goes through an HMAC commit-reveal run the player can check.

mod controller;
mod render;
mod transcript;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use controller::Controller;
use fair_dice_core::{Die, FairDiceError, OsCryptoProvider};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const MIN_DICE: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "fair-dice",
    version,
    about = "Play non-transitive dice against the house with provably fair rolls",
    after_help = "Example: fair-dice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7"
)]
struct Args {
    /// Dice as comma-separated integer faces; at least three.
    /// Put `--` before the dice if a die starts with a negative face.
    #[arg(
        value_name = "DIE",
        value_parser = parse_die,
        required_unless_present = "verify"
    )]
    dice: Vec<Die>,

    /// Append every round's transcript to this file as JSON lines
    #[arg(long, env = "FAIR_DICE_TRANSCRIPT", value_name = "PATH")]
    transcript: Option<PathBuf>,

    /// Check a transcript file written by --transcript and exit
    #[arg(long, value_name = "PATH", conflicts_with = "dice")]
    verify: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn parse_die(s: &str) -> std::result::Result<Die, String> {
    let faces = s
        .split(',')
        .map(|face| {
            let face = face.trim();
            face.parse::<i64>()
                .map_err(|e| format!("invalid face `{}`: {}", face, e))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Die::new(faces).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn verify(path: &Path) -> Result<()> {
    let results = transcript::verify_file(path)?;
    info!("Verified {} rounds from {}", results.len(), path.display());
    println!("{} rounds verified, results: {:?}", results.len(), results);
    Ok(())
}

fn play(args: &Args) -> Result<()> {
    info!("Starting game with {} dice", args.dice.len());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(
        stdin.lock(),
        stdout.lock(),
        OsCryptoProvider::new(),
        args.dice.clone(),
    )?;
    let played = controller.play();

    if let Some(path) = &args.transcript {
        transcript::append_to_file(path, controller.transcripts())
            .with_context(|| format!("writing transcript to {}", path.display()))?;
        info!(
            "Wrote {} rounds to {}",
            controller.transcripts().len(),
            path.display()
        );
    }

    match played? {
        Some(outcome) => info!("Outcome: {}", outcome),
        None => info!("Player left the game"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.verify.is_none() && args.dice.len() < MIN_DICE {
        Args::command()
            .error(
                ErrorKind::TooFewValues,
                format!("at least {} dice are required", MIN_DICE),
            )
            .exit();
    }
    init_tracing(args.verbose);

    let outcome = match &args.verify {
        Some(path) => verify(path),
        None => play(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(FairDiceError::CommitmentMismatch) = err.downcast_ref::<FairDiceError>() {
                error!("Aborting: {:#}", err);
                eprintln!(
                    "fairness check failed: the reveal does not match the commitment, \
                     this game is void"
                );
            } else {
                warn!("Exiting with error: {:#}", err);
                eprintln!("Error: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}
