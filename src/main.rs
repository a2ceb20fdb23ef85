use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pkce_pair::{
    PkceError, PkcePair, VerifierGenerator, derive_challenge, validate_challenge,
    validate_verifier, verify_pair,
};

#[derive(Debug, Parser)]
#[command(
    name = "pkce-pair",
    about = "Generate and check RFC 7636 PKCE code verifiers and S256 challenges."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a verifier/challenge pair and print it as JSON
    Generate {
        /// Exact verifier length
        #[arg(long, conflicts_with_all = ["min", "max"])]
        length: Option<usize>,
        #[arg(long)]
        min: Option<usize>,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Print the S256 challenge for a verifier
    Challenge { verifier: String },
    /// Check that a challenge was derived from a verifier
    Verify { verifier: String, challenge: String },
    /// Check a verifier against the RFC 7636 length and character rules
    CheckVerifier { value: String },
    /// Check that a value is shaped like an S256 challenge
    CheckChallenge { value: String },
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pkce_pair=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, PkceError> {
    match command {
        Command::Generate { length, min, max } => run_generate(length, min, max),
        Command::Challenge { verifier } => {
            println!("{}", derive_challenge(&verifier)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            verifier,
            challenge,
        } => {
            let matches = verify_pair(&verifier, &challenge);
            println!("{matches}");
            Ok(if matches {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::CheckVerifier { value } => Ok(report(validate_verifier(&value))),
        Command::CheckChallenge { value } => Ok(report(validate_challenge(&value))),
    }
}

fn run_generate(
    length: Option<usize>,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<ExitCode, PkceError> {
    let defaults = VerifierGenerator::default();
    let generator = match length {
        Some(length) => defaults.with_length(length)?,
        None => defaults.with_length_range(
            min.unwrap_or(defaults.min_len()),
            max.unwrap_or(defaults.max_len()),
        )?,
    };

    let pair = PkcePair::generate_with(&generator);
    match serde_json::to_string_pretty(&pair) {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("failed to encode pair as json: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report(result: Result<(), PkceError>) -> ExitCode {
    match result {
        Ok(()) => {
            println!("valid");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
