//! lsbwav CLI - Hide messages in the least-significant bits of WAV audio
//!
//! This binary provides commands for embedding, extracting and measuring
//! hidden messages in PCM audio files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

// Use modules from the library crate
use lsbwav_cli::commands;
use lsbwav_cli::config::StegoConfig;

/// lsbwav - LSB audio steganography
#[derive(Parser)]
#[command(name = "lsbwav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an audio file
    Encode {
        /// Cover audio file (WAV, MP3 or FLAC)
        #[arg(short, long)]
        input: String,

        /// Message text to hide
        #[arg(
            short,
            long,
            required_unless_present = "message_file",
            conflicts_with = "message_file"
        )]
        message: Option<String>,

        /// Read the message bytes from a file
        #[arg(long)]
        message_file: Option<String>,

        /// Output WAV path (default: <input stem>.stego.wav)
        #[arg(short, long)]
        output: Option<String>,

        /// Low bits per sample used for the payload (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        lsb_depth: Option<u8>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Extract a hidden message from an audio file
    Decode {
        /// Audio file carrying the message
        #[arg(short, long)]
        input: String,

        /// Write the raw message bytes to this file instead of printing them
        #[arg(short, long)]
        output: Option<String>,

        /// Low bits per sample used by the encoder (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        lsb_depth: Option<u8>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show how large a message an audio file can hold
    Capacity {
        /// Cover audio file
        #[arg(short, long)]
        input: String,

        /// Low bits per sample (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        lsb_depth: Option<u8>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show format metadata for an audio file
    Inspect {
        /// Audio file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check system dependencies
    Doctor,
}

/// Log filter used when RUST_LOG is not set.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "lsbwav=debug,lsbwav_core=debug,lsbwav_cli=debug"
    } else {
        "warn"
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| default_log_filter(cli.verbose).to_string());

    // Logs go to stderr so --json stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let result = StegoConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Encode {
            input,
            message,
            message_file,
            output,
            lsb_depth,
            json,
        } => commands::encode::run(
            &input,
            message.as_deref(),
            message_file.as_deref(),
            output.as_deref(),
            lsb_depth,
            &config,
            json,
        ),
        Commands::Decode {
            input,
            output,
            lsb_depth,
            json,
        } => commands::decode::run(&input, output.as_deref(), lsb_depth, &config, json),
        Commands::Capacity {
            input,
            lsb_depth,
            json,
        } => commands::capacity::run(&input, lsb_depth, &config, json),
        Commands::Inspect { input, json } => commands::inspect::run(&input, &config, json),
        Commands::Doctor => commands::doctor::run(&config),
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
