mod render;
mod stats;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};
use owo_colors::OwoColorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use guardian_lexer::Lexer;
use guardian_parser::Parser;

use crate::render::render_error;
use crate::stats::KindCounts;

/// Guardian source checker.
#[derive(ClapParser, Debug)]
#[command(name = "guardian", version, about)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lex and parse a file, reporting the first error
    Check {
        file: PathBuf,
        /// Print how many nodes of each statement kind the file contains
        #[arg(long)]
        stats: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("GUARDIAN_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn check(path: &Path, stats: bool) -> ExitCode {
    let src = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path.display(), e).red()
            );
            return ExitCode::FAILURE;
        }
    };
    info!(path = %path.display(), bytes = src.len(), "checking");

    let tokens = match Lexer::new(&src).tokenize() {
        Ok(t) => t,
        Err(e) => {
            render_error("Lex error", &src, &e);
            return ExitCode::FAILURE;
        }
    };
    debug!(tokens = tokens.len(), "lexed");

    let program = match Parser::new(tokens).parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error("Parse error", &src, &e);
            return ExitCode::FAILURE;
        }
    };

    println!("ok: {} statements", program.len());
    if stats {
        print!("{}", KindCounts::of_program(&program));
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Check { file, stats } => check(&file, stats),
    }
}
