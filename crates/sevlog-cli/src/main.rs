//! sevlog CLI
//!
//! Emit single log lines or pipe standard input through the trace bridge

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sevlog")]
#[command(about = "sevlog - Severity-aware logging from the shell", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write one log line at the given severity
    Emit(commands::emit::EmitArgs),
    /// Log every line read from stdin at TRACE
    Pipe(commands::pipe::PipeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Emit(args) => commands::emit::execute(args),
        Commands::Pipe(args) => commands::pipe::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
