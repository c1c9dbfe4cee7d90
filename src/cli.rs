//! CLI argument parsing for the hos-trip-planner binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hos-trip-planner", about = "FMCSA Hours-of-Service trip planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan a trip from a JSON request, emitting a JSON plan on stdout.
    Plan {
        /// Path to a JSON request file. Reads stdin if omitted.
        #[arg(long)]
        input: Option<String>,
    },
}
