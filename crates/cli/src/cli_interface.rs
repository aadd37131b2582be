use clap::{Parser, Subcommand};

use crate::commands::{estimate::EstimateArgs, serve::ServeArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the average gas fee page and its JSON API
    Serve(ServeArgs),
    /// Fetch a single average gas fee estimate and print it
    Estimate(EstimateArgs),
}
