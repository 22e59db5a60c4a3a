mod cli;
mod clock;
mod error;
mod models;
mod output;
mod services;

use anyhow::Result;
use clap::Parser;

use crate::cli::Args;
use crate::clock::SystemClock;
use crate::services::power_service;

fn main() -> Result<()> {
    let args = Args::parse();

    // System time enters here and nowhere else; the pipeline itself is
    // clock-free.
    let params = args.resolve(&SystemClock);
    let estimate = power_service::estimate(&params)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else if args.verbose {
        println!("{}", output::report(&params, &estimate));
    } else {
        println!("{}", output::machine_line(&estimate));
    }

    Ok(())
}
