//! Fluxdoc - configuration tooling for the Flux language documentation site.

#![allow(dead_code)]

mod cli;
mod config;
mod grammar;
mod logger;
mod theme;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    // One explicit load per run; watch mode rebuilds and swaps wholesale.
    let config = SiteConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Check { args } => cli::check::run(&config, args),
        Commands::Query { args } => cli::query::run(&config, args),
        Commands::Watch => cli::watch::run(config, &cli.config),
    }
}
