// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::parse_party;
use crate::helpers::telemetry::setup_simple_tracing;
use crate::{local, presets, run};
use anyhow::Result;
use clap::{command, ArgAction, Parser, Subcommand};
use sg_config::{load_config, AppConfig};
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "securegenomics")]
#[command(about = "Privacy-preserving carrier frequency aggregation over encrypted genotype counts", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `securegenomics -vvv` will
    /// give you trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        match self.command {
            Commands::Run {
                parties,
                json,
                seed,
            } => run::execute(load(self.config)?, parties, seed, json)?,
            Commands::Local { records, json } => {
                local::execute(&load(self.config)?, &records, json)?
            }
            Commands::Presets => presets::execute(),
        }

        Ok(())
    }
}

fn load(config_file: Option<String>) -> Result<AppConfig> {
    let config = load_config(config_file)?;
    debug!("Config loaded from: {:?}", config.config_file);
    Ok(config)
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole protocol in-process over the given party datasets
    Run {
        #[arg(
            long = "party",
            action = clap::ArgAction::Append,
            value_name = "NAME=RECORDS",
            value_parser = parse_party,
            required = true,
            help = "A party and the JSON file holding its genotype records",
        )]
        parties: Vec<(String, PathBuf)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Seed the key generation and encryption RNG for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compute frequencies for a single dataset in the clear
    Local {
        /// JSON file holding the genotype records
        #[arg(long)]
        records: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available BFV parameter presets
    Presets,
}
