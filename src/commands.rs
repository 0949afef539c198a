//! CLI command definitions
//!
//! Helix work items invoke the runner with single-dash long flags
//! (`-wrapper`, `-scenario`). Those are rewritten to their `--` form before
//! clap sees them.

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::common::config::SCENARIO_FILE_VAR;
use crate::common::Platform;
use crate::scenario::DEFAULT_SCENARIO;

/// Long flags accepted with a single dash
const SINGLE_DASH_FLAGS: &[&str] = &["-wrapper", "-scenario", "-config"];

#[derive(Parser, Debug)]
#[command(
    name = "runtest-helix",
    about = "Run an xunit test wrapper under a runtime stress scenario"
)]
#[command(version, long_about = None, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Extra scenario file (TOML)
    #[arg(long, global = true, env = SCENARIO_FILE_VAR)]
    pub config: Option<PathBuf>,
}

/// Arguments for running a wrapper
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Test wrapper, relative to HELIX_WORKITEM_PAYLOAD
    #[arg(long, required = true)]
    pub wrapper: Option<PathBuf>,

    /// Scenario to run under
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    pub scenario: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known scenarios and their overrides
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the environment script a scenario would produce
    Env {
        /// Scenario name
        scenario: String,

        /// Script flavor: unix or windows (default: current host)
        #[arg(long)]
        platform: Option<Platform>,
    },
}

/// Rewrite single-dash long flags to the `--` form clap expects
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| match arg.to_str() {
            Some(flag) if i > 0 && SINGLE_DASH_FLAGS.contains(&flag) => {
                OsString::from(format!("-{flag}"))
            }
            _ => arg,
        })
        .collect()
}
