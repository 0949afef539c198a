//! Helix test scenario runner
//!
//! Entry point for Helix work items: `runtest-helix -scenario <name> -wrapper <path>`.

use clap::Parser;
use runtest::cli;
use runtest::commands::{normalize_args, Cli};
use runtest::common::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let config = cli.config.as_deref();

    let result = match (cli.command, cli.run.wrapper) {
        (Some(command), _) => cli::dispatch(command, config).await.map(|()| 0),
        (None, Some(wrapper)) => cli::run(&wrapper, &cli.run.scenario, config).await,
        (None, None) => unreachable!("clap requires --wrapper without a subcommand"),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            println!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
