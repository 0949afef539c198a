//! CLI command handling
//!
//! Resolves the registry, the payload directories and the platform, then hands
//! off to the scenario runner or prints registry contents.

use std::path::Path;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::{PayloadDirs, ScenarioFile};
use crate::common::{Platform, Result};
use crate::runner::{env_file, ScenarioRunner};
use crate::scenario::ScenarioRegistry;

/// Built-in scenarios plus those of the optional scenario file
pub fn load_registry(config: Option<&Path>) -> Result<ScenarioRegistry> {
    let mut registry = ScenarioRegistry::builtin()?;
    if let Some(path) = config {
        tracing::debug!(path = %path.display(), "loading scenario file");
        registry.extend_from_file(&ScenarioFile::load(path)?)?;
    }
    Ok(registry)
}

/// Run `wrapper` under `scenario` and return the exit code to report
///
/// Checks happen in a fixed order: host platform, scenario name, then the
/// payload variables. Nothing is written or spawned until all pass.
pub async fn run(wrapper: &Path, scenario: &str, config: Option<&Path>) -> Result<i32> {
    let platform = Platform::current()?;
    let registry = load_registry(config)?;
    let bundle = registry.lookup(scenario)?;
    let payload = PayloadDirs::from_env()?;

    let wrapper = payload.wrapper_path(wrapper);
    let runner = ScenarioRunner::configure(bundle, &payload.correlation, platform)?;
    runner.run(&wrapper).await
}

/// Dispatch an inspection subcommand
pub async fn dispatch(command: Commands, config: Option<&Path>) -> Result<()> {
    let registry = load_registry(config)?;

    match command {
        Commands::List { json } => {
            if json {
                let scenarios: Vec<_> = registry.iter().collect();
                println!("{}", serde_json::to_string_pretty(&scenarios)?);
                return Ok(());
            }

            for bundle in registry.iter() {
                println!("{}", bundle.name().bold());
                if bundle.overrides().is_empty() {
                    println!("  {}", "(no overrides)".dimmed());
                }
                for (name, value) in bundle.overrides().iter() {
                    println!("  {}={}", name.cyan(), value);
                }
            }
            Ok(())
        }

        Commands::Env { scenario, platform } => {
            let platform = match platform {
                Some(platform) => platform,
                None => Platform::current()?,
            };
            let bundle = registry.lookup(&scenario)?;
            print!("{}", env_file::render(bundle.overrides(), platform));
            Ok(())
        }
    }
}
