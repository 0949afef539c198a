//! Scenario runner
//!
//! Runs one test wrapper through the xunit console runner hosted by corerun,
//! with the scenario's overrides handed to the wrapper through an environment
//! script. The console runner itself does not see the overrides; only the
//! per-test processes started by the wrapper do.

pub mod env_file;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use tokio::process::Command;

use crate::common::{Error, Platform, Result};
use crate::scenario::ScenarioBundle;

/// Console runner assembly inside CORE_ROOT
pub const CONSOLE_RUNNER: &str = "xunit.console.dll";

/// File stem of the generated environment script
pub const ENV_FILE_STEM: &str = "SetStressModes";

/// Results file the console runner writes
pub const RESULTS_FILE: &str = "testResults.xml";

/// Variable pointing the child at the runtime payload
pub const CORE_ROOT_VAR: &str = "CORE_ROOT";

/// Variable pointing the wrappers at the environment script
pub const TEST_ENV_VAR: &str = "__TestEnv";

/// Arguments passed to the console runner after the wrapper path
pub const STATIC_FLAGS: &[&str] = &[
    "-nocolor",
    "-noshadow",
    "-xml",
    RESULTS_FILE,
    "-notrait",
    "category=outerloop",
    "-notrait",
    "category=failing",
    "-parallel",
    "collections",
];

/// Runs wrappers for one scenario against one CORE_ROOT
#[derive(Debug, Clone)]
pub struct ScenarioRunner<'a> {
    bundle: &'a ScenarioBundle,
    core_root: PathBuf,
    platform: Platform,
    work_dir: PathBuf,
}

impl<'a> ScenarioRunner<'a> {
    /// Create a runner for `bundle` using the payload at `core_root`
    ///
    /// The environment script goes to the current directory unless changed
    /// with [`ScenarioRunner::with_work_dir`].
    pub fn configure(
        bundle: &'a ScenarioBundle,
        core_root: impl Into<PathBuf>,
        platform: Platform,
    ) -> Result<Self> {
        let core_root = core_root.into();
        if !core_root.is_dir() {
            return Err(Error::InvalidCoreRoot(core_root));
        }

        Ok(Self {
            bundle,
            core_root,
            platform,
            work_dir: std::env::current_dir()?,
        })
    }

    /// Write the environment script into `dir` instead of the current directory
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn bundle(&self) -> &ScenarioBundle {
        self.bundle
    }

    pub fn core_root(&self) -> &Path {
        &self.core_root
    }

    /// Path of the host executable
    pub fn corerun_path(&self) -> PathBuf {
        self.core_root.join(self.platform.corerun_name())
    }

    /// Path the environment script is written to
    pub fn env_file_path(&self) -> PathBuf {
        self.work_dir.join(format!(
            "{ENV_FILE_STEM}.{}",
            self.platform.script_extension()
        ))
    }

    /// Arguments following the executable
    pub fn runner_args(&self, wrapper: &Path) -> Vec<OsString> {
        let mut args = vec![
            self.core_root.join(CONSOLE_RUNNER).into_os_string(),
            wrapper.as_os_str().to_os_string(),
        ];
        args.extend(STATIC_FLAGS.iter().map(OsString::from));
        args
    }

    /// Full command line, executable first
    pub fn command_line(&self, wrapper: &Path) -> Vec<OsString> {
        let mut line = vec![self.corerun_path().into_os_string()];
        line.extend(self.runner_args(wrapper));
        line
    }

    /// Child environment: `base` plus CORE_ROOT and __TestEnv
    pub fn child_env<I>(&self, base: I, env_file: &Path) -> BTreeMap<OsString, OsString>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env: BTreeMap<OsString, OsString> = base.into_iter().collect();
        env.insert(
            OsString::from(CORE_ROOT_VAR),
            self.core_root.clone().into_os_string(),
        );
        env.insert(
            OsString::from(TEST_ENV_VAR),
            env_file.as_os_str().to_os_string(),
        );
        env
    }

    /// Run `wrapper` and return the console runner's exit code
    pub async fn run(&self, wrapper: &Path) -> Result<i32> {
        if !wrapper.is_file() {
            return Err(Error::WrapperNotFound(wrapper.to_path_buf()));
        }

        tracing::info!("{CORE_ROOT_VAR}={}", self.core_root.display());

        let env_file = self.env_file_path();
        tracing::info!("Creating {TEST_ENV_VAR} at {}", env_file.display());
        env_file::write(&env_file, self.bundle.overrides(), self.platform)?;

        let env = self.child_env(std::env::vars_os(), &env_file);
        let program = self.corerun_path();
        let args = self.runner_args(wrapper);

        tracing::info!(scenario = self.bundle.name(), "BEGIN EXECUTION");
        tracing::info!("{}", display_command(&self.command_line(wrapper)));

        let status = Command::new(&program)
            .args(&args)
            .env_clear()
            .envs(&env)
            .status()
            .await
            .map_err(|source| Error::LaunchFailed {
                program: program.clone(),
                source,
            })?;

        let code = exit_code(status);
        tracing::info!("Finished running tests. Exit code = {code}");
        Ok(code)
    }
}

/// Space-joined command line for logging
fn display_command(line: &[OsString]) -> String {
    line.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exit code of the child; signals map to the shell convention of 128 + signal
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
