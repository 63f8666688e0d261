//! Configuration for the simulation gateway.

use clap::Parser;
use playground_simulator::{AptosCliRunner, ManifestSource, Simulator, ToolchainRunner};
use playground_types::config::{ConfigError, LiteralOrEnv, config_defaults, load_json_config};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;

/// CLI arguments for the simulation gateway.
#[derive(Parser, Debug)]
#[command(name = "simulation-gateway")]
#[command(about = "Move compile-and-simulate gateway for the Aptos playground")]
struct CliArgs {
    /// Path to an optional JSON configuration file
    #[arg(long, short, env = "CONFIG")]
    config: Option<PathBuf>,
}

/// Server and toolchain configuration.
///
/// ```json
/// {
///   "aptos_cli": "/usr/local/bin/aptos",
///   "module_address": "0x1",
///   "simulate_flag": "--local",
///   "timeout_secs": 120,
///   "workspace_root": "/var/tmp/aptos-playground"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "simulation_config::default_port")]
    port: u16,
    #[serde(default = "config_defaults::default_host")]
    host: IpAddr,
    /// The `aptos` executable, resolved through `PATH` when not absolute.
    #[serde(default = "simulation_config::default_aptos_cli")]
    aptos_cli: LiteralOrEnv<PathBuf>,
    /// Address bound to the named address at compile time and used in function ids.
    #[serde(default = "simulation_config::default_module_address")]
    module_address: LiteralOrEnv<String>,
    #[serde(default = "simulation_config::default_named_address")]
    named_address: String,
    #[serde(default = "simulation_config::default_profile")]
    profile: Option<String>,
    #[serde(default = "simulation_config::default_simulate_flag")]
    simulate_flag: String,
    #[serde(default = "simulation_config::default_fail_on_stderr")]
    fail_on_stderr: bool,
    #[serde(default = "simulation_config::default_timeout_secs")]
    timeout_secs: Option<u64>,
    #[serde(default = "simulation_config::default_workspace_root")]
    workspace_root: PathBuf,
    /// A `Move.toml` copied into every workspace instead of the built-in one.
    #[serde(default = "simulation_config::default_manifest_template")]
    manifest_template: Option<PathBuf>,
}

mod simulation_config {
    use super::*;

    pub fn default_port() -> u16 {
        config_defaults::port_or(DEFAULT_PORT)
    }

    pub fn default_aptos_cli() -> LiteralOrEnv<PathBuf> {
        LiteralOrEnv::from_literal(
            config_defaults::env_parsed("APTOS_CLI").unwrap_or_else(|| PathBuf::from("aptos")),
        )
    }

    pub fn default_module_address() -> LiteralOrEnv<String> {
        LiteralOrEnv::from_literal(
            config_defaults::env_parsed("SIMULATION_MODULE_ADDRESS")
                .unwrap_or_else(|| "0x1".to_string()),
        )
    }

    pub fn default_named_address() -> String {
        "demo".to_string()
    }

    pub fn default_profile() -> Option<String> {
        config_defaults::env_parsed("APTOS_PROFILE")
    }

    pub fn default_simulate_flag() -> String {
        "--local".to_string()
    }

    pub fn default_fail_on_stderr() -> bool {
        config_defaults::env_parsed("FAIL_ON_STDERR").unwrap_or(true)
    }

    pub fn default_timeout_secs() -> Option<u64> {
        config_defaults::env_parsed("SIMULATION_TIMEOUT_SECS")
    }

    pub fn default_workspace_root() -> PathBuf {
        config_defaults::env_parsed("PLAYGROUND_WORKSPACE_ROOT")
            .unwrap_or_else(|| std::env::temp_dir().join("aptos-playground"))
    }

    pub fn default_manifest_template() -> Option<PathBuf> {
        config_defaults::env_parsed("MOVE_MANIFEST_TEMPLATE")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: simulation_config::default_port(),
            host: config_defaults::default_host(),
            aptos_cli: simulation_config::default_aptos_cli(),
            module_address: simulation_config::default_module_address(),
            named_address: simulation_config::default_named_address(),
            profile: simulation_config::default_profile(),
            simulate_flag: simulation_config::default_simulate_flag(),
            fail_on_stderr: simulation_config::default_fail_on_stderr(),
            timeout_secs: simulation_config::default_timeout_secs(),
            workspace_root: simulation_config::default_workspace_root(),
            manifest_template: simulation_config::default_manifest_template(),
        }
    }
}

impl Config {
    /// Loads configuration from `--config <path>` / `$CONFIG` if given,
    /// otherwise from environment variables and defaults alone.
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        let config: Config = load_json_config(cli_args.config.as_deref())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.named_address.is_empty() {
            return Err(ConfigError::Invalid {
                key: "named_address",
                message: "must not be empty".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                message: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn manifest(&self) -> ManifestSource {
        match &self.manifest_template {
            Some(path) => ManifestSource::Template(path.clone()),
            None => ManifestSource::builtin(self.named_address.clone()),
        }
    }

    pub fn runner(&self) -> AptosCliRunner {
        AptosCliRunner::new(self.aptos_cli.inner().clone())
            .with_module_address(self.module_address.inner().clone())
            .with_named_address(self.named_address.clone())
            .with_profile(self.profile.clone())
            .with_simulate_flag(self.simulate_flag.clone())
            .with_timeout(self.timeout())
    }

    pub fn simulator(&self, runner: Arc<dyn ToolchainRunner>) -> Simulator {
        Simulator::new(runner, self.workspace_root.clone())
            .with_manifest(self.manifest())
            .with_fail_on_stderr(self.fail_on_stderr)
    }
}
