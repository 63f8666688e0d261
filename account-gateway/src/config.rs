//! Configuration for the account gateway.

use clap::Parser;
use playground_aptos::chain::{Address, AptosChainConfig};
use playground_types::config::{ConfigError, config_defaults, load_json_config};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

/// CLI arguments for the account gateway.
#[derive(Parser, Debug)]
#[command(name = "account-gateway")]
#[command(about = "Aptos account and transaction gateway for the Move playground")]
struct CliArgs {
    /// Path to an optional JSON configuration file
    #[arg(long, short, env = "CONFIG")]
    config: Option<PathBuf>,
}

/// Server configuration.
///
/// Fields use serde defaults that fall back to environment variables,
/// then to hardcoded defaults. Chain settings are flattened into the top level:
///
/// ```json
/// {
///   "port": 3000,
///   "network": "testnet",
///   "module_address": "$MODULE_ADDRESS"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "config_defaults::default_host")]
    host: IpAddr,
    #[serde(flatten)]
    aptos: AptosChainConfig,
}

fn default_port() -> u16 {
    config_defaults::port_or(DEFAULT_PORT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: config_defaults::default_host(),
            aptos: AptosChainConfig::default(),
        }
    }
}

impl Config {
    pub fn new(host: IpAddr, port: u16, aptos: AptosChainConfig) -> Self {
        Self { port, host, aptos }
    }

    /// Loads configuration from `--config <path>` / `$CONFIG` if given,
    /// otherwise from environment variables and defaults alone.
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        load_json_config(cli_args.config.as_deref())
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn aptos(&self) -> &AptosChainConfig {
        &self.aptos
    }

    /// The account hosting the playground module. There is no sensible default.
    pub fn module_address(&self) -> Result<Address, ConfigError> {
        self.aptos
            .module_address()
            .ok_or(ConfigError::Missing("module_address (MODULE_ADDRESS)"))
    }
}
