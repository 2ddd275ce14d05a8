use alloy::primitives::utils::Unit;
use alloy_primitives::Address;
use serde::Deserialize;
use std::str::FromStr;

use crate::error::{Result, SessionError};
use crate::units::unit_from_name;
use crate::window::DEFAULT_MAX_DEPTH;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub chain: ChainCfg,
    #[serde(default)]
    pub wallet: WalletCfg,
    pub contract: ContractCfg,
    #[serde(default)]
    pub window: WindowCfg,
    #[serde(default)]
    pub service: ServiceCfg,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainCfg {
    pub rpc_url: String,
    pub chain_id: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WalletCfg {
    // Without a key, accounts are requested from the node (eth_accounts)
    pub private_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContractCfg {
    pub address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowCfg {
    #[serde(default = "default_max_depth")]
    pub max_depth: u64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_symbol")]
    pub symbol: String, // shown in notices, e.g. "ETH"
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceCfg {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_depth() -> u64 {
    DEFAULT_MAX_DEPTH
}

fn default_unit() -> String {
    "ether".to_string()
}

fn default_symbol() -> String {
    "ETH".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WindowCfg {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            unit: default_unit(),
            symbol: default_symbol(),
        }
    }
}

impl Default for ServiceCfg {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_builder = config::Config::builder()
            // Start with default config
            .add_source(config::File::from(std::path::Path::new(path)))
            // Add local overrides
            .add_source(config::File::with_name("config.local").required(false))
            // Add environment variables with prefix "CHAIN_WINDOW", e.g. CHAIN_WINDOW__CHAIN__RPC_URL
            .add_source(config::Environment::with_prefix("CHAIN_WINDOW").prefix_separator("__").separator("__"))
            .build()?;

        let config: Config = config_builder.try_deserialize()?;
        Ok(config)
    }

    pub fn contract_address(&self) -> Result<Address> {
        Address::from_str(&self.contract.address)
            .map_err(|e| SessionError::Configuration(format!("Invalid contract address: {}", e)))
    }

    pub fn unit(&self) -> Result<Unit> {
        unit_from_name(&self.window.unit)
            .map_err(|e| SessionError::Configuration(e.to_string()))
    }

    pub fn private_key(&self) -> Option<&str> {
        self.wallet
            .private_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}
