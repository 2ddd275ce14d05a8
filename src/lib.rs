//! Wallet session library for EVM chains
//!
//! Connects to an account through an injected chain provider, shows its
//! balance, sends native transfers through a deployed forwarding contract and
//! assembles a hash-linked window of the most recent non-empty blocks.
//!
//! # Example
//!
//! ```rust,no_run
//! use chain_window::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!
//!     let provider = Arc::new(AlloyChainProvider::new(&config.chain, config.private_key())?);
//!     let contract = TransferForwarderClient::new(provider.provider(), config.contract_address()?);
//!
//!     let settings = SessionSettings {
//!         max_depth: config.window.max_depth,
//!         unit: config.unit()?,
//!         symbol: config.window.symbol.clone(),
//!     };
//!     let mut session = WalletSession::new(provider, contract, LogNotifier, settings);
//!
//!     session.connect_wallet().await?;
//!     for block in session.window() {
//!         println!("{} -> {:?}", block.block_hash, block.next_hash);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod config;
pub mod contract;
pub mod error;
pub mod notify;
pub mod provider;
pub mod session;
pub mod types;
pub mod units;
pub mod window;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use address::shorten_address;
pub use config::Config;
pub use contract::{TransferContract, TransferForwarder, TransferForwarderClient};
pub use error::{Result, SessionError};
pub use notify::{Acknowledgement, LogNotifier, Notice, NoticeLevel, Notifier};
pub use provider::{AlloyChainProvider, ChainProvider};
pub use session::{SessionSettings, SessionState, WalletSession};
pub use types::{BlockRecord, ChainBlock, ChainTransaction, TransactionRecord, TransferForm, TransferReceipt, Window};
pub use window::{ChainWindowFetcher, DEFAULT_MAX_DEPTH};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::contract::{TransferContract, TransferForwarderClient};
    pub use crate::error::{Result, SessionError};
    pub use crate::notify::{Acknowledgement, LogNotifier, Notice, Notifier};
    pub use crate::provider::{AlloyChainProvider, ChainProvider};
    pub use crate::session::{SessionSettings, WalletSession};
    pub use crate::types::{BlockRecord, TransactionRecord, TransferForm, Window};
    pub use crate::window::ChainWindowFetcher;
    pub use alloy_primitives::{Address, B256, U256};
}
