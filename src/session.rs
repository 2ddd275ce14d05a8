//! Wallet session: connect, balance, transfer and block window refresh.
//!
//! Each operation catches its own external-call failures, shows one error
//! notice, logs it and resets the pending flags before returning the error,
//! so the caller can simply retry.

use alloy::primitives::utils::Unit;
use alloy_primitives::Address;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::contract::TransferContract;
use crate::error::{Result, SessionError};
use crate::notify::{Notice, Notifier};
use crate::provider::ChainProvider;
use crate::types::{TransferForm, TransferReceipt, Window};
use crate::units::{from_base_units, to_base_units};
use crate::window::{ChainWindowFetcher, DEFAULT_MAX_DEPTH};

/// Session parameters
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub max_depth: u64,
    pub unit: Unit,
    pub symbol: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unit: Unit::ETHER,
            symbol: "ETH".to_string(),
        }
    }
}

/// State exposed to the presentation layer
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub wallet_connected: bool,
    pub wallet_address: Option<Address>,
    pub wallet_balance: Option<String>, // whole units
    pub transaction_pending: bool,
    pub submitted: bool,
    pub window: Window,
}

pub struct WalletSession<P: ChainProvider, C: TransferContract, N: Notifier> {
    provider: Arc<P>,
    contract: C,
    notifier: N,
    fetcher: ChainWindowFetcher<P>,
    settings: SessionSettings,
    state: SessionState,
}

impl<P: ChainProvider, C: TransferContract, N: Notifier> WalletSession<P, C, N> {
    pub fn new(provider: Arc<P>, contract: C, notifier: N, settings: SessionSettings) -> Self {
        let fetcher = ChainWindowFetcher::new(Arc::clone(&provider), settings.unit);
        Self {
            provider,
            contract,
            notifier,
            fetcher,
            settings,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn window(&self) -> &Window {
        &self.state.window
    }

    /// Connect to the first wallet account, load its balance and, once the
    /// user confirms the connection notice, the block window.
    pub async fn connect_wallet(&mut self) -> Result<Address> {
        let accounts = match self.provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                error!("Error connecting wallet: {}", e);
                self.notifier.notify(Notice::error("Failed to connect wallet")).await;
                return Err(match e {
                    e @ SessionError::Connection(_) => e,
                    other => SessionError::Connection(other.to_string()),
                });
            }
        };

        let Some(address) = accounts.first().copied() else {
            warn!("Wallet returned no accounts");
            self.notifier.notify(Notice::info("No accounts found")).await;
            return Err(SessionError::Connection("no accounts found".to_string()));
        };

        self.state.wallet_connected = true;
        self.state.wallet_address = Some(address);
        info!("Wallet connected: {}", address);

        // A balance failure is already reported and does not undo the connection
        let _ = self.fetch_wallet_balance().await;

        let ack = self
            .notifier
            .notify(Notice::success(format!("Wallet connected: {}", address)))
            .await;
        if ack.is_confirmed() {
            // Reported inside, the connection itself succeeded
            let _ = self.refresh_window().await;
        }

        Ok(address)
    }

    /// Fetch the connected account's balance in whole units
    pub async fn fetch_wallet_balance(&mut self) -> Result<String> {
        let result = match self.state.wallet_address {
            Some(address) => self.provider.balance(address).await.map_err(|e| match e {
                e @ SessionError::BalanceFetch(_) => e,
                other => SessionError::BalanceFetch(other.to_string()),
            }),
            None => Err(SessionError::BalanceFetch("wallet not connected".to_string())),
        };

        match result {
            Ok(balance) => {
                let formatted = from_base_units(balance, self.settings.unit);
                info!("Wallet balance: {} {}", formatted, self.settings.symbol);
                self.state.wallet_balance = Some(formatted.clone());
                Ok(formatted)
            }
            Err(e) => {
                error!("Error fetching wallet balance: {}", e);
                self.notifier.notify(Notice::error("Failed to fetch wallet balance")).await;
                Err(e)
            }
        }
    }

    /// Send `form.amount` whole units to `form.to_address` through the contract.
    ///
    /// On a confirmed success notice the form is cleared and the balance and
    /// window are refreshed.
    pub async fn send_transfer(&mut self, form: &mut TransferForm) -> Result<TransferReceipt> {
        self.state.submitted = true;
        self.state.transaction_pending = true;

        let result = self.submit_transfer(form).await;

        self.state.transaction_pending = false;
        let outcome = match result {
            Ok(receipt) => {
                info!("Transfer mined in tx {:?}", receipt.transaction_hash);
                let ack = self
                    .notifier
                    .notify(Notice::success(format!(
                        "Your {} {} is successfully transferred into {}.",
                        form.amount.trim(),
                        self.settings.symbol,
                        form.to_address.trim()
                    )))
                    .await;
                if ack.is_confirmed() {
                    form.clear();
                    let _ = self.fetch_wallet_balance().await;
                    let _ = self.refresh_window().await;
                }
                Ok(receipt)
            }
            Err(e) => {
                error!("Transaction failed: {}", e);
                self.notifier.notify(Notice::error("Transaction failed!")).await;
                Err(e)
            }
        };
        self.state.submitted = false;
        outcome
    }

    async fn submit_transfer(&self, form: &TransferForm) -> Result<TransferReceipt> {
        let from = self
            .state
            .wallet_address
            .ok_or_else(|| SessionError::Transfer("wallet not connected".to_string()))?;
        let to = Address::from_str(form.to_address.trim())
            .map_err(|e| SessionError::InvalidAddress(format!("{}: {}", form.to_address, e)))?;
        let value = to_base_units(&form.amount, self.settings.unit)?;

        self.contract.send_transfer(to, from, value).await
    }

    /// Rebuild the block window from the current tip.
    ///
    /// A failed scan leaves the window empty; partial results are never kept.
    /// A failed tip lookup is returned as reported by the provider.
    pub async fn refresh_window(&mut self) -> Result<&Window> {
        self.state.window = Window::default();
        match self.fetcher.fetch_latest(self.settings.max_depth).await {
            Ok(window) => {
                self.state.window = window;
                Ok(&self.state.window)
            }
            Err(e) => {
                error!("Error fetching blockchain data: {}", e);
                self.notifier.notify(Notice::error("Failed to fetch blockchain data")).await;
                Err(e)
            }
        }
    }
}
