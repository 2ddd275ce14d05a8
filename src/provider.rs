//! Chain-data provider seam and its Alloy HTTP implementation

use alloy::consensus::Transaction;
use alloy::network::{EthereumWallet, TransactionResponse};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{BlockNumberOrTag, BlockTransactions};
use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ChainCfg;
use crate::error::{Result, SessionError};
use crate::types::{ChainBlock, ChainTransaction};

/// Source of accounts, balances and block data
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Accounts the wallet exposes, first one is the active account
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Balance in base units
    async fn balance(&self, address: Address) -> Result<U256>;

    /// Current tip height
    async fn tip_height(&self) -> Result<u64>;

    /// Full block with transactions at the given height
    async fn block_with_transactions(&self, height: u64) -> Result<Option<ChainBlock>>;
}

/// Provider backed by an Alloy HTTP RPC connection.
///
/// With a private key configured the signer's address is the only account;
/// otherwise accounts are requested from the node (`eth_accounts`).
#[derive(Clone)]
pub struct AlloyChainProvider {
    provider: DynProvider,
    signer_address: Option<Address>,
}

impl AlloyChainProvider {
    pub fn new(config: &ChainCfg, private_key: Option<&str>) -> Result<Self> {
        let http_url: reqwest::Url = config
            .rpc_url
            .parse()
            .map_err(|e| SessionError::Configuration(format!("Invalid RPC URL: {}", e)))?;

        let (provider, signer_address) = match private_key {
            Some(key) => {
                let signer: PrivateKeySigner = key
                    .parse()
                    .map_err(|e| SessionError::Configuration(format!("Invalid private key: {}", e)))?;
                let address = signer.address();
                let wallet = EthereumWallet::from(signer);
                let provider = ProviderBuilder::new().wallet(wallet).connect_http(http_url.clone()).erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect_http(http_url.clone()).erased(), None),
        };

        info!("Connecting to RPC endpoint: {}", http_url);

        Ok(Self {
            provider,
            signer_address,
        })
    }

    /// Underlying provider, shared with the contract client
    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Check the node serves the expected chain
    pub async fn verify_chain_id(&self, expected: u64) -> Result<()> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| SessionError::Connection(format!("Failed to get chain ID: {}", e)))?;
        if chain_id != expected {
            return Err(SessionError::Configuration(format!(
                "Chain ID mismatch: expected {}, got {}",
                expected, chain_id
            )));
        }
        info!("Chain ID: {}", chain_id);
        Ok(())
    }
}

#[async_trait]
impl ChainProvider for AlloyChainProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        if let Some(address) = self.signer_address {
            return Ok(vec![address]);
        }
        self.provider
            .get_accounts()
            .await
            .map_err(|e| SessionError::Connection(format!("Failed to request accounts: {}", e)))
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| SessionError::BalanceFetch(format!("Failed to get balance of {}: {}", address, e)))
    }

    async fn tip_height(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| SessionError::Connection(format!("Failed to get block number: {}", e)))
    }

    async fn block_with_transactions(&self, height: u64) -> Result<Option<ChainBlock>> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(height))
            .full()
            .await
            .map_err(|e| SessionError::WindowFetch {
                height,
                reason: e.to_string(),
            })?;

        let Some(block) = block else {
            debug!("Block {} not found", height);
            return Ok(None);
        };

        let transactions = match block.transactions {
            BlockTransactions::Full(txs) => txs
                .iter()
                .map(|tx| ChainTransaction {
                    hash: tx.tx_hash(),
                    from: tx.from(),
                    to: tx.to(),
                    value: tx.value(),
                })
                .collect(),
            BlockTransactions::Hashes(hashes) => {
                return Err(SessionError::WindowFetch {
                    height,
                    reason: format!("node returned {} transaction hashes instead of full transactions", hashes.len()),
                });
            }
            BlockTransactions::Uncle => Vec::new(),
        };

        Ok(Some(ChainBlock {
            number: block.header.number,
            hash: block.header.hash,
            parent_hash: block.header.parent_hash,
            transactions,
        }))
    }
}
