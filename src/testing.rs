//! In-memory chain used by unit tests

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Result, SessionError};
use crate::provider::ChainProvider;
use crate::types::{ChainBlock, ChainTransaction};

pub fn block_hash(height: u64) -> B256 {
    B256::from(U256::from(height + 1).to_be_bytes::<32>())
}

pub struct MockChain {
    blocks: Mutex<BTreeMap<u64, ChainBlock>>,
    requested: Mutex<Vec<u64>>,
    tip: Option<u64>,
    fail_at: Option<u64>,
    pub accounts: Vec<Address>,
    pub balance: U256,
    pub fail_accounts: bool,
    pub fail_balance: bool,
    pub fail_tip: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            blocks: Mutex::new(BTreeMap::new()),
            requested: Mutex::new(Vec::new()),
            tip: None,
            fail_at: None,
            accounts: vec![Address::repeat_byte(0xaa)],
            balance: U256::from(2_000_000_000_000_000_000u128),
            fail_accounts: false,
            fail_balance: false,
            fail_tip: false,
        }
    }

    /// Add blocks as `(height, transaction count)` pairs, each transaction worth 1 wei
    pub fn with_blocks(self, heights: &[(u64, usize)]) -> Self {
        {
            let mut blocks = self.blocks.lock().unwrap();
            for &(height, tx_count) in heights {
                let transactions = (0..tx_count)
                    .map(|i| ChainTransaction {
                        hash: B256::from(U256::from((height << 16) + i as u64 + 1_000_000).to_be_bytes::<32>()),
                        from: Address::repeat_byte(0x11),
                        to: Some(Address::repeat_byte(0x22)),
                        value: U256::from(1u64),
                    })
                    .collect();
                blocks.insert(
                    height,
                    ChainBlock {
                        number: height,
                        hash: block_hash(height),
                        parent_hash: height.checked_sub(1).map(block_hash).unwrap_or_default(),
                        transactions,
                    },
                );
            }
        }
        self
    }

    pub fn with_tip(mut self, tip: u64) -> Self {
        self.tip = Some(tip);
        self
    }

    pub fn failing_at(mut self, height: u64) -> Self {
        self.fail_at = Some(height);
        self
    }

    /// Overwrite the transaction values of a block
    pub fn set_values(&self, height: u64, values: &[U256]) {
        let mut blocks = self.blocks.lock().unwrap();
        if let Some(block) = blocks.get_mut(&height) {
            for (tx, value) in block.transactions.iter_mut().zip(values) {
                tx.value = *value;
            }
        }
    }

    /// Heights requested so far, in request order
    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainProvider for MockChain {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        if self.fail_accounts {
            return Err(SessionError::Connection("provider unreachable".to_string()));
        }
        Ok(self.accounts.clone())
    }

    async fn balance(&self, _address: Address) -> Result<U256> {
        if self.fail_balance {
            return Err(SessionError::BalanceFetch("balance unavailable".to_string()));
        }
        Ok(self.balance)
    }

    async fn tip_height(&self) -> Result<u64> {
        if self.fail_tip {
            return Err(SessionError::Connection("Failed to get block number: connection refused".to_string()));
        }
        let tip = self.tip.or_else(|| self.blocks.lock().unwrap().keys().next_back().copied());
        Ok(tip.unwrap_or(0))
    }

    async fn block_with_transactions(&self, height: u64) -> Result<Option<ChainBlock>> {
        self.requested.lock().unwrap().push(height);
        if self.fail_at == Some(height) {
            return Err(SessionError::Connection("connection reset".to_string()));
        }
        Ok(self.blocks.lock().unwrap().get(&height).cloned())
    }
}
