use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

// Raw block data as returned by the chain provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBlock {
    pub number: u64,
    pub hash: B256,
    pub parent_hash: B256,
    pub transactions: Vec<ChainTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTransaction {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>, // None for contract creation
    pub value: U256,         // base units
}

// These structs are handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub number: u64,
    pub block_hash: B256,
    pub previous_hash: B256,
    pub next_hash: Option<B256>,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction_hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub value: String, // whole units, decimal
}

/// Ordered, hash-linked sequence of non-empty blocks, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Window(Vec<BlockRecord>);

impl Window {
    /// Build a window from records collected in descending height order
    pub(crate) fn from_descending(mut records: Vec<BlockRecord>) -> Self {
        records.reverse();
        Self(records)
    }

    pub fn blocks(&self) -> &[BlockRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlockRecord> {
        self.0.iter()
    }

    pub fn latest(&self) -> Option<&BlockRecord> {
        self.0.last()
    }

    pub fn transaction_count(&self) -> usize {
        self.0.iter().map(|b| b.transactions.len()).sum()
    }

    /// Check the ordering and linking invariants of the window
    pub fn is_consistent(&self) -> bool {
        let ordered = self.0.windows(2).all(|pair| pair[0].number < pair[1].number);
        let linked = self.0.windows(2).all(|pair| pair[0].next_hash == Some(pair[1].block_hash));
        let tail_open = self.0.last().map_or(true, |b| b.next_hash.is_none());
        let non_empty = self.0.iter().all(|b| !b.transactions.is_empty());
        ordered && linked && tail_open && non_empty
    }
}

impl<'a> IntoIterator for &'a Window {
    type Item = &'a BlockRecord;
    type IntoIter = std::slice::Iter<'a, BlockRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a mined transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Recipient and amount entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub to_address: String,
    pub amount: String, // whole units
}

impl TransferForm {
    pub fn new(to_address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            to_address: to_address.into(),
            amount: amount.into(),
        }
    }

    pub fn clear(&mut self) {
        self.to_address.clear();
        self.amount.clear();
    }
}
