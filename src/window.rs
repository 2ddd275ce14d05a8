//! Scan of the most recent blocks into a hash-linked window

use alloy::primitives::utils::Unit;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{Result, SessionError};
use crate::provider::ChainProvider;
use crate::types::{BlockRecord, ChainBlock, TransactionRecord, Window};
use crate::units::from_base_units;

/// Default number of heights scanned below the tip
pub const DEFAULT_MAX_DEPTH: u64 = 100;

pub struct ChainWindowFetcher<P: ChainProvider> {
    provider: Arc<P>,
    unit: Unit,
}

impl<P: ChainProvider> ChainWindowFetcher<P> {
    pub fn new(provider: Arc<P>, unit: Unit) -> Self {
        Self { provider, unit }
    }

    /// Read the tip height from the provider, then scan below it
    pub async fn fetch_latest(&self, max_depth: u64) -> Result<Window> {
        let latest_height = self.provider.tip_height().await?;
        self.fetch_window(latest_height, max_depth).await
    }

    /// Scan heights `latest_height` down to `latest_height - max_depth` (clamped at 0).
    ///
    /// Blocks are requested one at a time in descending order. Blocks without
    /// transactions are skipped. Any failed or missing block aborts the whole
    /// scan and nothing is returned.
    pub async fn fetch_window(&self, latest_height: u64, max_depth: u64) -> Result<Window> {
        let lower_bound = latest_height.saturating_sub(max_depth);
        info!(
            "Fetching block window from block {} down to {}",
            latest_height, lower_bound
        );

        // Collected highest first, reversed once the scan completes
        let mut records: Vec<BlockRecord> = Vec::new();

        for height in (lower_bound..=latest_height).rev() {
            let block = match self.provider.block_with_transactions(height).await {
                Ok(Some(block)) => block,
                Ok(None) => {
                    error!("Block {} not returned by provider", height);
                    return Err(SessionError::WindowFetch {
                        height,
                        reason: "block not found".to_string(),
                    });
                }
                Err(e) => {
                    error!("Failed to fetch block {}: {}", height, e);
                    return Err(match e {
                        e @ SessionError::WindowFetch { .. } => e,
                        other => SessionError::WindowFetch {
                            height,
                            reason: other.to_string(),
                        },
                    });
                }
            };

            if block.transactions.is_empty() {
                debug!("Skipping empty block {}", height);
                continue;
            }

            let next_hash = records.last().map(|accepted| accepted.block_hash);
            debug!(
                "Accepted block {} with {} transactions",
                height,
                block.transactions.len()
            );
            records.push(self.block_record(block, next_hash));
        }

        let window = Window::from_descending(records);
        info!(
            "Block window ready: {} blocks, {} transactions",
            window.len(),
            window.transaction_count()
        );
        Ok(window)
    }

    fn block_record(&self, block: ChainBlock, next_hash: Option<alloy_primitives::B256>) -> BlockRecord {
        let transactions = block
            .transactions
            .into_iter()
            .map(|tx| TransactionRecord {
                transaction_hash: tx.hash,
                from: tx.from,
                to: tx.to,
                value: from_base_units(tx.value, self.unit),
            })
            .collect();

        BlockRecord {
            number: block.number,
            block_hash: block.hash,
            previous_hash: block.parent_hash,
            next_hash,
            transactions,
        }
    }
}
