//! Native transfers routed through the deployed forwarding contract

use alloy::providers::DynProvider;
use alloy::sol;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::{error, info};

use crate::error::{Result, SessionError};
use crate::types::TransferReceipt;

// Define the contract interface using sol! macro
sol! {
    /// @title TransferForwarder
    /// @notice Forwards the attached native value to the recipient and emits an event
    #[sol(rpc)]
    contract TransferForwarder {
        event TransactionSent(
            address indexed from,
            address indexed to,
            uint256 value
        );

        function sendTransaction(address payable _to) external payable;
    }
}

/// Contract-call capability used by the session to move funds
#[async_trait]
pub trait TransferContract: Send + Sync {
    /// Send `value` base units from `from` to `to` and wait for the receipt
    async fn send_transfer(&self, to: Address, from: Address, value: U256) -> Result<TransferReceipt>;
}

/// Alloy client for the TransferForwarder contract
pub struct TransferForwarderClient {
    provider: DynProvider,
    contract_address: Address,
}

impl TransferForwarderClient {
    pub fn new(provider: DynProvider, contract_address: Address) -> Self {
        Self {
            provider,
            contract_address,
        }
    }

    /// Get the contract address
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }
}

#[async_trait]
impl TransferContract for TransferForwarderClient {
    async fn send_transfer(&self, to: Address, from: Address, value: U256) -> Result<TransferReceipt> {
        info!(
            "TransferForwarder: Sending {} base units from {} to {}",
            value, from, to
        );

        let contract = TransferForwarder::new(self.contract_address, &self.provider);
        let pending_tx = contract
            .sendTransaction(to)
            .from(from)
            .value(value)
            .send()
            .await
            .map_err(|e| SessionError::Transfer(format!("Contract call rejected: {}", e)))?;
        let tx_hash = *pending_tx.tx_hash();
        info!("TransferForwarder: Transfer submitted with tx hash: {:?}", tx_hash);

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| SessionError::Transfer(format!("Failed to get receipt for {:?}: {}", tx_hash, e)))?;

        if !receipt.status() {
            error!("TransferForwarder: Transfer {:?} reverted", tx_hash);
            return Err(SessionError::Transfer(format!("Transaction {:?} reverted", tx_hash)));
        }

        Ok(TransferReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }
}
