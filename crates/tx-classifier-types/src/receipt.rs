//! The execution receipt and its emitted logs.

use alloy_primitives::{Address, B256, Bytes};

/// Outcome of executing a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Failure,
}

/// A single event log entry emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// The contract that emitted this log.
    pub address: Address,
    /// Indexed topics. `topics[0]` is the event signature hash when present.
    pub topics: Vec<B256>,
    /// Non-indexed event data.
    pub data: Bytes,
}

impl Log {
    /// The event signature hash (`topics[0]`), if any topics are present.
    pub fn topic0(&self) -> Option<B256> {
        self.topics.first().copied()
    }
}

/// The result of executing a [`Transaction`](crate::transaction::Transaction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub status: TxStatus,
    pub block_number: u64,
    /// Populated only when the transaction deployed a contract.
    pub created_contract: Option<Address>,
    /// Logs in emission order.
    pub logs: Vec<Log>,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TxStatus::Success)
    }

    /// Logs emitted by a specific address, preserving emission order.
    pub fn logs_from<'a>(&'a self, address: Address) -> impl Iterator<Item = &'a Log> {
        self.logs.iter().filter(move |log| log.address == address)
    }
}
