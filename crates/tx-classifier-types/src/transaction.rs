//! The submitted transaction envelope and its internal native transfers.

use alloy_primitives::{Address, B256, Bytes, U256};

/// The transaction serialization variant.
///
/// Affects fee-model semantics only; no rule in `tx-classifier-core` reads
/// this field. It is carried purely because a real transaction envelope
/// always has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeType {
    Legacy,
    Eip2930,
    Eip1559,
    Eip4844,
}

/// An EVM-compatible transaction, as submitted on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction hash.
    pub hash: B256,
    /// The address that signed and submitted the transaction.
    pub from: Address,
    /// The call target. `None` for contract creation.
    pub to: Option<Address>,
    /// Value transferred in wei.
    pub value: U256,
    /// Raw call data.
    pub input: Bytes,
    /// Serialization envelope.
    pub envelope_type: EnvelopeType,
}

impl Transaction {
    /// The first four bytes of `input`, i.e. the function selector, if present.
    pub fn selector(&self) -> Option<[u8; 4]> {
        if self.input.len() < 4 {
            return None;
        }
        let mut sel = [0u8; 4];
        sel.copy_from_slice(&self.input[..4]);
        Some(sel)
    }

    /// True when `input` carries no call data (a plain value transfer).
    pub fn is_empty_calldata(&self) -> bool {
        self.input.is_empty()
    }

    /// True when this transaction is a contract creation (`to` absent).
    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// A single native-value transfer observed inside an internal call trace.
///
/// Internal transfers never carry call data in this model; only the
/// value movement is relevant to token-flow analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}
