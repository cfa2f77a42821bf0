//! The frozen classification context.

use alloy_primitives::Address;

use crate::chain_config::ChainConfig;
use crate::execution::ExecutionDetails;
use crate::flow::{FlowGraph, TokenKind, TokenMovement};
use crate::receipt::Receipt;
use crate::transaction::{InternalTransfer, Transaction};

/// The immutable tuple `(Transaction, Receipt, FlowGraph, ChainConfig,
/// ExecutionDetails, InternalTx)` plus convenience projections, assembled
/// once per `classify` call by the context assembler (Phase 3) and read-only
/// thereafter.
///
/// Every field is private; there is no `&mut self` method anywhere on this
/// type. This is how "rules do not mutate the context" is enforced by
/// the type system rather than by a runtime freeze call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationContext {
    transaction: Transaction,
    receipt: Receipt,
    flow: FlowGraph,
    chain_config: ChainConfig,
    execution: ExecutionDetails,
    internal_transfers: Vec<InternalTransfer>,
    debug: bool,
}

impl ClassificationContext {
    pub fn new(
        transaction: Transaction,
        receipt: Receipt,
        flow: FlowGraph,
        chain_config: ChainConfig,
        execution: ExecutionDetails,
        internal_transfers: Vec<InternalTransfer>,
        debug: bool,
    ) -> Self {
        ClassificationContext {
            transaction,
            receipt,
            flow,
            chain_config,
            execution,
            internal_transfers,
            debug,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn flow(&self) -> &FlowGraph {
        &self.flow
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain_config
    }

    pub fn execution(&self) -> &ExecutionDetails {
        &self.execution
    }

    pub fn internal_transfers(&self) -> &[InternalTransfer] {
        &self.internal_transfers
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// The transaction originator, lowercase-normalized (Alloy
    /// addresses compare case-insensitively already, but this makes the
    /// normalization explicit at the one place role-tagging depends on it).
    pub fn originator(&self) -> Address {
        self.transaction.from
    }

    pub fn effective_to(&self) -> Option<Address> {
        self.execution.effective_to
    }

    /// Movements where the originator is the sender.
    pub fn user_out(&self) -> Vec<&TokenMovement> {
        self.flow
            .movements_out_of(self.originator())
            .iter()
            .filter(|m| m.from == self.originator())
            .collect()
    }

    /// Movements where the originator is the receiver.
    pub fn user_in(&self) -> Vec<&TokenMovement> {
        self.flow
            .movements_into(self.originator())
            .iter()
            .filter(|m| m.to == self.originator())
            .collect()
    }

    /// True if the originator both sent and received at least one movement
    /// above dust.
    pub fn is_bidirectional_user_flow(&self) -> bool {
        !self.user_out().is_empty() && !self.user_in().is_empty()
    }

    /// True if the originator sent at least one movement and received none.
    pub fn is_unidirectional_out(&self) -> bool {
        !self.user_out().is_empty() && self.user_in().is_empty()
    }

    /// True if the originator received at least one movement and sent none.
    pub fn is_unidirectional_in(&self) -> bool {
        !self.user_in().is_empty() && self.user_out().is_empty()
    }

    /// True if any movement touching the originator is an NFT (ERC-721/1155).
    pub fn has_nft_movement(&self) -> bool {
        self.user_out()
            .iter()
            .chain(self.user_in().iter())
            .any(|m| matches!(m.kind, TokenKind::Erc721 | TokenKind::Erc1155))
    }

    /// All NFT movements touching the originator.
    pub fn nft_movements(&self) -> Vec<&TokenMovement> {
        self.user_out()
            .into_iter()
            .chain(self.user_in())
            .filter(|m| matches!(m.kind, TokenKind::Erc721 | TokenKind::Erc1155))
            .collect()
    }

    /// True if every NFT movement touching the originator shares one
    /// collection (contract address).
    pub fn nft_movements_share_one_collection(&self) -> bool {
        let nfts = self.nft_movements();
        let mut assets = nfts.iter().filter_map(|m| m.asset);
        match assets.next() {
            None => true,
            Some(first) => assets.all(|a| a == first),
        }
    }

    /// Non-NFT movements touching the originator (candidate "payment" legs
    /// for marketplace correlation).
    pub fn payment_movements(&self) -> Vec<&TokenMovement> {
        self.user_out()
            .into_iter()
            .chain(self.user_in())
            .filter(|m| matches!(m.kind, TokenKind::Native | TokenKind::Erc20))
            .collect()
    }

    /// True if all payment-leg movements touching the originator use the
    /// same asset (native sentinel `None`, or the same ERC-20 contract).
    pub fn payment_uses_single_asset(&self) -> bool {
        let mut assets = self.payment_movements().into_iter().map(|m| m.asset);
        match assets.next() {
            None => true,
            Some(first) => assets.all(|a| a == first),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{ExecutionType, ResolutionMethod};
    use crate::flow::FlowRole;
    use crate::receipt::TxStatus;
    use crate::transaction::EnvelopeType;
    use alloy_primitives::{B256, Bytes, U256};

    fn originator() -> Address {
        Address::repeat_byte(0xA)
    }

    fn counterparty() -> Address {
        Address::repeat_byte(0xB)
    }

    fn base_tx() -> Transaction {
        Transaction {
            hash: B256::ZERO,
            from: originator(),
            to: Some(counterparty()),
            value: U256::ZERO,
            input: Bytes::new(),
            envelope_type: EnvelopeType::Eip1559,
        }
    }

    fn base_receipt() -> Receipt {
        Receipt {
            status: TxStatus::Success,
            block_number: 1,
            created_contract: None,
            logs: vec![],
        }
    }

    fn base_execution() -> ExecutionDetails {
        ExecutionDetails {
            effective_to: Some(counterparty()),
            execution_type: ExecutionType::Direct,
            is_proxy: false,
            is_multisig: false,
            is_account_abstraction: false,
            implementation: None,
            aa_inner_sender: None,
            resolution_method: ResolutionMethod::Direct,
        }
    }

    fn movement(from: Address, to: Address, role: FlowRole) -> TokenMovement {
        TokenMovement {
            asset: None,
            kind: TokenKind::Native,
            token_id: None,
            from,
            to,
            amount: U256::from(10_000u64),
            role,
        }
    }

    #[test]
    fn unidirectional_out_detected() {
        let mut flow = FlowGraph::new();
        flow.insert(movement(originator(), counterparty(), FlowRole::UserOut));
        let ctx = ClassificationContext::new(
            base_tx(),
            base_receipt(),
            flow,
            ChainConfig::default(),
            base_execution(),
            vec![],
            false,
        );
        assert!(ctx.is_unidirectional_out());
        assert!(!ctx.is_bidirectional_user_flow());
    }

    #[test]
    fn bidirectional_flow_detected() {
        let mut flow = FlowGraph::new();
        flow.insert(movement(originator(), counterparty(), FlowRole::UserOut));
        flow.insert(movement(counterparty(), originator(), FlowRole::UserIn));
        let ctx = ClassificationContext::new(
            base_tx(),
            base_receipt(),
            flow,
            ChainConfig::default(),
            base_execution(),
            vec![],
            false,
        );
        assert!(ctx.is_bidirectional_user_flow());
        assert!(!ctx.is_unidirectional_out());
        assert!(!ctx.is_unidirectional_in());
    }
}
