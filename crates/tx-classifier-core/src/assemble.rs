//! Phase 3: the context assembler.
//!
//! Runs Phase 1 and Phase 2 over the raw inputs and freezes the result into
//! a [`ClassificationContext`]. This module exists only to keep
//! `engine::classify` free of resolver/token-flow wiring details; the frozen
//! type itself lives in `tx_classifier_types::context`.

use tx_classifier_types::{ChainConfig, ClassificationContext, InternalTransfer, Receipt, Transaction};

use crate::{resolver, token_flow};

#[cfg(feature = "telemetry")]
use tracing::instrument;

#[cfg_attr(feature = "telemetry", instrument(skip_all))]
pub(crate) fn assemble(
    transaction: Transaction,
    receipt: Receipt,
    internal_transfers: Vec<InternalTransfer>,
    chain_config: ChainConfig,
    debug: bool,
) -> ClassificationContext {
    let execution = resolver::resolve(&transaction, &receipt, &chain_config);
    let flow = token_flow::analyze(&transaction, &receipt.logs, &internal_transfers, &chain_config);

    ClassificationContext::new(
        transaction,
        receipt,
        flow,
        chain_config,
        execution,
        internal_transfers,
        debug,
    )
}
