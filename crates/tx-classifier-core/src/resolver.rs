//! Phase 1: the execution resolver.
//!
//! Three independent detectors run over `(Transaction, Receipt)` and are
//! then merged by specificity. The resolver never fails; an
//! unrecognized pattern degrades to `Direct`.

use alloy_primitives::Address;
use tx_classifier_types::{
    ChainConfig, ExecutionDetails, ExecutionType, Receipt, ResolutionMethod, Transaction,
};

use crate::signatures;

#[cfg(feature = "telemetry")]
use tracing::instrument;

struct ProxySignal {
    implementation: Address,
}

struct MultisigSignal;

struct AaSignal {
    inner_sender: Option<Address>,
}

/// EIP-1967 proxy detector: scans logs emitted by `target` for `Upgraded` or
/// `BeaconUpgraded`, taking the last 20 bytes of `topics[1]` as the
/// implementation/beacon address. Minimal-proxy (EIP-1167) patterns are not
/// detected.
fn detect_proxy(receipt: &Receipt, target: Address) -> Option<ProxySignal> {
    receipt.logs_from(target).find_map(|log| {
        let topic0 = log.topic0()?;
        if topic0 != signatures::UPGRADED && topic0 != signatures::BEACON_UPGRADED {
            return None;
        }
        let topic1 = log.topics.get(1)?;
        Some(ProxySignal {
            implementation: Address::from_slice(&topic1[12..]),
        })
    })
}

/// Safe/Argent multisig detector: selector match on the outer call, or an
/// `ExecutionSuccess`/`ExecutionFailure` event emitted by the target.
fn detect_multisig(transaction: &Transaction, receipt: &Receipt, target: Address) -> Option<MultisigSignal> {
    if transaction.selector() == Some(signatures::SAFE_EXEC_TRANSACTION_SELECTOR) {
        return Some(MultisigSignal);
    }
    let emits_execution_event = receipt.logs_from(target).any(|log| {
        matches!(
            log.topic0(),
            Some(t) if t == signatures::EXECUTION_SUCCESS || t == signatures::EXECUTION_FAILURE
        )
    });
    emits_execution_event.then_some(MultisigSignal)
}

/// ERC-4337 account-abstraction detector: selector match against a known
/// entry point, or a `UserOperationEvent` emitted by an entry point.
fn detect_account_abstraction(
    transaction: &Transaction,
    receipt: &Receipt,
    target: Address,
    chain_config: &ChainConfig,
) -> Option<AaSignal> {
    let target_is_entry_point = chain_config.entry_points.contains(&target);
    let selector_matches = matches!(
        transaction.selector(),
        Some(s) if s == signatures::HANDLE_OPS_SELECTOR || s == signatures::HANDLE_AGGREGATED_OPS_SELECTOR
    );
    if target_is_entry_point && selector_matches {
        return Some(AaSignal { inner_sender: None });
    }

    receipt
        .logs
        .iter()
        .filter(|log| chain_config.entry_points.contains(&log.address))
        .find_map(|log| {
            if log.topic0() != Some(signatures::USER_OPERATION_EVENT) {
                return None;
            }
            // When topics.len == 4, the sender is at index 2;
            // otherwise index 1.
            let index = if log.topics.len() == 4 { 2 } else { 1 };
            let sender = log
                .topics
                .get(index)
                .map(|topic| Address::from_slice(&topic[12..]));
            Some(AaSignal {
                inner_sender: sender,
            })
        })
}

/// Resolves who really executed `transaction`, given its `receipt` and the
/// chain's entry-point registry.
#[cfg_attr(feature = "telemetry", instrument(skip_all))]
pub(crate) fn resolve(
    transaction: &Transaction,
    receipt: &Receipt,
    chain_config: &ChainConfig,
) -> ExecutionDetails {
    let Some(target) = transaction.to else {
        return ExecutionDetails::contract_creation(receipt.created_contract);
    };

    let proxy = detect_proxy(receipt, target);
    let multisig = detect_multisig(transaction, receipt, target);
    let aa = detect_account_abstraction(transaction, receipt, target, chain_config);

    let is_proxy = proxy.is_some();
    let is_multisig = multisig.is_some();
    let is_account_abstraction = aa.is_some();

    // Specificity order: Multisig+Proxy > Multisig > AccountAbstraction > Relayed(Proxy) > Direct.
    let (execution_type, resolution_method) = if is_multisig {
        (
            ExecutionType::Multisig,
            if transaction.selector() == Some(signatures::SAFE_EXEC_TRANSACTION_SELECTOR) {
                ResolutionMethod::MultisigSelector
            } else {
                ResolutionMethod::MultisigExecutionEvent
            },
        )
    } else if is_account_abstraction {
        (
            ExecutionType::AccountAbstraction,
            ResolutionMethod::AccountAbstractionEntryPoint,
        )
    } else if is_proxy {
        (ExecutionType::Relayed, ResolutionMethod::ProxyUpgraded)
    } else {
        (ExecutionType::Direct, ResolutionMethod::Direct)
    };

    let implementation = proxy.as_ref().map(|p| p.implementation);
    let effective_to = implementation.or(Some(target));
    let aa_inner_sender = aa.and_then(|s| s.inner_sender);

    ExecutionDetails {
        effective_to,
        execution_type,
        is_proxy,
        is_multisig,
        is_account_abstraction,
        implementation,
        aa_inner_sender,
        resolution_method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, Bytes, U256};
    use tx_classifier_types::{EnvelopeType, Log, TxStatus};

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn base_tx(to: Option<Address>, input: Bytes) -> Transaction {
        Transaction {
            hash: B256::ZERO,
            from: addr(0xA),
            to,
            value: U256::ZERO,
            input,
            envelope_type: EnvelopeType::Eip1559,
        }
    }

    fn receipt_with_logs(logs: Vec<Log>) -> Receipt {
        Receipt {
            status: TxStatus::Success,
            block_number: 1,
            created_contract: None,
            logs,
        }
    }

    fn upgraded_log(emitter: Address, implementation: Address) -> Log {
        let mut topic1 = [0u8; 32];
        topic1[12..].copy_from_slice(implementation.as_slice());
        Log {
            address: emitter,
            topics: vec![signatures::UPGRADED, B256::new(topic1)],
            data: Bytes::new(),
        }
    }

    #[test]
    fn contract_creation_is_direct() {
        let tx = base_tx(None, Bytes::new());
        let receipt = Receipt {
            status: TxStatus::Success,
            block_number: 1,
            created_contract: Some(addr(0xC)),
            logs: vec![],
        };
        let details = resolve(&tx, &receipt, &ChainConfig::default());
        assert_eq!(details.execution_type, ExecutionType::Direct);
        assert_eq!(details.effective_to, Some(addr(0xC)));
        assert_eq!(details.resolution_method, ResolutionMethod::ContractCreation);
    }

    #[test]
    fn proxy_upgraded_resolves_to_relayed() {
        let target = addr(0xB);
        let implementation = addr(0xD);
        let tx = base_tx(Some(target), Bytes::new());
        let receipt = receipt_with_logs(vec![upgraded_log(target, implementation)]);
        let details = resolve(&tx, &receipt, &ChainConfig::default());
        assert_eq!(details.execution_type, ExecutionType::Relayed);
        assert!(details.is_proxy);
        assert_eq!(details.implementation, Some(implementation));
        assert_eq!(details.effective_to, Some(implementation));
    }

    #[test]
    fn safe_selector_resolves_to_multisig() {
        let target = addr(0xB);
        let mut input = signatures::SAFE_EXEC_TRANSACTION_SELECTOR.to_vec();
        input.extend_from_slice(&[0u8; 32]);
        let tx = base_tx(Some(target), Bytes::from(input));
        let receipt = receipt_with_logs(vec![]);
        let details = resolve(&tx, &receipt, &ChainConfig::default());
        assert_eq!(details.execution_type, ExecutionType::Multisig);
        assert!(details.is_multisig);
    }

    #[test]
    fn multisig_and_proxy_both_present_resolves_to_multisig() {
        let target = addr(0xB);
        let implementation = addr(0xD);
        let mut input = signatures::SAFE_EXEC_TRANSACTION_SELECTOR.to_vec();
        input.extend_from_slice(&[0u8; 32]);
        let tx = base_tx(Some(target), Bytes::from(input));
        let receipt = receipt_with_logs(vec![upgraded_log(target, implementation)]);
        let details = resolve(&tx, &receipt, &ChainConfig::default());
        assert_eq!(details.execution_type, ExecutionType::Multisig);
        assert!(details.is_multisig);
        assert!(details.is_proxy);
    }

    #[test]
    fn account_abstraction_selector_at_entry_point() {
        let entry_point = addr(0xE);
        let mut chain_config = ChainConfig::default();
        chain_config.entry_points.insert(entry_point);
        let mut input = signatures::HANDLE_OPS_SELECTOR.to_vec();
        input.extend_from_slice(&[0u8; 32]);
        let tx = base_tx(Some(entry_point), Bytes::from(input));
        let receipt = receipt_with_logs(vec![]);
        let details = resolve(&tx, &receipt, &chain_config);
        assert_eq!(details.execution_type, ExecutionType::AccountAbstraction);
        assert!(details.is_account_abstraction);
    }

    #[test]
    fn user_operation_event_with_four_topics_reads_sender_at_index_two() {
        let entry_point = addr(0xE);
        let mut chain_config = ChainConfig::default();
        chain_config.entry_points.insert(entry_point);
        let smart_account = addr(0xF);
        let mut sender_topic = [0u8; 32];
        sender_topic[12..].copy_from_slice(smart_account.as_slice());
        let log = Log {
            address: entry_point,
            topics: vec![
                signatures::USER_OPERATION_EVENT,
                B256::ZERO,
                B256::new(sender_topic),
                B256::ZERO,
            ],
            data: Bytes::new(),
        };
        let tx = base_tx(Some(entry_point), Bytes::new());
        let receipt = receipt_with_logs(vec![log]);
        let details = resolve(&tx, &receipt, &chain_config);
        assert_eq!(details.execution_type, ExecutionType::AccountAbstraction);
        assert_eq!(details.aa_inner_sender, Some(smart_account));
    }

    #[test]
    fn unrecognized_pattern_degrades_to_direct() {
        let target = addr(0xB);
        let tx = base_tx(Some(target), Bytes::new());
        let receipt = receipt_with_logs(vec![]);
        let details = resolve(&tx, &receipt, &ChainConfig::default());
        assert_eq!(details.execution_type, ExecutionType::Direct);
        assert_eq!(details.effective_to, Some(target));
    }
}
