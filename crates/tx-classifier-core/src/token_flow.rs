//! Phase 2: the token-flow analyzer.
//!
//! Decodes native value, internal native transfers, and ERC-20/721/1155
//! transfer events into a [`FlowGraph`], dropping anything at or below the
//! chain's dust threshold and role-tagging every movement relative to
//! the originator.

use alloy_primitives::{Address, U256};
use tx_classifier_types::{
    ChainConfig, FlowGraph, FlowRole, InternalTransfer, Log, TokenKind, TokenMovement, Transaction,
};

use crate::signatures;

#[cfg(feature = "telemetry")]
use tracing::instrument;

fn role_for(originator: Address, from: Address, to: Address) -> FlowRole {
    if from == originator {
        FlowRole::UserOut
    } else if to == originator {
        FlowRole::UserIn
    } else {
        FlowRole::ProtocolInternal
    }
}

fn above_dust(amount: U256, dust_threshold: u128) -> bool {
    amount > U256::ZERO && amount > U256::from(dust_threshold)
}

fn address_from_topic(topic: &alloy_primitives::B256) -> Address {
    Address::from_slice(&topic[12..])
}

/// Decodes a single log into zero or more [`TokenMovement`]s. Malformed logs
/// (wrong topic count, mismatched batch array lengths) decode to nothing
/// rather than aborting analysis.
fn decode_log(log: &Log, originator: Address) -> Vec<TokenMovement> {
    let Some(topic0) = log.topic0() else {
        return Vec::new();
    };

    if topic0 == signatures::TRANSFER {
        return decode_transfer(log, originator);
    }
    if topic0 == signatures::TRANSFER_SINGLE {
        return decode_transfer_single(log, originator).into_iter().collect();
    }
    if topic0 == signatures::TRANSFER_BATCH {
        return decode_transfer_batch(log, originator);
    }
    Vec::new()
}

/// `Transfer(address,address,uint256)`, shared by ERC-20 and ERC-721.
/// Distinguished by topic count: ERC-20 has 3 topics (from, to indexed;
/// amount in data), ERC-721 has 4 (from, to, tokenId all indexed).
fn decode_transfer(log: &Log, originator: Address) -> Vec<TokenMovement> {
    match log.topics.len() {
        3 => {
            let Some(amount) = U256::try_from_be_slice(&log.data) else {
                return Vec::new();
            };
            let from = address_from_topic(&log.topics[1]);
            let to = address_from_topic(&log.topics[2]);
            vec![TokenMovement {
                asset: Some(log.address),
                kind: TokenKind::Erc20,
                token_id: None,
                from,
                to,
                amount,
                role: role_for(originator, from, to),
            }]
        }
        4 => {
            let from = address_from_topic(&log.topics[1]);
            let to = address_from_topic(&log.topics[2]);
            let token_id = U256::from_be_bytes(log.topics[3].0);
            vec![TokenMovement {
                asset: Some(log.address),
                kind: TokenKind::Erc721,
                token_id: Some(token_id),
                from,
                to,
                amount: U256::from(1u8),
                role: role_for(originator, from, to),
            }]
        }
        _ => Vec::new(),
    }
}

/// `TransferSingle(operator,from,to,id,value)`.
fn decode_transfer_single(log: &Log, originator: Address) -> Option<TokenMovement> {
    if log.topics.len() != 4 || log.data.len() < 64 {
        return None;
    }
    let from = address_from_topic(&log.topics[2]);
    let to = address_from_topic(&log.topics[3]);
    let token_id = U256::from_be_slice(&log.data[..32]);
    let amount = U256::from_be_slice(&log.data[32..64]);
    Some(TokenMovement {
        asset: Some(log.address),
        kind: TokenKind::Erc1155,
        token_id: Some(token_id),
        from,
        to,
        amount,
        role: role_for(originator, from, to),
    })
}

/// `TransferBatch(operator,from,to,ids[],values[])`. Each element becomes
/// its own movement; a length mismatch between the two arrays discards the
/// whole log.
fn decode_transfer_batch(log: &Log, originator: Address) -> Vec<TokenMovement> {
    if log.topics.len() != 4 {
        return Vec::new();
    }
    let from = address_from_topic(&log.topics[2]);
    let to = address_from_topic(&log.topics[3]);

    let Some((ids, values)) = decode_dynamic_uint_array_pair(&log.data) else {
        return Vec::new();
    };
    if ids.len() != values.len() {
        return Vec::new();
    }

    ids.into_iter()
        .zip(values)
        .map(|(token_id, amount)| TokenMovement {
            asset: Some(log.address),
            kind: TokenKind::Erc1155,
            token_id: Some(token_id),
            from,
            to,
            amount,
            role: role_for(originator, from, to),
        })
        .collect()
}

/// Decodes two ABI-encoded dynamic `uint256[]` arrays packed back to back,
/// as emitted by `TransferBatch`'s non-indexed data. Returns `None` if the
/// data is too short to contain valid offsets/lengths.
fn decode_dynamic_uint_array_pair(data: &[u8]) -> Option<(Vec<U256>, Vec<U256>)> {
    if data.len() < 64 {
        return None;
    }
    let ids_offset = U256::from_be_slice(&data[0..32]).try_into().ok()?;
    let values_offset: usize = U256::from_be_slice(&data[32..64]).try_into().ok()?;
    let ids = decode_uint_array_at(data, ids_offset)?;
    let values = decode_uint_array_at(data, values_offset)?;
    Some((ids, values))
}

fn decode_uint_array_at(data: &[u8], offset: usize) -> Option<Vec<U256>> {
    if offset + 32 > data.len() {
        return None;
    }
    let len: usize = U256::from_be_slice(&data[offset..offset + 32])
        .try_into()
        .ok()?;
    let start = offset + 32;
    let end = start.checked_add(len.checked_mul(32)?)?;
    if end > data.len() {
        return None;
    }
    Some(
        data[start..end]
            .chunks_exact(32)
            .map(U256::from_be_slice)
            .collect(),
    )
}

/// Builds the flow graph for one transaction: top-level native value,
/// internal native transfers, and every decodable transfer-shaped log,
/// dust-filtered and role-tagged relative to `transaction.from`.
#[cfg_attr(feature = "telemetry", instrument(skip_all))]
pub(crate) fn analyze(
    transaction: &Transaction,
    logs: &[Log],
    internal_transfers: &[InternalTransfer],
    chain_config: &ChainConfig,
) -> FlowGraph {
    let originator = transaction.from;
    let dust_threshold = chain_config.dust_threshold;
    let mut graph = FlowGraph::new();

    if let Some(to) = transaction.to {
        if above_dust(transaction.value, dust_threshold) {
            graph.insert(TokenMovement {
                asset: None,
                kind: TokenKind::Native,
                token_id: None,
                from: originator,
                to,
                amount: transaction.value,
                role: role_for(originator, originator, to),
            });
        }
    }

    for transfer in internal_transfers {
        if above_dust(transfer.value, dust_threshold) {
            graph.insert(TokenMovement {
                asset: None,
                kind: TokenKind::Native,
                token_id: None,
                from: transfer.from,
                to: transfer.to,
                amount: transfer.value,
                role: role_for(originator, transfer.from, transfer.to),
            });
        }
    }

    for log in logs {
        for movement in decode_log(log, originator) {
            if above_dust(movement.amount, dust_threshold) {
                graph.insert(movement);
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, Bytes};
    use tx_classifier_types::EnvelopeType;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn base_tx(from: Address, to: Option<Address>, value: U256) -> Transaction {
        Transaction {
            hash: B256::ZERO,
            from,
            to,
            value,
            input: Bytes::new(),
            envelope_type: EnvelopeType::Eip1559,
        }
    }

    fn erc20_transfer_log(emitter: Address, from: Address, to: Address, amount: U256) -> Log {
        let mut data = [0u8; 32];
        let amount_bytes = amount.to_be_bytes::<32>();
        data.copy_from_slice(&amount_bytes);
        Log {
            address: emitter,
            topics: vec![
                signatures::TRANSFER,
                topic_for(from),
                topic_for(to),
            ],
            data: Bytes::from(data.to_vec()),
        }
    }

    fn topic_for(address: Address) -> B256 {
        let mut topic = [0u8; 32];
        topic[12..].copy_from_slice(address.as_slice());
        B256::new(topic)
    }

    #[test]
    fn native_value_above_dust_is_tagged_user_out() {
        let originator = addr(0xA);
        let counterparty = addr(0xB);
        let tx = base_tx(originator, Some(counterparty), U256::from(10u64.pow(18)));
        let graph = analyze(&tx, &[], &[], &ChainConfig::default());
        let movements = graph.movements_out_of(originator);
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].role, FlowRole::UserOut);
        assert_eq!(movements[0].kind, TokenKind::Native);
    }

    #[test]
    fn native_value_at_or_below_dust_is_dropped() {
        let originator = addr(0xA);
        let counterparty = addr(0xB);
        let mut chain_config = ChainConfig::default();
        chain_config.dust_threshold = 1000;
        let tx = base_tx(originator, Some(counterparty), U256::from(1000u64));
        let graph = analyze(&tx, &[], &[], &chain_config);
        assert!(graph.is_empty());
    }

    #[test]
    fn erc20_transfer_log_decodes_with_amount_from_data() {
        let originator = addr(0xA);
        let token = addr(0xC0);
        let counterparty = addr(0xB);
        let log = erc20_transfer_log(token, originator, counterparty, U256::from(5_000_000u64));
        let tx = base_tx(originator, Some(counterparty), U256::ZERO);
        let graph = analyze(&tx, &[log], &[], &ChainConfig::default());
        let movements = graph.movements_out_of(originator);
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].kind, TokenKind::Erc20);
        assert_eq!(movements[0].asset, Some(token));
        assert_eq!(movements[0].amount, U256::from(5_000_000u64));
    }

    #[test]
    fn erc20_transfer_log_with_oversized_data_is_dropped_not_panicked() {
        let originator = addr(0xA);
        let token = addr(0xC0);
        let counterparty = addr(0xB);
        let log = Log {
            address: token,
            topics: vec![signatures::TRANSFER, topic_for(originator), topic_for(counterparty)],
            data: Bytes::from(vec![0xFFu8; 64]),
        };
        let tx = base_tx(originator, Some(counterparty), U256::ZERO);
        let graph = analyze(&tx, &[log], &[], &ChainConfig::default());
        assert!(graph.is_empty());
    }

    #[test]
    fn erc721_transfer_has_four_topics_and_token_id() {
        let originator = addr(0xA);
        let collection = addr(0xC1);
        let counterparty = addr(0xB);
        let mut id_topic = [0u8; 32];
        id_topic[31] = 7;
        let log = Log {
            address: collection,
            topics: vec![
                signatures::TRANSFER,
                topic_for(originator),
                topic_for(counterparty),
                B256::new(id_topic),
            ],
            data: Bytes::new(),
        };
        let tx = base_tx(originator, Some(counterparty), U256::ZERO);
        let graph = analyze(&tx, &[log], &[], &ChainConfig::default());
        let movements = graph.movements_out_of(originator);
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].kind, TokenKind::Erc721);
        assert_eq!(movements[0].token_id, Some(U256::from(7u64)));
        assert_eq!(movements[0].amount, U256::from(1u8));
    }

    #[test]
    fn internal_transfer_is_tagged_protocol_internal_between_third_parties() {
        let originator = addr(0xA);
        let party1 = addr(0xB);
        let party2 = addr(0xC);
        let tx = base_tx(originator, Some(party1), U256::ZERO);
        let internal = InternalTransfer {
            from: party1,
            to: party2,
            value: U256::from(10u64.pow(18)),
        };
        let graph = analyze(&tx, &[], &[internal], &ChainConfig::default());
        let movements = graph.movements_out_of(party1);
        assert_eq!(movements[0].role, FlowRole::ProtocolInternal);
    }
}
