//! Token movements and the flow graph produced by the token-flow analyzer.

use alloy_primitives::{Address, U256};
use std::collections::BTreeMap;

/// The asset standard a [`TokenMovement`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Native,
    Erc20,
    Erc721,
    Erc1155,
}

/// A movement's role relative to the transaction originator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRole {
    /// The originator sent this asset.
    UserOut,
    /// The originator received this asset.
    UserIn,
    /// Neither party is the originator.
    ProtocolInternal,
}

/// A single decoded asset movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMovement {
    /// `None` for native value; `Some(contract)` for ERC-20/721/1155.
    pub asset: Option<Address>,
    pub kind: TokenKind,
    /// Token id for ERC-721/1155 movements.
    pub token_id: Option<U256>,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub role: FlowRole,
}

/// The incoming and outgoing movements recorded against one address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFlow {
    pub incoming: Vec<TokenMovement>,
    pub outgoing: Vec<TokenMovement>,
}

/// A mapping from address to its observed movements.
///
/// Backed by a [`BTreeMap`] rather than a [`std::collections::HashMap`] so
/// that any iteration over the full graph is deterministic without a sort
/// step at every call site — hash-map insertion order must never leak into
/// a computed verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowGraph {
    by_address: BTreeMap<Address, AddressFlow>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `movement` in both its sender's outgoing list and its
    /// receiver's incoming list (flow duality).
    pub fn insert(&mut self, movement: TokenMovement) {
        self.by_address
            .entry(movement.from)
            .or_default()
            .outgoing
            .push(movement.clone());
        self.by_address
            .entry(movement.to)
            .or_default()
            .incoming
            .push(movement);
    }

    pub fn flow_for(&self, address: Address) -> Option<&AddressFlow> {
        self.by_address.get(&address)
    }

    /// All movements in the graph, visited in `(address, incoming-then-outgoing)`
    /// order. Each movement appears twice (once per side of the flow); callers that need a
    /// deduplicated view should use [`FlowGraph::movements_out_of`] and
    /// [`FlowGraph::movements_into`] against a single address instead.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.by_address.keys()
    }

    pub fn movements_out_of(&self, address: Address) -> &[TokenMovement] {
        self.by_address
            .get(&address)
            .map(|f| f.outgoing.as_slice())
            .unwrap_or(&[])
    }

    pub fn movements_into(&self, address: Address) -> &[TokenMovement] {
        self.by_address
            .get(&address)
            .map(|f| f.incoming.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn insert_is_visible_from_both_endpoints() {
        let mut graph = FlowGraph::new();
        let movement = TokenMovement {
            asset: None,
            kind: TokenKind::Native,
            token_id: None,
            from: addr(0xA),
            to: addr(0xB),
            amount: U256::from(10_000u64),
            role: FlowRole::UserOut,
        };
        graph.insert(movement.clone());
        assert_eq!(graph.movements_out_of(addr(0xA)), &[movement.clone()]);
        assert_eq!(graph.movements_into(addr(0xB)), &[movement]);
    }
}
