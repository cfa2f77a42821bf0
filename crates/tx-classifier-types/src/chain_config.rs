//! Static per-chain configuration and the default registry.
//!
//! A `const`-backed array of well-known entries plus a lazily-built lookup,
//! keyed by numeric EVM chain id rather than a CAIP-2 name, since the
//! classifier core never needs cross-namespace (e.g. Solana) chain ids.

use alloy_primitives::Address;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Coarse chain classification. Not read by any rule today, but part of the
/// interface contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainClass {
    L1,
    L2,
}

/// Per-chain configuration consumed by the execution resolver, token-flow
/// analyzer and rule engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub class: ChainClass,
    pub native_symbol: &'static str,
    /// Address of the wrapped-native token contract, if the chain has one.
    pub wrapped_native: Option<Address>,
    /// Minimum amount, exclusive, above which a token movement is meaningful.
    pub dust_threshold: u128,
    pub canonical_bridges: HashSet<Address>,
    pub known_routers: HashSet<Address>,
    pub known_lending_pools: HashSet<Address>,
    pub entry_points: HashSet<Address>,
}

impl Default for ChainConfig {
    /// The default entry used for unknown chains.
    fn default() -> Self {
        ChainConfig {
            chain_id: 0,
            class: ChainClass::L1,
            native_symbol: "ETH",
            wrapped_native: None,
            dust_threshold: 1000,
            canonical_bridges: HashSet::new(),
            known_routers: HashSet::new(),
            known_lending_pools: HashSet::new(),
            entry_points: HashSet::new(),
        }
    }
}

macro_rules! addr {
    ($hex:literal) => {
        Address::new(alloy_primitives::hex!($hex))
    };
}

/// The canonical ERC-4337 v0.6 entry point, identical across every chain it
/// is deployed on.
pub fn erc4337_entry_point_v06() -> Address {
    addr!("5ff137d4b0fdcd49dca30c7cf57e578a026d2789")
}

fn ethereum_mainnet() -> ChainConfig {
    ChainConfig {
        chain_id: 1,
        class: ChainClass::L1,
        native_symbol: "ETH",
        wrapped_native: Some(addr!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")),
        dust_threshold: 1000,
        canonical_bridges: HashSet::from([
            // Optimism L1 Standard Bridge
            addr!("99c9fc46f92e8a1c0dec1b1747d010903e884be1"),
            // Arbitrum L1 Gateway Router
            addr!("72ce9c846789fdb6fc1f34ac4ad25dd9ef7031ef"),
            // Base L1 Standard Bridge
            addr!("3154cf16ccdb4c6d922629664174b904d80f2c35"),
        ]),
        known_routers: HashSet::from([
            // Uniswap V2 Router02
            addr!("7a250d5630b4cf539739df2c5dacb4c659f2488d"),
            // Uniswap V3 SwapRouter
            addr!("e592427a0aece92de3edee1f18e0157c05861564"),
        ]),
        known_lending_pools: HashSet::from([
            // Aave V3 Pool
            addr!("87870bca3f3fd6335c3f4ce8392d69350b4fa4e2"),
            // Compound v2 Comptroller
            addr!("3d9819210a31b4961b30ef54be2aed79b9c9cd3b"),
        ]),
        entry_points: HashSet::from([erc4337_entry_point_v06()]),
    }
}

fn optimism_mainnet() -> ChainConfig {
    ChainConfig {
        chain_id: 10,
        class: ChainClass::L2,
        native_symbol: "ETH",
        wrapped_native: Some(addr!("4200000000000000000000000000000000000006")),
        dust_threshold: 1000,
        canonical_bridges: HashSet::from([
            // Optimism L2 Standard Bridge (predeploy)
            addr!("4200000000000000000000000000000000000010"),
        ]),
        known_routers: HashSet::from([
            // Uniswap V3 SwapRouter on Optimism
            addr!("e592427a0aece92de3edee1f18e0157c05861564"),
        ]),
        known_lending_pools: HashSet::from([addr!("794a61358d6845594f94dc1db02a252b5b4814ad")]),
        entry_points: HashSet::from([erc4337_entry_point_v06()]),
    }
}

fn base_mainnet() -> ChainConfig {
    ChainConfig {
        chain_id: 8453,
        class: ChainClass::L2,
        native_symbol: "ETH",
        wrapped_native: Some(addr!("4200000000000000000000000000000000000006")),
        dust_threshold: 1000,
        canonical_bridges: HashSet::from([addr!("4200000000000000000000000000000000000010")]),
        known_routers: HashSet::from([addr!("2626664c2603336e57b271c5c0b26f421741e481")]),
        known_lending_pools: HashSet::from([addr!("a238dd80c259a72e81d7e4664a9801593f98d1c5")]),
        entry_points: HashSet::from([erc4337_entry_point_v06()]),
    }
}

fn arbitrum_mainnet() -> ChainConfig {
    ChainConfig {
        chain_id: 42161,
        class: ChainClass::L2,
        native_symbol: "ETH",
        wrapped_native: Some(addr!("82af49447d8a07e3bd95bd0d56f35241523fbab1")),
        dust_threshold: 1000,
        canonical_bridges: HashSet::from([addr!("5288c571fd7ad117bea99bf60fe0846c4e84f933")]),
        known_routers: HashSet::from([addr!("e592427a0aece92de3edee1f18e0157c05861564")]),
        known_lending_pools: HashSet::from([addr!("794a61358d6845594f94dc1db02a252b5b4814ad")]),
        entry_points: HashSet::from([erc4337_entry_point_v06()]),
    }
}

fn polygon_mainnet() -> ChainConfig {
    ChainConfig {
        chain_id: 137,
        class: ChainClass::L2,
        native_symbol: "MATIC",
        wrapped_native: Some(addr!("0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")),
        dust_threshold: 1000,
        canonical_bridges: HashSet::from([addr!("a0c68c638235ee32657e8f720a23cec1bfc77c77")]),
        known_routers: HashSet::from([addr!("a5e0829caced8ffdd4de3c43696c57f7d7a678ff")]),
        known_lending_pools: HashSet::from([addr!("794a61358d6845594f94dc1db02a252b5b4814ad")]),
        entry_points: HashSet::from([erc4337_entry_point_v06()]),
    }
}

static CHAIN_REGISTRY: LazyLock<Vec<ChainConfig>> = LazyLock::new(|| {
    vec![
        ethereum_mainnet(),
        optimism_mainnet(),
        base_mainnet(),
        arbitrum_mainnet(),
        polygon_mainnet(),
    ]
});

/// Looks up the [`ChainConfig`] for `chain_id`, falling back to
/// [`ChainConfig::default`] for unknown chains.
pub fn chain_config_for(chain_id: u64) -> ChainConfig {
    CHAIN_REGISTRY
        .iter()
        .find(|c| c.chain_id == chain_id)
        .cloned()
        .unwrap_or_else(|| ChainConfig {
            chain_id,
            ..ChainConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chain_resolves_its_own_entry() {
        let cfg = chain_config_for(1);
        assert_eq!(cfg.chain_id, 1);
        assert!(cfg.known_routers.contains(&addr!("7a250d5630b4cf539739df2c5dacb4c659f2488d")));
    }

    #[test]
    fn unknown_chain_falls_back_to_default() {
        let cfg = chain_config_for(999_999);
        assert_eq!(cfg.chain_id, 999_999);
        assert_eq!(cfg.dust_threshold, 1000);
        assert!(cfg.canonical_bridges.is_empty());
        assert!(matches!(cfg.class, ChainClass::L1));
    }

    #[test]
    fn entry_point_is_shared_across_chains() {
        let eth = chain_config_for(1);
        let op = chain_config_for(10);
        assert_eq!(eth.entry_points, op.entry_points);
    }
}
