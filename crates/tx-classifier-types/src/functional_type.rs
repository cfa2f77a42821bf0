//! The closed enumeration of classification outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable wire values: renaming a variant changes the public API and must be
/// versioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionalType {
    ContractDeployment,
    Swap,
    AddLiquidity,
    RemoveLiquidity,
    BridgeDeposit,
    BridgeWithdraw,
    LendingDeposit,
    LendingWithdraw,
    LendingBorrow,
    LendingRepay,
    LendingLiquidation,
    StakingDeposit,
    StakingWithdraw,
    StakingClaimRewards,
    NftMint,
    NftSale,
    NftTransfer,
    TokenTransfer,
    TokenApproval,
    TokenMint,
    TokenBurn,
    NativeTransfer,
    BulkTransfer,
    GovernanceVote,
    GovernanceProposal,
    GovernanceDelegation,
    GovernanceExecution,
    ContractInteraction,
    UnclassifiedComplex,
    Unknown,
}

impl fmt::Display for FunctionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_value_is_the_variant_name() {
        let serialized = serde_json::to_string(&FunctionalType::BridgeDeposit).unwrap();
        assert_eq!(serialized, "\"BridgeDeposit\"");
    }

    #[test]
    fn roundtrips_through_json() {
        for ft in [
            FunctionalType::Swap,
            FunctionalType::NftSale,
            FunctionalType::Unknown,
        ] {
            let json = serde_json::to_string(&ft).unwrap();
            let back: FunctionalType = serde_json::from_str(&json).unwrap();
            assert_eq!(ft, back);
        }
    }
}
