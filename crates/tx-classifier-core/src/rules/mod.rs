//! The ordered rule set.
//!
//! Each rule implements the two-method contract: [`Rule::matches`] is a
//! cheap gate, [`Rule::classify`] is the deep evaluation, called only when
//! the gate passed. Both are pure; neither mutates the context.

mod bridge;
mod contract_creation;
mod governance;
mod lending;
mod nft_sale;
mod swap;
mod transfer;

use tx_classifier_types::{ClassificationContext, RuleVerdict};

/// A single classification rule.
pub(crate) trait Rule: Send + Sync {
    /// Stable name for debug traces; never shown to end users as a label.
    fn name(&self) -> &'static str;

    /// Registration priority; higher runs first and wins ties.
    fn priority(&self) -> u8;

    /// Cheap gate. If `false`, [`Rule::classify`] is not called.
    fn matches(&self, ctx: &ClassificationContext) -> bool;

    /// Deep evaluation. Only called when [`Rule::matches`] returned `true`.
    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict>;
}

/// The canonical ordered rule set, already sorted by
/// descending priority.
pub(crate) fn registry() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(contract_creation::ContractCreationRule),
        Box::new(bridge::BridgeRule),
        Box::new(lending::LendingRule),
        Box::new(governance::GovernanceRule),
        Box::new(swap::SwapRule),
        Box::new(nft_sale::NftSaleRule),
        Box::new(transfer::TransferRule),
    ];
    rules.sort_by(|a, b| b.priority().cmp(&a.priority()));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_sorted_by_descending_priority() {
        let rules = registry();
        for window in rules.windows(2) {
            assert!(window[0].priority() >= window[1].priority());
        }
    }

    #[test]
    fn registry_matches_spec_priority_table() {
        let rules = registry();
        let names_and_priorities: Vec<(&str, u8)> =
            rules.iter().map(|r| (r.name(), r.priority())).collect();
        assert_eq!(
            names_and_priorities,
            vec![
                ("ContractCreation", 100),
                ("Bridge", 90),
                ("Lending", 90),
                ("Governance", 90),
                ("Swap", 90),
                ("NftSale", 80),
                ("Transfer", 40),
            ]
        );
    }
}
