//! Governance rule (priority 90).

use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict};

use super::Rule;
use crate::signatures;

fn matching_selector(ctx: &ClassificationContext) -> Option<FunctionalType> {
    match ctx.transaction().selector() {
        Some(s) if s == signatures::GOVERNOR_CAST_VOTE_SELECTOR => Some(FunctionalType::GovernanceVote),
        Some(s) if s == signatures::GOVERNOR_CAST_VOTE_WITH_REASON_SELECTOR => {
            Some(FunctionalType::GovernanceVote)
        }
        Some(s) if s == signatures::GOVERNOR_PROPOSE_SELECTOR => Some(FunctionalType::GovernanceProposal),
        Some(s) if s == signatures::GOVERNOR_DELEGATE_SELECTOR => Some(FunctionalType::GovernanceDelegation),
        Some(s) if s == signatures::GOVERNOR_EXECUTE_SELECTOR => Some(FunctionalType::GovernanceExecution),
        _ => None,
    }
}

fn matching_event(ctx: &ClassificationContext) -> Option<FunctionalType> {
    ctx.receipt().logs.iter().find_map(|log| match log.topic0() {
        Some(t) if t == signatures::GOVERNOR_VOTE_CAST => Some(FunctionalType::GovernanceVote),
        Some(t) if t == signatures::GOVERNOR_PROPOSAL_CREATED => Some(FunctionalType::GovernanceProposal),
        Some(t) if t == signatures::GOVERNOR_DELEGATE_CHANGED => Some(FunctionalType::GovernanceDelegation),
        Some(t) if t == signatures::GOVERNOR_DELEGATE_VOTES_CHANGED => {
            Some(FunctionalType::GovernanceDelegation)
        }
        Some(t) if t == signatures::GOVERNOR_PROPOSAL_EXECUTED => Some(FunctionalType::GovernanceExecution),
        _ => None,
    })
}

/// True if signals strong enough for Bridge or Lending to also fire are
/// present; governance yields priority to them via the conflict-dampening
/// stage via priority and conflict dampening, but a same-tx
/// bridge/lending event makes the governance reading itself less credible.
fn bridge_or_lending_signal_present(ctx: &ClassificationContext) -> bool {
    let bridge_events = [
        signatures::ETH_BRIDGE_INITIATED,
        signatures::ETH_BRIDGE_FINALIZED,
        signatures::ERC20_BRIDGE_INITIATED,
        signatures::ERC20_BRIDGE_FINALIZED,
    ];
    let lending_events = [
        signatures::AAVE_SUPPLY,
        signatures::AAVE_WITHDRAW,
        signatures::AAVE_BORROW,
        signatures::AAVE_REPAY,
        signatures::AAVE_LIQUIDATION_CALL,
        signatures::COMPOUND_MINT,
        signatures::COMPOUND_REDEEM,
        signatures::COMPOUND_BORROW,
        signatures::COMPOUND_REPAY_BORROW,
    ];
    ctx.receipt().logs.iter().any(|log| {
        matches!(log.topic0(), Some(t) if bridge_events.contains(&t) || lending_events.contains(&t))
    })
}

pub(crate) struct GovernanceRule;

impl Rule for GovernanceRule {
    fn name(&self) -> &'static str {
        "Governance"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        matching_selector(ctx).is_some() || matching_event(ctx).is_some()
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        if bridge_or_lending_signal_present(ctx) {
            return None;
        }

        let selector_type = matching_selector(ctx);
        let Some(functional_type) = selector_type.or_else(|| matching_event(ctx)) else {
            return None;
        };

        let mut confidence = 0.0_f64;
        let mut addons = 0.0_f64;
        let mut reasons = Vec::new();
        if selector_type.is_some() {
            confidence += 0.30;
            reasons.push("Known governance selector matched".to_string());
            addons += 0.20;
        }
        if matching_event(ctx).is_some() {
            addons += 0.25;
            reasons.push("Canonical governance event present".to_string());
        }
        // A target-membership bonus for known-governance contracts is not
        // modeled: ChainConfig names only
        // bridges/routers/lending pools/entry points, so that bonus has no
        // address set to check against and is not reachable here.
        confidence += addons.min(0.45);
        let confidence = confidence.clamp(0.0, 1.0);
        if confidence < 0.70 {
            return None;
        }

        let evidence = EvidenceBreakdown {
            event_match: if matching_event(ctx).is_some() { 1.0 } else { 0.0 },
            method_match: if selector_type.is_some() { 1.0 } else { 0.0 },
            address_match: 0.0,
            token_flow_match: 0.0,
            execution_match: 0.0,
        };
        let mut verdict = RuleVerdict::new(functional_type, confidence)
            .with_protocol("Governance")
            .with_evidence(evidence);
        for reason in reasons {
            verdict = verdict.with_reason(reason);
        }
        Some(verdict)
    }
}
