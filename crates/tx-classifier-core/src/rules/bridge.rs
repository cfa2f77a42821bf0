//! Bridge rule (priority 90).

use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict};

use crate::signatures;
use super::Rule;

const BRIDGE_EVENT_TOPICS: [alloy_primitives::B256; 4] = [
    signatures::ETH_BRIDGE_INITIATED,
    signatures::ETH_BRIDGE_FINALIZED,
    signatures::ERC20_BRIDGE_INITIATED,
    signatures::ERC20_BRIDGE_FINALIZED,
];

fn has_bridge_event(ctx: &ClassificationContext) -> bool {
    ctx.receipt()
        .logs
        .iter()
        .any(|log| matches!(log.topic0(), Some(t) if BRIDGE_EVENT_TOPICS.contains(&t)))
}

fn bridge_event_emitted_by(ctx: &ClassificationContext, target: alloy_primitives::Address) -> bool {
    ctx.receipt()
        .logs_from(target)
        .any(|log| matches!(log.topic0(), Some(t) if BRIDGE_EVENT_TOPICS.contains(&t)))
}

fn bridge_event_emitted_elsewhere(ctx: &ClassificationContext, target: alloy_primitives::Address) -> bool {
    ctx.receipt()
        .logs
        .iter()
        .filter(|log| log.address != target)
        .any(|log| matches!(log.topic0(), Some(t) if BRIDGE_EVENT_TOPICS.contains(&t)))
}

pub(crate) struct BridgeRule;

impl Rule for BridgeRule {
    fn name(&self) -> &'static str {
        "Bridge"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        let Some(target) = ctx.effective_to() else {
            return false;
        };
        ctx.chain_config().canonical_bridges.contains(&target) || has_bridge_event(ctx)
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        let target = ctx.effective_to()?;

        let target_is_bridge = ctx.chain_config().canonical_bridges.contains(&target);
        let event_at_target = bridge_event_emitted_by(ctx, target);
        let event_elsewhere = bridge_event_emitted_elsewhere(ctx, target);

        let mut signal = 0.0_f64;
        if target_is_bridge {
            signal += 0.35;
        }
        if event_at_target || event_elsewhere {
            signal += 0.25;
        }
        if event_elsewhere {
            signal += 0.20;
        }
        signal = signal.min(0.45);

        if ctx.is_bidirectional_user_flow() {
            return None;
        }

        let has_nft = ctx.has_nft_movement();
        let has_bridge_event_any = event_at_target || event_elsewhere;

        let (flow_base, functional_type) = if ctx.is_unidirectional_out() {
            (0.40, FunctionalType::BridgeDeposit)
        } else if ctx.is_unidirectional_in() {
            (0.40, FunctionalType::BridgeWithdraw)
        } else {
            (0.0, FunctionalType::BridgeDeposit)
        };

        // Missing a canonical bridge event is only penalized when the target
        // isn't itself known-bridge evidence; an NFT moving through a known
        // bridge with no event is still penalized, since bridging an NFT
        // without the event is unusual regardless of target membership.
        let mut total = signal + flow_base;
        if !has_bridge_event_any && (!target_is_bridge || has_nft) {
            total -= 0.25;
        }

        let confidence = total.clamp(0.0, 1.0);
        if confidence < 0.70 {
            return None;
        }

        let evidence = EvidenceBreakdown {
            event_match: if has_bridge_event_any { 1.0 } else { 0.0 },
            method_match: 0.0,
            address_match: if target_is_bridge { 1.0 } else { 0.0 },
            token_flow_match: flow_base / 0.40,
            execution_match: 0.0,
        };
        let mut verdict = RuleVerdict::new(functional_type, confidence)
            .with_protocol("Bridge")
            .with_evidence(evidence);
        if target_is_bridge {
            verdict = verdict.with_reason(format!("Target {target} is a known canonical bridge"));
        }
        if has_bridge_event_any {
            verdict = verdict.with_reason("Canonical bridge event present in logs");
        }
        Some(verdict)
    }
}
