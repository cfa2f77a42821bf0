//! Swap rule (priority 90).

use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict, TokenKind};

use super::Rule;
use crate::signatures;

fn has_swap_event(ctx: &ClassificationContext) -> bool {
    ctx.receipt()
        .logs
        .iter()
        .any(|log| log.topic0() == Some(signatures::SWAP_UNISWAP_V2))
}

fn swap_event_emitted_by_effective_target(ctx: &ClassificationContext) -> bool {
    let Some(target) = ctx.effective_to() else {
        return false;
    };
    ctx.receipt()
        .logs_from(target)
        .any(|log| log.topic0() == Some(signatures::SWAP_UNISWAP_V2))
}

/// The single asset the originator received, if exactly one distinct
/// inbound asset is present above dust (the "single dominant output" signal).
fn single_dominant_output(ctx: &ClassificationContext) -> bool {
    let mut assets = ctx.user_in().into_iter().map(|m| m.asset);
    match assets.next() {
        None => false,
        Some(first) => assets.all(|a| a == first),
    }
}

/// True if the originator's sole outgoing asset equals its sole incoming
/// asset (a wrap/unwrap round trip rather than a genuine swap).
fn in_asset_equals_out_asset(ctx: &ClassificationContext) -> bool {
    let out_assets: Vec<_> = ctx
        .user_out()
        .into_iter()
        .map(|m| (m.asset, m.kind))
        .collect();
    let in_assets: Vec<_> = ctx
        .user_in()
        .into_iter()
        .map(|m| (m.asset, m.kind))
        .collect();
    let (Ok([out_one]), Ok([in_one])) = (
        <[_; 1]>::try_from(out_assets.as_slice()),
        <[_; 1]>::try_from(in_assets.as_slice()),
    ) else {
        return false;
    };
    out_one == in_one
}

pub(crate) struct SwapRule;

impl Rule for SwapRule {
    fn name(&self) -> &'static str {
        "Swap"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        has_swap_event(ctx) || ctx.is_bidirectional_user_flow()
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        if !ctx.is_bidirectional_user_flow() {
            return None;
        }

        let mut confidence = 0.0_f64;
        let mut reasons = Vec::new();

        let swap_event = has_swap_event(ctx);
        if swap_event {
            confidence += 0.25;
            reasons.push("Canonical DEX swap event present".to_string());
        }

        // Above-dust bidirectional flow is already guaranteed by the
        // `FlowGraph` construction guarantees every movement present is above dust.
        confidence += 0.40;
        reasons.push("Bidirectional above-dust user flow".to_string());

        if swap_event_emitted_by_effective_target(ctx) {
            confidence += 0.10;
            reasons.push("Swap event emitted by effective call target".to_string());
        }

        if single_dominant_output(ctx) {
            confidence += 0.15;
            reasons.push("Single dominant output asset".to_string());
        }

        if in_asset_equals_out_asset(ctx) {
            confidence -= 0.40;
            reasons.push("Input asset equals output asset (wrap/unwrap)".to_string());
        }

        let confidence = confidence.clamp(0.0, 1.0);
        if confidence < 0.55 {
            return None;
        }

        let has_native_leg = ctx
            .user_out()
            .into_iter()
            .chain(ctx.user_in())
            .any(|m| m.kind == TokenKind::Native);
        let protocol = if swap_event_emitted_by_effective_target(ctx) {
            if has_native_leg {
                "DEX / Uniswap V2"
            } else {
                "DEX"
            }
        } else {
            "DEX"
        };

        let evidence = EvidenceBreakdown {
            event_match: if swap_event { 1.0 } else { 0.0 },
            method_match: 0.0,
            address_match: if swap_event_emitted_by_effective_target(ctx) { 1.0 } else { 0.0 },
            token_flow_match: 1.0,
            execution_match: 0.0,
        };
        let mut verdict = RuleVerdict::new(FunctionalType::Swap, confidence)
            .with_protocol(protocol)
            .with_evidence(evidence);
        for reason in reasons {
            verdict = verdict.with_reason(reason);
        }
        Some(verdict)
    }
}
