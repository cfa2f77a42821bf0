//! Lending rule (priority 90).

use alloy_primitives::B256;
use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict};

use super::Rule;
use crate::signatures;

const DEPOSIT_EVENTS: [B256; 2] = [signatures::AAVE_SUPPLY, signatures::COMPOUND_MINT];
const WITHDRAW_EVENTS: [B256; 2] = [signatures::AAVE_WITHDRAW, signatures::COMPOUND_REDEEM];
const BORROW_EVENTS: [B256; 2] = [signatures::AAVE_BORROW, signatures::COMPOUND_BORROW];
const REPAY_EVENTS: [B256; 2] = [signatures::AAVE_REPAY, signatures::COMPOUND_REPAY_BORROW];
const LIQUIDATION_EVENTS: [B256; 1] = [signatures::AAVE_LIQUIDATION_CALL];

fn has_any(ctx: &ClassificationContext, topics: &[B256]) -> bool {
    ctx.receipt()
        .logs
        .iter()
        .any(|log| matches!(log.topic0(), Some(t) if topics.contains(&t)))
}

fn any_lending_event(ctx: &ClassificationContext) -> bool {
    has_any(ctx, &DEPOSIT_EVENTS)
        || has_any(ctx, &WITHDRAW_EVENTS)
        || has_any(ctx, &BORROW_EVENTS)
        || has_any(ctx, &REPAY_EVENTS)
        || has_any(ctx, &LIQUIDATION_EVENTS)
}

fn internal_log_from_known_pool(ctx: &ClassificationContext) -> bool {
    let Some(target) = ctx.effective_to() else {
        return false;
    };
    ctx.receipt().logs.iter().any(|log| {
        log.address != target && ctx.chain_config().known_lending_pools.contains(&log.address)
    })
}

pub(crate) struct LendingRule;

impl Rule for LendingRule {
    fn name(&self) -> &'static str {
        "Lending"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        let target_is_pool = ctx
            .effective_to()
            .is_some_and(|t| ctx.chain_config().known_lending_pools.contains(&t));
        target_is_pool || any_lending_event(ctx)
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        let target = ctx.effective_to();
        let target_is_pool = target.is_some_and(|t| ctx.chain_config().known_lending_pools.contains(&t));

        let mut signal = 0.0_f64;
        let mut reasons = Vec::new();
        if target_is_pool {
            signal += 0.35;
            reasons.push("Effective target is a known lending pool".to_string());
        }
        if any_lending_event(ctx) {
            signal += 0.25;
            reasons.push("Canonical lending event present".to_string());
        }
        if internal_log_from_known_pool(ctx) {
            signal += 0.20;
            reasons.push("Internal log emitted by a known lending pool".to_string());
        }
        signal = signal.min(0.45);

        if has_any(ctx, &LIQUIDATION_EVENTS) {
            let confidence = (signal + 0.40).clamp(0.0, 1.0);
            if confidence < 0.70 {
                return None;
            }
            let evidence = EvidenceBreakdown {
                event_match: 1.0,
                method_match: 0.0,
                address_match: if target_is_pool { 1.0 } else { 0.0 },
                token_flow_match: 1.0,
                execution_match: 0.0,
            };
            let mut verdict = RuleVerdict::new(FunctionalType::LendingLiquidation, confidence)
                .with_protocol("Lending")
                .with_evidence(evidence);
            for reason in reasons {
                verdict = verdict.with_reason(reason);
            }
            return Some(verdict);
        }

        let has_deposit_event = has_any(ctx, &DEPOSIT_EVENTS);
        let has_withdraw_event = has_any(ctx, &WITHDRAW_EVENTS);
        let has_borrow_event = has_any(ctx, &BORROW_EVENTS);
        let has_repay_event = has_any(ctx, &REPAY_EVENTS);

        let out_only = ctx.is_unidirectional_out();
        let in_only = ctx.is_unidirectional_in();
        let bidirectional = ctx.is_bidirectional_user_flow();

        let (flow_base, functional_type) = if out_only && has_deposit_event {
            (0.40, FunctionalType::LendingDeposit)
        } else if in_only && has_withdraw_event {
            (0.40, FunctionalType::LendingWithdraw)
        } else if in_only && has_borrow_event {
            (0.40, FunctionalType::LendingBorrow)
        } else if out_only && has_repay_event {
            (0.40, FunctionalType::LendingRepay)
        } else if bidirectional && (has_deposit_event || has_withdraw_event) {
            if has_deposit_event {
                (0.40, FunctionalType::LendingDeposit)
            } else {
                (0.40, FunctionalType::LendingWithdraw)
            }
        } else if bidirectional {
            // Bidirectional flow with no matching lending event scores zero.
            return None;
        } else {
            return None;
        };

        let confidence = (signal + flow_base).clamp(0.0, 1.0);
        if confidence < 0.70 {
            return None;
        }

        let evidence = EvidenceBreakdown {
            event_match: if has_deposit_event || has_withdraw_event || has_borrow_event || has_repay_event {
                1.0
            } else {
                0.0
            },
            method_match: 0.0,
            address_match: if target_is_pool { 1.0 } else { 0.0 },
            token_flow_match: flow_base / 0.40,
            execution_match: 0.0,
        };
        let mut verdict = RuleVerdict::new(functional_type, confidence)
            .with_protocol("Lending")
            .with_evidence(evidence);
        for reason in reasons {
            verdict = verdict.with_reason(reason);
        }
        Some(verdict)
    }
}
