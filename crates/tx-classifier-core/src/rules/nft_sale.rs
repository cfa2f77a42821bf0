//! NftSale rule (priority 80).

use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict};

use super::Rule;
use crate::signatures;

const MARKETPLACE_EVENTS: [alloy_primitives::B256; 4] = [
    signatures::SEAPORT_ORDER_FULFILLED,
    signatures::LOOKSRARE_TAKER_ASK,
    signatures::LOOKSRARE_TAKER_BID,
    signatures::BLUR_ORDERS_MATCHED,
];

fn has_marketplace_event(ctx: &ClassificationContext) -> bool {
    ctx.receipt()
        .logs
        .iter()
        .any(|log| matches!(log.topic0(), Some(t) if MARKETPLACE_EVENTS.contains(&t)))
}

/// True if the originator sent an NFT and received a payment, or received an
/// NFT and sent a payment (native or ERC-20 above dust both count).
fn correlated_nft_and_payment(ctx: &ClassificationContext) -> bool {
    let sent_nft = ctx.user_out().iter().any(|m| {
        matches!(m.kind, tx_classifier_types::TokenKind::Erc721 | tx_classifier_types::TokenKind::Erc1155)
    });
    let received_nft = ctx.user_in().iter().any(|m| {
        matches!(m.kind, tx_classifier_types::TokenKind::Erc721 | tx_classifier_types::TokenKind::Erc1155)
    });
    let received_payment = ctx.user_in().iter().any(|m| {
        matches!(m.kind, tx_classifier_types::TokenKind::Native | tx_classifier_types::TokenKind::Erc20)
    });
    let sent_payment = ctx.user_out().iter().any(|m| {
        matches!(m.kind, tx_classifier_types::TokenKind::Native | tx_classifier_types::TokenKind::Erc20)
    });
    (sent_nft && received_payment) || (received_nft && sent_payment)
}

pub(crate) struct NftSaleRule;

impl Rule for NftSaleRule {
    fn name(&self) -> &'static str {
        "NftSale"
    }

    fn priority(&self) -> u8 {
        80
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        has_marketplace_event(ctx) || ctx.has_nft_movement()
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        let has_event = has_marketplace_event(ctx);
        let correlated = correlated_nft_and_payment(ctx);

        let mut confidence = 0.5_f64;
        let mut reasons = Vec::new();

        if has_event {
            confidence += 0.30;
            reasons.push("Canonical NFT marketplace event present".to_string());
        }

        if correlated {
            confidence += 0.40;
            reasons.push("NFT and payment legs correlated".to_string());

            if ctx.nft_movements_share_one_collection() {
                confidence += 0.15;
                reasons.push("All NFT movements share one collection".to_string());
            } else {
                confidence -= 0.15;
                reasons.push("Mixed NFT collections in one transaction".to_string());
            }

            if !ctx.payment_uses_single_asset() {
                confidence -= 0.10;
                reasons.push("Payment leg uses more than one asset".to_string());
            }
        } else {
            confidence = 0.0;
        }

        let confidence = confidence.clamp(0.0, 1.0);
        if confidence >= 0.70 {
            let evidence = EvidenceBreakdown {
                event_match: if has_event { 1.0 } else { 0.0 },
                method_match: 0.0,
                address_match: 0.0,
                token_flow_match: if correlated { 1.0 } else { 0.0 },
                execution_match: 0.0,
            };
            let mut verdict = RuleVerdict::new(FunctionalType::NftSale, confidence)
                .with_protocol("NFT Marketplace")
                .with_evidence(evidence);
            for reason in reasons {
                verdict = verdict.with_reason(reason);
            }
            return Some(verdict);
        }

        if ctx.has_nft_movement() {
            let evidence = EvidenceBreakdown {
                token_flow_match: 1.0,
                ..EvidenceBreakdown::ZERO
            };
            return Some(
                RuleVerdict::new(FunctionalType::NftTransfer, 0.90)
                    .with_reason("NFT movement present without a correlated marketplace sale")
                    .with_evidence(evidence),
            );
        }

        None
    }
}
