//! Transfer rule (priority 40) — the fallback for plain,
//! single-asset, one-directional movements.

use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict, TokenKind};

use super::Rule;

fn single_native_movement(ctx: &ClassificationContext) -> Option<()> {
    let tx = ctx.transaction();
    if !tx.is_empty_calldata() || tx.value.is_zero() || !ctx.receipt().logs.is_empty() {
        return None;
    }
    let out = ctx.user_out();
    (out.len() == 1 && out[0].kind == TokenKind::Native && ctx.user_in().is_empty()).then_some(())
}

fn single_erc20_exclusive(ctx: &ClassificationContext) -> bool {
    let out = ctx.user_out();
    let inn = ctx.user_in();
    let erc20_out = out.iter().filter(|m| m.kind == TokenKind::Erc20).count();
    let erc20_in = inn.iter().filter(|m| m.kind == TokenKind::Erc20).count();
    let total = out.len() + inn.len();
    (erc20_out == 1 && inn.is_empty() && total == 1) || (erc20_in == 1 && out.is_empty() && total == 1)
}

fn single_nft_exclusive(ctx: &ClassificationContext) -> bool {
    let out = ctx.user_out();
    let inn = ctx.user_in();
    let is_nft = |k: TokenKind| matches!(k, TokenKind::Erc721 | TokenKind::Erc1155);
    let nft_out = out.iter().filter(|m| is_nft(m.kind)).count();
    let nft_in = inn.iter().filter(|m| is_nft(m.kind)).count();
    let total = out.len() + inn.len();
    (nft_out == 1 && inn.is_empty() && total == 1) || (nft_in == 1 && out.is_empty() && total == 1)
}

pub(crate) struct TransferRule;

impl Rule for TransferRule {
    fn name(&self) -> &'static str {
        "Transfer"
    }

    fn priority(&self) -> u8 {
        40
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        !ctx.is_bidirectional_user_flow()
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        if ctx.is_bidirectional_user_flow() {
            return None;
        }

        let flow_evidence = EvidenceBreakdown {
            token_flow_match: 1.0,
            ..EvidenceBreakdown::ZERO
        };

        if single_native_movement(ctx).is_some() {
            return Some(
                RuleVerdict::new(FunctionalType::NativeTransfer, 0.60)
                    .with_reason("Plain value transfer with empty call data and no logs")
                    .with_evidence(flow_evidence),
            );
        }

        if single_erc20_exclusive(ctx) {
            return Some(
                RuleVerdict::new(FunctionalType::TokenTransfer, 0.60)
                    .with_reason("Exactly one ERC-20 movement, user exclusively sender or receiver")
                    .with_evidence(flow_evidence),
            );
        }

        if single_nft_exclusive(ctx) {
            return Some(
                RuleVerdict::new(FunctionalType::NftTransfer, 0.60)
                    .with_reason("Exactly one NFT movement, user exclusively sender or receiver")
                    .with_evidence(flow_evidence),
            );
        }

        None
    }
}
