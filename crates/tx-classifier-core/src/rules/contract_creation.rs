//! ContractCreation rule (priority 100).

use tx_classifier_types::{ClassificationContext, EvidenceBreakdown, FunctionalType, RuleVerdict};

use super::Rule;

pub(crate) struct ContractCreationRule;

impl Rule for ContractCreationRule {
    fn name(&self) -> &'static str {
        "ContractCreation"
    }

    fn priority(&self) -> u8 {
        100
    }

    fn matches(&self, ctx: &ClassificationContext) -> bool {
        ctx.transaction().is_creation()
    }

    fn classify(&self, ctx: &ClassificationContext) -> Option<RuleVerdict> {
        let created = ctx.receipt().created_contract;
        let evidence = EvidenceBreakdown {
            execution_match: 1.0,
            ..EvidenceBreakdown::ZERO
        };
        let mut verdict = RuleVerdict::new(FunctionalType::ContractDeployment, 1.0)
            .with_reason("Transaction target absent; contract deployed")
            .with_evidence(evidence);
        if let Some(address) = created {
            verdict = verdict.with_reason(format!("Created contract at {address}"));
        }
        Some(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, Bytes, U256};
    use tx_classifier_types::{
        ChainConfig, EnvelopeType, ExecutionDetails, FlowGraph, Receipt, Transaction, TxStatus,
    };

    fn creation_context() -> ClassificationContext {
        let transaction = Transaction {
            hash: B256::ZERO,
            from: Address::repeat_byte(0xA),
            to: None,
            value: U256::ZERO,
            input: Bytes::new(),
            envelope_type: EnvelopeType::Eip1559,
        };
        let receipt = Receipt {
            status: TxStatus::Success,
            block_number: 1,
            created_contract: Some(Address::repeat_byte(0xC)),
            logs: vec![],
        };
        ClassificationContext::new(
            transaction.clone(),
            receipt.clone(),
            FlowGraph::new(),
            ChainConfig::default(),
            ExecutionDetails::contract_creation(receipt.created_contract),
            vec![],
            false,
        )
    }

    #[test]
    fn matches_only_when_target_absent() {
        let ctx = creation_context();
        assert!(ContractCreationRule.matches(&ctx));
    }

    #[test]
    fn classify_emits_full_confidence() {
        let ctx = creation_context();
        let verdict = ContractCreationRule.classify(&ctx).unwrap();
        assert_eq!(verdict.functional_type, FunctionalType::ContractDeployment);
        assert_eq!(verdict.confidence, 1.0);
    }
}
