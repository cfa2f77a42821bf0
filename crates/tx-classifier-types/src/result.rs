//! The final classification result.

use alloy_primitives::Address;

use crate::execution::ExecutionType;
use crate::functional_type::FunctionalType;

/// A non-primary rule verdict surfaced alongside the primary result. Flat
/// by construction — a `SecondaryMatch` never carries its own secondary list.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryMatch {
    pub functional_type: FunctionalType,
    pub confidence: f64,
    pub protocol: Option<String>,
    pub reasons: Vec<String>,
}

/// One entry in the optional per-rule debug trace.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace {
    pub rule_name: &'static str,
    pub matched_gate: bool,
    pub verdict: Option<(FunctionalType, f64)>,
    /// Set when the rule's `classify` step hit a decode condition it could
    /// not evaluate; the rule contributes no verdict in that case.
    pub failed: Option<String>,
}

/// The shape consumers observe from `classify`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub functional_type: FunctionalType,
    pub execution_type: ExecutionType,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub protocol: Option<String>,
    pub effective_to: Option<Address>,
    pub is_proxy: bool,
    pub is_multisig: bool,
    pub implementation: Option<Address>,
    pub secondary: Vec<SecondaryMatch>,
    pub debug_trace: Option<Vec<RuleTrace>>,
}

impl ClassificationResult {
    /// The `{Unknown, 0}` result produced for a failed transaction.
    pub fn unknown_failed(execution_type: ExecutionType) -> Self {
        ClassificationResult {
            functional_type: FunctionalType::Unknown,
            execution_type,
            confidence: 0.0,
            reasons: vec!["Transaction Failed".to_string()],
            protocol: None,
            effective_to: None,
            is_proxy: false,
            is_multisig: false,
            implementation: None,
            secondary: Vec::new(),
            debug_trace: None,
        }
    }
}
