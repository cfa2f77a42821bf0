//! Phase 4-5: the rule engine's evaluation algorithm and the public
//! `classify` entry point.

use alloy_primitives::B256;
use tx_classifier_types::{
    ChainConfig, ClassificationContext, ClassificationResult, ExecutionType, FunctionalType,
    InternalTransfer, Receipt, RuleTrace, RuleVerdict, SecondaryMatch, Transaction, TxStatus,
};

use crate::assemble;
use crate::cache::ClassifierCache;
use crate::rules::{self, Rule};

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// The global confidence floor a candidate must clear to be eligible at all.
/// Distinct from the per-rule internal gate (0.70) that most individual
/// rules apply before returning a verdict.
const GLOBAL_FLOOR: f64 = 0.55;

/// Confidence margin below which the top two candidates are considered in
/// conflict and the leader is dampened.
const DAMPENING_MARGIN: f64 = 0.10;
const DAMPENING_FACTOR: f64 = 0.9;

const UNCLASSIFIED_CONFIDENCE: f64 = 0.3;

/// Bundled inputs to a single `classify` call.
pub struct ClassifyInputs {
    pub transaction: Transaction,
    pub receipt: Receipt,
    pub internal_transfers: Vec<InternalTransfer>,
    pub chain_config: ChainConfig,
    /// Gates the optional per-rule debug trace.
    pub debug: bool,
}

struct Candidate {
    priority: u8,
    verdict: RuleVerdict,
}

fn to_secondary(verdict: &RuleVerdict) -> SecondaryMatch {
    SecondaryMatch {
        functional_type: verdict.functional_type,
        confidence: verdict.confidence,
        protocol: verdict.protocol.clone(),
        reasons: verdict.reasons.clone(),
    }
}

/// Runs every registered rule against `ctx`, isolating a rule whose
/// evaluation panics so it contributes no verdict rather than aborting
/// classification entirely.
fn evaluate_rules(
    ctx: &ClassificationContext,
    rule_set: &[Box<dyn Rule>],
    debug: bool,
) -> (Vec<Candidate>, Vec<RuleTrace>) {
    let mut candidates = Vec::new();
    let mut trace = Vec::new();

    for rule in rule_set {
        let matched_gate = rule.matches(ctx);
        if !matched_gate {
            if debug {
                trace.push(RuleTrace {
                    rule_name: rule.name(),
                    matched_gate: false,
                    verdict: None,
                    failed: None,
                });
            }
            continue;
        }

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.classify(ctx)));
        match outcome {
            Ok(Some(verdict)) => {
                if debug {
                    trace.push(RuleTrace {
                        rule_name: rule.name(),
                        matched_gate: true,
                        verdict: Some((verdict.functional_type, verdict.confidence)),
                        failed: None,
                    });
                }
                candidates.push(Candidate {
                    priority: rule.priority(),
                    verdict,
                });
            }
            Ok(None) => {
                if debug {
                    trace.push(RuleTrace {
                        rule_name: rule.name(),
                        matched_gate: true,
                        verdict: None,
                        failed: None,
                    });
                }
            }
            Err(_) => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(rule = rule.name(), "rule evaluation panicked; contributes no verdict");
                if debug {
                    trace.push(RuleTrace {
                        rule_name: rule.name(),
                        matched_gate: true,
                        verdict: None,
                        failed: Some("rule evaluation panicked".to_string()),
                    });
                }
            }
        }
    }

    (candidates, trace)
}

fn finish(
    ctx: &ClassificationContext,
    functional_type: FunctionalType,
    confidence: f64,
    reasons: Vec<String>,
    protocol: Option<String>,
    secondary: Vec<SecondaryMatch>,
    trace: Option<Vec<RuleTrace>>,
) -> ClassificationResult {
    let execution = ctx.execution();
    ClassificationResult {
        functional_type,
        execution_type: execution.execution_type,
        confidence,
        reasons,
        protocol,
        effective_to: ctx.effective_to(),
        is_proxy: execution.is_proxy,
        is_multisig: execution.is_multisig,
        implementation: execution.implementation,
        secondary,
        debug_trace: trace,
    }
}

/// The classification pipeline's rule-evaluation stage, run against an
/// already-assembled context.
fn run_rule_engine(ctx: &ClassificationContext) -> ClassificationResult {
    let rule_set = rules::registry();
    let (mut candidates, trace) = evaluate_rules(ctx, &rule_set, ctx.debug());
    let trace = ctx.debug().then_some(trace);

    // ContractCreation short-circuits the rest of the engine. It is always
    // the sole candidate when it fires (no other rule's gate passes on a
    // creation transaction), but checking explicitly by rule identity is
    // more precise than relying on sort order.
    if let Some(creation) = candidates
        .iter()
        .position(|c| c.verdict.functional_type == FunctionalType::ContractDeployment)
    {
        let candidate = candidates.swap_remove(creation);
        return finish(
            ctx,
            candidate.verdict.functional_type,
            1.0,
            candidate.verdict.reasons,
            candidate.verdict.protocol,
            Vec::new(),
            trace,
        );
    }

    // Near-miss reasons for the fallback path, gathered before the floor
    // filter discards anything below it.
    let near_miss_reasons: Vec<String> = candidates
        .iter()
        .filter(|c| c.verdict.confidence < GLOBAL_FLOOR)
        .flat_map(|c| c.verdict.reasons.iter().cloned())
        .collect();

    candidates.retain(|c| c.verdict.confidence >= GLOBAL_FLOOR);

    // Sort by (confidence desc, priority desc). Stable sort keeps
    // registration order as the final tiebreaker, so the result never
    // depends on iteration order anywhere upstream.
    candidates.sort_by(|a, b| {
        b.verdict
            .confidence
            .partial_cmp(&a.verdict.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.priority.cmp(&a.priority))
    });

    // Conflict dampening: a leader with no clear margin over the runner-up
    // is less trustworthy than its raw confidence suggests.
    if candidates.len() >= 2 && candidates[0].verdict.confidence - candidates[1].verdict.confidence < DAMPENING_MARGIN
    {
        candidates[0].verdict.confidence = (candidates[0].verdict.confidence * DAMPENING_FACTOR).clamp(0.0, 1.0);
        candidates.sort_by(|a, b| {
            b.verdict
                .confidence
                .partial_cmp(&a.verdict.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.priority.cmp(&a.priority))
        });
    }

    // Emit the primary candidate, or fall through to the fallback.
    if let Some(primary) = candidates.first() {
        if primary.verdict.confidence >= GLOBAL_FLOOR {
            let primary_verdict = candidates.remove(0).verdict;
            let secondary = candidates.iter().map(|c| to_secondary(&c.verdict)).collect();
            return finish(
                ctx,
                primary_verdict.functional_type,
                primary_verdict.confidence,
                primary_verdict.reasons,
                primary_verdict.protocol,
                secondary,
                trace,
            );
        }
    }

    // Fallback for a success transaction with no qualifying rule.
    let mut reasons = vec!["No rule reached the classification threshold".to_string()];
    reasons.extend(near_miss_reasons);
    finish(
        ctx,
        FunctionalType::UnclassifiedComplex,
        UNCLASSIFIED_CONFIDENCE,
        reasons,
        None,
        Vec::new(),
        trace,
    )
}

/// Classifies one transaction against its receipt, optional internal-call
/// trace, and chain configuration. The sole public entry point into the
/// five-phase pipeline; always returns a well-formed result and
/// never panics.
#[cfg_attr(feature = "telemetry", instrument(skip_all, fields(chain_id = inputs.chain_config.chain_id)))]
pub fn classify(inputs: ClassifyInputs, cache: &ClassifierCache) -> ClassificationResult {
    let ClassifyInputs {
        transaction,
        receipt,
        internal_transfers,
        chain_config,
        debug,
    } = inputs;

    // A failed transaction is always {Unknown, 0}, computed before any
    // cache lookup or phase runs.
    if matches!(receipt.status, TxStatus::Failure) {
        return ClassificationResult::unknown_failed(ExecutionType::Unknown);
    }

    let chain_id = chain_config.chain_id;
    let tx_hash = transaction.hash;

    // Cache lookup, transparent to the result, affects only runtime.
    if let Some(cached) = cache.get(chain_id, tx_hash) {
        return cached;
    }

    // Phase 1 + Phase 2, frozen into the classification context.
    let ctx = assemble::assemble(transaction, receipt, internal_transfers, chain_config, debug);

    let result = run_rule_engine(&ctx);

    // Populate the cache with the freshly computed, immutable result.
    cache.put(chain_id, tx_hash, result.clone());

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, U256};
    use tx_classifier_types::{EnvelopeType, Log};

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn topic_for(address: Address) -> B256 {
        let mut topic = [0u8; 32];
        topic[12..].copy_from_slice(address.as_slice());
        B256::new(topic)
    }

    fn base_inputs(
        from: Address,
        to: Option<Address>,
        value: U256,
        input: Bytes,
        logs: Vec<Log>,
        status: TxStatus,
    ) -> ClassifyInputs {
        ClassifyInputs {
            transaction: Transaction {
                hash: B256::repeat_byte(0x01),
                from,
                to,
                value,
                input,
                envelope_type: EnvelopeType::Eip1559,
            },
            receipt: Receipt {
                status,
                block_number: 1,
                created_contract: None,
                logs,
            },
            internal_transfers: vec![],
            chain_config: ChainConfig::default(),
            debug: false,
        }
    }

    #[test]
    fn plain_native_send_classifies_as_native_transfer() {
        let cache = ClassifierCache::new();
        let from = addr(0xA);
        let to = addr(0xB);
        let inputs = base_inputs(
            from,
            Some(to),
            U256::from(10u64.pow(18)),
            Bytes::new(),
            vec![],
            TxStatus::Success,
        );
        let result = classify(inputs, &cache);
        assert_eq!(result.functional_type, FunctionalType::NativeTransfer);
        assert!((result.confidence - 0.60).abs() < f64::EPSILON);
        assert_eq!(result.execution_type, ExecutionType::Direct);
    }

    #[test]
    fn erc20_transfer_classifies_as_token_transfer() {
        let cache = ClassifierCache::new();
        let from = addr(0xA);
        let to = addr(0xB);
        let usdc = addr(0xC0);
        let log = Log {
            address: usdc,
            topics: vec![crate::signatures::TRANSFER, topic_for(from), topic_for(to)],
            data: Bytes::from(U256::from(1_000_000_000u64).to_be_bytes::<32>().to_vec()),
        };
        let inputs = base_inputs(from, Some(to), U256::ZERO, Bytes::new(), vec![log], TxStatus::Success);
        let result = classify(inputs, &cache);
        assert_eq!(result.functional_type, FunctionalType::TokenTransfer);
    }

    #[test]
    fn contract_deployment_short_circuits_at_full_confidence() {
        let cache = ClassifierCache::new();
        let from = addr(0xA);
        let mut inputs = base_inputs(from, None, U256::ZERO, Bytes::new(), vec![], TxStatus::Success);
        inputs.receipt.created_contract = Some(addr(0xC));
        let result = classify(inputs, &cache);
        assert_eq!(result.functional_type, FunctionalType::ContractDeployment);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn failed_transaction_is_unknown_regardless_of_signals() {
        let cache = ClassifierCache::new();
        let from = addr(0xA);
        let to = addr(0xB);
        let inputs = base_inputs(
            from,
            Some(to),
            U256::from(10u64.pow(18)),
            Bytes::new(),
            vec![],
            TxStatus::Failure,
        );
        let result = classify(inputs, &cache);
        assert_eq!(result.functional_type, FunctionalType::Unknown);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn fallback_emits_unclassified_complex_for_dead_end_success_tx() {
        let cache = ClassifierCache::new();
        let from = addr(0xA);
        let to = addr(0xB);
        // No value, no logs, no internal transfers: nothing touches the
        // originator at all, so every rule's gate fails.
        let inputs = base_inputs(from, Some(to), U256::ZERO, Bytes::new(), vec![], TxStatus::Success);
        let result = classify(inputs, &cache);
        assert_eq!(result.functional_type, FunctionalType::UnclassifiedComplex);
        assert_eq!(result.confidence, UNCLASSIFIED_CONFIDENCE);
    }

    #[test]
    fn cache_is_transparent_to_the_result() {
        let cache = ClassifierCache::new();
        let from = addr(0xA);
        let to = addr(0xB);
        let inputs_a = base_inputs(
            from,
            Some(to),
            U256::from(10u64.pow(18)),
            Bytes::new(),
            vec![],
            TxStatus::Success,
        );
        let first = classify(inputs_a, &cache);
        assert_eq!(cache.len(), 1);

        let inputs_b = base_inputs(
            from,
            Some(to),
            U256::from(10u64.pow(18)),
            Bytes::new(),
            vec![],
            TxStatus::Success,
        );
        let second = classify(inputs_b, &cache);
        assert_eq!(first, second);
    }
}
