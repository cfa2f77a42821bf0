#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Value types for the semantic transaction classifier.
//!
//! This crate is intentionally inert: every type here is a plain value type
//! with no network access, no persistence, and no mutation after
//! construction. The classification pipeline itself (execution resolution,
//! token-flow analysis, rule evaluation) lives in `tx-classifier-core`, which
//! depends on this crate for the shared vocabulary rather than redefining it.
//!
//! # Modules
//!
//! - [`transaction`] - the submitted transaction envelope
//! - [`receipt`] - the execution receipt and its logs
//! - [`chain_config`] - static per-chain configuration and the default registry
//! - [`execution`] - execution resolution output (Phase 1)
//! - [`flow`] - token movements and the flow graph (Phase 2)
//! - [`functional_type`] - the closed classification enum
//! - [`context`] - the frozen classification context (Phase 3)
//! - [`verdict`] - per-rule verdicts and evidence breakdowns
//! - [`result`] - the final classification result

pub mod chain_config;
pub mod context;
pub mod execution;
pub mod flow;
pub mod functional_type;
pub mod receipt;
pub mod result;
pub mod transaction;
pub mod verdict;

pub use chain_config::{ChainClass, ChainConfig};
pub use context::ClassificationContext;
pub use execution::{ExecutionDetails, ExecutionType, ResolutionMethod};
pub use flow::{AddressFlow, FlowGraph, FlowRole, TokenKind, TokenMovement};
pub use functional_type::FunctionalType;
pub use receipt::{Log, Receipt, TxStatus};
pub use result::{ClassificationResult, RuleTrace, SecondaryMatch};
pub use transaction::{EnvelopeType, InternalTransfer, Transaction};
pub use verdict::{EvidenceBreakdown, RuleVerdict};
