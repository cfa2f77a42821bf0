//! Semantic classification engine for EVM-compatible transactions.
//!
//! This crate implements the five-phase classification pipeline built on top
//! of the value types in `tx-classifier-types`:
//!
//! - [`resolver`] - Phase 1: who really executed the call (direct EOA, proxy
//!   delegate, multisig, ERC-4337 bundled user operation).
//! - [`token_flow`] - Phase 2: decode native/ERC-20/721/1155 movements into a
//!   per-address flow graph.
//! - `assemble` - Phase 3: assemble the frozen classification context.
//! - [`engine`] and [`rules`] - Phase 4: the ordered rule set and the
//!   evaluation algorithm that picks a primary verdict.
//! - [`cache`] - Phase 5: the bounded result cache.
//!
//! The single public entry point is [`classify`].
//!
//! # Feature Flags
//!
//! - `telemetry` - enables `tracing` instrumentation on the pipeline phases.

mod assemble;
mod cache;
mod engine;
mod resolver;
mod rules;
pub mod signatures;
mod token_flow;

pub use cache::ClassifierCache;
pub use engine::{ClassifyInputs, classify};
