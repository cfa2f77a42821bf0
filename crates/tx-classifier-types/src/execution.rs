//! Execution resolution output (Phase 1).

use alloy_primitives::Address;

/// Who really executed the call.
///
/// Ordered here from most to least specific
/// (`Multisig+Proxy > Multisig > AccountAbstraction > Relayed(Proxy) > Direct`);
/// [`ExecutionType::specificity`] encodes that order numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionType {
    Direct,
    /// A proxy-mediated call with no multisig or AA signal.
    Relayed,
    AccountAbstraction,
    Multisig,
    Unknown,
}

impl ExecutionType {
    /// Higher is more specific. Used to merge independent detector signals;
    /// a proxy-detected, multisig-detected call resolves to
    /// `Multisig` because it scores higher than `Relayed` alone, even though
    /// both detectors fired.
    pub fn specificity(self) -> u8 {
        match self {
            ExecutionType::Multisig => 4,
            ExecutionType::AccountAbstraction => 3,
            ExecutionType::Relayed => 2,
            ExecutionType::Direct => 1,
            ExecutionType::Unknown => 0,
        }
    }
}

/// How the execution resolver arrived at its [`ExecutionDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMethod {
    ContractCreation,
    ProxyUpgraded,
    MultisigSelector,
    MultisigExecutionEvent,
    AccountAbstractionEntryPoint,
    Direct,
}

/// The effective execution context behind a transaction's outer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionDetails {
    /// The address that actually received the call's effect: the proxy
    /// implementation if one was detected, otherwise `tx.to`, otherwise the
    /// created contract address.
    pub effective_to: Option<Address>,
    pub execution_type: ExecutionType,
    pub is_proxy: bool,
    pub is_multisig: bool,
    pub is_account_abstraction: bool,
    /// The EIP-1967 implementation or beacon address, if a proxy was detected.
    pub implementation: Option<Address>,
    /// The ERC-4337 UserOperation sender, if an AA bundle was detected.
    pub aa_inner_sender: Option<Address>,
    pub resolution_method: ResolutionMethod,
}

impl ExecutionDetails {
    /// The execution details for a contract-creation transaction.
    pub fn contract_creation(created_contract: Option<Address>) -> Self {
        ExecutionDetails {
            effective_to: created_contract,
            execution_type: ExecutionType::Direct,
            is_proxy: false,
            is_multisig: false,
            is_account_abstraction: false,
            implementation: None,
            aa_inner_sender: None,
            resolution_method: ResolutionMethod::ContractCreation,
        }
    }
}
