//! Fixed event-topic and method-selector constants.
//!
//! These are part of the interface contract: changing one changes
//! classification behavior. Each constant is the Keccak-256 hash of the
//! canonical signature string named in the doc comment above it, the same
//! way a contract ABI derives its own selectors.

use alloy_primitives::{B256, hex};

macro_rules! topic {
    ($hex:literal) => {
        B256::new(hex!($hex))
    };
}

// --- Token transfer / approval events (ERC-20, ERC-721 share one signature;
// distinguished by topic count, see token_flow::decode_transfer_log) ---

/// `Transfer(address,address,uint256)`
pub const TRANSFER: B256 = topic!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// `Approval(address,address,uint256)`
pub const APPROVAL: B256 = topic!("8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925");

/// `TransferSingle(address,address,address,uint256,uint256)` (ERC-1155)
pub const TRANSFER_SINGLE: B256 =
    topic!("c3d58168c5ae7397731d063d5bbf3d657854427343f4c083240f7aacaa2d0f62");

/// `TransferBatch(address,address,address,uint256[],uint256[])` (ERC-1155)
pub const TRANSFER_BATCH: B256 =
    topic!("4a39dc06d4c0dbc64b70af90fd698a233a518aa5d07e595d983b8c0526c8f7fb");

// --- EIP-1967 proxy events ---

/// `Upgraded(address)`
pub const UPGRADED: B256 = topic!("bc7cd75a20ee27fd9adebab32041f755214dbc6bffa90cc0225b39da2e5c2d3b");

/// `BeaconUpgraded(address)`
pub const BEACON_UPGRADED: B256 =
    topic!("1cf3b03a6cf19fa2baba4df148e9dcabedea7f8a5c07840e207e5c089be95d3e");

// --- Safe (Gnosis) multisig ---

/// 4-byte selector for `execTransaction(address,uint256,bytes,uint8,uint256,uint256,uint256,address,address,bytes)`
pub const SAFE_EXEC_TRANSACTION_SELECTOR: [u8; 4] = hex!("6a761202");

/// `ExecutionSuccess(bytes32,uint256)`
pub const EXECUTION_SUCCESS: B256 =
    topic!("442e715f626346e8c54381002da614f62bee8d27386535b2521ec8540898556e");

/// `ExecutionFailure(bytes32,uint256)`
pub const EXECUTION_FAILURE: B256 =
    topic!("23428b18acfb3ea64b08dc0c1d296ea9c09702c09083ca5272e64d115b687d23");

// --- ERC-4337 account abstraction ---

/// 4-byte selector for `handleOps(UserOperation[],address)`
pub const HANDLE_OPS_SELECTOR: [u8; 4] = hex!("1fad948c");

/// 4-byte selector for `handleAggregatedOps(UserOpsPerAggregator[],address)`
pub const HANDLE_AGGREGATED_OPS_SELECTOR: [u8; 4] = hex!("1eb9efbb");

/// `UserOperationEvent(bytes32,address,address,uint256,bool,uint256,uint256)`
pub const USER_OPERATION_EVENT: B256 =
    topic!("49628fd1471006c1482da88028e9ce4dbb080b815c9b0344d39e5a8e6ec1419f");

// --- Canonical bridge messaging events (Optimism-style standard bridge,
// shared in shape by its Base/derived-chain forks) ---

/// `ETHBridgeInitiated(address,address,uint256,bytes)`
pub const ETH_BRIDGE_INITIATED: B256 =
    topic!("2849b43074093a05396b6f2a937dee8565b15a48a7b3d4bffb732a5017380af5");

/// `ETHBridgeFinalized(address,address,uint256,bytes)`
pub const ETH_BRIDGE_FINALIZED: B256 =
    topic!("31b2166ff604fc5672ea5df08a78081d2bc6d746cadce880747f3643d819e83d");

/// `ERC20BridgeInitiated(address,address,address,address,uint256,bytes)`
pub const ERC20_BRIDGE_INITIATED: B256 =
    topic!("7ff126db8024424bbfd9826e8ab82ff59136289ea440b04b39a0df1b03b9cabf");

/// `ERC20BridgeFinalized(address,address,address,address,uint256,bytes)`
pub const ERC20_BRIDGE_FINALIZED: B256 =
    topic!("d59c65b35445225835c83f50b6ede06a7be047d22e357073e250d9af537518cd");

// --- DEX swap events ---

/// `Swap(address,uint256,uint256,uint256,uint256,address)` — Uniswap V2 pair
/// and its forks (Sushiswap, Pancakeswap V2, ...).
pub const SWAP_UNISWAP_V2: B256 =
    topic!("d78ad95fa46c994b6551d0da85fc275fe613ce37657fb8d5e3d130840159d822");

// --- Aave v3 lending events ---

/// `Supply(address,address,address,uint256,uint16)`
pub const AAVE_SUPPLY: B256 = topic!("2b627736bca15cd5381dcf80b0bf11fd197d01a037c52b927a881a10fb73ba61");

/// `Withdraw(address,address,address,uint256)`
pub const AAVE_WITHDRAW: B256 = topic!("3115d1449a7b732c986cba18244e897a450f61e1bb8d589cd2e69e6c8924f9f7");

/// `Borrow(address,address,address,uint256,uint8,uint256,uint16)`
pub const AAVE_BORROW: B256 = topic!("b3d084820fb1a9decffb176436bd02558d15fac9b0ddfed8c465bc7359d7dce0");

/// `Repay(address,address,address,uint256,bool)`
pub const AAVE_REPAY: B256 = topic!("a534c8dbe71f871f9f3530e97a74601fea17b426cae02e1c5aee42c96c784051");

/// `LiquidationCall(address,address,address,uint256,uint256,address,bool)`
pub const AAVE_LIQUIDATION_CALL: B256 =
    topic!("e413a321e8681d831f4dbccbca790d2952b56f977908e45be37335533e005286");

// --- Compound v2 lending events ---

/// `Mint(address,uint256,uint256)`
pub const COMPOUND_MINT: B256 = topic!("4c209b5fc8ad50758f13e2e1088ba56a560dff690a1c6fef26394f4c03821c4f");

/// `Redeem(address,uint256,uint256)`
pub const COMPOUND_REDEEM: B256 = topic!("e5b754fb1abb7f01b499791d0b820ae3b6af3424ac1c59768edb53f4ec31a929");

/// `Borrow(address,uint256,uint256,uint256)`
pub const COMPOUND_BORROW: B256 = topic!("13ed6866d4e1ee6da46f845c46d7e54120883d75c5ea9a2dacc1c4ca8984ab80");

/// `RepayBorrow(address,address,uint256,uint256,uint256)`
pub const COMPOUND_REPAY_BORROW: B256 =
    topic!("1a2a22cb034d26d1854bdc6666a5b91fe25efbbb5dcad3b0355478d6f5c362a1");

// --- Governance events ---

/// 4-byte selector for `castVote(uint256,uint8)`
pub const GOVERNOR_CAST_VOTE_SELECTOR: [u8; 4] = hex!("56781388");

/// 4-byte selector for `castVoteWithReason(uint256,uint8,string)`
pub const GOVERNOR_CAST_VOTE_WITH_REASON_SELECTOR: [u8; 4] = hex!("7b3c71d3");

/// 4-byte selector for `propose(address[],uint256[],bytes[],string)`
pub const GOVERNOR_PROPOSE_SELECTOR: [u8; 4] = hex!("7d5e81e2");

/// 4-byte selector for `delegate(address)`
pub const GOVERNOR_DELEGATE_SELECTOR: [u8; 4] = hex!("5c19a95c");

/// 4-byte selector for `execute(uint256[],address[],uint256[],bytes[],bytes32)`
pub const GOVERNOR_EXECUTE_SELECTOR: [u8; 4] = hex!("20aac569");

/// `VoteCast(address,uint256,uint8,uint256,string)`
pub const GOVERNOR_VOTE_CAST: B256 =
    topic!("b8e138887d0aa13bab447e82de9d5c1777041ecd21ca36ba824ff1e6c07ddda4");

/// `ProposalCreated(uint256,address,address[],uint256[],string[],bytes[],uint256,uint256,string)`
pub const GOVERNOR_PROPOSAL_CREATED: B256 =
    topic!("7d84a6263ae0d98d3329bd7b46bb4e8d6f98cd35a7adb45c274c8b7fd5ebd5e0");

/// `DelegateChanged(address,address,address)`
pub const GOVERNOR_DELEGATE_CHANGED: B256 =
    topic!("3134e8a2e6d97e929a7e54011ea5485d7d196dd5f0ba4d4ef95803e8e3fc257f");

/// `DelegateVotesChanged(address,uint256,uint256)`
pub const GOVERNOR_DELEGATE_VOTES_CHANGED: B256 =
    topic!("dec2bacdd2f05b59de34da9b523dff8be42e5e38e818c82fdb0bae774387a724");

/// `ProposalExecuted(uint256)`
pub const GOVERNOR_PROPOSAL_EXECUTED: B256 =
    topic!("712ae1383f79ac853f8d882153778e0260ef8f03b504e2866e0593e04d2b291f");

// --- NFT marketplace events ---

/// Seaport `OrderFulfilled(bytes32,address,address,address,...)` (abridged —
/// only topic0 is used, the remaining fields are in log data and are not
/// decoded by the classifier).
pub const SEAPORT_ORDER_FULFILLED: B256 =
    topic!("9d9af8e38d66c62e2c12f0225249fd9d721c54b83f48d9352c97c6cacdcb6f31");

/// LooksRare `TakerAsk(bytes32,uint256,address,...)`.
pub const LOOKSRARE_TAKER_ASK: B256 =
    topic!("71ec242e96b9a9301680a8d44041d7dd5385933cde50e46bb088ecea24bcc62f");

/// LooksRare `TakerBid(bytes32,uint256,address,...)`.
pub const LOOKSRARE_TAKER_BID: B256 =
    topic!("fda216a8d9553372401613d21293f85648d9a1d64a29cdb3f4d557e9ec821151");

/// Blur `OrdersMatched(bytes32,address,address,uint256,uint256,address,uint256)`.
pub const BLUR_ORDERS_MATCHED: B256 =
    topic!("d5d7ef9244b5d746064c3274f9a522fddc982215c8b5349128d5aa0b402c3ba6");
