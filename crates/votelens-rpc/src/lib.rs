//! # votelens-rpc
//!
//! The concrete collaborators behind the Votelens trait seams: an HTTP
//! JSON-RPC `ChainClient` talking to an Aragon-style voting contract,
//! and an Etherscan-backed `AbiSource`.

pub mod client;
pub mod etherscan;
pub mod request;

pub use client::EthRpcClient;
pub use etherscan::EtherscanSource;
