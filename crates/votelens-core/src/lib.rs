//! # votelens-core
//!
//! Core types, traits, and primitives shared across all Votelens crates.
//! The script decoder, ABI resolver, classifier, and report pipeline are
//! all built on the interfaces defined here.

pub mod abi;
pub mod account;
pub mod call;
pub mod client;
pub mod error;
pub mod value;
pub mod vote;

pub use abi::{AbiFunction, AbiParam, Interface};
pub use account::{AccountKind, AddressInfo, Verification};
pub use call::{EnrichedCall, RawCall};
pub use client::{AbiSource, ChainClient, SourceVerification};
pub use error::{DecodeError, ReportError, ScriptError, SourceError};
pub use value::ArgValue;
pub use vote::{VoteRecord, VoteReport, VoteStatus};
