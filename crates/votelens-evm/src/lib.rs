//! # votelens-evm
//!
//! EVM byte work for Votelens: execution-script segmentation, calldata
//! decoding against an interface description, and call encoding for
//! outbound `eth_call`s.
//!
//! ## Implementation notes
//! - Uses `alloy-core` for ABI decode
//! - First 4 bytes of calldata → function selector (keccak256 of signature)
//! - Remaining bytes → ABI-encoded inputs tuple

pub mod call_decoder;
pub mod encoder;
pub mod normalizer;
pub mod script;

pub use call_decoder::{decode_call, decode_outputs, DecodedCallData};
pub use encoder::{encode_call, encode_selector_only};
pub use script::{decode_script, ScriptCalls};
