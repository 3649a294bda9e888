//! Proxy implementation-accessor strategy.
//!
//! Proxy contracts expose the address of their implementation through a
//! zero-argument view function. Rather than dispatching on arbitrary
//! method names at runtime, recognition is restricted to a fixed table
//! of known accessor signatures; the selected accessor carries the typed
//! function reference the chain client needs to make the call.

use votelens_core::{AbiFunction, Interface};

/// Recognized implementation-accessor method names, in lookup order.
///
/// `__Proxy_implementation` is the Aragon AppProxy variant; the rest are
/// the common EIP-897/OpenZeppelin/Gnosis spellings.
pub const IMPL_METHOD_NAMES: &[&str] = &[
    "implementation",
    "getImplementation",
    "masterCopy",
    "childImplementation",
    "__Proxy_implementation",
];

/// A matched accessor: holds the typed function reference selected from
/// the recognized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplAccessor {
    function: AbiFunction,
}

impl ImplAccessor {
    /// Scan `interface` for a recognized accessor. Only zero-argument
    /// functions with a single `address` output qualify — a state
    /// variable named `implementation` of another type does not.
    pub fn find(interface: &Interface) -> Option<Self> {
        for name in IMPL_METHOD_NAMES {
            if let Some(f) = interface.function_named(name) {
                if Self::qualifies(f) {
                    return Some(Self { function: f.clone() });
                }
            }
        }
        None
    }

    fn qualifies(f: &AbiFunction) -> bool {
        f.inputs.is_empty() && f.outputs.len() == 1 && f.outputs[0].is_address()
    }

    /// The typed function reference to invoke via the chain client.
    pub fn function(&self) -> &AbiFunction {
        &self.function
    }

    pub fn method_name(&self) -> &str {
        &self.function.name
    }
}
