//! Execution-script segmentation.
//!
//! An execution script is a concatenation of fixed-layout segments:
//!
//! ```text
//! [ 20-byte target address | 4-byte calldata length (BE) | calldata ]*
//! ```
//!
//! Segments repeat until the byte stream is exhausted. Decoding is purely
//! sequential and stateless; any truncation is fatal to the whole report.
//! Execution order matters semantically to governance, so segment order
//! is preserved.

use votelens_core::{RawCall, ScriptError};

const ADDRESS_LEN: usize = 20;
const LENGTH_LEN: usize = 4;

/// Lazy, finite, non-restartable iterator over the calls of an execution
/// script. Yields segments in script order; stops permanently after the
/// first error.
pub struct ScriptCalls<'a> {
    script: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> ScriptCalls<'a> {
    pub fn new(script: &'a [u8]) -> Self {
        Self {
            script,
            offset: 0,
            failed: false,
        }
    }

    fn read_segment(&mut self) -> Result<RawCall, ScriptError> {
        let remaining = self.script.len() - self.offset;
        if remaining < ADDRESS_LEN {
            return Err(ScriptError::TruncatedAddress {
                offset: self.offset,
                remaining,
            });
        }
        let target = format!(
            "0x{}",
            hex::encode(&self.script[self.offset..self.offset + ADDRESS_LEN])
        );
        self.offset += ADDRESS_LEN;

        let remaining = self.script.len() - self.offset;
        if remaining < LENGTH_LEN {
            return Err(ScriptError::TruncatedLength {
                offset: self.offset,
                remaining,
            });
        }
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&self.script[self.offset..self.offset + LENGTH_LEN]);
        let calldata_len = u32::from_be_bytes(len_bytes) as usize;
        self.offset += LENGTH_LEN;

        let remaining = self.script.len() - self.offset;
        if remaining < calldata_len {
            return Err(ScriptError::TruncatedCalldata {
                offset: self.offset,
                expected: calldata_len,
                remaining,
            });
        }
        let calldata = self.script[self.offset..self.offset + calldata_len].to_vec();
        self.offset += calldata_len;

        Ok(RawCall { target, calldata })
    }
}

impl Iterator for ScriptCalls<'_> {
    type Item = Result<RawCall, ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.script.len() {
            return None;
        }
        let item = self.read_segment();
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}

/// Decode a whole script eagerly, aborting on the first malformed
/// segment. No partial call list is ever returned.
pub fn decode_script(script: &[u8]) -> Result<Vec<RawCall>, ScriptError> {
    ScriptCalls::new(script).collect()
}
