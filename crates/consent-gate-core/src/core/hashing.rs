// crates/consent-gate-core/src/core/hashing.rs
// ============================================================================
// Module: Consent Gate Canonical Hashing
// Description: SHA-256 preimage construction and hex digest utilities.
// Purpose: Provide deterministic, wire-stable hashes for records and ledgers.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Every record hash in Consent Gate is SHA-256 over an explicit byte
//! concatenation with single `0x00` separators between components. The
//! [`Preimage`] builder is the only construction point for those preimages;
//! no hash input is produced via serialization frameworks or string
//! formatting, so digests stay identical across implementations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Component separator inserted between preimage fields.
const SEPARATOR: u8 = 0x00;

// ============================================================================
// SECTION: Preimage Builder
// ============================================================================

/// Incremental builder for canonical hash preimages.
///
/// # Invariants
/// - Components are separated by exactly one `0x00` byte.
/// - Text components are hashed as UTF-8; byte components are hashed as-is.
/// - Component order is the caller's append order.
#[derive(Debug)]
pub struct Preimage {
    /// Running SHA-256 state.
    hasher: Sha256,
    /// Whether at least one component has been appended.
    started: bool,
}

impl Preimage {
    /// Creates an empty preimage builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
            started: false,
        }
    }

    /// Appends a UTF-8 text component.
    #[must_use]
    pub fn text(self, component: &str) -> Self {
        self.bytes(component.as_bytes())
    }

    /// Appends a raw byte component.
    #[must_use]
    pub fn bytes(mut self, component: &[u8]) -> Self {
        if self.started {
            self.hasher.update([SEPARATOR]);
        }
        self.hasher.update(component);
        self.started = true;
        self
    }

    /// Finalizes the preimage and returns the lowercase hex digest.
    #[must_use]
    pub fn finish(self) -> String {
        hex_encode(&self.hasher.finalize())
    }
}

impl Default for Preimage {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SECTION: Digest Helpers
// ============================================================================

/// Hashes raw bytes and returns the lowercase hex SHA-256 digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex_encode(&hasher.finalize())
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
