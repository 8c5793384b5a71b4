// crates/consent-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Consent Gate Identifiers
// Description: Prefixed identifier generation for records, ledgers, and artifacts.
// Purpose: Provide stable identifier prefixes with collision-resistant suffixes.
// Dependencies: uuid
// ============================================================================

//! ## Overview
//! Consent Gate identifiers are opaque strings with a fixed, stable prefix
//! and an eight-character hex suffix minted from a v4 UUID. Downstream
//! consumers rely on the prefixes (`REC-`, `DEC-`, `AUTH-`, ...) but never
//! parse the suffix. Identifier fields on records stay plain strings: the
//! data contract treats them as opaque apart from emptiness checks, and the
//! deny paths of the engines must be able to observe an empty identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use uuid::Uuid;

// ============================================================================
// SECTION: Suffix Minting
// ============================================================================

/// Number of hex characters retained from the minted UUID.
const SUFFIX_LEN: usize = 8;

/// Mints an identifier from a stable prefix and a fresh random suffix.
fn mint(prefix: &str) -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(SUFFIX_LEN);
    format!("{prefix}-{suffix}")
}

// ============================================================================
// SECTION: Identifier Constructors
// ============================================================================

/// Mints an evidence record identifier (`REC-`).
#[must_use]
pub fn new_record_id() -> String {
    mint("REC")
}

/// Mints an evidence chain identifier (`CHAIN-`).
#[must_use]
pub fn new_chain_id() -> String {
    mint("CHAIN")
}

/// Mints an observation session identifier (`OBS-`).
#[must_use]
pub fn new_session_id() -> String {
    mint("OBS")
}

/// Mints a decision request identifier (`REQ-`).
#[must_use]
pub fn new_request_id() -> String {
    mint("REQ")
}

/// Mints a decision identifier (`DEC-`).
#[must_use]
pub fn new_decision_id() -> String {
    mint("DEC")
}

/// Mints a decision audit identifier (`AUDIT-`).
#[must_use]
pub fn new_decision_audit_id() -> String {
    mint("AUDIT")
}

/// Mints an execution intent identifier (`INTENT-`).
#[must_use]
pub fn new_intent_id() -> String {
    mint("INTENT")
}

/// Mints an intent revocation identifier (`REVOKE-`).
#[must_use]
pub fn new_intent_revocation_id() -> String {
    mint("REVOKE")
}

/// Mints an intent audit identifier (`IAUDIT-`).
#[must_use]
pub fn new_intent_audit_id() -> String {
    mint("IAUDIT")
}

/// Mints an authorization identifier (`AUTH-`).
#[must_use]
pub fn new_authorization_id() -> String {
    mint("AUTH")
}

/// Mints an authorization revocation identifier (`AUTHREV-`).
#[must_use]
pub fn new_authorization_revocation_id() -> String {
    mint("AUTHREV")
}

/// Mints an authorization audit record identifier (`AUTHREC-`).
#[must_use]
pub fn new_authorization_record_id() -> String {
    mint("AUTHREC")
}

/// Mints an authorization audit identifier (`AUTHAUDIT-`).
#[must_use]
pub fn new_authorization_audit_id() -> String {
    mint("AUTHAUDIT")
}
