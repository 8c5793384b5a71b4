// crates/consent-gate-core/src/core/authorization.rs
// ============================================================================
// Module: Consent Gate Authorization Model
// Description: Execution authorizations, revocations, and the authorization audit.
// Purpose: Represent permission artifacts issued for valid, unrevoked intents.
// Dependencies: crate::core::{audit, hashing}, serde
// ============================================================================

//! ## Overview
//! An execution authorization is a permission artifact, never an action.
//! It parallels the intent model: hash-committed, immutable, revocable only
//! by permanent append to the authorization audit. Authorization is denied
//! unless explicitly granted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::audit::ChainedRecord;
use crate::core::hashing::Preimage;

// ============================================================================
// SECTION: Authorization Status
// ============================================================================

/// Authorization lifecycle status.
///
/// # Invariants
/// - Closed enum; only `Authorized` permits an ALLOW decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationStatus {
    /// Authorization has been granted.
    Authorized,
    /// Authorization was denied.
    Rejected,
    /// Authorization was revoked after being granted.
    Revoked,
    /// Authorization timed out without use.
    Expired,
}

impl AuthorizationStatus {
    /// Returns the stable preimage spelling for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authorized => "AUTHORIZED",
            Self::Rejected => "REJECTED",
            Self::Revoked => "REVOKED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Whether this status permits an ALLOW decision.
    #[must_use]
    pub const fn permits_allow(self) -> bool {
        match self {
            Self::Authorized => true,
            Self::Rejected | Self::Revoked | Self::Expired => false,
        }
    }
}

// ============================================================================
// SECTION: Authorization Decision
// ============================================================================

/// Final two-way authorization decision.
///
/// # Invariants
/// - Closed enum; DENY is the default on any malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationDecision {
    /// Execution may proceed (but is not invoked here).
    Allow,
    /// Execution must not proceed.
    Deny,
}

// ============================================================================
// SECTION: Execution Authorization
// ============================================================================

/// Immutable permission artifact issued for a valid intent.
///
/// # Invariants
/// - `authorization_hash` covers every other field.
/// - A given `intent_id` authorizes at most one artifact process-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionAuthorization {
    /// Authorization identifier (`AUTH-` prefix).
    pub authorization_id: String,
    /// Identifier of the authorized intent.
    pub intent_id: String,
    /// Identifier of the originating decision.
    pub decision_id: String,
    /// Observation session identifier.
    pub session_id: String,
    /// Authorization lifecycle status.
    pub authorization_status: AuthorizationStatus,
    /// Human whose decision authorized execution.
    pub authorized_by: String,
    /// Authorization timestamp (ISO-8601, caller-supplied).
    pub authorized_at: String,
    /// SHA-256 hash of all other fields.
    pub authorization_hash: String,
}

impl ExecutionAuthorization {
    /// Computes the canonical authorization hash over all fields except `authorization_hash`.
    #[must_use]
    pub fn compute_hash(
        authorization_id: &str,
        intent_id: &str,
        decision_id: &str,
        session_id: &str,
        authorization_status: AuthorizationStatus,
        authorized_by: &str,
        authorized_at: &str,
    ) -> String {
        Preimage::new()
            .text(authorization_id)
            .text(intent_id)
            .text(decision_id)
            .text(session_id)
            .text(authorization_status.as_str())
            .text(authorized_by)
            .text(authorized_at)
            .finish()
    }

    /// Recomputes this authorization's hash from its stored fields.
    #[must_use]
    pub fn recomputed_hash(&self) -> String {
        Self::compute_hash(
            &self.authorization_id,
            &self.intent_id,
            &self.decision_id,
            &self.session_id,
            self.authorization_status,
            &self.authorized_by,
            &self.authorized_at,
        )
    }
}

// ============================================================================
// SECTION: Authorization Revocation
// ============================================================================

/// Permanent revocation of an execution authorization.
///
/// # Invariants
/// - Never undone; once recorded in an audit, the authorization is revoked
///   forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRevocation {
    /// Revocation identifier (`AUTHREV-` prefix).
    pub revocation_id: String,
    /// Authorization being revoked.
    pub authorization_id: String,
    /// Human who revoked.
    pub revoked_by: String,
    /// Mandatory revocation reason.
    pub revocation_reason: String,
    /// Revocation timestamp (ISO-8601, caller-supplied).
    pub revoked_at: String,
    /// SHA-256 hash of all other fields.
    pub revocation_hash: String,
}

impl AuthorizationRevocation {
    /// Computes the canonical revocation hash over all fields except `revocation_hash`.
    #[must_use]
    pub fn compute_hash(
        revocation_id: &str,
        authorization_id: &str,
        revoked_by: &str,
        revocation_reason: &str,
        revoked_at: &str,
    ) -> String {
        Preimage::new()
            .text(revocation_id)
            .text(authorization_id)
            .text(revoked_by)
            .text(revocation_reason)
            .text(revoked_at)
            .finish()
    }
}

// ============================================================================
// SECTION: Authorization Audit Records
// ============================================================================

/// Kind of event recorded in the authorization audit.
///
/// # Invariants
/// - Closed enum; `as_str` spellings are hash-preimage literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationRecordType {
    /// An authorization was issued.
    Authorization,
    /// An authorization was revoked.
    Revocation,
}

impl AuthorizationRecordType {
    /// Returns the stable preimage spelling for this record type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authorization => "AUTHORIZATION",
            Self::Revocation => "REVOCATION",
        }
    }
}

/// Record in the authorization audit trail.
///
/// # Invariants
/// - `self_hash` covers every other field; `prior_hash` links the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRecord {
    /// Record identifier (`AUTHREC-` prefix).
    pub record_id: String,
    /// Kind of event recorded.
    pub record_type: AuthorizationRecordType,
    /// Authorization this record pertains to.
    pub authorization_id: String,
    /// Record timestamp (ISO-8601, caller-supplied).
    pub timestamp: String,
    /// Hash of the preceding record (empty for the first record).
    pub prior_hash: String,
    /// SHA-256 hash of this record.
    pub self_hash: String,
}

impl AuthorizationRecord {
    /// Computes the canonical record hash over all fields except `self_hash`.
    #[must_use]
    pub fn compute_hash(
        record_id: &str,
        record_type: AuthorizationRecordType,
        authorization_id: &str,
        timestamp: &str,
        prior_hash: &str,
    ) -> String {
        Preimage::new()
            .text(record_id)
            .text(record_type.as_str())
            .text(authorization_id)
            .text(timestamp)
            .text(prior_hash)
            .finish()
    }
}

impl ChainedRecord for AuthorizationRecord {
    fn prior_hash(&self) -> &str {
        &self.prior_hash
    }

    fn self_hash(&self) -> &str {
        &self.self_hash
    }

    fn recompute_hash(&self) -> String {
        Self::compute_hash(
            &self.record_id,
            self.record_type,
            &self.authorization_id,
            &self.timestamp,
            &self.prior_hash,
        )
    }
}

// ============================================================================
// SECTION: Authorization Audit
// ============================================================================

/// Append-only, hash-linked authorization audit trail.
///
/// # Invariants
/// - Appending produces a new audit value; records are never mutated.
/// - `head_hash` equals the last record's `self_hash` (empty when empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationAudit {
    /// Audit identifier (`AUTHAUDIT-` prefix).
    pub audit_id: String,
    /// Ordered authorization records.
    pub records: Vec<AuthorizationRecord>,
    /// Observation session identifier.
    pub session_id: String,
    /// Hash of the most recent record (empty when empty).
    pub head_hash: String,
    /// Number of records in the audit.
    pub length: usize,
}

impl AuthorizationAudit {
    /// Creates an empty audit for the given session.
    #[must_use]
    pub const fn empty(session_id: String, audit_id: String) -> Self {
        Self {
            audit_id,
            records: Vec::new(),
            session_id,
            head_hash: String::new(),
            length: 0,
        }
    }

    /// Returns a new audit with `record` appended.
    #[must_use]
    pub fn appended(&self, record: AuthorizationRecord) -> Self {
        let head_hash = record.self_hash.clone();
        let mut records = self.records.clone();
        records.push(record);
        Self {
            audit_id: self.audit_id.clone(),
            length: records.len(),
            records,
            session_id: self.session_id.clone(),
            head_hash,
        }
    }
}
