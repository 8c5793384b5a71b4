// crates/consent-gate-core/src/core/intent.rs
// ============================================================================
// Module: Consent Gate Intent Model
// Description: Execution intents, intent revocations, and the intent audit.
// Purpose: Bind human decisions to immutable, hash-committed execution intents.
// Dependencies: crate::core::{audit, decision, hashing}, serde
// ============================================================================

//! ## Overview
//! An execution intent is the immutable translation of a human decision:
//! data, not action. Each intent commits to its originating decision and the
//! evidence state via `intent_hash`. Revocation is permanent and recorded in
//! an append-only, hash-linked intent audit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::audit::ChainedRecord;
use crate::core::decision::HumanDecision;
use crate::core::hashing::Preimage;

// ============================================================================
// SECTION: Intent Status
// ============================================================================

/// Intent lifecycle status exposed to executors.
///
/// # Invariants
/// - Closed enum; variants are stable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentStatus {
    /// Bound but not yet executed.
    Pending,
    /// Execution completed.
    Executed,
    /// Revoked before execution.
    Revoked,
    /// Timed out without execution.
    Expired,
}

// ============================================================================
// SECTION: Binding Results
// ============================================================================

/// Result of a decision-to-intent binding attempt.
///
/// # Invariants
/// - Closed enum; every non-`Success` variant carries no intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BindingResult {
    /// Binding succeeded.
    Success,
    /// Decision validation failed.
    InvalidDecision,
    /// A required field is missing or blank.
    MissingField,
    /// An intent already exists for this decision.
    Duplicate,
    /// Binding rejected for another reason.
    Rejected,
}

// ============================================================================
// SECTION: Execution Intent
// ============================================================================

/// Immutable execution intent bound to a human decision.
///
/// # Invariants
/// - `intent_hash` covers every other field; tampering is detectable by
///   recomputation.
/// - A given `decision_id` binds to at most one intent process-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionIntent {
    /// Intent identifier (`INTENT-` prefix).
    pub intent_id: String,
    /// Identifier of the bound decision record.
    pub decision_id: String,
    /// Decision type carried over from the decision record.
    pub decision_type: HumanDecision,
    /// Evidence chain head hash frozen at binding time.
    pub evidence_chain_hash: String,
    /// Observation session identifier.
    pub session_id: String,
    /// Execution loop state name at binding time.
    pub execution_state: String,
    /// Binding timestamp (ISO-8601, caller-supplied).
    pub created_at: String,
    /// Human who made the bound decision.
    pub created_by: String,
    /// SHA-256 hash of all other fields.
    pub intent_hash: String,
}

impl ExecutionIntent {
    /// Computes the canonical intent hash over all fields except `intent_hash`.
    #[must_use]
    #[allow(clippy::too_many_arguments, reason = "Hash preimage order is part of the wire contract.")]
    pub fn compute_hash(
        intent_id: &str,
        decision_id: &str,
        decision_type: HumanDecision,
        evidence_chain_hash: &str,
        session_id: &str,
        execution_state: &str,
        created_at: &str,
        created_by: &str,
    ) -> String {
        Preimage::new()
            .text(intent_id)
            .text(decision_id)
            .text(decision_type.as_str())
            .text(evidence_chain_hash)
            .text(session_id)
            .text(execution_state)
            .text(created_at)
            .text(created_by)
            .finish()
    }

    /// Recomputes this intent's hash from its stored fields.
    #[must_use]
    pub fn recomputed_hash(&self) -> String {
        Self::compute_hash(
            &self.intent_id,
            &self.decision_id,
            self.decision_type,
            &self.evidence_chain_hash,
            &self.session_id,
            &self.execution_state,
            &self.created_at,
            &self.created_by,
        )
    }
}

// ============================================================================
// SECTION: Intent Revocation
// ============================================================================

/// Permanent revocation of an execution intent.
///
/// # Invariants
/// - Never undone; once recorded in an audit, the intent is revoked forever.
/// - `revocation_reason` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRevocation {
    /// Revocation identifier (`REVOKE-` prefix).
    pub revocation_id: String,
    /// Intent being revoked.
    pub intent_id: String,
    /// Human who revoked.
    pub revoked_by: String,
    /// Mandatory revocation reason.
    pub revocation_reason: String,
    /// Revocation timestamp (ISO-8601, caller-supplied).
    pub revoked_at: String,
    /// SHA-256 hash of all other fields.
    pub revocation_hash: String,
}

impl IntentRevocation {
    /// Computes the canonical revocation hash over all fields except `revocation_hash`.
    #[must_use]
    pub fn compute_hash(
        revocation_id: &str,
        intent_id: &str,
        revoked_by: &str,
        revocation_reason: &str,
        revoked_at: &str,
    ) -> String {
        Preimage::new()
            .text(revocation_id)
            .text(intent_id)
            .text(revoked_by)
            .text(revocation_reason)
            .text(revoked_at)
            .finish()
    }
}

// ============================================================================
// SECTION: Intent Audit Records
// ============================================================================

/// Kind of event recorded in the intent audit.
///
/// # Invariants
/// - Closed enum; `as_str` spellings are hash-preimage literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentRecordType {
    /// A decision was bound to an intent.
    Binding,
    /// An intent was revoked.
    Revocation,
}

impl IntentRecordType {
    /// Returns the stable preimage spelling for this record type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binding => "BINDING",
            Self::Revocation => "REVOCATION",
        }
    }
}

/// Record in the intent audit trail.
///
/// # Invariants
/// - `self_hash` covers every other field; `prior_hash` links the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Record identifier (`REC-` prefix).
    pub record_id: String,
    /// Kind of event recorded.
    pub record_type: IntentRecordType,
    /// Intent this record pertains to.
    pub intent_id: String,
    /// Record timestamp (ISO-8601, caller-supplied).
    pub timestamp: String,
    /// Hash of the preceding record (empty for the first record).
    pub prior_hash: String,
    /// SHA-256 hash of this record.
    pub self_hash: String,
}

impl IntentRecord {
    /// Computes the canonical record hash over all fields except `self_hash`.
    #[must_use]
    pub fn compute_hash(
        record_id: &str,
        record_type: IntentRecordType,
        intent_id: &str,
        timestamp: &str,
        prior_hash: &str,
    ) -> String {
        Preimage::new()
            .text(record_id)
            .text(record_type.as_str())
            .text(intent_id)
            .text(timestamp)
            .text(prior_hash)
            .finish()
    }
}

impl ChainedRecord for IntentRecord {
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
            &self.intent_id,
            &self.timestamp,
            &self.prior_hash,
        )
    }
}

// ============================================================================
// SECTION: Intent Audit
// ============================================================================

/// Append-only, hash-linked intent audit trail.
///
/// # Invariants
/// - Appending produces a new audit value; records are never mutated.
/// - `head_hash` equals the last record's `self_hash` (empty when empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentAudit {
    /// Audit identifier (`IAUDIT-` prefix).
    pub audit_id: String,
    /// Ordered intent records.
    pub records: Vec<IntentRecord>,
    /// Observation session identifier.
    pub session_id: String,
    /// Hash of the most recent record (empty when empty).
    pub head_hash: String,
    /// Number of records in the audit.
    pub length: usize,
}

impl IntentAudit {
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
    pub fn appended(&self, record: IntentRecord) -> Self {
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
