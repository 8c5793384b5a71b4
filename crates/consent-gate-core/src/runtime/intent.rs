// crates/consent-gate-core/src/runtime/intent.rs
// ============================================================================
// Module: Consent Gate Intent Engine
// Description: Decision-to-intent binding, revocation, and intent audit recording.
// Purpose: Translate human decisions into immutable intents, rejecting duplicates.
// Dependencies: crate::core::{audit, decision, identifiers, intent}, thiserror
// ============================================================================

//! ## Overview
//! Humans decide; systems bind intent; execution waits. Binding validates
//! every field, commits the intent under its hash, and tracks bound decision
//! identifiers process-wide so a decision binds at most once. Revocation is
//! permanent and recorded in the hash-linked intent audit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::OnceLock;

use thiserror::Error;

use crate::core::audit::verify_linked_ledger;
use crate::core::decision::DecisionRecord;
use crate::core::identifiers::new_intent_audit_id;
use crate::core::identifiers::new_intent_id;
use crate::core::identifiers::new_intent_revocation_id;
use crate::core::identifiers::new_record_id;
use crate::core::intent::BindingResult;
use crate::core::intent::ExecutionIntent;
use crate::core::intent::IntentAudit;
use crate::core::intent::IntentRecord;
use crate::core::intent::IntentRecordType;
use crate::core::intent::IntentRevocation;
use crate::runtime::is_blank;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract violations raised when creating a revocation record.
///
/// Shared with the authorization engine, whose revocations carry the same
/// mandatory fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevocationError {
    /// The revoking human was not identified.
    #[error("revoked_by is required")]
    MissingRevokedBy,
    /// No revocation reason was supplied.
    #[error("revocation reason is required")]
    MissingReason,
    /// No revocation timestamp was supplied.
    #[error("timestamp is required")]
    MissingTimestamp,
}

// ============================================================================
// SECTION: Bound Decision Tracking
// ============================================================================

/// Process-wide set of decision identifiers that have bound to an intent.
static BOUND_DECISIONS: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Returns the bound-decision set, recovering from lock poisoning.
fn bound_decisions() -> std::sync::MutexGuard<'static, HashSet<String>> {
    let lock = BOUND_DECISIONS.get_or_init(|| Mutex::new(HashSet::new()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Clears the bound-decision set.
///
/// Reserved for test isolation; production callers must not invoke it.
pub fn clear_bound_decisions() {
    bound_decisions().clear();
}

// ============================================================================
// SECTION: Decision Binding
// ============================================================================

/// Binds a human decision to an execution intent.
///
/// First match wins: an absent decision record is an invalid decision; any
/// blank required field is a missing field; an already-bound decision
/// identifier is a duplicate. Otherwise the intent is minted, committed
/// under its hash, and the decision identifier is recorded as bound.
#[must_use]
pub fn bind_decision(
    decision_record: Option<&DecisionRecord>,
    evidence_chain_hash: &str,
    session_id: &str,
    execution_state: &str,
    timestamp: &str,
) -> (BindingResult, Option<ExecutionIntent>) {
    let Some(record) = decision_record else {
        return (BindingResult::InvalidDecision, None);
    };

    if is_blank(&record.decision_id)
        || is_blank(&record.human_id)
        || is_blank(evidence_chain_hash)
        || is_blank(session_id)
        || is_blank(execution_state)
        || is_blank(timestamp)
    {
        return (BindingResult::MissingField, None);
    }

    let mut bound = bound_decisions();
    if bound.contains(&record.decision_id) {
        return (BindingResult::Duplicate, None);
    }

    let intent_id = new_intent_id();
    let intent_hash = ExecutionIntent::compute_hash(
        &intent_id,
        &record.decision_id,
        record.decision,
        evidence_chain_hash,
        session_id,
        execution_state,
        timestamp,
        &record.human_id,
    );

    let intent = ExecutionIntent {
        intent_id,
        decision_id: record.decision_id.clone(),
        decision_type: record.decision,
        evidence_chain_hash: evidence_chain_hash.to_string(),
        session_id: session_id.to_string(),
        execution_state: execution_state.to_string(),
        created_at: timestamp.to_string(),
        created_by: record.human_id.clone(),
        intent_hash,
    };

    bound.insert(record.decision_id.clone());

    (BindingResult::Success, Some(intent))
}

// ============================================================================
// SECTION: Intent Validation
// ============================================================================

/// Validates an intent against its source decision.
///
/// True iff both artifacts are present, the decision identifier and type
/// match, and the recomputed intent hash equals the stored hash.
#[must_use]
pub fn validate_intent(
    intent: Option<&ExecutionIntent>,
    decision_record: Option<&DecisionRecord>,
) -> bool {
    let (Some(intent), Some(record)) = (intent, decision_record) else {
        return false;
    };

    if intent.decision_id != record.decision_id {
        return false;
    }

    if intent.decision_type != record.decision {
        return false;
    }

    intent.intent_hash == intent.recomputed_hash()
}

// ============================================================================
// SECTION: Revocation
// ============================================================================

/// Creates a permanent revocation record for an intent.
///
/// # Errors
///
/// Returns [`RevocationError`] when `revoked_by`, `reason`, or `timestamp`
/// is blank.
pub fn revoke_intent(
    intent: &ExecutionIntent,
    revoked_by: &str,
    reason: &str,
    timestamp: &str,
) -> Result<IntentRevocation, RevocationError> {
    if is_blank(revoked_by) {
        return Err(RevocationError::MissingRevokedBy);
    }
    if is_blank(reason) {
        return Err(RevocationError::MissingReason);
    }
    if is_blank(timestamp) {
        return Err(RevocationError::MissingTimestamp);
    }

    let revocation_id = new_intent_revocation_id();
    let revocation_hash = IntentRevocation::compute_hash(
        &revocation_id,
        &intent.intent_id,
        revoked_by,
        reason,
        timestamp,
    );

    Ok(IntentRevocation {
        revocation_id,
        intent_id: intent.intent_id.clone(),
        revoked_by: revoked_by.to_string(),
        revocation_reason: reason.to_string(),
        revoked_at: timestamp.to_string(),
        revocation_hash,
    })
}

// ============================================================================
// SECTION: Audit Recording
// ============================================================================

/// Records a binding or revocation event in the intent audit.
///
/// The record type universe is closed at the type level; the literal
/// `"BINDING"`/`"REVOCATION"` spellings enter the hash preimage via the
/// record type's stable name.
#[must_use]
pub fn record_intent(
    audit: &IntentAudit,
    intent_id: &str,
    record_type: IntentRecordType,
    timestamp: &str,
) -> IntentAudit {
    let record_id = new_record_id();
    let prior_hash = audit.head_hash.clone();
    let self_hash =
        IntentRecord::compute_hash(&record_id, record_type, intent_id, timestamp, &prior_hash);

    audit.appended(IntentRecord {
        record_id,
        record_type,
        intent_id: intent_id.to_string(),
        timestamp: timestamp.to_string(),
        prior_hash,
        self_hash,
    })
}

/// Creates an empty intent audit, minting an `IAUDIT-` id when none is given.
#[must_use]
pub fn create_empty_audit(session_id: &str, audit_id: Option<String>) -> IntentAudit {
    IntentAudit::empty(
        session_id.to_string(),
        audit_id.unwrap_or_else(new_intent_audit_id),
    )
}

// ============================================================================
// SECTION: Revocation Queries
// ============================================================================

/// Whether the audit contains a revocation record for the intent.
#[must_use]
pub fn is_intent_revoked(intent_id: &str, audit: &IntentAudit) -> bool {
    audit
        .records
        .iter()
        .any(|record| record.intent_id == intent_id && record.record_type == IntentRecordType::Revocation)
}

// ============================================================================
// SECTION: Audit Validation
// ============================================================================

/// Validates intent audit chain integrity.
#[must_use]
pub fn validate_audit_chain(audit: &IntentAudit) -> bool {
    verify_linked_ledger(&audit.records, &audit.head_hash, audit.length)
}
