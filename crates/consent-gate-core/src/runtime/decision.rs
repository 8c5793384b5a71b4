// crates/consent-gate-core/src/runtime/decision.rs
// ============================================================================
// Module: Consent Gate Decision Engine
// Description: Decision solicitation, acceptance, timeout, and audit recording.
// Purpose: Route curated evidence to humans and record their decisions.
// Dependencies: crate::core::{audit, decision, identifiers}, thiserror
// ============================================================================

//! ## Overview
//! Evidence informs humans; humans decide; the system records. A request
//! always allows all four decisions and always times out to ABORT. Raw
//! evidence is never routed through this engine: requests are built from the
//! curated summary fields only, and the visibility policy classifies any
//! unknown field name as hidden.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::audit::verify_folded_ledger;
use crate::core::decision::DecisionAudit;
use crate::core::decision::DecisionOutcome;
use crate::core::decision::DecisionRecord;
use crate::core::decision::DecisionRequest;
use crate::core::decision::EvidenceSummary;
use crate::core::decision::EvidenceVisibility;
use crate::core::decision::HumanDecision;
use crate::core::identifiers::new_decision_audit_id;
use crate::core::identifiers::new_decision_id;
use crate::core::identifiers::new_request_id;
use crate::runtime::is_blank;

// ============================================================================
// SECTION: Timeout Identity
// ============================================================================

/// Human identifier recorded on timeout decisions.
pub const TIMEOUT_HUMAN_ID: &str = "SYSTEM_TIMEOUT";

/// Reason recorded on timeout decisions.
pub const TIMEOUT_REASON: &str = "TIMEOUT";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract violations raised when accepting a human decision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    /// The deciding human was not identified.
    #[error("human_id is required")]
    MissingHumanId,
    /// The decision is not among the request's allowed decisions.
    #[error("decision {0} is not in the allowed decisions")]
    NotAllowed(&'static str),
    /// A RETRY decision was submitted without a reason.
    #[error("RETRY decision requires a reason")]
    RetryWithoutReason,
    /// An ESCALATE decision was submitted without a reason.
    #[error("ESCALATE decision requires a reason")]
    EscalateWithoutReason,
    /// An ESCALATE decision was submitted without a target.
    #[error("ESCALATE decision requires an escalation_target")]
    EscalateWithoutTarget,
}

// ============================================================================
// SECTION: Visibility Policy
// ============================================================================

/// Classifies an evidence field name for human presentation.
///
/// The seven summary fields and the chain-link hashes are visible; raw
/// executor data is hidden; unknown field names default to hidden.
#[must_use]
pub fn visibility(field_name: &str) -> EvidenceVisibility {
    match field_name {
        "observation_point" | "evidence_type" | "timestamp" | "chain_length"
        | "execution_state" | "confidence_score" | "chain_hash" | "self_hash" | "prior_hash" => {
            EvidenceVisibility::Visible
        }
        "raw_data" | "executor_output" => EvidenceVisibility::Hidden,
        _ => EvidenceVisibility::Hidden,
    }
}

// ============================================================================
// SECTION: Request Creation
// ============================================================================

/// Creates a decision request from curated summary fields.
///
/// Allowed decisions always include all four members, and the timeout
/// decision is always ABORT. The expiry is recorded as
/// `"{now}+{timeout_seconds}s"`; the core performs no time arithmetic.
#[must_use]
#[allow(clippy::too_many_arguments, reason = "Summary fields are passed individually to keep raw evidence out of reach.")]
pub fn create_request(
    session_id: &str,
    observation_point: &str,
    evidence_type: &str,
    evidence_timestamp: &str,
    chain_length: usize,
    execution_state: &str,
    confidence_score: f64,
    chain_hash: &str,
    timeout_seconds: u64,
    now: &str,
) -> DecisionRequest {
    DecisionRequest {
        request_id: new_request_id(),
        session_id: session_id.to_string(),
        evidence_summary: EvidenceSummary {
            observation_point: observation_point.to_string(),
            evidence_type: evidence_type.to_string(),
            timestamp: evidence_timestamp.to_string(),
            chain_length,
            execution_state: execution_state.to_string(),
            confidence_score,
            chain_hash: chain_hash.to_string(),
        },
        allowed_decisions: vec![
            HumanDecision::Continue,
            HumanDecision::Retry,
            HumanDecision::Abort,
            HumanDecision::Escalate,
        ],
        created_at: now.to_string(),
        timeout_at: format!("{now}+{timeout_seconds}s"),
        timeout_decision: HumanDecision::Abort,
    }
}

// ============================================================================
// SECTION: Evidence Presentation
// ============================================================================

/// Returns the curated evidence summary for display.
///
/// Idempotent and read-only; the summary is returned unchanged.
#[must_use]
pub const fn present_evidence(request: &DecisionRequest) -> &EvidenceSummary {
    &request.evidence_summary
}

// ============================================================================
// SECTION: Decision Acceptance
// ============================================================================

/// Accepts a human decision against a request.
///
/// # Errors
///
/// Returns [`DecisionError`] when `human_id` is blank, the decision is not
/// allowed by the request, RETRY lacks a reason, or ESCALATE lacks a reason
/// or target.
pub fn accept_decision(
    request: &DecisionRequest,
    decision: HumanDecision,
    human_id: &str,
    reason: Option<&str>,
    escalation_target: Option<&str>,
    timestamp: &str,
) -> Result<DecisionRecord, DecisionError> {
    if is_blank(human_id) {
        return Err(DecisionError::MissingHumanId);
    }

    if !request.allowed_decisions.contains(&decision) {
        return Err(DecisionError::NotAllowed(decision.as_str()));
    }

    match decision {
        HumanDecision::Retry => {
            if reason.is_none_or(is_blank) {
                return Err(DecisionError::RetryWithoutReason);
            }
        }
        HumanDecision::Escalate => {
            if reason.is_none_or(is_blank) {
                return Err(DecisionError::EscalateWithoutReason);
            }
            if escalation_target.is_none_or(is_blank) {
                return Err(DecisionError::EscalateWithoutTarget);
            }
        }
        HumanDecision::Continue | HumanDecision::Abort => {}
    }

    Ok(DecisionRecord {
        decision_id: new_decision_id(),
        request_id: request.request_id.clone(),
        human_id: human_id.to_string(),
        decision,
        reason: reason.map(ToString::to_string),
        escalation_target: escalation_target.map(ToString::to_string),
        timestamp: timestamp.to_string(),
        evidence_chain_hash: request.evidence_summary.chain_hash.clone(),
    })
}

// ============================================================================
// SECTION: Timeout Resolution
// ============================================================================

/// Creates the ABORT decision recorded when a request expires unanswered.
///
/// The record carries `human_id = "SYSTEM_TIMEOUT"` and `reason = "TIMEOUT"`
/// for every request; there is no other timeout identity.
#[must_use]
pub fn create_timeout_decision(request: &DecisionRequest, timeout_timestamp: &str) -> DecisionRecord {
    DecisionRecord {
        decision_id: new_decision_id(),
        request_id: request.request_id.clone(),
        human_id: TIMEOUT_HUMAN_ID.to_string(),
        decision: HumanDecision::Abort,
        reason: Some(TIMEOUT_REASON.to_string()),
        escalation_target: None,
        timestamp: timeout_timestamp.to_string(),
        evidence_chain_hash: request.evidence_summary.chain_hash.clone(),
    }
}

// ============================================================================
// SECTION: Audit Recording
// ============================================================================

/// Records a decision in the audit trail, returning a new audit.
#[must_use]
pub fn record_decision(audit: &DecisionAudit, record: DecisionRecord) -> DecisionAudit {
    audit.appended(record)
}

/// Creates an empty decision audit, minting an `AUDIT-` id when none is given.
#[must_use]
pub fn create_empty_audit(session_id: &str, audit_id: Option<String>) -> DecisionAudit {
    DecisionAudit::empty(
        session_id.to_string(),
        audit_id.unwrap_or_else(new_decision_audit_id),
    )
}

/// Validates decision audit chain integrity by re-folding the record hashes.
#[must_use]
pub fn validate_audit_chain(audit: &DecisionAudit) -> bool {
    verify_folded_ledger(
        &audit.records,
        &audit.head_hash,
        audit.length,
        DecisionRecord::chained_hash,
    )
}

// ============================================================================
// SECTION: Decision Application
// ============================================================================

/// Classifies whether a decision can be applied in the current state.
///
/// Pure classification; nothing is executed. ABORT always applies; CONTINUE
/// applies outside the halted state; RETRY applies while retries remain;
/// ESCALATE with a target is pending handoff, without one rejected.
#[must_use]
pub fn apply_decision(
    record: &DecisionRecord,
    current_state: &str,
    retry_count: u32,
    max_retries: u32,
) -> DecisionOutcome {
    match record.decision {
        HumanDecision::Abort => DecisionOutcome::Applied,
        HumanDecision::Continue => {
            if current_state == "HALTED" {
                DecisionOutcome::Rejected
            } else {
                DecisionOutcome::Applied
            }
        }
        HumanDecision::Retry => {
            if retry_count >= max_retries {
                DecisionOutcome::Rejected
            } else {
                DecisionOutcome::Applied
            }
        }
        HumanDecision::Escalate => match &record.escalation_target {
            Some(target) if !is_blank(target) => DecisionOutcome::Pending,
            Some(_) | None => DecisionOutcome::Rejected,
        },
    }
}
