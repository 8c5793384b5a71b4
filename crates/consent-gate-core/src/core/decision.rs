// crates/consent-gate-core/src/core/decision.rs
// ============================================================================
// Module: Consent Gate Decision Model
// Description: Evidence summaries, decision requests, records, and the decision audit.
// Purpose: Present curated evidence to humans and record their decisions immutably.
// Dependencies: crate::core::hashing, serde
// ============================================================================

//! ## Overview
//! Humans decide; the system records. The evidence summary is a redacted
//! projection of the chain state: the sensitive fields (`raw_data`,
//! `executor_output`) are structurally absent from the type, not merely
//! filtered at runtime. Decision records fold into an append-only audit whose
//! head hash commits to the full decision history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::Preimage;

// ============================================================================
// SECTION: Human Decisions
// ============================================================================

/// The four decisions a human may make on a request.
///
/// # Invariants
/// - Closed enum; variants are stable for serialization and hash preimages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HumanDecision {
    /// Proceed to the next execution step.
    Continue,
    /// Re-attempt the same execution step (requires a reason).
    Retry,
    /// Terminate execution permanently.
    Abort,
    /// Defer to higher authority (requires a reason and a target).
    Escalate,
}

impl HumanDecision {
    /// Returns the stable preimage spelling for this decision.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::Retry => "RETRY",
            Self::Abort => "ABORT",
            Self::Escalate => "ESCALATE",
        }
    }
}

// ============================================================================
// SECTION: Decision Outcomes
// ============================================================================

/// Outcome of attempting to apply a decision to the execution state.
///
/// # Invariants
/// - Closed enum; classification only, never execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionOutcome {
    /// The decision is applicable in the current state.
    Applied,
    /// The decision cannot be applied.
    Rejected,
    /// The decision awaits a precondition (escalation handoff).
    Pending,
    /// The decision timed out (resolved as ABORT).
    Timeout,
}

// ============================================================================
// SECTION: Evidence Visibility
// ============================================================================

/// Visibility classification for evidence field names.
///
/// # Invariants
/// - Closed enum; unknown field names classify as hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceVisibility {
    /// The field may be shown to a human.
    Visible,
    /// The field must not be shown (raw executor data).
    Hidden,
    /// Viewing requires higher authority.
    OverrideRequired,
}

// ============================================================================
// SECTION: Evidence Summary
// ============================================================================

/// Curated, human-safe view of the evidence chain state.
///
/// # Invariants
/// - Carries exactly these seven fields; `raw_data` and `executor_output`
///   do not exist on this type.
/// - `confidence_score` lies in `[0.0, 1.0]` (caller-supplied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    /// Observation point name (for example `"PRE_DISPATCH"`).
    pub observation_point: String,
    /// Evidence type name (for example `"STATE_TRANSITION"`).
    pub evidence_type: String,
    /// Capture timestamp of the summarized evidence.
    pub timestamp: String,
    /// Number of records in the evidence chain.
    pub chain_length: usize,
    /// Current execution loop state name.
    pub execution_state: String,
    /// Normalized confidence score in `[0.0, 1.0]`.
    pub confidence_score: f64,
    /// Head hash of the evidence chain.
    pub chain_hash: String,
}

// ============================================================================
// SECTION: Decision Request
// ============================================================================

/// Request soliciting exactly one human decision.
///
/// # Invariants
/// - `timeout_decision` is always [`HumanDecision::Abort`].
/// - `allowed_decisions` membership is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Request identifier (`REQ-` prefix).
    pub request_id: String,
    /// Observation session identifier.
    pub session_id: String,
    /// Curated evidence summary (no raw data).
    pub evidence_summary: EvidenceSummary,
    /// Decisions the human may select.
    pub allowed_decisions: Vec<HumanDecision>,
    /// Creation timestamp (ISO-8601, caller-supplied).
    pub created_at: String,
    /// Expiry timestamp for the request.
    pub timeout_at: String,
    /// Decision applied on timeout (always ABORT).
    pub timeout_decision: HumanDecision,
}

// ============================================================================
// SECTION: Decision Record
// ============================================================================

/// Immutable record of one human decision.
///
/// # Invariants
/// - `reason` is present for RETRY and ESCALATE decisions.
/// - `escalation_target` is present for ESCALATE decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Decision identifier (`DEC-` prefix).
    pub decision_id: String,
    /// Identifier of the answered request.
    pub request_id: String,
    /// Identifier of the deciding human (`SYSTEM_TIMEOUT` on timeout).
    pub human_id: String,
    /// The decision made.
    pub decision: HumanDecision,
    /// Optional reason (required for RETRY and ESCALATE).
    pub reason: Option<String>,
    /// Optional escalation target (required for ESCALATE).
    pub escalation_target: Option<String>,
    /// Decision timestamp (ISO-8601, caller-supplied).
    pub timestamp: String,
    /// Evidence chain head hash at decision time.
    pub evidence_chain_hash: String,
}

impl DecisionRecord {
    /// Computes the chained hash of this record over the given prior hash.
    ///
    /// Decision records carry no hash fields of their own; the audit head is
    /// the fold of this function across the record sequence.
    #[must_use]
    pub fn chained_hash(&self, prior_hash: &str) -> String {
        Preimage::new()
            .text(&self.decision_id)
            .text(&self.request_id)
            .text(&self.human_id)
            .text(self.decision.as_str())
            .text(self.reason.as_deref().unwrap_or(""))
            .text(self.escalation_target.as_deref().unwrap_or(""))
            .text(&self.timestamp)
            .text(&self.evidence_chain_hash)
            .text(prior_hash)
            .finish()
    }
}

// ============================================================================
// SECTION: Decision Audit
// ============================================================================

/// Append-only audit of human decisions for a session.
///
/// # Invariants
/// - Appending produces a new audit value; records are never mutated.
/// - `head_hash` is the fold of [`DecisionRecord::chained_hash`] over the
///   record sequence (empty when empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionAudit {
    /// Audit identifier (`AUDIT-` prefix).
    pub audit_id: String,
    /// Ordered decision records.
    pub records: Vec<DecisionRecord>,
    /// Observation session identifier.
    pub session_id: String,
    /// Folded hash of the record sequence (empty when empty).
    pub head_hash: String,
    /// Number of records in the audit.
    pub length: usize,
}

impl DecisionAudit {
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

    /// Returns a new audit with `record` appended and the head re-folded.
    #[must_use]
    pub fn appended(&self, record: DecisionRecord) -> Self {
        let head_hash = record.chained_hash(&self.head_hash);
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
