// crates/consent-gate-core/src/core/observation.rs
// ============================================================================
// Module: Consent Gate Observation Model
// Description: Evidence records, evidence chains, and observation contexts.
// Purpose: Capture raw execution-loop evidence as immutable, hash-linked data.
// Dependencies: crate::core::{audit, hashing}, serde
// ============================================================================

//! ## Overview
//! Observation is passive: evidence is captured at named points in the
//! external execution loop and appended to a hash-linked chain. Raw evidence
//! bytes are never parsed or interpreted by the core; they flow into the
//! record hash as-is and out to collaborators unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::audit::ChainedRecord;
use crate::core::hashing::Preimage;

// ============================================================================
// SECTION: Observation Points
// ============================================================================

/// Named points in the execution loop at which evidence may be captured.
///
/// # Invariants
/// - Closed enum; variants are stable for serialization and hash preimages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationPoint {
    /// Before the loop dispatches an instruction.
    PreDispatch,
    /// After dispatch, while awaiting a response.
    PostDispatch,
    /// Before the loop evaluates a response.
    PreEvaluate,
    /// After evaluation, before the loop continues or halts.
    PostEvaluate,
    /// On any transition into the halted state.
    HaltEntry,
}

impl ObservationPoint {
    /// Returns the stable preimage spelling for this point.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreDispatch => "PRE_DISPATCH",
            Self::PostDispatch => "POST_DISPATCH",
            Self::PreEvaluate => "PRE_EVALUATE",
            Self::PostEvaluate => "POST_EVALUATE",
            Self::HaltEntry => "HALT_ENTRY",
        }
    }
}

// ============================================================================
// SECTION: Evidence Types
// ============================================================================

/// Kinds of evidence the observation layer can capture.
///
/// # Invariants
/// - Closed enum; variants are stable for serialization and hash preimages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceType {
    /// Execution state change.
    StateTransition,
    /// Raw executor response (untrusted).
    ExecutorOutput,
    /// Timed observation.
    TimestampEvent,
    /// Resource metrics snapshot (untrusted).
    ResourceSnapshot,
    /// Stop-condition trigger.
    StopCondition,
}

impl EvidenceType {
    /// Returns the stable preimage spelling for this evidence type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StateTransition => "STATE_TRANSITION",
            Self::ExecutorOutput => "EXECUTOR_OUTPUT",
            Self::TimestampEvent => "TIMESTAMP_EVENT",
            Self::ResourceSnapshot => "RESOURCE_SNAPSHOT",
            Self::StopCondition => "STOP_CONDITION",
        }
    }
}

// ============================================================================
// SECTION: Stop Conditions
// ============================================================================

/// Conditions that force a session into the halted state.
///
/// # Invariants
/// - Closed enum; any condition that cannot be positively cleared halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopCondition {
    /// No human authorization exists.
    MissingAuthorization,
    /// The executor is not registered.
    ExecutorNotRegistered,
    /// The instruction envelope hash does not match.
    EnvelopeHashMismatch,
    /// The observation context was never initialized.
    ContextUninitialized,
    /// The evidence chain failed verification.
    EvidenceChainBroken,
    /// A resource limit was exceeded.
    ResourceLimitExceeded,
    /// A timestamp failed validity checking.
    TimestampInvalid,
    /// A prior execution has not been finalized.
    PriorExecutionPending,
    /// The execution intent is ambiguous.
    AmbiguousIntent,
    /// A human signaled abort.
    HumanAbort,
}

impl StopCondition {
    /// Returns the stable spelling for this stop condition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingAuthorization => "MISSING_AUTHORIZATION",
            Self::ExecutorNotRegistered => "EXECUTOR_NOT_REGISTERED",
            Self::EnvelopeHashMismatch => "ENVELOPE_HASH_MISMATCH",
            Self::ContextUninitialized => "CONTEXT_UNINITIALIZED",
            Self::EvidenceChainBroken => "EVIDENCE_CHAIN_BROKEN",
            Self::ResourceLimitExceeded => "RESOURCE_LIMIT_EXCEEDED",
            Self::TimestampInvalid => "TIMESTAMP_INVALID",
            Self::PriorExecutionPending => "PRIOR_EXECUTION_PENDING",
            Self::AmbiguousIntent => "AMBIGUOUS_INTENT",
            Self::HumanAbort => "HUMAN_ABORT",
        }
    }
}

// ============================================================================
// SECTION: Evidence Records
// ============================================================================

/// Single immutable evidence entry.
///
/// # Invariants
/// - `raw_data` is opaque and never parsed by the core.
/// - `self_hash` covers every other field; `prior_hash` links the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Record identifier (`REC-` prefix).
    pub record_id: String,
    /// Observation point at which the evidence was captured.
    pub observation_point: ObservationPoint,
    /// Kind of evidence captured.
    pub evidence_type: EvidenceType,
    /// Capture timestamp (ISO-8601, caller-supplied).
    pub timestamp: String,
    /// Opaque evidence bytes.
    pub raw_data: Vec<u8>,
    /// Hash of the preceding record (empty for the first record).
    pub prior_hash: String,
    /// SHA-256 hash of this record.
    pub self_hash: String,
}

impl EvidenceRecord {
    /// Computes the canonical record hash over all fields except `self_hash`.
    #[must_use]
    pub fn compute_hash(
        record_id: &str,
        observation_point: ObservationPoint,
        evidence_type: EvidenceType,
        timestamp: &str,
        raw_data: &[u8],
        prior_hash: &str,
    ) -> String {
        Preimage::new()
            .text(record_id)
            .text(observation_point.as_str())
            .text(evidence_type.as_str())
            .text(timestamp)
            .bytes(raw_data)
            .text(prior_hash)
            .finish()
    }
}

impl ChainedRecord for EvidenceRecord {
    fn prior_hash(&self) -> &str {
        &self.prior_hash
    }

    fn self_hash(&self) -> &str {
        &self.self_hash
    }

    fn recompute_hash(&self) -> String {
        Self::compute_hash(
            &self.record_id,
            self.observation_point,
            self.evidence_type,
            &self.timestamp,
            &self.raw_data,
            &self.prior_hash,
        )
    }
}

// ============================================================================
// SECTION: Observation Context
// ============================================================================

/// Descriptor for a single observation session.
///
/// # Invariants
/// - Immutable once created; a halted context never un-halts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationContext {
    /// Observation session identifier (`OBS-` prefix).
    pub session_id: String,
    /// Execution loop identifier supplied by the host.
    pub loop_id: String,
    /// Bound executor identifier.
    pub executor_id: String,
    /// Expected instruction envelope hash.
    pub envelope_hash: String,
    /// Session creation timestamp (ISO-8601, caller-supplied).
    pub created_at: String,
    /// Whether the session is halted.
    pub is_halted: bool,
}

// ============================================================================
// SECTION: Evidence Chain
// ============================================================================

/// Append-only, hash-linked chain of evidence records.
///
/// # Invariants
/// - Appending produces a new chain value; records are never mutated.
/// - `head_hash` equals the last record's `self_hash` (empty when empty).
/// - `length` equals the record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceChain {
    /// Chain identifier (`CHAIN-` prefix).
    pub chain_id: String,
    /// Ordered evidence records.
    pub records: Vec<EvidenceRecord>,
    /// Hash of the most recent record (empty when the chain is empty).
    pub head_hash: String,
    /// Number of records in the chain.
    pub length: usize,
}

impl EvidenceChain {
    /// Creates an empty chain with the provided identifier.
    #[must_use]
    pub const fn empty(chain_id: String) -> Self {
        Self {
            chain_id,
            records: Vec::new(),
            head_hash: String::new(),
            length: 0,
        }
    }

    /// Returns a new chain with `record` appended.
    #[must_use]
    pub fn appended(&self, record: EvidenceRecord) -> Self {
        let head_hash = record.self_hash.clone();
        let mut records = self.records.clone();
        records.push(record);
        Self {
            chain_id: self.chain_id.clone(),
            length: records.len(),
            records,
            head_hash,
        }
    }
}
