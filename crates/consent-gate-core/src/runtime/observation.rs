// crates/consent-gate-core/src/runtime/observation.rs
// ============================================================================
// Module: Consent Gate Observation Engine
// Description: Observer attachment, evidence capture, stop checks, chain validation.
// Purpose: Record untyped evidence passively at named execution-loop points.
// Dependencies: crate::core::{audit, identifiers, observation}
// ============================================================================

//! ## Overview
//! The observation engine is passive: it records, never interprets. Evidence
//! bytes pass through hashing only. Any ambiguity halts: blank session
//! inputs produce a halted context, halted contexts capture only halt
//! markers, and unclearable stop conditions resolve to HALT.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::audit::verify_linked_ledger;
use crate::core::identifiers::new_chain_id;
use crate::core::identifiers::new_record_id;
use crate::core::identifiers::new_session_id;
use crate::core::observation::EvidenceChain;
use crate::core::observation::EvidenceRecord;
use crate::core::observation::EvidenceType;
use crate::core::observation::ObservationContext;
use crate::core::observation::ObservationPoint;
use crate::core::observation::StopCondition;
use crate::runtime::is_blank;

// ============================================================================
// SECTION: Halt Marker
// ============================================================================

/// Raw-data marker recorded when capturing on a halted context.
const HALT_MARKER: &[u8] = b"CONTEXT_HALTED";

// ============================================================================
// SECTION: Observer Attachment
// ============================================================================

/// Attaches an observer to an execution loop.
///
/// Always returns a well-formed context. Any blank input (empty or
/// whitespace-only `loop_id`, `executor_id`, `envelope_hash`, or
/// `timestamp`) produces a context with `is_halted = true`; the offending
/// inputs are retained verbatim for diagnosis.
#[must_use]
pub fn attach_observer(
    loop_id: &str,
    executor_id: &str,
    envelope_hash: &str,
    timestamp: &str,
) -> ObservationContext {
    let is_halted = is_blank(loop_id)
        || is_blank(executor_id)
        || is_blank(envelope_hash)
        || is_blank(timestamp);

    ObservationContext {
        session_id: new_session_id(),
        loop_id: loop_id.to_string(),
        executor_id: executor_id.to_string(),
        envelope_hash: envelope_hash.to_string(),
        created_at: timestamp.to_string(),
        is_halted,
    }
}

// ============================================================================
// SECTION: Evidence Capture
// ============================================================================

/// Captures evidence at an observation point, returning a new chain.
///
/// If the context is halted, the appended record is forced to
/// `HALT_ENTRY`/`STOP_CONDITION` with the `CONTEXT_HALTED` marker regardless
/// of the requested point, type, and data. Otherwise the requested fields
/// pass through unchanged. The new chain's head is the new record's hash and
/// its length increments by one.
#[must_use]
pub fn capture_evidence(
    context: &ObservationContext,
    observation_point: ObservationPoint,
    evidence_type: EvidenceType,
    raw_data: &[u8],
    timestamp: &str,
    prior_chain: &EvidenceChain,
) -> EvidenceChain {
    let (point, kind, data) = if context.is_halted {
        (
            ObservationPoint::HaltEntry,
            EvidenceType::StopCondition,
            HALT_MARKER,
        )
    } else {
        (observation_point, evidence_type, raw_data)
    };

    let record_id = new_record_id();
    let prior_hash = prior_chain.head_hash.clone();
    let self_hash =
        EvidenceRecord::compute_hash(&record_id, point, kind, timestamp, data, &prior_hash);

    prior_chain.appended(EvidenceRecord {
        record_id,
        observation_point: point,
        evidence_type: kind,
        timestamp: timestamp.to_string(),
        raw_data: data.to_vec(),
        prior_hash,
        self_hash,
    })
}

// ============================================================================
// SECTION: Stop Signals
// ============================================================================

/// Externally supplied signal flags consulted by [`check_stop`].
///
/// Defaults are fail-closed for state that must be positively established
/// (authorization, registration, envelope match) and pass for state that is
/// assumed sound until contradicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopSignals {
    /// Human authorization exists.
    pub authorization_present: bool,
    /// The executor is registered.
    pub executor_registered: bool,
    /// The instruction envelope hash matches.
    pub envelope_hash_matches: bool,
    /// The evidence chain is valid.
    pub chain_valid: bool,
    /// Resources are within limits.
    pub resources_available: bool,
    /// Timestamps are valid.
    pub timestamp_valid: bool,
    /// The prior execution is finalized.
    pub prior_execution_complete: bool,
    /// The execution intent is unambiguous.
    pub intent_clear: bool,
    /// A human signaled abort.
    pub human_abort_signaled: bool,
}

impl Default for StopSignals {
    fn default() -> Self {
        Self {
            authorization_present: false,
            executor_registered: false,
            envelope_hash_matches: false,
            chain_valid: true,
            resources_available: true,
            timestamp_valid: true,
            prior_execution_complete: true,
            intent_clear: true,
            human_abort_signaled: false,
        }
    }
}

// ============================================================================
// SECTION: Stop Checks
// ============================================================================

/// Checks whether a stop condition forces a HALT.
///
/// Returns `true` (HALT) when the context is absent, the context is already
/// halted, or the signal flag for the condition indicates the failure state.
#[must_use]
pub fn check_stop(
    context: Option<&ObservationContext>,
    condition: StopCondition,
    signals: &StopSignals,
) -> bool {
    let Some(context) = context else {
        return true;
    };

    if context.is_halted {
        return true;
    }

    match condition {
        StopCondition::MissingAuthorization => !signals.authorization_present,
        StopCondition::ExecutorNotRegistered => !signals.executor_registered,
        StopCondition::EnvelopeHashMismatch => !signals.envelope_hash_matches,
        // An attached, unhalted context is initialized by construction.
        StopCondition::ContextUninitialized => false,
        StopCondition::EvidenceChainBroken => !signals.chain_valid,
        StopCondition::ResourceLimitExceeded => !signals.resources_available,
        StopCondition::TimestampInvalid => !signals.timestamp_valid,
        StopCondition::PriorExecutionPending => !signals.prior_execution_complete,
        StopCondition::AmbiguousIntent => !signals.intent_clear,
        StopCondition::HumanAbort => signals.human_abort_signaled,
    }
}

// ============================================================================
// SECTION: Chain Validation
// ============================================================================

/// Validates evidence chain integrity.
///
/// Recomputes every record hash, checks every prior-hash link, and checks
/// the stored length and head hash. An empty chain is valid iff its head
/// hash is empty and its length is zero.
#[must_use]
pub fn validate_chain(chain: &EvidenceChain) -> bool {
    verify_linked_ledger(&chain.records, &chain.head_hash, chain.length)
}

// ============================================================================
// SECTION: Chain Construction
// ============================================================================

/// Creates an empty evidence chain, minting a `CHAIN-` id when none is given.
#[must_use]
pub fn create_empty_chain(chain_id: Option<String>) -> EvidenceChain {
    EvidenceChain::empty(chain_id.unwrap_or_else(new_chain_id))
}
