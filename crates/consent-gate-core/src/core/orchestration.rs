// crates/consent-gate-core/src/core/orchestration.rs
// ============================================================================
// Module: Consent Gate Orchestration Model
// Description: Orchestration intents and orchestration decision results.
// Purpose: Lift accepted plans into sealable, immutable orchestration intents.
// Dependencies: crate::core::planning, serde
// ============================================================================

//! ## Overview
//! Orchestration binds an accepted plan to an intent carrying the capability
//! snapshot and evidence requirements under which it was approved. Sealing is
//! one-way: DRAFT becomes SEALED or REJECTED, and both are terminal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::planning::ExecutionPlan;
use crate::core::planning::PlanValidationResult;
use crate::core::planning::PlannedActionType;

// ============================================================================
// SECTION: Intent State
// ============================================================================

/// Orchestration intent lifecycle state.
///
/// # Invariants
/// - Closed enum; `Sealed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrchestrationIntentState {
    /// Bound but not yet sealed.
    Draft,
    /// Sealed; contents are final.
    Sealed,
    /// Rejected; never sealable.
    Rejected,
}

impl OrchestrationIntentState {
    /// Returns the stable spelling for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Sealed => "SEALED",
            Self::Rejected => "REJECTED",
        }
    }
}

// ============================================================================
// SECTION: Orchestration Decision
// ============================================================================

/// Two-way orchestration decision.
///
/// # Invariants
/// - Closed enum; REJECT is the default on any malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrchestrationDecision {
    /// Orchestration accepted.
    Accept,
    /// Orchestration rejected.
    Reject,
}

// ============================================================================
// SECTION: Orchestration Intent
// ============================================================================

/// Plan lifted into an orchestration intent.
///
/// # Invariants
/// - Immutable; state transitions produce new values.
/// - `evidence_requirements` must be non-empty for acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationIntent {
    /// Intent identifier (caller-supplied).
    pub intent_id: String,
    /// The bound execution plan.
    pub execution_plan: ExecutionPlan,
    /// Action types permitted when the plan was accepted.
    pub capability_snapshot: BTreeSet<PlannedActionType>,
    /// Evidence kinds the executor must produce.
    pub evidence_requirements: BTreeSet<String>,
    /// Binding timestamp (caller-supplied, logical or ISO-8601).
    pub created_at: String,
    /// Lifecycle state.
    pub state: OrchestrationIntentState,
}

// ============================================================================
// SECTION: Orchestration Context and Result
// ============================================================================

/// Inputs to the orchestration decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationContext {
    /// Validation result for the bound plan.
    pub plan_validation_result: PlanValidationResult,
    /// Whether a human is present for HIGH-risk approval.
    pub human_present: bool,
}

/// Result of the orchestration decision.
///
/// # Invariants
/// - `reason` is always populated with a short human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Orchestration decision.
    pub decision: OrchestrationDecision,
    /// Human-readable reason for the decision.
    pub reason: String,
}
