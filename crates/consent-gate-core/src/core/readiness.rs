// crates/consent-gate-core/src/core/readiness.rs
// ============================================================================
// Module: Consent Gate Readiness Model
// Description: Readiness contexts aggregating external policy results.
// Purpose: Represent the final precondition check before instruction synthesis.
// Dependencies: crate::core::orchestration, serde
// ============================================================================

//! ## Overview
//! Readiness aggregates the external policy verdicts (capability, sandbox,
//! native boundary, evidence verification) with the sealed orchestration
//! intent. Readiness decides whether execution may occur; execution never
//! decides readiness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::orchestration::OrchestrationIntent;

// ============================================================================
// SECTION: Readiness State
// ============================================================================

/// Execution readiness state.
///
/// # Invariants
/// - Closed enum; variants are stable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionReadinessState {
    /// All preconditions hold.
    Ready,
    /// At least one precondition fails.
    NotReady,
}

// ============================================================================
// SECTION: Readiness Decision
// ============================================================================

/// Two-way readiness decision.
///
/// # Invariants
/// - Closed enum; BLOCK is the default on any malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessDecision {
    /// Execution may proceed.
    Allow,
    /// Execution is blocked.
    Block,
}

// ============================================================================
// SECTION: Readiness Context and Result
// ============================================================================

/// Aggregated precondition inputs for the readiness decision.
///
/// # Invariants
/// - The five policy booleans are external verdicts; the core does not
///   re-derive them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessContext {
    /// Sealed orchestration intent (absent means BLOCK).
    pub orchestration_intent: Option<OrchestrationIntent>,
    /// Capability policy accepted the plan.
    pub capability_result_accepted: bool,
    /// Sandbox policy allows execution.
    pub sandbox_policy_allows: bool,
    /// Native boundary policy accepts execution.
    pub native_policy_accepts: bool,
    /// Evidence verification passed.
    pub evidence_verification_passed: bool,
    /// Whether a human is present for HIGH-risk approval.
    pub human_present: bool,
}

/// Result of the readiness decision.
///
/// # Invariants
/// - `reason` is always populated with a short human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResult {
    /// Readiness decision.
    pub decision: ReadinessDecision,
    /// Readiness state.
    pub state: ExecutionReadinessState,
    /// Human-readable reason for the decision.
    pub reason: String,
}
