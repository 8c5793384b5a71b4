// crates/consent-gate-core/src/runtime/readiness.rs
// ============================================================================
// Module: Consent Gate Readiness Engine
// Description: Aggregated precondition gating before instruction synthesis.
// Purpose: Decide whether execution may occur; never decide execution itself.
// Dependencies: crate::core::{orchestration, planning, readiness}
// ============================================================================

//! ## Overview
//! Readiness is the final gate: every external policy verdict must hold, the
//! orchestration intent must be sealed, and HIGH-risk plans need a human
//! present. Any missing dependency blocks with a specific reason.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::orchestration::OrchestrationIntent;
use crate::core::orchestration::OrchestrationIntentState;
use crate::core::planning::PlanRiskLevel;
use crate::core::readiness::ExecutionReadinessState;
use crate::core::readiness::ReadinessContext;
use crate::core::readiness::ReadinessDecision;
use crate::core::readiness::ReadinessResult;
use crate::runtime::planning::validate_plan_risk;

// ============================================================================
// SECTION: Input Validation
// ============================================================================

/// Validates that every readiness dependency is present and accepted.
#[must_use]
pub const fn validate_readiness_inputs(context: &ReadinessContext) -> bool {
    context.orchestration_intent.is_some()
        && context.capability_result_accepted
        && context.sandbox_policy_allows
        && context.native_policy_accepts
        && context.evidence_verification_passed
}

// ============================================================================
// SECTION: Readiness Evaluation
// ============================================================================

/// Builds a BLOCK result with the given reason.
fn blocked(reason: &str) -> ReadinessResult {
    ReadinessResult {
        decision: ReadinessDecision::Block,
        state: ExecutionReadinessState::NotReady,
        reason: reason.to_string(),
    }
}

/// Returns the maximum risk level of the intent's plan (LOW when empty).
fn max_plan_risk(intent: &OrchestrationIntent) -> PlanRiskLevel {
    validate_plan_risk(&intent.execution_plan)
}

/// Evaluates execution readiness.
///
/// First match wins: an absent intent, any failed dependency, an unsealed
/// intent, and HIGH risk without a human present all block with a specific
/// reason; otherwise execution is ready.
#[must_use]
pub fn evaluate_execution_readiness(context: &ReadinessContext) -> ReadinessResult {
    let Some(intent) = context.orchestration_intent.as_ref() else {
        return blocked("Intent is None");
    };

    if !context.capability_result_accepted {
        return blocked("Capability not accepted");
    }

    if !context.sandbox_policy_allows {
        return blocked("Sandbox policy does not allow");
    }

    if !context.native_policy_accepts {
        return blocked("Native policy does not accept");
    }

    if !context.evidence_verification_passed {
        return blocked("Evidence verification not passed");
    }

    if intent.state != OrchestrationIntentState::Sealed {
        return blocked(&format!("Intent not sealed (state: {})", intent.state.as_str()));
    }

    if max_plan_risk(intent) == PlanRiskLevel::High && !context.human_present {
        return blocked("HIGH risk requires human presence");
    }

    ReadinessResult {
        decision: ReadinessDecision::Allow,
        state: ExecutionReadinessState::Ready,
        reason: "Execution readiness confirmed".to_string(),
    }
}

// ============================================================================
// SECTION: Readiness Decision
// ============================================================================

/// Makes the final readiness decision.
#[must_use]
pub fn decide_readiness(context: &ReadinessContext) -> ReadinessResult {
    evaluate_execution_readiness(context)
}
