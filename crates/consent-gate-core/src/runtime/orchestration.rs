// crates/consent-gate-core/src/runtime/orchestration.rs
// ============================================================================
// Module: Consent Gate Orchestration Engine
// Description: Plan-to-intent binding, sealing, and the orchestration decision.
// Purpose: Lift accepted plans into sealed orchestration intents.
// Dependencies: crate::core::{orchestration, planning}
// ============================================================================

//! ## Overview
//! Orchestration binds only ACCEPTED plans; everything else yields no
//! intent. Sealing is one-way (DRAFT to SEALED) and the orchestration
//! decision rejects anything unsealed, evidence-free, or HIGH risk without a
//! human present.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::orchestration::OrchestrationContext;
use crate::core::orchestration::OrchestrationDecision;
use crate::core::orchestration::OrchestrationIntent;
use crate::core::orchestration::OrchestrationIntentState;
use crate::core::orchestration::OrchestrationResult;
use crate::core::planning::ExecutionPlan;
use crate::core::planning::PlanRiskLevel;
use crate::core::planning::PlanValidationDecision;
use crate::core::planning::PlanValidationResult;
use crate::core::planning::PlannedActionType;

// ============================================================================
// SECTION: Plan Binding
// ============================================================================

/// Binds a validated plan to an orchestration intent in DRAFT state.
///
/// Only ACCEPTED plans bind; REJECTED and REQUIRES_HUMAN results yield
/// `None`.
#[must_use]
pub fn bind_plan_to_intent(
    plan: ExecutionPlan,
    validation_result: &PlanValidationResult,
    capability_snapshot: BTreeSet<PlannedActionType>,
    evidence_requirements: BTreeSet<String>,
    intent_id: &str,
    created_at: &str,
) -> Option<OrchestrationIntent> {
    match validation_result.decision {
        PlanValidationDecision::Accept => Some(OrchestrationIntent {
            intent_id: intent_id.to_string(),
            execution_plan: plan,
            capability_snapshot,
            evidence_requirements,
            created_at: created_at.to_string(),
            state: OrchestrationIntentState::Draft,
        }),
        PlanValidationDecision::Reject | PlanValidationDecision::RequiresHuman => None,
    }
}

// ============================================================================
// SECTION: Sealing
// ============================================================================

/// Seals an orchestration intent.
///
/// DRAFT seals; SEALED passes through unchanged; REJECTED and an absent
/// intent yield `None`.
#[must_use]
pub fn seal_orchestration_intent(intent: Option<OrchestrationIntent>) -> Option<OrchestrationIntent> {
    let intent = intent?;

    match intent.state {
        OrchestrationIntentState::Rejected => None,
        OrchestrationIntentState::Sealed => Some(intent),
        OrchestrationIntentState::Draft => Some(OrchestrationIntent {
            state: OrchestrationIntentState::Sealed,
            ..intent
        }),
    }
}

// ============================================================================
// SECTION: Orchestration Decision
// ============================================================================

/// Makes the orchestration decision for a sealed intent.
///
/// First match wins: an absent intent, an unsealed intent, empty evidence
/// requirements, and HIGH risk without a human present all reject.
#[must_use]
pub fn decide_orchestration(
    intent: Option<&OrchestrationIntent>,
    context: &OrchestrationContext,
) -> OrchestrationResult {
    let Some(intent) = intent else {
        return OrchestrationResult {
            decision: OrchestrationDecision::Reject,
            reason: "Intent is None".to_string(),
        };
    };

    if intent.state != OrchestrationIntentState::Sealed {
        return OrchestrationResult {
            decision: OrchestrationDecision::Reject,
            reason: format!("Intent not sealed (state: {})", intent.state.as_str()),
        };
    }

    if intent.evidence_requirements.is_empty() {
        return OrchestrationResult {
            decision: OrchestrationDecision::Reject,
            reason: "Evidence requirements are empty".to_string(),
        };
    }

    if context.plan_validation_result.max_risk == PlanRiskLevel::High && !context.human_present {
        return OrchestrationResult {
            decision: OrchestrationDecision::Reject,
            reason: "HIGH risk requires human presence".to_string(),
        };
    }

    OrchestrationResult {
        decision: OrchestrationDecision::Accept,
        reason: "Orchestration accepted".to_string(),
    }
}
