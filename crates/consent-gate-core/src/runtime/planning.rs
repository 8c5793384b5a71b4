// crates/consent-gate-core/src/runtime/planning.rs
// ============================================================================
// Module: Consent Gate Planning Engine
// Description: Plan structure, capability, and risk validation with acceptance table.
// Purpose: Classify proposed plans against capabilities and the frozen risk policy.
// Dependencies: crate::core::planning
// ============================================================================

//! ## Overview
//! Plans are classified, never executed. The acceptance table is frozen at
//! build time: invalid structure and forbidden actions reject, CRITICAL risk
//! rejects even with a human present, HIGH risk requires one, and MEDIUM or
//! lower accepts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::core::planning::ExecutionPlan;
use crate::core::planning::PlanRiskLevel;
use crate::core::planning::PlanValidationContext;
use crate::core::planning::PlanValidationDecision;
use crate::core::planning::PlanValidationResult;
use crate::core::planning::PlannedActionType;

// ============================================================================
// SECTION: Structure Validation
// ============================================================================

/// Validates plan structure.
///
/// Rejects an empty `plan_id`, an empty step sequence, and duplicate step
/// identifiers.
#[must_use]
pub fn validate_plan_structure(plan: &ExecutionPlan) -> bool {
    if plan.plan_id.is_empty() {
        return false;
    }

    if plan.steps.is_empty() {
        return false;
    }

    let mut seen = HashSet::new();
    for step in &plan.steps {
        if !seen.insert(step.step_id.as_str()) {
            return false;
        }
    }

    true
}

// ============================================================================
// SECTION: Capability Validation
// ============================================================================

/// Validates plan actions against the allowed capability set.
///
/// Any step whose action type is not allowed fails the plan. An empty plan
/// trivially passes (structure validation rejects it separately).
#[must_use]
pub fn validate_plan_capabilities(
    plan: &ExecutionPlan,
    allowed_capabilities: &BTreeSet<PlannedActionType>,
) -> bool {
    plan.steps
        .iter()
        .all(|step| allowed_capabilities.contains(&step.action_type))
}

// ============================================================================
// SECTION: Risk Validation
// ============================================================================

/// Determines the maximum risk level across plan steps.
///
/// An empty plan carries LOW risk (and is rejected by structure validation).
#[must_use]
pub fn validate_plan_risk(plan: &ExecutionPlan) -> PlanRiskLevel {
    plan.steps
        .iter()
        .map(|step| step.risk_level)
        .max()
        .unwrap_or(PlanRiskLevel::Low)
}

// ============================================================================
// SECTION: Acceptance Decision
// ============================================================================

/// Makes the final acceptance decision for a plan.
///
/// First match wins: invalid structure rejects with the specific cause; a
/// forbidden action rejects naming the action; CRITICAL risk rejects always;
/// HIGH risk without a human requires one; HIGH risk with a human and
/// MEDIUM-or-lower risk accept.
#[must_use]
pub fn decide_plan_acceptance(context: &PlanValidationContext) -> PlanValidationResult {
    let plan = &context.plan;

    if !validate_plan_structure(plan) {
        let reason = if plan.plan_id.is_empty() {
            "Empty plan_id".to_string()
        } else if plan.steps.is_empty() {
            "Empty steps".to_string()
        } else {
            "Duplicate step IDs".to_string()
        };

        return PlanValidationResult {
            decision: PlanValidationDecision::Reject,
            max_risk: PlanRiskLevel::Low,
            reason,
        };
    }

    if !validate_plan_capabilities(plan, &context.allowed_capabilities) {
        let forbidden = plan
            .steps
            .iter()
            .map(|step| step.action_type)
            .find(|action| !context.allowed_capabilities.contains(action));

        return PlanValidationResult {
            decision: PlanValidationDecision::Reject,
            max_risk: validate_plan_risk(plan),
            reason: format!(
                "Action {} not allowed",
                forbidden.map_or("UNKNOWN", PlannedActionType::as_str)
            ),
        };
    }

    let max_risk = validate_plan_risk(plan);

    match max_risk {
        PlanRiskLevel::Critical => PlanValidationResult {
            decision: PlanValidationDecision::Reject,
            max_risk,
            reason: "CRITICAL risk - plan cannot be proven safe".to_string(),
        },
        PlanRiskLevel::High => {
            if context.human_present {
                PlanValidationResult {
                    decision: PlanValidationDecision::Accept,
                    max_risk,
                    reason: "HIGH risk - human approved".to_string(),
                }
            } else {
                PlanValidationResult {
                    decision: PlanValidationDecision::RequiresHuman,
                    max_risk,
                    reason: "HIGH risk requires human approval".to_string(),
                }
            }
        }
        PlanRiskLevel::Low | PlanRiskLevel::Medium => PlanValidationResult {
            decision: PlanValidationDecision::Accept,
            max_risk,
            reason: format!("{} risk - plan accepted", max_risk.as_str()),
        },
    }
}
