// crates/consent-gate-core/tests/plan_policy.rs
// ============================================================================
// Module: Plan Policy Tests
// Description: Tests for plan structure, capability, and risk classification.
// ============================================================================
//! ## Overview
//! Validates the frozen plan acceptance table: structural rejection,
//! capability rejection, CRITICAL always rejected, HIGH gated on human
//! presence, MEDIUM and below accepted.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use consent_gate_core::ActionPlanStep;
use consent_gate_core::ExecutionPlan;
use consent_gate_core::PlanRiskLevel;
use consent_gate_core::PlanValidationContext;
use consent_gate_core::PlanValidationDecision;
use consent_gate_core::PlannedActionType;
use consent_gate_core::runtime::planning::decide_plan_acceptance;
use consent_gate_core::runtime::planning::validate_plan_capabilities;
use consent_gate_core::runtime::planning::validate_plan_risk;
use consent_gate_core::runtime::planning::validate_plan_structure;
use serde_json::json;

/// Builds a step with the given id, action, and risk.
fn step(step_id: &str, action: PlannedActionType, risk: PlanRiskLevel) -> ActionPlanStep {
    let mut parameters = BTreeMap::new();
    parameters.insert("target".to_string(), json!("#submit"));
    ActionPlanStep {
        step_id: step_id.to_string(),
        action_type: action,
        parameters,
        risk_level: risk,
    }
}

/// Builds a single-step plan.
fn plan(steps: Vec<ActionPlanStep>) -> ExecutionPlan {
    ExecutionPlan {
        plan_id: "PLAN-1".to_string(),
        steps,
    }
}

// ============================================================================
// SECTION: Structure
// ============================================================================

/// Tests structural validation rejects empty ids, empty steps, duplicates.
#[test]
fn test_structure_validation() {
    let valid = plan(vec![step("S1", PlannedActionType::Click, PlanRiskLevel::Low)]);
    assert!(validate_plan_structure(&valid));

    let mut empty_id = valid.clone();
    empty_id.plan_id = String::new();
    assert!(!validate_plan_structure(&empty_id));

    let empty_steps = plan(Vec::new());
    assert!(!validate_plan_structure(&empty_steps));

    let duplicated = plan(vec![
        step("S1", PlannedActionType::Click, PlanRiskLevel::Low),
        step("S1", PlannedActionType::Wait, PlanRiskLevel::Low),
    ]);
    assert!(!validate_plan_structure(&duplicated));
}

// ============================================================================
// SECTION: Capabilities
// ============================================================================

/// Tests capability validation against the allowed set.
#[test]
fn test_capability_validation() {
    let single = plan(vec![step("S1", PlannedActionType::Click, PlanRiskLevel::Low)]);
    let click_only: BTreeSet<_> = [PlannedActionType::Click].into_iter().collect();
    assert!(validate_plan_capabilities(&single, &click_only));

    let mixed = plan(vec![
        step("S1", PlannedActionType::Click, PlanRiskLevel::Low),
        step("S2", PlannedActionType::Upload, PlanRiskLevel::Low),
    ]);
    assert!(!validate_plan_capabilities(&mixed, &click_only));

    // Empty plan trivially passes the capability check.
    let empty = plan(Vec::new());
    assert!(validate_plan_capabilities(&empty, &BTreeSet::new()));

    // A non-empty plan against an empty capability set fails.
    assert!(!validate_plan_capabilities(&single, &BTreeSet::new()));
}

// ============================================================================
// SECTION: Risk
// ============================================================================

/// Tests the maximum-risk computation and the LOW default for empty plans.
#[test]
fn test_risk_maximum() {
    let empty = plan(Vec::new());
    assert_eq!(validate_plan_risk(&empty), PlanRiskLevel::Low);

    let escalating = plan(vec![
        step("S1", PlannedActionType::Click, PlanRiskLevel::Low),
        step("S2", PlannedActionType::Type, PlanRiskLevel::High),
        step("S3", PlannedActionType::Wait, PlanRiskLevel::Medium),
    ]);
    assert_eq!(validate_plan_risk(&escalating), PlanRiskLevel::High);

    assert!(PlanRiskLevel::Low < PlanRiskLevel::Medium);
    assert!(PlanRiskLevel::Medium < PlanRiskLevel::High);
    assert!(PlanRiskLevel::High < PlanRiskLevel::Critical);
    assert_eq!(PlanRiskLevel::Low.severity(), 1);
    assert_eq!(PlanRiskLevel::Critical.severity(), 4);
}

// ============================================================================
// SECTION: Acceptance Table
// ============================================================================

/// Builds a validation context around a plan.
fn context(
    plan: ExecutionPlan,
    allowed: &[PlannedActionType],
    human_present: bool,
) -> PlanValidationContext {
    PlanValidationContext {
        plan,
        allowed_capabilities: allowed.iter().copied().collect(),
        human_present,
    }
}

/// Tests structural failures reject with the specific cause.
#[test]
fn test_acceptance_structure_reasons() {
    let mut nameless = plan(vec![step("S1", PlannedActionType::Click, PlanRiskLevel::Low)]);
    nameless.plan_id = String::new();
    let result = decide_plan_acceptance(&context(nameless, &[PlannedActionType::Click], false));
    assert_eq!(result.decision, PlanValidationDecision::Reject);
    assert_eq!(result.reason, "Empty plan_id");

    let result =
        decide_plan_acceptance(&context(plan(Vec::new()), &[PlannedActionType::Click], false));
    assert_eq!(result.decision, PlanValidationDecision::Reject);
    assert_eq!(result.reason, "Empty steps");

    let duplicated = plan(vec![
        step("S1", PlannedActionType::Click, PlanRiskLevel::Low),
        step("S1", PlannedActionType::Wait, PlanRiskLevel::Low),
    ]);
    let result = decide_plan_acceptance(&context(duplicated, &[PlannedActionType::Click, PlannedActionType::Wait], false));
    assert_eq!(result.decision, PlanValidationDecision::Reject);
    assert_eq!(result.reason, "Duplicate step IDs");
}

/// Tests a forbidden action rejects naming the action.
#[test]
fn test_acceptance_names_forbidden_action() {
    let uploading = plan(vec![
        step("S1", PlannedActionType::Click, PlanRiskLevel::Low),
        step("S2", PlannedActionType::Upload, PlanRiskLevel::Medium),
    ]);
    let result = decide_plan_acceptance(&context(uploading, &[PlannedActionType::Click], true));
    assert_eq!(result.decision, PlanValidationDecision::Reject);
    assert_eq!(result.reason, "Action UPLOAD not allowed");
}

/// Tests CRITICAL risk rejects even with a human present.
#[test]
fn test_critical_always_rejected() {
    let critical = plan(vec![step("S1", PlannedActionType::Upload, PlanRiskLevel::Critical)]);
    let result = decide_plan_acceptance(&context(critical, &[PlannedActionType::Upload], true));
    assert_eq!(result.decision, PlanValidationDecision::Reject);
    assert_eq!(result.max_risk, PlanRiskLevel::Critical);
    assert!(result.reason.contains("CRITICAL"));
}

/// Tests HIGH risk requires a human, and accepts with one.
#[test]
fn test_high_risk_human_gate() {
    let high = plan(vec![step("S1", PlannedActionType::Type, PlanRiskLevel::High)]);

    let result =
        decide_plan_acceptance(&context(high.clone(), &[PlannedActionType::Type], false));
    assert_eq!(result.decision, PlanValidationDecision::RequiresHuman);
    assert_eq!(result.reason, "HIGH risk requires human approval");

    let result = decide_plan_acceptance(&context(high, &[PlannedActionType::Type], true));
    assert_eq!(result.decision, PlanValidationDecision::Accept);
    assert_eq!(result.reason, "HIGH risk - human approved");
}

/// Tests MEDIUM and LOW risk plans accept without a human.
#[test]
fn test_medium_and_low_accept() {
    let low = plan(vec![step("S1", PlannedActionType::Click, PlanRiskLevel::Low)]);
    let result = decide_plan_acceptance(&context(low, &[PlannedActionType::Click], false));
    assert_eq!(result.decision, PlanValidationDecision::Accept);
    assert_eq!(result.max_risk, PlanRiskLevel::Low);
    assert_eq!(result.reason, "LOW risk - plan accepted");

    let medium = plan(vec![
        step("S1", PlannedActionType::Click, PlanRiskLevel::Low),
        step("S2", PlannedActionType::Navigate, PlanRiskLevel::Medium),
    ]);
    let result = decide_plan_acceptance(&context(
        medium,
        &[PlannedActionType::Click, PlannedActionType::Navigate],
        false,
    ));
    assert_eq!(result.decision, PlanValidationDecision::Accept);
    assert_eq!(result.max_risk, PlanRiskLevel::Medium);
    assert_eq!(result.reason, "MEDIUM risk - plan accepted");
}
