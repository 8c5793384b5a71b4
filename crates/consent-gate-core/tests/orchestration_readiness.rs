// crates/consent-gate-core/tests/orchestration_readiness.rs
// ============================================================================
// Module: Orchestration and Readiness Tests
// Description: Tests for plan binding, intent sealing, and readiness gating.
// ============================================================================
//! ## Overview
//! Validates the one-way seal lifecycle, orchestration rejection reasons,
//! and the deny-by-default readiness aggregation over external policy
//! verdicts.

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
use consent_gate_core::ExecutionReadinessState;
use consent_gate_core::OrchestrationContext;
use consent_gate_core::OrchestrationDecision;
use consent_gate_core::OrchestrationIntent;
use consent_gate_core::OrchestrationIntentState;
use consent_gate_core::PlanRiskLevel;
use consent_gate_core::PlanValidationContext;
use consent_gate_core::PlanValidationDecision;
use consent_gate_core::PlanValidationResult;
use consent_gate_core::PlannedActionType;
use consent_gate_core::ReadinessContext;
use consent_gate_core::ReadinessDecision;
use consent_gate_core::runtime::orchestration::bind_plan_to_intent;
use consent_gate_core::runtime::orchestration::decide_orchestration;
use consent_gate_core::runtime::orchestration::seal_orchestration_intent;
use consent_gate_core::runtime::planning::decide_plan_acceptance;
use consent_gate_core::runtime::readiness::decide_readiness;
use consent_gate_core::runtime::readiness::validate_readiness_inputs;

/// Builds a single-step plan at the given risk.
fn plan(risk: PlanRiskLevel) -> ExecutionPlan {
    ExecutionPlan {
        plan_id: "PLAN-1".to_string(),
        steps: vec![ActionPlanStep {
            step_id: "S1".to_string(),
            action_type: PlannedActionType::Click,
            parameters: BTreeMap::new(),
            risk_level: risk,
        }],
    }
}

/// Accepts a plan and binds it to a sealed orchestration intent.
fn sealed_intent(risk: PlanRiskLevel, human_present: bool) -> (OrchestrationIntent, PlanValidationResult) {
    let plan = plan(risk);
    let validation = decide_plan_acceptance(&PlanValidationContext {
        plan: plan.clone(),
        allowed_capabilities: [PlannedActionType::Click].into_iter().collect(),
        human_present,
    });
    assert_eq!(validation.decision, PlanValidationDecision::Accept);

    let intent = bind_plan_to_intent(
        plan,
        &validation,
        [PlannedActionType::Click].into_iter().collect(),
        ["screenshot".to_string()].into_iter().collect(),
        "ORCH-1",
        "T0",
    )
    .expect("accepted plan must bind");
    let intent = seal_orchestration_intent(Some(intent)).expect("draft must seal");
    (intent, validation)
}

/// Builds an all-clear readiness context around an intent.
fn ready_context(intent: OrchestrationIntent, human_present: bool) -> ReadinessContext {
    ReadinessContext {
        orchestration_intent: Some(intent),
        capability_result_accepted: true,
        sandbox_policy_allows: true,
        native_policy_accepts: true,
        evidence_verification_passed: true,
        human_present,
    }
}

// ============================================================================
// SECTION: Plan Binding
// ============================================================================

/// Tests only ACCEPTED validation results bind.
#[test]
fn test_bind_requires_accept() {
    let accepted = PlanValidationResult {
        decision: PlanValidationDecision::Accept,
        max_risk: PlanRiskLevel::Low,
        reason: "LOW risk - plan accepted".to_string(),
    };
    let bound = bind_plan_to_intent(
        plan(PlanRiskLevel::Low),
        &accepted,
        BTreeSet::new(),
        ["screenshot".to_string()].into_iter().collect(),
        "ORCH-1",
        "T0",
    );
    let intent = bound.expect("accept must bind");
    assert_eq!(intent.state, OrchestrationIntentState::Draft);
    assert_eq!(intent.intent_id, "ORCH-1");

    for decision in [PlanValidationDecision::Reject, PlanValidationDecision::RequiresHuman] {
        let result = PlanValidationResult {
            decision,
            max_risk: PlanRiskLevel::Low,
            reason: "n/a".to_string(),
        };
        let bound = bind_plan_to_intent(
            plan(PlanRiskLevel::Low),
            &result,
            BTreeSet::new(),
            BTreeSet::new(),
            "ORCH-1",
            "T0",
        );
        assert!(bound.is_none());
    }
}

// ============================================================================
// SECTION: Sealing
// ============================================================================

/// Tests the one-way seal lifecycle.
#[test]
fn test_seal_lifecycle() {
    let (sealed, _) = sealed_intent(PlanRiskLevel::Low, false);
    assert_eq!(sealed.state, OrchestrationIntentState::Sealed);

    // Sealing an already sealed intent is a no-op.
    let resealed = seal_orchestration_intent(Some(sealed.clone())).expect("sealed stays sealed");
    assert_eq!(resealed, sealed);

    // Rejected intents never seal.
    let rejected = OrchestrationIntent {
        state: OrchestrationIntentState::Rejected,
        ..sealed
    };
    assert!(seal_orchestration_intent(Some(rejected)).is_none());

    assert!(seal_orchestration_intent(None).is_none());
}

// ============================================================================
// SECTION: Orchestration Decision
// ============================================================================

/// Tests orchestration rejection reasons, first match wins.
#[test]
fn test_orchestration_rejections() {
    let (intent, validation) = sealed_intent(PlanRiskLevel::Low, false);
    let context = OrchestrationContext {
        plan_validation_result: validation.clone(),
        human_present: false,
    };

    let result = decide_orchestration(None, &context);
    assert_eq!(result.decision, OrchestrationDecision::Reject);
    assert_eq!(result.reason, "Intent is None");

    let draft = OrchestrationIntent {
        state: OrchestrationIntentState::Draft,
        ..intent.clone()
    };
    let result = decide_orchestration(Some(&draft), &context);
    assert_eq!(result.decision, OrchestrationDecision::Reject);
    assert_eq!(result.reason, "Intent not sealed (state: DRAFT)");

    let mut no_evidence = intent.clone();
    no_evidence.evidence_requirements = BTreeSet::new();
    let result = decide_orchestration(Some(&no_evidence), &context);
    assert_eq!(result.decision, OrchestrationDecision::Reject);
    assert_eq!(result.reason, "Evidence requirements are empty");

    let result = decide_orchestration(Some(&intent), &context);
    assert_eq!(result.decision, OrchestrationDecision::Accept);
    assert_eq!(result.reason, "Orchestration accepted");
}

/// Tests HIGH risk orchestration requires a present human.
#[test]
fn test_orchestration_high_risk_gate() {
    let (intent, validation) = sealed_intent(PlanRiskLevel::High, true);

    let absent = OrchestrationContext {
        plan_validation_result: validation.clone(),
        human_present: false,
    };
    let result = decide_orchestration(Some(&intent), &absent);
    assert_eq!(result.decision, OrchestrationDecision::Reject);
    assert_eq!(result.reason, "HIGH risk requires human presence");

    let present = OrchestrationContext {
        plan_validation_result: validation,
        human_present: true,
    };
    let result = decide_orchestration(Some(&intent), &present);
    assert_eq!(result.decision, OrchestrationDecision::Accept);
}

// ============================================================================
// SECTION: Readiness
// ============================================================================

/// Tests the all-clear path allows with READY state.
#[test]
fn test_readiness_allows_when_clear() {
    let (intent, _) = sealed_intent(PlanRiskLevel::Low, false);
    let context = ready_context(intent, false);
    assert!(validate_readiness_inputs(&context));

    let result = decide_readiness(&context);
    assert_eq!(result.decision, ReadinessDecision::Allow);
    assert_eq!(result.state, ExecutionReadinessState::Ready);
    assert_eq!(result.reason, "Execution readiness confirmed");
}

/// Tests each failed dependency blocks with its specific reason.
#[test]
fn test_readiness_blocks_each_dependency() {
    let (intent, _) = sealed_intent(PlanRiskLevel::Low, false);

    let mut context = ready_context(intent.clone(), false);
    context.orchestration_intent = None;
    let result = decide_readiness(&context);
    assert_eq!(result.decision, ReadinessDecision::Block);
    assert_eq!(result.reason, "Intent is None");

    let mut context = ready_context(intent.clone(), false);
    context.capability_result_accepted = false;
    assert_eq!(decide_readiness(&context).reason, "Capability not accepted");

    let mut context = ready_context(intent.clone(), false);
    context.sandbox_policy_allows = false;
    assert_eq!(decide_readiness(&context).reason, "Sandbox policy does not allow");

    let mut context = ready_context(intent.clone(), false);
    context.native_policy_accepts = false;
    assert_eq!(decide_readiness(&context).reason, "Native policy does not accept");

    let mut context = ready_context(intent, false);
    context.evidence_verification_passed = false;
    assert_eq!(decide_readiness(&context).reason, "Evidence verification not passed");
}

/// Tests an unsealed intent blocks readiness.
#[test]
fn test_readiness_requires_sealed_intent() {
    let (intent, _) = sealed_intent(PlanRiskLevel::Low, false);
    let draft = OrchestrationIntent {
        state: OrchestrationIntentState::Draft,
        ..intent
    };
    let context = ready_context(draft, false);
    let result = decide_readiness(&context);
    assert_eq!(result.decision, ReadinessDecision::Block);
    assert_eq!(result.state, ExecutionReadinessState::NotReady);
    assert_eq!(result.reason, "Intent not sealed (state: DRAFT)");
}

/// Tests HIGH risk readiness requires a present human.
#[test]
fn test_readiness_high_risk_gate() {
    let (intent, _) = sealed_intent(PlanRiskLevel::High, true);

    let blocked = decide_readiness(&ready_context(intent.clone(), false));
    assert_eq!(blocked.decision, ReadinessDecision::Block);
    assert_eq!(blocked.reason, "HIGH risk requires human presence");

    let allowed = decide_readiness(&ready_context(intent, true));
    assert_eq!(allowed.decision, ReadinessDecision::Allow);
}

/// Tests an empty plan reads as LOW risk for readiness purposes.
#[test]
fn test_readiness_empty_plan_is_low_risk() {
    let (mut intent, _) = sealed_intent(PlanRiskLevel::Low, false);
    intent.execution_plan.steps = Vec::new();

    let result = decide_readiness(&ready_context(intent, false));
    assert_eq!(result.decision, ReadinessDecision::Allow);
}
