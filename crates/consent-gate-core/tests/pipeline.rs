// crates/consent-gate-core/tests/pipeline.rs
// ============================================================================
// Module: Pipeline Tests
// Description: End-to-end tests across all seven authorization stages.
// ============================================================================
//! ## Overview
//! Walks the full pipeline: capture evidence, solicit and accept a decision,
//! bind the intent, issue the authorization, validate and orchestrate the
//! plan, gate readiness, and synthesize a sealed instruction envelope.

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

use consent_gate_core::ActionPlanStep;
use consent_gate_core::AuthorizationDecision;
use consent_gate_core::AuthorizationRecordType;
use consent_gate_core::BindingResult;
use consent_gate_core::DecisionOutcome;
use consent_gate_core::EvidenceType;
use consent_gate_core::ExecutionPlan;
use consent_gate_core::ExecutionReadinessState;
use consent_gate_core::HumanDecision;
use consent_gate_core::IntentRecordType;
use consent_gate_core::ObservationPoint;
use consent_gate_core::PlanRiskLevel;
use consent_gate_core::PlanValidationContext;
use consent_gate_core::PlanValidationDecision;
use consent_gate_core::PlannedActionType;
use consent_gate_core::ReadinessContext;
use consent_gate_core::ReadinessDecision;
use consent_gate_core::runtime::authorization;
use consent_gate_core::runtime::decision;
use consent_gate_core::runtime::instruction;
use consent_gate_core::runtime::intent;
use consent_gate_core::runtime::observation;
use consent_gate_core::runtime::orchestration;
use consent_gate_core::runtime::planning;
use consent_gate_core::runtime::readiness;

// ============================================================================
// SECTION: Happy Path
// ============================================================================

/// Tests the full LOW-risk pipeline with every stage succeeding.
#[test]
fn test_low_risk_pipeline_end_to_end() {
    // Stage 1: observation.
    let context = observation::attach_observer("LOOP-1", "EXEC-1", "e0", "T0");
    assert!(!context.is_halted);

    let chain = observation::create_empty_chain(None);
    let chain = observation::capture_evidence(
        &context,
        ObservationPoint::PreDispatch,
        EvidenceType::StateTransition,
        b"init->dispatched",
        "T1",
        &chain,
    );
    assert_eq!(chain.length, 1);
    assert!(observation::validate_chain(&chain));

    // Stage 2: decision.
    let request = decision::create_request(
        &context.session_id,
        ObservationPoint::PreDispatch.as_str(),
        EvidenceType::StateTransition.as_str(),
        "T1",
        chain.length,
        "DISPATCHED",
        0.85,
        &chain.head_hash,
        300,
        "T2",
    );
    let record = decision::accept_decision(
        &request,
        HumanDecision::Continue,
        "H1",
        None,
        None,
        "T3",
    )
    .expect("continue decision accepted");
    assert_eq!(
        decision::apply_decision(&record, "DISPATCHED", 0, 3),
        DecisionOutcome::Applied
    );

    let decision_audit = decision::create_empty_audit(&context.session_id, None);
    let decision_audit = decision::record_decision(&decision_audit, record.clone());
    assert_eq!(decision_audit.length, 1);
    assert!(decision::validate_audit_chain(&decision_audit));

    // Stage 3: intent binding.
    let (binding, execution_intent) = intent::bind_decision(
        Some(&record),
        &chain.head_hash,
        &context.session_id,
        "DISPATCHED",
        "T4",
    );
    assert_eq!(binding, BindingResult::Success);
    let execution_intent = execution_intent.expect("binding produced an intent");
    assert!(intent::validate_intent(Some(&execution_intent), Some(&record)));

    let intent_audit = intent::create_empty_audit(&context.session_id, None);
    let intent_audit = intent::record_intent(
        &intent_audit,
        &execution_intent.intent_id,
        IntentRecordType::Binding,
        "T4",
    );
    assert_eq!(intent_audit.length, 1);
    assert!(intent::validate_audit_chain(&intent_audit));

    // Stage 4: authorization.
    let (auth_decision, execution_authorization) =
        authorization::authorize_execution(Some(&execution_intent), Some(&intent_audit), "T5");
    assert_eq!(auth_decision, AuthorizationDecision::Allow);
    let execution_authorization = execution_authorization.expect("ALLOW produced an authorization");

    let auth_audit = authorization::create_empty_audit(&context.session_id, None);
    let auth_audit = authorization::record_authorization(
        &auth_audit,
        &execution_authorization.authorization_id,
        AuthorizationRecordType::Authorization,
        "T5",
    );
    assert_eq!(auth_audit.length, 1);
    assert!(authorization::validate_audit_chain(&auth_audit));
    assert!(authorization::is_authorization_valid(
        &execution_authorization,
        &execution_intent,
        &intent_audit,
        &auth_audit,
    ));

    // Stage 5: planning.
    let plan = ExecutionPlan {
        plan_id: "PLAN-1".to_string(),
        steps: vec![ActionPlanStep {
            step_id: "S1".to_string(),
            action_type: PlannedActionType::Click,
            parameters: BTreeMap::new(),
            risk_level: PlanRiskLevel::Low,
        }],
    };
    let validation = planning::decide_plan_acceptance(&PlanValidationContext {
        plan: plan.clone(),
        allowed_capabilities: [PlannedActionType::Click].into_iter().collect(),
        human_present: false,
    });
    assert_eq!(validation.decision, PlanValidationDecision::Accept);

    // Stage 6: orchestration and readiness.
    let orchestration_intent = orchestration::bind_plan_to_intent(
        plan,
        &validation,
        [PlannedActionType::Click].into_iter().collect(),
        ["screenshot".to_string()].into_iter().collect(),
        &execution_intent.intent_id,
        "T6",
    )
    .expect("accepted plan bound");
    let orchestration_intent =
        orchestration::seal_orchestration_intent(Some(orchestration_intent)).expect("sealed");

    let readiness_result = readiness::decide_readiness(&ReadinessContext {
        orchestration_intent: Some(orchestration_intent.clone()),
        capability_result_accepted: true,
        sandbox_policy_allows: true,
        native_policy_accepts: true,
        evidence_verification_passed: true,
        human_present: false,
    });
    assert_eq!(readiness_result.decision, ReadinessDecision::Allow);
    assert_eq!(readiness_result.state, ExecutionReadinessState::Ready);

    // Stage 7: instruction synthesis.
    let instructions = instruction::synthesize_instructions(Some(&orchestration_intent));
    assert_eq!(instructions.len(), 1);

    let envelope =
        instruction::create_instruction_envelope(&orchestration_intent, instructions, "r0");
    let envelope = instruction::seal_instruction_envelope(envelope);
    assert!(instruction::validate_instruction_envelope(&envelope, &orchestration_intent));
    assert_eq!(envelope.envelope_hash.len(), 64);
}

// ============================================================================
// SECTION: Timeout Path
// ============================================================================

/// Tests an unanswered request resolves to the system ABORT, which applies.
#[test]
fn test_timeout_path() {
    let request = decision::create_request(
        "OBS-1",
        "PRE_DISPATCH",
        "STATE_TRANSITION",
        "T1",
        1,
        "DISPATCHED",
        0.85,
        "c0ffee",
        300,
        "T2",
    );

    let record = decision::create_timeout_decision(&request, "T_expiry");
    assert_eq!(record.decision, HumanDecision::Abort);
    assert_eq!(record.reason.as_deref(), Some("TIMEOUT"));
    assert_eq!(record.human_id, "SYSTEM_TIMEOUT");

    assert_eq!(
        decision::apply_decision(&record, "DISPATCHED", 0, 3),
        DecisionOutcome::Applied
    );
}
