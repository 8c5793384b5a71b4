// crates/consent-gate-core/examples/minimal.rs
// ============================================================================
// Module: Consent Gate Minimal Example
// Description: Minimal end-to-end walk through the seven authorization stages.
// Purpose: Demonstrate evidence capture through sealed instruction envelope.
// Dependencies: consent-gate-core
// ============================================================================

//! ## Overview
//! Walks one LOW-risk session through the full pipeline: capture evidence,
//! accept a human CONTINUE, bind the intent, authorize, validate and
//! orchestrate a one-step plan, gate readiness, and seal the instruction
//! envelope. Each stage's artifact feeds the next; nothing is executed.

use std::collections::BTreeMap;

use consent_gate_core::ActionPlanStep;
use consent_gate_core::EvidenceType;
use consent_gate_core::ExecutionPlan;
use consent_gate_core::HumanDecision;
use consent_gate_core::IntentRecordType;
use consent_gate_core::ObservationPoint;
use consent_gate_core::PlanRiskLevel;
use consent_gate_core::PlanValidationContext;
use consent_gate_core::PlannedActionType;
use consent_gate_core::ReadinessContext;
use consent_gate_core::runtime::authorization;
use consent_gate_core::runtime::decision;
use consent_gate_core::runtime::instruction;
use consent_gate_core::runtime::intent;
use consent_gate_core::runtime::observation;
use consent_gate_core::runtime::orchestration;
use consent_gate_core::runtime::planning;
use consent_gate_core::runtime::readiness;

/// Error type for example preconditions.
#[derive(Debug)]
struct ExampleError(&'static str);

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ExampleError {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Stage 1: attach an observer and capture one state transition.
    let context = observation::attach_observer("LOOP-1", "EXEC-1", "e0", "2026-01-01T00:00:00Z");
    let chain = observation::create_empty_chain(None);
    let chain = observation::capture_evidence(
        &context,
        ObservationPoint::PreDispatch,
        EvidenceType::StateTransition,
        b"init->dispatched",
        "2026-01-01T00:00:01Z",
        &chain,
    );

    // Stage 2: solicit and accept a human decision.
    let request = decision::create_request(
        &context.session_id,
        ObservationPoint::PreDispatch.as_str(),
        EvidenceType::StateTransition.as_str(),
        "2026-01-01T00:00:01Z",
        chain.length,
        "DISPATCHED",
        0.85,
        &chain.head_hash,
        300,
        "2026-01-01T00:00:02Z",
    );
    let record = decision::accept_decision(
        &request,
        HumanDecision::Continue,
        "H1",
        None,
        None,
        "2026-01-01T00:00:03Z",
    )?;
    let decision_audit = decision::create_empty_audit(&context.session_id, None);
    let decision_audit = decision::record_decision(&decision_audit, record.clone());

    // Stage 3: bind the decision to an execution intent.
    let (_, execution_intent) = intent::bind_decision(
        Some(&record),
        &chain.head_hash,
        &context.session_id,
        "DISPATCHED",
        "2026-01-01T00:00:04Z",
    );
    let execution_intent = execution_intent.ok_or(ExampleError("binding failed"))?;
    let intent_audit = intent::create_empty_audit(&context.session_id, None);
    let intent_audit = intent::record_intent(
        &intent_audit,
        &execution_intent.intent_id,
        IntentRecordType::Binding,
        "2026-01-01T00:00:04Z",
    );

    // Stage 4: issue the authorization.
    let (_, execution_authorization) = authorization::authorize_execution(
        Some(&execution_intent),
        Some(&intent_audit),
        "2026-01-01T00:00:05Z",
    );
    let execution_authorization =
        execution_authorization.ok_or(ExampleError("authorization denied"))?;

    // Stage 5: validate a one-step LOW-risk plan.
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

    // Stage 6: orchestrate and gate readiness.
    let orchestration_intent = orchestration::bind_plan_to_intent(
        plan,
        &validation,
        [PlannedActionType::Click].into_iter().collect(),
        ["screenshot".to_string()].into_iter().collect(),
        &execution_intent.intent_id,
        "2026-01-01T00:00:06Z",
    )
    .ok_or(ExampleError("plan not accepted"))?;
    let orchestration_intent = orchestration::seal_orchestration_intent(Some(orchestration_intent))
        .ok_or(ExampleError("seal failed"))?;

    let readiness_result = readiness::decide_readiness(&ReadinessContext {
        orchestration_intent: Some(orchestration_intent.clone()),
        capability_result_accepted: true,
        sandbox_policy_allows: true,
        native_policy_accepts: true,
        evidence_verification_passed: true,
        human_present: false,
    });

    // Stage 7: synthesize and seal the instruction envelope.
    let instructions = instruction::synthesize_instructions(Some(&orchestration_intent));
    let envelope =
        instruction::create_instruction_envelope(&orchestration_intent, instructions, "r0");
    let envelope = instruction::seal_instruction_envelope(envelope);

    if !instruction::validate_instruction_envelope(&envelope, &orchestration_intent) {
        return Err(Box::new(ExampleError("envelope failed validation")));
    }

    let _ = (decision_audit, execution_authorization, readiness_result);
    Ok(())
}
