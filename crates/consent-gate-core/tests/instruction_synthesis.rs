// crates/consent-gate-core/tests/instruction_synthesis.rs
// ============================================================================
// Module: Instruction Synthesis Tests
// Description: Tests for instruction synthesis and envelope lifecycle.
// ============================================================================
//! ## Overview
//! Validates order-preserving synthesis, the UPLOAD drop, envelope sealing,
//! and the count-match validation that rejects envelopes whose plans carried
//! dropped steps.

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
use consent_gate_core::ExecutionPlan;
use consent_gate_core::InstructionStatus;
use consent_gate_core::InstructionType;
use consent_gate_core::OrchestrationIntent;
use consent_gate_core::OrchestrationIntentState;
use consent_gate_core::PlanRiskLevel;
use consent_gate_core::PlannedActionType;
use consent_gate_core::runtime::instruction::create_instruction_envelope;
use consent_gate_core::runtime::instruction::seal_instruction_envelope;
use consent_gate_core::runtime::instruction::synthesize_instructions;
use consent_gate_core::runtime::instruction::validate_instruction_envelope;
use serde_json::json;

/// Builds a sealed intent around the given steps.
fn sealed_intent(steps: Vec<ActionPlanStep>) -> OrchestrationIntent {
    OrchestrationIntent {
        intent_id: "ORCH-1".to_string(),
        execution_plan: ExecutionPlan {
            plan_id: "PLAN-1".to_string(),
            steps,
        },
        capability_snapshot: [PlannedActionType::Click, PlannedActionType::Upload]
            .into_iter()
            .collect(),
        evidence_requirements: ["screenshot".to_string()].into_iter().collect(),
        created_at: "T0".to_string(),
        state: OrchestrationIntentState::Sealed,
    }
}

/// Builds a step with the given id and action.
fn step(step_id: &str, action: PlannedActionType) -> ActionPlanStep {
    let mut parameters = BTreeMap::new();
    parameters.insert("target".to_string(), json!("#field"));
    ActionPlanStep {
        step_id: step_id.to_string(),
        action_type: action,
        parameters,
        risk_level: PlanRiskLevel::Low,
    }
}

// ============================================================================
// SECTION: Synthesis
// ============================================================================

/// Tests synthesis emits one instruction per step, in step order.
#[test]
fn test_synthesis_preserves_order() {
    let intent = sealed_intent(vec![
        step("S1", PlannedActionType::Navigate),
        step("S2", PlannedActionType::Click),
        step("S3", PlannedActionType::Screenshot),
    ]);

    let instructions = synthesize_instructions(Some(&intent));
    assert_eq!(instructions.len(), 3);
    assert_eq!(instructions[0].instruction_id, "INSTR-ORCH-1-000");
    assert_eq!(instructions[1].instruction_id, "INSTR-ORCH-1-001");
    assert_eq!(instructions[2].instruction_id, "INSTR-ORCH-1-002");
    assert_eq!(instructions[0].plan_step_id, "S1");
    assert_eq!(instructions[1].plan_step_id, "S2");
    assert_eq!(instructions[2].plan_step_id, "S3");
    assert_eq!(instructions[0].instruction_type, InstructionType::Navigate);
    assert_eq!(instructions[1].instruction_type, InstructionType::Click);
    assert_eq!(instructions[2].instruction_type, InstructionType::Screenshot);
}

/// Tests parameters and evidence requirements carry through.
#[test]
fn test_synthesis_carries_parameters_and_evidence() {
    let intent = sealed_intent(vec![step("S1", PlannedActionType::Type)]);
    let instructions = synthesize_instructions(Some(&intent));
    assert_eq!(instructions[0].parameters.get("target"), Some(&json!("#field")));
    assert!(instructions[0].evidence_required.contains("screenshot"));
}

/// Tests absent and unsealed intents yield no instructions.
#[test]
fn test_synthesis_requires_sealed_intent() {
    assert!(synthesize_instructions(None).is_empty());

    let draft = OrchestrationIntent {
        state: OrchestrationIntentState::Draft,
        ..sealed_intent(vec![step("S1", PlannedActionType::Click)])
    };
    assert!(synthesize_instructions(Some(&draft)).is_empty());

    let rejected = OrchestrationIntent {
        state: OrchestrationIntentState::Rejected,
        ..sealed_intent(vec![step("S1", PlannedActionType::Click)])
    };
    assert!(synthesize_instructions(Some(&rejected)).is_empty());
}

/// Tests UPLOAD steps are silently dropped; the index keeps step positions.
#[test]
fn test_upload_steps_dropped() {
    let intent = sealed_intent(vec![
        step("S1", PlannedActionType::Click),
        step("S2", PlannedActionType::Upload),
        step("S3", PlannedActionType::Wait),
    ]);

    let instructions = synthesize_instructions(Some(&intent));
    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].plan_step_id, "S1");
    assert_eq!(instructions[1].plan_step_id, "S3");
    assert_eq!(instructions[0].instruction_id, "INSTR-ORCH-1-000");
    assert_eq!(instructions[1].instruction_id, "INSTR-ORCH-1-002");
}

// ============================================================================
// SECTION: Envelope Lifecycle
// ============================================================================

/// Tests envelope creation starts unsealed with an empty hash.
#[test]
fn test_envelope_creation() {
    let intent = sealed_intent(vec![step("S1", PlannedActionType::Click)]);
    let instructions = synthesize_instructions(Some(&intent));
    let envelope = create_instruction_envelope(&intent, instructions, "r0");

    assert_eq!(envelope.intent_id, "ORCH-1");
    assert_eq!(envelope.readiness_hash, "r0");
    assert_eq!(envelope.status, InstructionStatus::Created);
    assert_eq!(envelope.envelope_hash, "");
}

/// Tests sealing computes a 64-char hash and is idempotent.
#[test]
fn test_envelope_sealing() {
    let intent = sealed_intent(vec![step("S1", PlannedActionType::Click)]);
    let instructions = synthesize_instructions(Some(&intent));
    let envelope = create_instruction_envelope(&intent, instructions, "r0");

    let sealed = seal_instruction_envelope(envelope);
    assert_eq!(sealed.status, InstructionStatus::Sealed);
    assert_eq!(sealed.envelope_hash.len(), 64);
    assert!(sealed.envelope_hash.chars().all(|c| c.is_ascii_hexdigit()));

    let resealed = seal_instruction_envelope(sealed.clone());
    assert_eq!(resealed, sealed);
}

/// Tests a rejected envelope passes through sealing unchanged.
#[test]
fn test_rejected_envelope_passthrough() {
    let intent = sealed_intent(vec![step("S1", PlannedActionType::Click)]);
    let mut envelope = create_instruction_envelope(&intent, Vec::new(), "r0");
    envelope.status = InstructionStatus::Rejected;

    let result = seal_instruction_envelope(envelope.clone());
    assert_eq!(result, envelope);
}

/// Tests envelope validation: sealed, matching intent, matching count.
#[test]
fn test_envelope_validation() {
    let intent = sealed_intent(vec![step("S1", PlannedActionType::Click)]);
    let instructions = synthesize_instructions(Some(&intent));
    let envelope = create_instruction_envelope(&intent, instructions, "r0");

    // Unsealed envelopes never validate.
    assert!(!validate_instruction_envelope(&envelope, &intent));

    let sealed = seal_instruction_envelope(envelope);
    assert!(validate_instruction_envelope(&sealed, &intent));

    let mut other_intent = intent.clone();
    other_intent.intent_id = "ORCH-2".to_string();
    assert!(!validate_instruction_envelope(&sealed, &other_intent));
}

/// Tests an UPLOAD-bearing plan yields a sealed envelope that fails
/// validation because the instruction count trails the step count.
#[test]
fn test_upload_plan_envelope_fails_validation() {
    let intent = sealed_intent(vec![step("S1", PlannedActionType::Upload)]);
    let instructions = synthesize_instructions(Some(&intent));
    assert!(instructions.is_empty());

    let sealed = seal_instruction_envelope(create_instruction_envelope(&intent, instructions, "r0"));
    assert_eq!(sealed.status, InstructionStatus::Sealed);
    assert!(!validate_instruction_envelope(&sealed, &intent));
}
