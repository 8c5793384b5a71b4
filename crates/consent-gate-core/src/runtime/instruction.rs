// crates/consent-gate-core/src/runtime/instruction.rs
// ============================================================================
// Module: Consent Gate Instruction Engine
// Description: Instruction synthesis and envelope creation, sealing, validation.
// Purpose: Derive ordered instruction envelopes from sealed orchestration intents.
// Dependencies: crate::core::{hashing, instruction, orchestration}
// ============================================================================

//! ## Overview
//! Synthesis preserves plan step order exactly: one instruction per step
//! whose action type has an instruction counterpart, no extra actions, no
//! reordering. Steps without a counterpart (UPLOAD) are silently dropped;
//! envelope validation still compares the instruction count against the
//! plan step count, so envelopes for plans containing dropped steps
//! validate false.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::hashing::sha256_hex;
use crate::core::instruction::ExecutionInstruction;
use crate::core::instruction::InstructionEnvelope;
use crate::core::instruction::InstructionStatus;
use crate::core::instruction::InstructionType;
use crate::core::orchestration::OrchestrationIntent;
use crate::core::orchestration::OrchestrationIntentState;

// ============================================================================
// SECTION: Instruction Synthesis
// ============================================================================

/// Synthesizes execution instructions from a sealed orchestration intent.
///
/// An absent or unsealed intent yields an empty sequence. Instruction
/// identifiers follow the `INSTR-{intent_id}-{index:03}` format, indexed by
/// plan step position; parameters carry through unchanged and every
/// instruction inherits the intent's evidence requirements.
#[must_use]
pub fn synthesize_instructions(intent: Option<&OrchestrationIntent>) -> Vec<ExecutionInstruction> {
    let Some(intent) = intent else {
        return Vec::new();
    };

    if intent.state != OrchestrationIntentState::Sealed {
        return Vec::new();
    }

    intent
        .execution_plan
        .steps
        .iter()
        .enumerate()
        .filter_map(|(index, step)| {
            InstructionType::from_action(step.action_type).map(|instruction_type| {
                ExecutionInstruction {
                    instruction_id: format!("INSTR-{}-{index:03}", intent.intent_id),
                    plan_step_id: step.step_id.clone(),
                    instruction_type,
                    parameters: step.parameters.clone(),
                    evidence_required: intent.evidence_requirements.clone(),
                }
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Envelope Creation
// ============================================================================

/// Creates an instruction envelope in CREATED status with an empty hash.
#[must_use]
pub fn create_instruction_envelope(
    intent: &OrchestrationIntent,
    instructions: Vec<ExecutionInstruction>,
    readiness_hash: &str,
) -> InstructionEnvelope {
    InstructionEnvelope {
        intent_id: intent.intent_id.clone(),
        readiness_hash: readiness_hash.to_string(),
        instructions,
        status: InstructionStatus::Created,
        envelope_hash: String::new(),
    }
}

// ============================================================================
// SECTION: Envelope Sealing
// ============================================================================

/// Computes the envelope content hash.
///
/// The preimage is the `:`-joined sequence
/// `intent_id:readiness_hash:count[:instruction_id:plan_step_id]*`, kept
/// byte-identical to the wire contract.
fn compute_envelope_hash(envelope: &InstructionEnvelope) -> String {
    let mut content = format!(
        "{}:{}:{}",
        envelope.intent_id,
        envelope.readiness_hash,
        envelope.instructions.len()
    );
    for instruction in &envelope.instructions {
        content.push(':');
        content.push_str(&instruction.instruction_id);
        content.push(':');
        content.push_str(&instruction.plan_step_id);
    }
    sha256_hex(content.as_bytes())
}

/// Seals an instruction envelope.
///
/// CREATED seals under the computed content hash; SEALED and REJECTED pass
/// through unchanged.
#[must_use]
pub fn seal_instruction_envelope(envelope: InstructionEnvelope) -> InstructionEnvelope {
    match envelope.status {
        InstructionStatus::Sealed | InstructionStatus::Rejected => envelope,
        InstructionStatus::Created => {
            let envelope_hash = compute_envelope_hash(&envelope);
            InstructionEnvelope {
                status: InstructionStatus::Sealed,
                envelope_hash,
                ..envelope
            }
        }
    }
}

// ============================================================================
// SECTION: Envelope Validation
// ============================================================================

/// Validates an instruction envelope against its intent.
///
/// True iff the envelope is SEALED, the intent identifier matches, and the
/// instruction count equals the plan step count. Envelopes synthesized from
/// plans with dropped action types therefore validate false.
#[must_use]
pub fn validate_instruction_envelope(
    envelope: &InstructionEnvelope,
    intent: &OrchestrationIntent,
) -> bool {
    if envelope.status != InstructionStatus::Sealed {
        return false;
    }

    if envelope.intent_id != intent.intent_id {
        return false;
    }

    envelope.instructions.len() == intent.execution_plan.steps.len()
}
