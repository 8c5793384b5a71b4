// crates/consent-gate-core/src/core/instruction.rs
// ============================================================================
// Module: Consent Gate Instruction Model
// Description: Execution instructions and sealed instruction envelopes.
// Purpose: Represent the final producible artifact of the authorization core.
// Dependencies: crate::core::planning, serde, serde_json
// ============================================================================

//! ## Overview
//! Instructions describe execution; they never authorize or invoke it. The
//! instruction type universe is a strict subset of the planned action types:
//! UPLOAD has no instruction counterpart and is dropped during synthesis.
//! Envelopes seal an ordered instruction sequence under a content hash.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::planning::PlannedActionType;

// ============================================================================
// SECTION: Instruction Types
// ============================================================================

/// Instruction types an envelope may carry.
///
/// # Invariants
/// - Closed enum; a strict subset of [`PlannedActionType`] (no UPLOAD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstructionType {
    /// Navigate to a location.
    Navigate,
    /// Click a target element.
    Click,
    /// Type text into a focused element.
    Type,
    /// Wait for a duration or condition.
    Wait,
    /// Scroll the viewport or an element.
    Scroll,
    /// Capture a screenshot.
    Screenshot,
}

impl InstructionType {
    /// Returns the stable spelling for this instruction type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigate => "NAVIGATE",
            Self::Click => "CLICK",
            Self::Type => "TYPE",
            Self::Wait => "WAIT",
            Self::Scroll => "SCROLL",
            Self::Screenshot => "SCREENSHOT",
        }
    }

    /// Maps a planned action type to its instruction counterpart.
    ///
    /// UPLOAD deliberately has no counterpart and maps to `None`; synthesis
    /// skips such steps.
    #[must_use]
    pub const fn from_action(action: PlannedActionType) -> Option<Self> {
        match action {
            PlannedActionType::Navigate => Some(Self::Navigate),
            PlannedActionType::Click => Some(Self::Click),
            PlannedActionType::Type => Some(Self::Type),
            PlannedActionType::Wait => Some(Self::Wait),
            PlannedActionType::Scroll => Some(Self::Scroll),
            PlannedActionType::Screenshot => Some(Self::Screenshot),
            PlannedActionType::Upload => None,
        }
    }
}

// ============================================================================
// SECTION: Instruction Status
// ============================================================================

/// Instruction envelope lifecycle status.
///
/// # Invariants
/// - Closed enum; `Sealed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstructionStatus {
    /// Envelope created, not yet sealed.
    Created,
    /// Envelope sealed under its content hash.
    Sealed,
    /// Envelope rejected.
    Rejected,
}

// ============================================================================
// SECTION: Execution Instructions
// ============================================================================

/// Single executable instruction derived from a plan step.
///
/// # Invariants
/// - `instruction_id` follows the `INSTR-{intent_id}-{index:03}` format.
/// - `parameters` are carried through from the plan step unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInstruction {
    /// Instruction identifier.
    pub instruction_id: String,
    /// Identifier of the originating plan step.
    pub plan_step_id: String,
    /// Instruction type.
    pub instruction_type: InstructionType,
    /// Instruction parameters.
    pub parameters: BTreeMap<String, Value>,
    /// Evidence kinds the executor must produce for this instruction.
    pub evidence_required: BTreeSet<String>,
}

// ============================================================================
// SECTION: Instruction Envelope
// ============================================================================

/// Sealed bundle of instructions derived from a sealed orchestration intent.
///
/// # Invariants
/// - Instruction order matches plan step order exactly.
/// - `envelope_hash` is empty until sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionEnvelope {
    /// Identifier of the bound orchestration intent.
    pub intent_id: String,
    /// Hash from the readiness decision.
    pub readiness_hash: String,
    /// Ordered execution instructions.
    pub instructions: Vec<ExecutionInstruction>,
    /// Envelope lifecycle status.
    pub status: InstructionStatus,
    /// Content hash, populated at sealing.
    pub envelope_hash: String,
}
