// crates/consent-gate-core/src/core/mod.rs
// ============================================================================
// Module: Consent Gate Core Types
// Description: Canonical data model for the execution-authorization pipeline.
// Purpose: Provide stable, serializable types for evidence, decisions, intents,
// authorizations, plans, and instructions.
// Dependencies: serde, serde_json, sha2, uuid
// ============================================================================

//! ## Overview
//! Core types define the seven-stage authorization data model. Every entity
//! is immutable after construction; ledgers append by returning new values;
//! all hashes are SHA-256 over explicit `0x00`-separated preimages. These
//! types are the canonical source of truth for any host surface built on the
//! engines.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod authorization;
pub mod decision;
pub mod hashing;
pub mod identifiers;
pub mod instruction;
pub mod intent;
pub mod observation;
pub mod orchestration;
pub mod planning;
pub mod readiness;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ChainedRecord;
pub use audit::verify_folded_ledger;
pub use audit::verify_linked_ledger;
pub use authorization::AuthorizationAudit;
pub use authorization::AuthorizationDecision;
pub use authorization::AuthorizationRecord;
pub use authorization::AuthorizationRecordType;
pub use authorization::AuthorizationRevocation;
pub use authorization::AuthorizationStatus;
pub use authorization::ExecutionAuthorization;
pub use decision::DecisionAudit;
pub use decision::DecisionOutcome;
pub use decision::DecisionRecord;
pub use decision::DecisionRequest;
pub use decision::EvidenceSummary;
pub use decision::EvidenceVisibility;
pub use decision::HumanDecision;
pub use hashing::HASH_HEX_LEN;
pub use hashing::Preimage;
pub use hashing::sha256_hex;
pub use instruction::ExecutionInstruction;
pub use instruction::InstructionEnvelope;
pub use instruction::InstructionStatus;
pub use instruction::InstructionType;
pub use intent::BindingResult;
pub use intent::ExecutionIntent;
pub use intent::IntentAudit;
pub use intent::IntentRecord;
pub use intent::IntentRecordType;
pub use intent::IntentRevocation;
pub use intent::IntentStatus;
pub use observation::EvidenceChain;
pub use observation::EvidenceRecord;
pub use observation::EvidenceType;
pub use observation::ObservationContext;
pub use observation::ObservationPoint;
pub use observation::StopCondition;
pub use orchestration::OrchestrationContext;
pub use orchestration::OrchestrationDecision;
pub use orchestration::OrchestrationIntent;
pub use orchestration::OrchestrationIntentState;
pub use orchestration::OrchestrationResult;
pub use planning::ActionPlanStep;
pub use planning::ExecutionPlan;
pub use planning::PlanRiskLevel;
pub use planning::PlanValidationContext;
pub use planning::PlanValidationDecision;
pub use planning::PlanValidationResult;
pub use planning::PlannedActionType;
pub use readiness::ExecutionReadinessState;
pub use readiness::ReadinessContext;
pub use readiness::ReadinessDecision;
pub use readiness::ReadinessResult;
