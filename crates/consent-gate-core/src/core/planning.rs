// crates/consent-gate-core/src/core/planning.rs
// ============================================================================
// Module: Consent Gate Planning Model
// Description: Action plan steps, risk levels, and plan validation types.
// Purpose: Represent proposed plans as declarative data classified by risk.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Plans are declarative data: ordered steps with typed actions, opaque
//! parameters, and per-step risk levels. The planning engine classifies them
//! against a capability set and the frozen risk policy; nothing here
//! executes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Action Types
// ============================================================================

/// Action types a plan step may request.
///
/// # Invariants
/// - Closed enum; variants are stable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlannedActionType {
    /// Click a target element.
    Click,
    /// Type text into a focused element.
    Type,
    /// Navigate to a location.
    Navigate,
    /// Wait for a duration or condition.
    Wait,
    /// Capture a screenshot.
    Screenshot,
    /// Scroll the viewport or an element.
    Scroll,
    /// Upload a file.
    Upload,
}

impl PlannedActionType {
    /// Returns the stable spelling for this action type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "CLICK",
            Self::Type => "TYPE",
            Self::Navigate => "NAVIGATE",
            Self::Wait => "WAIT",
            Self::Screenshot => "SCREENSHOT",
            Self::Scroll => "SCROLL",
            Self::Upload => "UPLOAD",
        }
    }
}

// ============================================================================
// SECTION: Risk Levels
// ============================================================================

/// Plan risk levels, ordered `LOW < MEDIUM < HIGH < CRITICAL`.
///
/// # Invariants
/// - Closed enum; the derived ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanRiskLevel {
    /// Routine, reversible action.
    Low,
    /// Action with limited side effects.
    Medium,
    /// Action requiring a human checkpoint.
    High,
    /// Action that cannot be proven safe.
    Critical,
}

impl PlanRiskLevel {
    /// Returns the stable spelling for this risk level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Returns the numeric severity (1-based, matching the wire contract).
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

// ============================================================================
// SECTION: Validation Decisions
// ============================================================================

/// Three-way plan validation decision.
///
/// # Invariants
/// - Closed enum; REJECT is the default on any malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanValidationDecision {
    /// Plan accepted for orchestration.
    Accept,
    /// Plan rejected.
    Reject,
    /// Plan needs a human checkpoint before acceptance.
    RequiresHuman,
}

// ============================================================================
// SECTION: Plan Steps
// ============================================================================

/// Single action plan step.
///
/// # Invariants
/// - `parameters` are opaque to the core; deterministic ordering via
///   `BTreeMap` keeps serialization stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlanStep {
    /// Step identifier, unique within its plan.
    pub step_id: String,
    /// Requested action type.
    pub action_type: PlannedActionType,
    /// Action parameters.
    pub parameters: BTreeMap<String, Value>,
    /// Risk level assigned to this step.
    pub risk_level: PlanRiskLevel,
}

// ============================================================================
// SECTION: Execution Plans
// ============================================================================

/// Ordered plan of action steps.
///
/// # Invariants
/// - Step identifiers must be unique (enforced by structural validation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    /// Plan identifier.
    pub plan_id: String,
    /// Ordered plan steps.
    pub steps: Vec<ActionPlanStep>,
}

// ============================================================================
// SECTION: Validation Context and Result
// ============================================================================

/// Inputs to the plan acceptance decision.
///
/// # Invariants
/// - `allowed_capabilities` membership is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanValidationContext {
    /// Plan under validation.
    pub plan: ExecutionPlan,
    /// Action types the caller is permitted to plan.
    pub allowed_capabilities: BTreeSet<PlannedActionType>,
    /// Whether a human is present for approval.
    pub human_present: bool,
}

/// Result of plan validation.
///
/// # Invariants
/// - `reason` is always populated with a short human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanValidationResult {
    /// Acceptance decision.
    pub decision: PlanValidationDecision,
    /// Maximum risk level found in the plan.
    pub max_risk: PlanRiskLevel,
    /// Human-readable reason for the decision.
    pub reason: String,
}
