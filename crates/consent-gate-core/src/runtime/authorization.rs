// crates/consent-gate-core/src/runtime/authorization.rs
// ============================================================================
// Module: Consent Gate Authorization Engine
// Description: Authorization issuance, revocation, validity, and audit recording.
// Purpose: Issue permission artifacts for valid, unrevoked intents; deny otherwise.
// Dependencies: crate::core::{audit, authorization, identifiers, intent},
// crate::runtime::intent
// ============================================================================

//! ## Overview
//! Authorization is denied unless explicitly granted. Issuance verifies the
//! intent's fields and hash, consults the intent audit for revocation, and
//! tracks authorized intent identifiers process-wide so an intent authorizes
//! at most once. The authorization audit mirrors the intent audit's
//! hash-linked discipline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::OnceLock;

use crate::core::audit::verify_linked_ledger;
use crate::core::authorization::AuthorizationAudit;
use crate::core::authorization::AuthorizationDecision;
use crate::core::authorization::AuthorizationRecord;
use crate::core::authorization::AuthorizationRecordType;
use crate::core::authorization::AuthorizationRevocation;
use crate::core::authorization::AuthorizationStatus;
use crate::core::authorization::ExecutionAuthorization;
use crate::core::identifiers::new_authorization_audit_id;
use crate::core::identifiers::new_authorization_id;
use crate::core::identifiers::new_authorization_record_id;
use crate::core::identifiers::new_authorization_revocation_id;
use crate::core::intent::ExecutionIntent;
use crate::core::intent::IntentAudit;
use crate::runtime::intent::RevocationError;
use crate::runtime::intent::is_intent_revoked;
use crate::runtime::is_blank;

// ============================================================================
// SECTION: Authorized Intent Tracking
// ============================================================================

/// Process-wide set of intent identifiers that have been authorized.
static AUTHORIZED_INTENTS: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Returns the authorized-intent set, recovering from lock poisoning.
fn authorized_intents() -> std::sync::MutexGuard<'static, HashSet<String>> {
    let lock = AUTHORIZED_INTENTS.get_or_init(|| Mutex::new(HashSet::new()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Clears the authorized-intent set.
///
/// Reserved for test isolation; production callers must not invoke it.
pub fn clear_authorized_intents() {
    authorized_intents().clear();
}

// ============================================================================
// SECTION: Authorization Issuance
// ============================================================================

/// Issues an authorization for a valid, unrevoked intent.
///
/// First match wins: an absent intent, any blank core field, a hash
/// mismatch, an absent intent audit, a revoked intent, or an already
/// authorized intent all deny. Otherwise the authorization is minted with
/// status AUTHORIZED, committed under its hash, and the intent identifier is
/// recorded as authorized.
#[must_use]
pub fn authorize_execution(
    intent: Option<&ExecutionIntent>,
    intent_audit: Option<&IntentAudit>,
    timestamp: &str,
) -> (AuthorizationDecision, Option<ExecutionAuthorization>) {
    let Some(intent) = intent else {
        return (AuthorizationDecision::Deny, None);
    };

    if is_blank(&intent.intent_id)
        || is_blank(&intent.decision_id)
        || is_blank(&intent.created_by)
        || is_blank(&intent.session_id)
        || is_blank(timestamp)
    {
        return (AuthorizationDecision::Deny, None);
    }

    if intent.intent_hash != intent.recomputed_hash() {
        return (AuthorizationDecision::Deny, None);
    }

    let Some(intent_audit) = intent_audit else {
        return (AuthorizationDecision::Deny, None);
    };

    if is_intent_revoked(&intent.intent_id, intent_audit) {
        return (AuthorizationDecision::Deny, None);
    }

    let mut authorized = authorized_intents();
    if authorized.contains(&intent.intent_id) {
        return (AuthorizationDecision::Deny, None);
    }

    let authorization_id = new_authorization_id();
    let authorization_hash = ExecutionAuthorization::compute_hash(
        &authorization_id,
        &intent.intent_id,
        &intent.decision_id,
        &intent.session_id,
        AuthorizationStatus::Authorized,
        &intent.created_by,
        timestamp,
    );

    let authorization = ExecutionAuthorization {
        authorization_id,
        intent_id: intent.intent_id.clone(),
        decision_id: intent.decision_id.clone(),
        session_id: intent.session_id.clone(),
        authorization_status: AuthorizationStatus::Authorized,
        authorized_by: intent.created_by.clone(),
        authorized_at: timestamp.to_string(),
        authorization_hash,
    };

    authorized.insert(intent.intent_id.clone());

    (AuthorizationDecision::Allow, Some(authorization))
}

// ============================================================================
// SECTION: Authorization Validation
// ============================================================================

/// Validates an authorization against its source intent.
///
/// True iff both artifacts are present, the intent, decision, and session
/// identifiers match, the authorizer matches the intent creator, and the
/// recomputed authorization hash equals the stored hash.
#[must_use]
pub fn validate_authorization(
    authorization: Option<&ExecutionAuthorization>,
    intent: Option<&ExecutionIntent>,
) -> bool {
    let (Some(auth), Some(intent)) = (authorization, intent) else {
        return false;
    };

    if auth.intent_id != intent.intent_id {
        return false;
    }

    if auth.decision_id != intent.decision_id {
        return false;
    }

    if auth.session_id != intent.session_id {
        return false;
    }

    if auth.authorized_by != intent.created_by {
        return false;
    }

    auth.authorization_hash == auth.recomputed_hash()
}

// ============================================================================
// SECTION: Revocation
// ============================================================================

/// Creates a permanent revocation record for an authorization.
///
/// # Errors
///
/// Returns [`RevocationError`] when `revoked_by`, `reason`, or `timestamp`
/// is blank.
pub fn revoke_authorization(
    authorization: &ExecutionAuthorization,
    revoked_by: &str,
    reason: &str,
    timestamp: &str,
) -> Result<AuthorizationRevocation, RevocationError> {
    if is_blank(revoked_by) {
        return Err(RevocationError::MissingRevokedBy);
    }
    if is_blank(reason) {
        return Err(RevocationError::MissingReason);
    }
    if is_blank(timestamp) {
        return Err(RevocationError::MissingTimestamp);
    }

    let revocation_id = new_authorization_revocation_id();
    let revocation_hash = AuthorizationRevocation::compute_hash(
        &revocation_id,
        &authorization.authorization_id,
        revoked_by,
        reason,
        timestamp,
    );

    Ok(AuthorizationRevocation {
        revocation_id,
        authorization_id: authorization.authorization_id.clone(),
        revoked_by: revoked_by.to_string(),
        revocation_reason: reason.to_string(),
        revoked_at: timestamp.to_string(),
        revocation_hash,
    })
}

// ============================================================================
// SECTION: Audit Recording
// ============================================================================

/// Records an issuance or revocation event in the authorization audit.
///
/// The record type universe is closed at the type level; the literal
/// `"AUTHORIZATION"`/`"REVOCATION"` spellings enter the hash preimage via
/// the record type's stable name.
#[must_use]
pub fn record_authorization(
    audit: &AuthorizationAudit,
    authorization_id: &str,
    record_type: AuthorizationRecordType,
    timestamp: &str,
) -> AuthorizationAudit {
    let record_id = new_authorization_record_id();
    let prior_hash = audit.head_hash.clone();
    let self_hash = AuthorizationRecord::compute_hash(
        &record_id,
        record_type,
        authorization_id,
        timestamp,
        &prior_hash,
    );

    audit.appended(AuthorizationRecord {
        record_id,
        record_type,
        authorization_id: authorization_id.to_string(),
        timestamp: timestamp.to_string(),
        prior_hash,
        self_hash,
    })
}

/// Creates an empty authorization audit, minting an `AUTHAUDIT-` id when
/// none is given.
#[must_use]
pub fn create_empty_audit(session_id: &str, audit_id: Option<String>) -> AuthorizationAudit {
    AuthorizationAudit::empty(
        session_id.to_string(),
        audit_id.unwrap_or_else(new_authorization_audit_id),
    )
}

// ============================================================================
// SECTION: Revocation and Validity Queries
// ============================================================================

/// Whether the audit contains a revocation record for the authorization.
#[must_use]
pub fn is_authorization_revoked(authorization_id: &str, audit: &AuthorizationAudit) -> bool {
    audit.records.iter().any(|record| {
        record.authorization_id == authorization_id
            && record.record_type == AuthorizationRecordType::Revocation
    })
}

/// Whether an authorization is currently valid.
///
/// True iff the authorization validates against the intent, its status is
/// AUTHORIZED, and neither the intent nor the authorization is revoked.
#[must_use]
pub fn is_authorization_valid(
    authorization: &ExecutionAuthorization,
    intent: &ExecutionIntent,
    intent_audit: &IntentAudit,
    authorization_audit: &AuthorizationAudit,
) -> bool {
    if !validate_authorization(Some(authorization), Some(intent)) {
        return false;
    }

    if !authorization.authorization_status.permits_allow() {
        return false;
    }

    if is_intent_revoked(&intent.intent_id, intent_audit) {
        return false;
    }

    !is_authorization_revoked(&authorization.authorization_id, authorization_audit)
}

/// Derives the two-way decision from an authorization's status.
///
/// AUTHORIZED allows; every other status, and an absent authorization,
/// denies.
#[must_use]
pub fn get_authorization_decision(
    authorization: Option<&ExecutionAuthorization>,
) -> AuthorizationDecision {
    match authorization {
        Some(auth) if auth.authorization_status.permits_allow() => AuthorizationDecision::Allow,
        Some(_) | None => AuthorizationDecision::Deny,
    }
}

// ============================================================================
// SECTION: Audit Validation
// ============================================================================

/// Validates authorization audit chain integrity.
#[must_use]
pub fn validate_audit_chain(audit: &AuthorizationAudit) -> bool {
    verify_linked_ledger(&audit.records, &audit.head_hash, audit.length)
}
