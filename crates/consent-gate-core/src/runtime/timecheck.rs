// crates/consent-gate-core/src/runtime/timecheck.rs
// ============================================================================
// Module: Consent Gate Timestamp Checking
// Description: RFC 3339 validity checking for host-supplied timestamps.
// Purpose: Compute the timestamp-validity signal consumed by stop checks.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The engines treat timestamps as opaque strings; they are concatenated
//! into hash preimages and never parsed. Hosts that want the
//! `TIMESTAMP_INVALID` stop condition to carry weight compute the
//! `timestamp_valid` signal here, at the boundary, before handing it to
//! `check_stop`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Validity Checking
// ============================================================================

/// Whether a string parses as a valid RFC 3339 timestamp.
#[must_use]
pub fn is_valid_rfc3339(value: &str) -> bool {
    OffsetDateTime::parse(value, &Rfc3339).is_ok()
}
