// crates/consent-gate-core/src/core/audit.rs
// ============================================================================
// Module: Consent Gate Ledger Verification
// Description: Generic verification for hash-linked append-only ledgers.
// Purpose: Share one chain-walk routine across every audit kind.
// Dependencies: crate::core::hashing (via record implementations)
// ============================================================================

//! ## Overview
//! Consent Gate carries four append-only ledgers: the evidence chain, the
//! decision audit, the intent audit, and the authorization audit. Three of
//! them embed `prior_hash`/`self_hash` on every record; the decision audit
//! keeps its records hash-free and folds the chain into the audit head. Both
//! shapes are verified here by a single routine each, parameterised by the
//! record-hash function, so every validator returns the same verdict on the
//! same logical sequence.

// ============================================================================
// SECTION: Chained Record Contract
// ============================================================================

/// Accessors required of records embedded in a hash-linked ledger.
///
/// # Invariants
/// - `self_hash` equals `recompute_hash()` for any untampered record.
/// - The first record of a ledger carries an empty `prior_hash`.
pub trait ChainedRecord {
    /// Returns the stored hash of the preceding record.
    fn prior_hash(&self) -> &str;

    /// Returns the stored hash of this record.
    fn self_hash(&self) -> &str;

    /// Recomputes this record's hash from its stored fields.
    fn recompute_hash(&self) -> String;
}

// ============================================================================
// SECTION: Linked Ledger Verification
// ============================================================================

/// Verifies a ledger whose records embed `prior_hash`/`self_hash`.
///
/// An empty ledger is valid iff `head_hash` is empty and `length` is zero.
/// Otherwise every record's `prior_hash` must equal the previous record's
/// `self_hash` (empty for the first record), every `self_hash` must match
/// its recomputation, `length` must equal the record count, and `head_hash`
/// must equal the final record's `self_hash`.
#[must_use]
pub fn verify_linked_ledger<R: ChainedRecord>(records: &[R], head_hash: &str, length: usize) -> bool {
    if records.is_empty() {
        return head_hash.is_empty() && length == 0;
    }
    if length != records.len() {
        return false;
    }

    let mut expected_prior = String::new();
    for record in records {
        if record.prior_hash() != expected_prior {
            return false;
        }
        let computed = record.recompute_hash();
        if record.self_hash() != computed {
            return false;
        }
        expected_prior = computed;
    }

    head_hash == expected_prior
}

// ============================================================================
// SECTION: Folded Ledger Verification
// ============================================================================

/// Verifies a ledger whose records carry no hash fields of their own.
///
/// The chain is recomputed by folding `rehash(record, prior)` across the
/// records in order, starting from the empty string; the fold result must
/// equal `head_hash`. An empty ledger is valid iff `head_hash` is empty and
/// `length` is zero.
#[must_use]
pub fn verify_folded_ledger<R>(
    records: &[R],
    head_hash: &str,
    length: usize,
    rehash: impl Fn(&R, &str) -> String,
) -> bool {
    if records.is_empty() {
        return head_hash.is_empty() && length == 0;
    }
    if length != records.len() {
        return false;
    }

    let mut computed = String::new();
    for record in records {
        computed = rehash(record, &computed);
    }

    head_hash == computed
}
