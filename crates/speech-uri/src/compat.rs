//! Claim id predicates and legacy segment ordering
//!
//! Old links put the claim name first (`/name/claimId`); the current grammar
//! expects `/claimId/name`. These helpers detect and undo the old order.

/// Length of a full (long) claim id
pub const CLAIM_ID_LENGTH: usize = 40;

/// A full claim id: exactly 40 ASCII alphanumeric characters
///
/// # Examples
///
/// ```
/// use speech_uri::is_valid_claim_id;
///
/// assert!(is_valid_claim_id(&"a".repeat(40)));
/// assert!(!is_valid_claim_id(&"a".repeat(39)));
/// assert!(!is_valid_claim_id(&format!("{}-", "a".repeat(39))));
/// ```
pub fn is_valid_claim_id(claim_id: &str) -> bool {
    claim_id.len() == CLAIM_ID_LENGTH && claim_id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A short claim id
///
/// Only checks for a single character; it does not evaluate the short id
/// against the registry, so longer short ids are not recognized here.
pub fn is_valid_short_id(claim_id: &str) -> bool {
    claim_id.chars().count() == 1
}

pub fn is_valid_short_id_or_claim_id(input: &str) -> bool {
    is_valid_claim_id(input) || is_valid_short_id(input)
}

/// Undoes the legacy `name/claimId` order (pure function)
///
/// Returns `(identifier, name)` swapped when `name` looks like a claim id
/// (or short id) and `identifier` does not; otherwise returns them as given.
/// Only meant for non-channel identifiers.
///
/// # Examples
///
/// ```
/// use speech_uri::flip_legacy_order;
///
/// let long_id = "0123456789abcdef0123456789abcdef01234567";
/// assert_eq!(flip_legacy_order("myvideo", long_id), (long_id, "myvideo"));
/// assert_eq!(flip_legacy_order(long_id, "myvideo"), (long_id, "myvideo"));
/// ```
pub fn flip_legacy_order<'a>(identifier: &'a str, name: &'a str) -> (&'a str, &'a str) {
    if is_valid_short_id_or_claim_id(name) && !is_valid_short_id_or_claim_id(identifier) {
        (name, identifier)
    } else {
        (identifier, name)
    }
}
