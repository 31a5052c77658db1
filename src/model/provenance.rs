//! Annotation id lineage.
//!
//! An annotation's id encodes where it came from:
//! - Service-assigned ids are used as-is while the result is untouched.
//! - The first hand-edit of an AI result appends `-modified`, exactly once.
//! - Hand-drawn annotations carry the `manual-` prefix from creation.
//!
//! The suffix rules are idempotent, so re-editing never stacks markers.

use std::sync::atomic::{AtomicU64, Ordering};

use web_time::{SystemTime, UNIX_EPOCH};

/// Prefix for ids of annotations drawn entirely by hand.
pub const MANUAL_PREFIX: &str = "manual-";

/// Suffix marking an AI result that has been hand-edited.
pub const MODIFIED_SUFFIX: &str = "-modified";

/// Whether the id belongs to a hand-drawn annotation.
pub fn is_manual(id: &str) -> bool {
    id.starts_with(MANUAL_PREFIX)
}

/// Whether the id belongs to an AI result that has already been edited.
pub fn is_modified(id: &str) -> bool {
    id.ends_with(MODIFIED_SUFFIX)
}

/// The id an annotation carries after a hand-edit.
///
/// Precedence:
/// 1. An untouched AI id gains the `-modified` suffix.
/// 2. An already-modified id is kept unchanged.
/// 3. A `manual-` id is kept unchanged.
/// 4. A missing id is replaced by a freshly minted manual id.
pub fn edited_id(current: Option<&str>) -> String {
    match current {
        Some(id) if is_manual(id) || is_modified(id) => id.to_string(),
        Some(id) => format!("{id}{MODIFIED_SUFFIX}"),
        None => mint_manual_id(),
    }
}

/// Mint an id for a hand-drawn annotation: `manual-<unix millis>`.
pub fn mint_manual_id() -> String {
    format!("{MANUAL_PREFIX}{}", next_timestamp())
}

/// Mint an id for an AI result the service returned without one.
pub fn mint_ai_id() -> String {
    format!("ai-{}", next_timestamp())
}

static LAST_TIMESTAMP: AtomicU64 = AtomicU64::new(0);

/// Unix milliseconds, bumped past the previous value so two annotations
/// minted within the same millisecond still get distinct ids.
fn next_timestamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut prev = LAST_TIMESTAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_TIMESTAMP.compare_exchange(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_edit_appends_modified() {
        assert_eq!(edited_id(Some("abc")), "abc-modified");
    }

    #[test]
    fn test_second_edit_is_idempotent() {
        assert_eq!(edited_id(Some("abc-modified")), "abc-modified");
    }

    #[test]
    fn test_manual_id_unchanged() {
        assert_eq!(edited_id(Some("manual-123")), "manual-123");
    }

    #[test]
    fn test_missing_id_mints_manual() {
        let id = edited_id(None);
        assert!(id.starts_with(MANUAL_PREFIX));
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let a = mint_manual_id();
        let b = mint_manual_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ai_id_gains_suffix_on_edit() {
        let id = mint_ai_id();
        let edited = edited_id(Some(&id));
        assert_eq!(edited, format!("{id}-modified"));
        assert!(is_modified(&edited));
    }
}
