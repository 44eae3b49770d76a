//! Locale-style name ordering.

use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("Root collation unavailable, sorting case-insensitively: {}", e);
            None
        }
    }
}

/// Compares two names the way a user expects them sorted in a file list.
///
/// Uses the CLDR root collation: accents and case only decide between names
/// with the same base letters, and then the lowercase spelling comes first
/// (`"a" < "A" < "Ä" < "b"`).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let collated = ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => case_insensitive_cmp(a, b),
    });
    collated.then_with(|| a.cmp(b))
}

fn case_insensitive_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        // Same letters: lowercase is the higher code point, so reverse.
        .then_with(|| b.cmp(a))
}
