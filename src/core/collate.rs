//! Locale-aware string ordering for index paths.
//!
//! Uses the ICU root collation with default options, the ordering behind
//! `String.prototype.localeCompare`: accents and case only break ties, and
//! punctuation sorts before digits and letters. A final code point comparison
//! keeps the order total.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

thread_local! {
    static ROOT_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Compare two strings the way a locale-aware collator would.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => a.cmp(b),
    })
}
