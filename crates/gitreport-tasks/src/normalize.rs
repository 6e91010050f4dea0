// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit message cleanup
//!
//! Messages are cleaned once for display (conventional-commit prefix removed)
//! and normalized for deduplication (trailing counters removed), so that
//! "retry upload 3" and "retry upload 9" describe the same task.

use std::sync::LazyLock;

use regex::Regex;

/// Conventional-commit prefixes removed from messages (case-sensitive)
pub const COMMIT_PREFIXES: [&str; 11] = [
    "feat:",
    "feature:",
    "fix:",
    "docs:",
    "style:",
    "refactor:",
    "perf:",
    "test:",
    "chore:",
    "build:",
    "ci:",
];

/// A trailing run of digits
static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+$").expect("valid trailing digits regex"));

/// A trailing run of digits followed by non-word characters
static TRAILING_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[^\w]*$").expect("valid trailing numbering regex"));

/// Strip the first matching conventional-commit prefix and trim
///
/// Only one prefix is removed: `fix: feat: x` becomes `feat: x`.
#[must_use]
pub fn clean_commit_message(message: &str) -> String {
    COMMIT_PREFIXES
        .iter()
        .find_map(|prefix| message.strip_prefix(prefix))
        .unwrap_or(message)
        .trim()
        .to_string()
}

/// Normalize a message for deduplication by removing trailing numbering
///
/// Removes a trailing digit run, then a trailing digit run followed by
/// punctuation, trimming after each step, and repeats until nothing changes.
/// The result is stable under renormalization.
#[must_use]
pub fn normalize_message_for_dedup(message: &str) -> String {
    let mut current = message.trim().to_string();
    loop {
        let step = TRAILING_DIGITS.replace(&current, "");
        let step = TRAILING_NUMBERING.replace(step.trim(), "");
        let step = step.trim();
        if step == current {
            return current;
        }
        current = step.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_clean_strips_known_prefix() {
        assert_eq!(clean_commit_message("fix: retry upload 3"), "retry upload 3");
        assert_eq!(clean_commit_message("feature:  login  "), "login");
        assert_eq!(clean_commit_message("ci:"), "");
    }

    #[test]
    fn test_clean_is_case_sensitive_and_prefix_only() {
        assert_eq!(clean_commit_message("Fix: typo"), "Fix: typo");
        assert_eq!(clean_commit_message("hotfix: typo"), "hotfix: typo");
        assert_eq!(clean_commit_message("feat(ui): button"), "feat(ui): button");
    }

    #[test]
    fn test_clean_strips_a_single_prefix() {
        assert_eq!(clean_commit_message("fix: feat: x"), "feat: x");
    }

    #[test]
    fn test_normalize_strips_trailing_counter() {
        assert_eq!(normalize_message_for_dedup("retry upload 3"), "retry upload");
        assert_eq!(normalize_message_for_dedup("retry upload 12"), "retry upload");
    }

    #[test]
    fn test_normalize_strips_numbering_with_punctuation() {
        assert_eq!(normalize_message_for_dedup("step 2)"), "step");
        assert_eq!(normalize_message_for_dedup("round 3 !!"), "round");
        assert_eq!(normalize_message_for_dedup("part 1."), "part");
    }

    #[test]
    fn test_normalize_keeps_inner_digits() {
        assert_eq!(normalize_message_for_dedup("upgrade to v2 api"), "upgrade to v2 api");
    }

    #[test]
    fn test_normalize_reaches_a_fixpoint() {
        assert_eq!(normalize_message_for_dedup("v1.2.3"), "v");
        assert_eq!(normalize_message_for_dedup("12 34"), "");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_message_for_dedup(""), "");
        assert_eq!(normalize_message_for_dedup("   "), "");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalizing twice gives the same result as normalizing once
        #[test]
        fn prop_normalize_is_idempotent(message in ".*[0-9]{1,4}") {
            let once = normalize_message_for_dedup(&message);
            prop_assert_eq!(normalize_message_for_dedup(&once), once);
        }

        /// Property: a normalized message never ends in an ASCII digit
        #[test]
        fn prop_normalized_has_no_trailing_digit(message in "[a-z ]{0,20}[0-9]{1,4}[ .)!-]{0,3}") {
            let normalized = normalize_message_for_dedup(&message);
            prop_assert!(!normalized.ends_with(|c: char| c.is_ascii_digit()));
        }

        /// Property: cleaning never makes a message longer
        #[test]
        fn prop_clean_never_grows(message in ".*") {
            prop_assert!(clean_commit_message(&message).len() <= message.len());
        }
    }
}
