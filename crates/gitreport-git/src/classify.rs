//! Branch classification
//!
//! A commit's integration state is decided by the names of the local branches
//! that contain it, checked family by family in priority order.

use std::path::Path;

use crate::commit::BranchStatus;
use crate::query::GitQuery;

/// How a branch family is recognized from a lowercased branch name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchMatch {
    /// Name contains the fragment anywhere
    Contains(&'static str),
    /// Name starts with the fragment
    StartsWith(&'static str),
}

impl BranchMatch {
    fn matches(self, branch: &str) -> bool {
        match self {
            Self::Contains(fragment) => branch.contains(fragment),
            Self::StartsWith(prefix) => branch.starts_with(prefix),
        }
    }
}

/// Branch families in priority order
pub const BRANCH_RULES: [(BranchStatus, BranchMatch); 4] = [
    (BranchStatus::Release, BranchMatch::Contains("release")),
    (BranchStatus::Zsxr, BranchMatch::StartsWith("zsxr")),
    (BranchStatus::PreTest, BranchMatch::Contains("pre-test")),
    (BranchStatus::Feature, BranchMatch::Contains("feature")),
];

/// Classify a commit from the names of the branches containing it
///
/// No branches means `Unknown`; branches matching no family mean `Other`.
pub fn classify_branches<S: AsRef<str>>(branches: &[S]) -> BranchStatus {
    if branches.is_empty() {
        return BranchStatus::Unknown;
    }
    let lowered: Vec<String> = branches
        .iter()
        .map(|branch| branch.as_ref().to_lowercase())
        .collect();

    BRANCH_RULES
        .iter()
        .find(|(_, rule)| lowered.iter().any(|branch| rule.matches(branch)))
        .map_or(BranchStatus::Other, |(status, _)| *status)
}

/// Parse `git branch --contains` output into branch names
///
/// Strips the current-branch (`*`) and worktree (`+`) markers. A detached
/// HEAD entry such as `(HEAD detached at v1.0)` names no branch and is dropped.
#[must_use]
pub fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim().trim_start_matches(['*', '+']).trim())
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(str::to_string)
        .collect()
}

/// Classify a commit by asking git which branches contain it
pub fn classify_commit<G: GitQuery + ?Sized>(git: &G, repo: &Path, sha: &str) -> BranchStatus {
    let branches = git
        .branches_containing(repo, sha)
        .into_output()
        .map(|output| parse_branch_list(&output))
        .unwrap_or_default();
    classify_branches(&branches)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn branch_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,8}",
            "release/[0-9]{1,2}",
            "zsxr-[a-z0-9]{1,6}",
            "pre-test-[a-z]{1,4}",
            "feature/[a-z]{1,8}",
        ]
    }

    proptest! {
        /// Property: the order git lists branches in never changes the result
        #[test]
        fn prop_classification_ignores_branch_order(
            branches in proptest::collection::vec(branch_name(), 0..6)
        ) {
            let mut reversed = branches.clone();
            reversed.reverse();
            prop_assert_eq!(classify_branches(&branches), classify_branches(&reversed));
        }

        /// Property: adding a branch never lowers the family's rank
        #[test]
        fn prop_extra_branch_never_demotes(
            branches in proptest::collection::vec(branch_name(), 1..6),
            extra in branch_name()
        ) {
            let before = classify_branches(&branches);
            let mut more = branches.clone();
            more.push(extra);
            let after = classify_branches(&more);
            let rank = |status: BranchStatus| {
                BRANCH_RULES
                    .iter()
                    .position(|(family, _)| *family == status)
                    .unwrap_or(BRANCH_RULES.len())
            };
            prop_assert!(rank(after) <= rank(before));
        }
    }
}
