// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Author filter resolution
//!
//! Turns the configured author (or, when none is configured, the git identity
//! of the repository or user) into a `--author` pattern.

use std::path::Path;

use tracing::debug;

use crate::query::{ConfigScope, GitQuery};

/// Identity lookups tried, in order, when no author is configured
const IDENTITY_LOOKUPS: [(&str, ConfigScope); 4] = [
    ("user.email", ConfigScope::Local),
    ("user.email", ConfigScope::Global),
    ("user.name", ConfigScope::Local),
    ("user.name", ConfigScope::Global),
];

/// Characters special in a POSIX basic regular expression
const BASIC_REGEX_SPECIALS: &[char] = &['\\', '.', '[', ']', '*', '^', '$'];

/// Characters special in a POSIX extended regular expression
const EXTENDED_REGEX_SPECIALS: &[char] = &[
    '\\', '.', '[', ']', '*', '^', '$', '+', '?', '(', ')', '{', '}', '|',
];

/// Which author the report is about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthorFilter {
    /// Use the identity from git configuration
    #[default]
    Identity,
    /// A pattern passed to git verbatim
    Pattern(String),
    /// Any of several literal identities
    AnyOf(Vec<String>),
}

impl AuthorFilter {
    /// Build a filter from a configured list of identities
    ///
    /// Blank entries are ignored. A single entry behaves like a plain pattern.
    #[must_use]
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Vec<String> = items
            .into_iter()
            .map(|item| item.as_ref().trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        match items.len() {
            0 => Self::Identity,
            1 => Self::Pattern(items.remove(0)),
            _ => Self::AnyOf(items),
        }
    }
}

impl From<&str> for AuthorFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Identity
        } else {
            Self::Pattern(value.to_string())
        }
    }
}

/// A resolved `--author` pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorPattern {
    /// The pattern; empty disables author filtering
    pub pattern: String,
    /// Whether the pattern needs `--extended-regexp`
    pub extended: bool,
}

impl AuthorPattern {
    /// Whether no author filtering applies
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// Resolves an [`AuthorFilter`] against a repository
pub struct AuthorResolver<'g, G: ?Sized> {
    git: &'g G,
}

impl<'g, G: GitQuery + ?Sized> AuthorResolver<'g, G> {
    /// Create a resolver using the given git backend
    #[must_use]
    pub fn new(git: &'g G) -> Self {
        Self { git }
    }

    /// Resolve the author pattern for one repository
    ///
    /// An explicit pattern is used verbatim and switches to extended regular
    /// expressions when it contains `|`. Without one, the first non-empty of
    /// local email, global email, local name, global name is escaped and used.
    /// If git has no identity either, the pattern is empty.
    pub fn resolve(&self, repo: &Path, filter: &AuthorFilter) -> AuthorPattern {
        match filter {
            AuthorFilter::Pattern(pattern) => {
                let pattern = pattern.trim().to_string();
                let extended = pattern.contains('|');
                AuthorPattern { pattern, extended }
            }
            AuthorFilter::AnyOf(identities) => AuthorPattern {
                pattern: identities
                    .iter()
                    .map(|identity| escape_extended_regex(identity))
                    .collect::<Vec<_>>()
                    .join("|"),
                extended: true,
            },
            AuthorFilter::Identity => self.identity_pattern(repo),
        }
    }

    fn identity_pattern(&self, repo: &Path) -> AuthorPattern {
        for (key, scope) in IDENTITY_LOOKUPS {
            let value = self.git.config_value(repo, key, scope).output_or_empty();
            if !value.is_empty() {
                debug!(repo = %repo.display(), key, ?scope, "Using git identity as author");
                return AuthorPattern {
                    pattern: escape_basic_regex(&value),
                    extended: false,
                };
            }
        }
        debug!(repo = %repo.display(), "No git identity found, not filtering by author");
        AuthorPattern::default()
    }
}

/// Escape a literal for a POSIX basic regular expression (git's default)
#[must_use]
pub fn escape_basic_regex(value: &str) -> String {
    escape_with(value, BASIC_REGEX_SPECIALS)
}

/// Escape a literal for a POSIX extended regular expression
#[must_use]
pub fn escape_extended_regex(value: &str) -> String {
    escape_with(value, EXTENDED_REGEX_SPECIALS)
}

fn escape_with(value: &str, specials: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if specials.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeGit;
    use similar_asserts::assert_eq;

    fn repo() -> &'static Path {
        Path::new("/repos/a")
    }

    #[test]
    fn test_explicit_pattern_is_verbatim() {
        let git = FakeGit::default();
        let resolved = AuthorResolver::new(&git).resolve(repo(), &"Alice".into());
        assert_eq!(
            resolved,
            AuthorPattern {
                pattern: "Alice".to_string(),
                extended: false
            }
        );
    }

    #[test]
    fn test_alternation_enables_extended_regex() {
        let git = FakeGit::default();
        let resolved = AuthorResolver::new(&git).resolve(repo(), &"alice|bob".into());
        assert_eq!(resolved.pattern, "alice|bob");
        assert!(resolved.extended);
    }

    #[test]
    fn test_explicit_pattern_is_not_escaped() {
        let git = FakeGit::default();
        let resolved = AuthorResolver::new(&git).resolve(repo(), &"a.lice@x.com".into());
        assert_eq!(resolved.pattern, "a.lice@x.com");
    }

    #[test]
    fn test_identity_prefers_local_email() {
        let git = FakeGit::default()
            .with_config("user.email", ConfigScope::Local, "local@example.com")
            .with_config("user.email", ConfigScope::Global, "global@example.com")
            .with_config("user.name", ConfigScope::Local, "Local Name");
        let resolved = AuthorResolver::new(&git).resolve(repo(), &AuthorFilter::Identity);
        assert_eq!(resolved.pattern, "local@example\\.com");
        assert!(!resolved.extended);
    }

    #[test]
    fn test_identity_falls_back_to_global_email_before_names() {
        let git = FakeGit::default()
            .with_config("user.email", ConfigScope::Global, "global@example.com")
            .with_config("user.name", ConfigScope::Local, "Local Name");
        let resolved = AuthorResolver::new(&git).resolve(repo(), &AuthorFilter::Identity);
        assert_eq!(resolved.pattern, "global@example\\.com");
    }

    #[test]
    fn test_identity_falls_back_to_name() {
        let git = FakeGit::default().with_config("user.name", ConfigScope::Global, "Jane Doe");
        let resolved = AuthorResolver::new(&git).resolve(repo(), &AuthorFilter::Identity);
        assert_eq!(resolved.pattern, "Jane Doe");
    }

    #[test]
    fn test_no_identity_means_no_filter() {
        let git = FakeGit::default();
        let resolved = AuthorResolver::new(&git).resolve(repo(), &AuthorFilter::Identity);
        assert!(resolved.is_empty());
        assert!(!resolved.extended);
    }

    #[test]
    fn test_list_of_identities_becomes_escaped_alternation() {
        let git = FakeGit::default();
        let filter = AuthorFilter::from_list(["alice@x.com", " ", "bob (work)"]);
        let resolved = AuthorResolver::new(&git).resolve(repo(), &filter);
        assert_eq!(resolved.pattern, "alice@x\\.com|bob \\(work\\)");
        assert!(resolved.extended);
    }

    #[test]
    fn test_single_item_list_is_plain_pattern() {
        assert_eq!(
            AuthorFilter::from_list(["  alice  "]),
            AuthorFilter::Pattern("alice".to_string())
        );
        assert_eq!(
            AuthorFilter::from_list(Vec::<String>::new()),
            AuthorFilter::Identity
        );
    }

    #[test]
    fn test_blank_string_means_identity() {
        assert_eq!(AuthorFilter::from("   "), AuthorFilter::Identity);
    }

    #[test]
    fn test_escape_basic_leaves_plus_alone() {
        assert_eq!(escape_basic_regex("a+b@x.com"), "a+b@x\\.com");
        assert_eq!(escape_extended_regex("a+b@x.com"), "a\\+b@x\\.com");
    }
}
