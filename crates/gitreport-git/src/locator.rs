// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository discovery
//!
//! Walks configured root directories looking for git working trees, optionally
//! keeping only repositories whose remotes point at one of a set of hosts.
//! Discovery never fails: unreadable directories are skipped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::query::GitQuery;

/// Entry marking a directory as a git working tree
pub const REPOSITORY_MARKER: &str = ".git";

/// Default traversal depth below each root
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Where and how to look for repositories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Directories to scan
    pub roots: Vec<PathBuf>,
    /// Repositories to use as-is; overrides discovery when non-empty
    pub explicit: Vec<PathBuf>,
    /// Remote URL substrings; empty keeps every repository
    pub url_patterns: Vec<String>,
    /// Deepest directory level examined below a root
    pub max_depth: usize,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            explicit: Vec::new(),
            url_patterns: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Check whether a directory is the top of a git working tree
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.join(REPOSITORY_MARKER).exists()
}

/// Find repositories below `root`, not descending into a repository once found
///
/// The root itself is depth 0. Directories deeper than `max_depth` are not
/// examined.
#[must_use]
pub fn find_repositories(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable directory");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if is_repository(entry.path()) {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    found
}

/// Parse `git remote -v` output into the set of remote URLs
#[must_use]
pub fn parse_remote_urls(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}

/// Whether any URL contains any non-empty pattern (plain substring test)
#[must_use]
pub fn matches_remote_patterns<U, P>(urls: &[U], patterns: &[P]) -> bool
where
    U: AsRef<str>,
    P: AsRef<str>,
{
    urls.iter().any(|url| {
        let url: &str = url.as_ref();
        patterns.iter().any(|pattern| {
            let pattern: &str = pattern.as_ref();
            !pattern.is_empty() && url.contains(pattern)
        })
    })
}

/// Locates the repositories a report covers
pub struct RepoLocator<'g, G: ?Sized> {
    git: &'g G,
}

impl<'g, G: GitQuery + ?Sized> RepoLocator<'g, G> {
    /// Create a locator using the given git backend for remote lookups
    #[must_use]
    pub fn new(git: &'g G) -> Self {
        Self { git }
    }

    /// Resolve the repository list for a run
    ///
    /// Explicit repositories win. Without roots, the current directory is used
    /// only if it is itself a repository. Otherwise the roots are scanned.
    pub fn locate(&self, options: &LocatorOptions, cwd: &Path) -> Vec<PathBuf> {
        if !options.explicit.is_empty() {
            debug!(count = options.explicit.len(), "Using explicit repository list");
            return options.explicit.clone();
        }
        if options.roots.is_empty() {
            if is_repository(cwd) {
                return vec![cwd.to_path_buf()];
            }
            info!(cwd = %cwd.display(), "No roots configured and current directory is not a repository");
            return Vec::new();
        }
        self.discover(&options.roots, options.max_depth, &options.url_patterns)
    }

    /// Scan roots and keep repositories matching the remote patterns
    ///
    /// The result is sorted and free of duplicates.
    pub fn discover<P: AsRef<Path>>(
        &self,
        roots: &[P],
        max_depth: usize,
        url_patterns: &[String],
    ) -> Vec<PathBuf> {
        let mut repos = BTreeSet::new();
        for root in roots {
            let root = root.as_ref();
            if !root.is_dir() {
                debug!(root = %root.display(), "Skipping missing repository root");
                continue;
            }
            let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
            for repo in find_repositories(&root, max_depth) {
                if self.matches_remotes(&repo, url_patterns) {
                    repos.insert(repo);
                } else {
                    debug!(repo = %repo.display(), "Skipping repository with non-matching remotes");
                }
            }
        }
        repos.into_iter().collect()
    }

    fn matches_remotes(&self, repo: &Path, url_patterns: &[String]) -> bool {
        if url_patterns.is_empty() {
            return true;
        }
        let urls: Vec<String> = self
            .git
            .remotes(repo)
            .into_output()
            .map(|output| parse_remote_urls(&output).into_iter().collect())
            .unwrap_or_default();
        matches_remote_patterns(&urls, url_patterns)
    }
}
