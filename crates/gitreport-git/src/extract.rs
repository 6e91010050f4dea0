// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit extraction
//!
//! Lists an author's commits in a date window, drops merges (by subject text
//! and by parent count), names the project from its README and classifies
//! every remaining commit by the branches containing it.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::author::AuthorPattern;
use crate::classify::classify_commit;
use crate::commit::{BranchStatus, DateWindow, LogEntry, RawCommitLine, sort_newest_first};
use crate::error::GitError;
use crate::query::{GitQuery, LogQuery};

/// README file names tried, in order, when naming a project
pub const README_CANDIDATES: [&str; 3] = ["README.md", "readme.md", "Readme.md"];

/// Subject phrases git generates for merges
pub const MERGE_PHRASES: [&str; 3] = [
    "Merge branch",
    "Merge pull request",
    "Merge remote-tracking branch",
];

/// Whether a subject line reads like a merge
#[must_use]
pub fn is_merge_subject(subject: &str) -> bool {
    MERGE_PHRASES.iter().any(|phrase| subject.contains(phrase))
        || subject.to_lowercase().contains("merge")
}

/// Parent hashes from `git rev-list --parents -n 1` output
///
/// The first token is the commit itself and is skipped.
#[must_use]
pub fn parse_parents(output: &str) -> Vec<String> {
    output
        .split_whitespace()
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// The first non-empty line of a README with leading `#` marks removed
#[must_use]
pub fn readme_title(contents: &str) -> Option<String> {
    contents
        .lines()
        .map(strip_heading_marks)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Strip `#` marks and whitespace until neither leads the line
fn strip_heading_marks(line: &str) -> &str {
    let mut current = line.trim();
    loop {
        let next = current.trim_start_matches('#').trim();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// The project display name of a repository, read from its README
#[must_use]
pub fn project_name(repo: &Path) -> Option<String> {
    README_CANDIDATES.iter().find_map(|name| {
        let contents = fs::read_to_string(repo.join(name)).ok()?;
        readme_title(&contents)
    })
}

/// Extracts report-ready commit lines from one repository
pub struct CommitExtractor<'g, G: ?Sized> {
    git: &'g G,
}

impl<'g, G: GitQuery + ?Sized> CommitExtractor<'g, G> {
    /// Create an extractor using the given git backend
    #[must_use]
    pub fn new(git: &'g G) -> Self {
        Self { git }
    }

    /// Extract the author's non-merge commits in `window`, newest day first
    ///
    /// A failed or empty log query yields no commits.
    ///
    /// # Errors
    ///
    /// Returns `GitError::MissingReadme` if commits qualify but the repository
    /// has no README to name the project after.
    pub fn extract(
        &self,
        repo: &Path,
        author: &AuthorPattern,
        window: DateWindow,
    ) -> Result<Vec<RawCommitLine>, GitError> {
        let query = LogQuery::new(window, author);
        let Some(output) = self.git.log(repo, &query).into_output() else {
            debug!(repo = %repo.display(), "No commits in window");
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for line in output.lines() {
            let Some(entry) = LogEntry::parse(line) else {
                debug!(repo = %repo.display(), line, "Skipping malformed log line");
                continue;
            };
            if !window.contains(entry.date) {
                debug!(repo = %repo.display(), date = %entry.date, "Skipping commit dated outside window");
                continue;
            }
            if is_merge_subject(&entry.subject) {
                debug!(repo = %repo.display(), subject = %entry.subject, "Skipping merge by subject");
                continue;
            }
            if let Some(sha) = entry.sha.as_deref()
                && self.is_merge_commit(repo, sha)
            {
                debug!(repo = %repo.display(), sha, "Skipping merge by parent count");
                continue;
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let project = project_name(repo).ok_or_else(|| GitError::MissingReadme {
            path: repo.display().to_string(),
        })?;

        let mut lines: Vec<RawCommitLine> = entries
            .into_iter()
            .map(|entry| {
                let branch_status = match entry.sha.as_deref() {
                    Some(sha) => classify_commit(self.git, repo, sha),
                    None => BranchStatus::Unknown,
                };
                RawCommitLine {
                    date: entry.date,
                    message: entry.subject,
                    repository_name: project.clone(),
                    branch_status,
                }
            })
            .collect();
        sort_newest_first(&mut lines);

        info!(repo = %repo.display(), project = %project, commits = lines.len(), "Extracted commits");
        Ok(lines)
    }

    /// A commit with more than one parent is a merge; a failed lookup is not
    fn is_merge_commit(&self, repo: &Path, sha: &str) -> bool {
        let parents = self
            .git
            .parents(repo, sha)
            .into_output()
            .map(|output| parse_parents(&output))
            .unwrap_or_default();
        parents.len() > 1
    }
}
