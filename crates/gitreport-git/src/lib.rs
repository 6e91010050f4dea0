// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitreport-git: repository discovery and commit extraction for gitreport
//!
//! This library crate finds local repositories, resolves which author to report
//! on, and turns an author's commits in a date window into typed
//! [`RawCommitLine`] values classified by the branch families they reached.
//! Every interaction with git goes through the [`GitQuery`] trait.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use gitreport_git::{AuthorFilter, AuthorResolver, CommitExtractor, DateWindow, GitCli};
//!
//! let git = GitCli::new();
//! let repo = std::path::Path::new(".");
//! let window = DateWindow::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
//! )
//! .expect("valid window");
//!
//! let author = AuthorResolver::new(&git).resolve(repo, &AuthorFilter::Identity);
//! let lines = CommitExtractor::new(&git)
//!     .extract(repo, &author, window)
//!     .expect("extract commits");
//!
//! for line in lines {
//!     println!("{} {} [{}]", line.date, line.message, line.branch_status);
//! }
//! ```

#![warn(missing_docs)]

pub mod author;
pub mod classify;
pub mod cli;
pub mod commit;
pub mod error;
pub mod extract;
pub mod locator;
pub mod query;

#[cfg(test)]
pub(crate) mod fake;

pub use author::{AuthorFilter, AuthorPattern, AuthorResolver};
pub use classify::{classify_branches, classify_commit};
pub use cli::GitCli;
pub use commit::{BranchStatus, DateWindow, LogEntry, RawCommitLine};
pub use error::GitError;
pub use extract::{CommitExtractor, project_name};
pub use locator::{LocatorOptions, RepoLocator, is_repository};
pub use query::{ConfigScope, GitQuery, LogQuery, QueryOutcome};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::author::{AuthorFilter, AuthorPattern, AuthorResolver};
    pub use crate::cli::GitCli;
    pub use crate::commit::{BranchStatus, DateWindow, RawCommitLine};
    pub use crate::error::GitError;
    pub use crate::extract::CommitExtractor;
    pub use crate::locator::{LocatorOptions, RepoLocator};
    pub use crate::query::{GitQuery, QueryOutcome};
}
