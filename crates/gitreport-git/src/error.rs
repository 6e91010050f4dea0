// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitreport-git

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while extracting commits from a repository
///
/// Query failures are not errors: a failed or empty git call is treated as
/// "no results". Only data-integrity problems surface here.
#[derive(Debug, Error)]
pub enum GitError {
    /// The repository has qualifying commits but no README to name the project
    #[error("Repository {path} has commits in range but no README.md to derive a project name")]
    MissingReadme {
        /// The repository path
        path: String,
    },

    /// A date window whose start lies after its end
    #[error("Invalid date window: {start} is after {end}")]
    InvalidDateWindow {
        /// First day of the window
        start: NaiveDate,
        /// Last day of the window
        end: NaiveDate,
    },
}
