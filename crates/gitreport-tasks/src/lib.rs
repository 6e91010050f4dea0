// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitreport-tasks: turning commits into report tasks
//!
//! This library crate reduces [`RawCommitLine`](gitreport_git::RawCommitLine)
//! values into deduplicated [`TaskRecord`]s, computes report periods, and
//! builds and persists the [`Report`].
//!
//! The reduction runs in two passes: [`reduce_commits`] collapses commits of
//! the same day and project with the same normalized message, and
//! [`deduplicate_tasks`] collapses the survivors across days.

#![warn(missing_docs)]

pub mod dedup;
pub mod error;
pub mod normalize;
pub mod period;
pub mod reduce;
pub mod report;
pub mod task;

pub use dedup::deduplicate_tasks;
pub use error::ReportError;
pub use normalize::{clean_commit_message, normalize_message_for_dedup};
pub use period::{PeriodKind, PeriodOptions, ReportPeriod};
pub use reduce::{commits_by_date, estimate_unique_tasks, reduce_commits};
pub use report::{ProjectTasks, Report, Statistics};
pub use task::{TaskRecord, TaskStatus};
