// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report line items and their completion status

use std::fmt;
use std::str::FromStr;

use gitreport_git::BranchStatus;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Completion criterion recorded for every derived task
pub const COMPLETION_STANDARD: &str = "development completed and committed";

/// Completion state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Shipped or merged into a delivery branch
    Done,
    /// Under test
    Testing,
    /// Still on a feature branch
    PendingTest,
}

/// Completion statuses in preference order when duplicates disagree
pub const STATUS_PRIORITY: [TaskStatus; 3] =
    [TaskStatus::Done, TaskStatus::Testing, TaskStatus::PendingTest];

/// Completion status implied by each branch family
pub const COMPLETION_TABLE: [(BranchStatus, TaskStatus); 6] = [
    (BranchStatus::Release, TaskStatus::Done),
    (BranchStatus::Zsxr, TaskStatus::Done),
    (BranchStatus::PreTest, TaskStatus::Testing),
    (BranchStatus::Feature, TaskStatus::PendingTest),
    (BranchStatus::Other, TaskStatus::Done),
    (BranchStatus::Unknown, TaskStatus::Done),
];

impl TaskStatus {
    /// Completion status for a branch family
    #[must_use]
    pub fn from_branch(branch: BranchStatus) -> Self {
        COMPLETION_TABLE
            .iter()
            .find(|(status, _)| *status == branch)
            .map_or(Self::Done, |(_, task)| *task)
    }

    /// Priority value: done 1, testing 2, pending test 3
    #[must_use]
    pub fn priority(self) -> usize {
        STATUS_PRIORITY
            .iter()
            .position(|status| *status == self)
            .map_or(STATUS_PRIORITY.len() + 1, |idx| idx + 1)
    }

    /// The wire name of this status
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Testing => "testing",
            Self::PendingTest => "pending_test",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_PRIORITY
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("unknown task status: {s}"))
    }
}

/// Priority of an optional status; a missing status ranks after all others
#[must_use]
pub fn status_priority(status: Option<TaskStatus>) -> usize {
    status.map_or(STATUS_PRIORITY.len() + 1, TaskStatus::priority)
}

/// One report line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// What was done
    pub content: String,
    /// How completion is judged
    pub completion_standard: String,
    /// Completion state; absent only on the placeholder row
    #[serde(with = "optional_status")]
    pub status: Option<TaskStatus>,
    /// Free-form notes, left empty
    pub notes: String,
    /// Project the task belongs to
    pub repository_name: String,
}

impl TaskRecord {
    /// A task derived from commits of one project
    #[must_use]
    pub fn new(content: impl Into<String>, repository_name: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            content: content.into(),
            completion_standard: COMPLETION_STANDARD.to_string(),
            status: Some(status),
            notes: String::new(),
            repository_name: repository_name.into(),
        }
    }

    /// The all-empty row emitted when there is nothing to report
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            content: String::new(),
            completion_standard: String::new(),
            status: None,
            notes: String::new(),
            repository_name: String::new(),
        }
    }

    /// Whether this is the all-empty placeholder row
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

/// Serializes a missing status as the empty string
mod optional_status {
    use super::*;

    pub fn serialize<S: Serializer>(status: &Option<TaskStatus>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(status.map_or("", TaskStatus::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TaskStatus>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
