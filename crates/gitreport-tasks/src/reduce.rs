// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-day task reduction
//!
//! Commits are grouped by day (newest first) and, within a day, by
//! (project, normalized message). Each group becomes one task whose status
//! follows the most advanced branch family any of its commits reached.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use gitreport_git::{BranchStatus, RawCommitLine};

use crate::normalize::{clean_commit_message, normalize_message_for_dedup};
use crate::task::{TaskRecord, TaskStatus};

/// Deduplication key of a commit: project name and normalized message
pub type TaskKey = (String, String);

fn task_key(line: &RawCommitLine) -> TaskKey {
    let message = normalize_message_for_dedup(&clean_commit_message(&line.message));
    (line.repository_name.clone(), message)
}

/// Reduce commit lines to task records
///
/// Days are processed newest first and keys keep their first-seen order
/// within a day. The same key on different days yields one task per day.
/// Empty input produces the placeholder row.
#[must_use]
pub fn reduce_commits(lines: &[RawCommitLine]) -> Vec<TaskRecord> {
    if lines.is_empty() {
        return vec![TaskRecord::placeholder()];
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<&RawCommitLine>> = BTreeMap::new();
    for line in lines {
        by_day.entry(line.date).or_default().push(line);
    }

    let mut tasks = Vec::new();
    for day_lines in by_day.values().rev() {
        let mut order: Vec<TaskKey> = Vec::new();
        let mut statuses: HashMap<TaskKey, Vec<BranchStatus>> = HashMap::new();
        for line in day_lines {
            let key = task_key(line);
            if key.1.is_empty() {
                continue;
            }
            let seen = statuses.entry(key.clone()).or_default();
            if seen.is_empty() {
                order.push(key);
            }
            seen.push(line.branch_status);
        }

        for key in order {
            let best = BranchStatus::highest(statuses.remove(&key).unwrap_or_default());
            let (repository_name, content) = key;
            tasks.push(TaskRecord::new(content, repository_name, TaskStatus::from_branch(best)));
        }
    }
    tasks
}

/// Number of commits per day, oldest day first
#[must_use]
pub fn commits_by_date(lines: &[RawCommitLine]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for line in lines {
        *counts.entry(line.date).or_insert(0) += 1;
    }
    counts
}

/// Number of distinct (project, normalized message) keys across all days
#[must_use]
pub fn estimate_unique_tasks(lines: &[RawCommitLine]) -> usize {
    lines
        .iter()
        .map(task_key)
        .filter(|(_, message)| !message.is_empty())
        .collect::<HashSet<_>>()
        .len()
}
