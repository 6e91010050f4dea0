// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Cross-day deduplication
//!
//! The reducer keeps one task per key and day; this pass collapses those to
//! one task per key for the whole period and labels each with its project.

use std::collections::HashMap;

use tracing::debug;

use crate::normalize::normalize_message_for_dedup;
use crate::reduce::TaskKey;
use crate::task::{TaskRecord, status_priority};

/// Display prefix naming a task's project
#[must_use]
pub fn project_prefix(repository_name: &str) -> String {
    format!("【{repository_name}】 ")
}

/// Collapse tasks sharing (project, normalized content) across all days
///
/// The most complete status wins (done, then testing, then pending test);
/// ties keep the first task seen. Winning content is normalized and prefixed
/// with the project name. Empty tasks are dropped, and if nothing remains the
/// result is the placeholder row.
#[must_use]
pub fn deduplicate_tasks(tasks: Vec<TaskRecord>) -> Vec<TaskRecord> {
    let mut order: Vec<TaskKey> = Vec::new();
    let mut best: HashMap<TaskKey, TaskRecord> = HashMap::new();

    for task in tasks {
        let content = normalize_message_for_dedup(&task.content);
        if content.is_empty() {
            continue;
        }
        let key = (task.repository_name.clone(), content);
        match best.get_mut(&key) {
            Some(current) => {
                if status_priority(task.status) < status_priority(current.status) {
                    debug!(project = %key.0, task = %key.1, status = ?task.status, "Preferring more complete duplicate");
                    *current = task;
                }
            }
            None => {
                order.push(key.clone());
                best.insert(key, task);
            }
        }
    }

    let deduplicated: Vec<TaskRecord> = order
        .into_iter()
        .filter_map(|key| {
            let mut task = best.remove(&key)?;
            task.content = format!("{}{}", project_prefix(&key.0), key.1);
            Some(task)
        })
        .collect();

    if deduplicated.is_empty() {
        vec![TaskRecord::placeholder()]
    } else {
        deduplicated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use similar_asserts::assert_eq;

    #[test]
    fn test_prefixes_content_with_project() {
        let tasks = vec![TaskRecord::new("retry upload", "ProjA", TaskStatus::Done)];
        let out = deduplicate_tasks(tasks);
        assert_eq!(out[0].content, "【ProjA】 retry upload");
        assert_eq!(out[0].repository_name, "ProjA");
    }

    #[test]
    fn test_done_beats_testing_beats_pending() {
        let tasks = vec![
            TaskRecord::new("parser", "ProjA", TaskStatus::PendingTest),
            TaskRecord::new("parser", "ProjA", TaskStatus::Testing),
            TaskRecord::new("parser 2", "ProjA", TaskStatus::Done),
        ];
        let out = deduplicate_tasks(tasks);
        assert_eq!(
            out,
            vec![TaskRecord::new("【ProjA】 parser", "ProjA", TaskStatus::Done)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let mut first = TaskRecord::new("parser", "ProjA", TaskStatus::Testing);
        first.notes = "first".to_string();
        let mut second = TaskRecord::new("parser", "ProjA", TaskStatus::Testing);
        second.notes = "second".to_string();

        let out = deduplicate_tasks(vec![first, second]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].notes, "first");
    }

    #[test]
    fn test_key_order_is_first_seen() {
        let tasks = vec![
            TaskRecord::new("b", "ProjB", TaskStatus::Done),
            TaskRecord::new("a", "ProjA", TaskStatus::Done),
            TaskRecord::new("b", "ProjB", TaskStatus::Testing),
        ];
        let contents: Vec<String> = deduplicate_tasks(tasks).into_iter().map(|t| t.content).collect();
        assert_eq!(contents, vec!["【ProjB】 b", "【ProjA】 a"]);
    }

    #[test]
    fn test_same_content_different_projects_both_kept() {
        let tasks = vec![
            TaskRecord::new("bump deps", "ProjA", TaskStatus::Done),
            TaskRecord::new("bump deps", "ProjB", TaskStatus::Done),
        ];
        assert_eq!(deduplicate_tasks(tasks).len(), 2);
    }

    #[test]
    fn test_placeholder_only_input_stays_placeholder() {
        let out = deduplicate_tasks(vec![TaskRecord::placeholder()]);
        assert_eq!(out, vec![TaskRecord::placeholder()]);
    }

    #[test]
    fn test_empty_input_gives_placeholder() {
        assert_eq!(deduplicate_tasks(Vec::new()), vec![TaskRecord::placeholder()]);
    }

    #[test]
    fn test_missing_status_loses_to_any_status() {
        let mut unset = TaskRecord::new("x", "P", TaskStatus::Done);
        unset.status = None;
        let tasks = vec![unset, TaskRecord::new("x", "P", TaskStatus::PendingTest)];
        let out = deduplicate_tasks(tasks);
        assert_eq!(out[0].status, Some(TaskStatus::PendingTest));
    }
}
