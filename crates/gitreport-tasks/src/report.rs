// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The persisted report
//!
//! Tasks are grouped by project in encounter order and summarized in
//! statistics. Reports are stored as pretty-printed JSON named after the
//! report type and the last day of the period.

use std::fs;
use std::path::{Path, PathBuf};

use gitreport_git::DateWindow;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReportError;
use crate::period::{PeriodKind, ReportPeriod};
use crate::task::{TaskRecord, TaskStatus};

/// Aggregate counts over a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Commits extracted before any deduplication
    pub total_commits: usize,
    /// Rows in the report
    pub total_tasks: usize,
    /// Rows with status done
    pub completed: usize,
    /// Rows with status testing
    pub testing: usize,
    /// Rows with status pending test
    pub pending_test: usize,
}

impl Statistics {
    fn tally(tasks: &[TaskRecord], total_commits: usize) -> Self {
        let count = |status| tasks.iter().filter(|task| task.status == Some(status)).count();
        Self {
            total_commits,
            total_tasks: tasks.len(),
            completed: count(TaskStatus::Done),
            testing: count(TaskStatus::Testing),
            pending_test: count(TaskStatus::PendingTest),
        }
    }
}

/// The tasks of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTasks {
    /// Project display name
    pub project_name: String,
    /// Tasks in report order
    pub tasks: Vec<TaskRecord>,
}

/// A finished work report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// daily, weekly or monthly
    pub report_type: PeriodKind,
    /// Days covered
    pub period: DateWindow,
    /// Aggregate counts
    pub statistics: Statistics,
    /// Tasks grouped by project
    pub projects: Vec<ProjectTasks>,
}

impl Report {
    /// Build a report from the final task list
    ///
    /// `total_commits` is the number of commits before deduplication.
    #[must_use]
    pub fn build(period: ReportPeriod, tasks: Vec<TaskRecord>, total_commits: usize) -> Self {
        let statistics = Statistics::tally(&tasks, total_commits);

        let mut projects: Vec<ProjectTasks> = Vec::new();
        for task in tasks {
            match projects
                .iter_mut()
                .find(|project| project.project_name == task.repository_name)
            {
                Some(project) => project.tasks.push(task),
                None => projects.push(ProjectTasks {
                    project_name: task.repository_name.clone(),
                    tasks: vec![task],
                }),
            }
        }

        Self {
            report_type: period.kind,
            period: period.window,
            statistics,
            projects,
        }
    }

    /// All tasks in report order
    pub fn tasks(&self) -> impl Iterator<Item = &TaskRecord> {
        self.projects.iter().flat_map(|project| project.tasks.iter())
    }

    /// File name of this report, e.g. `weekly_report_2024-01-07.json`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}_report_{}.json",
            self.report_type.label(),
            self.period.end().format("%Y-%m-%d")
        )
    }

    /// Write the report into `dir`, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(dir).map_err(|source| ReportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), tasks = self.statistics.total_tasks, "Saved report");
        Ok(path)
    }

    /// Read a report written by [`Report::save`]
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid report.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let json = fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
