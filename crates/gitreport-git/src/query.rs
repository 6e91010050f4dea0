// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The version-control query seam
//!
//! All git access goes through [`GitQuery`]. Each query is a blocking
//! request/response whose result is a [`QueryOutcome`]; parsing of the captured
//! text happens in the modules that consume it.

use std::path::Path;

use tracing::debug;

use crate::author::AuthorPattern;
use crate::commit::{DateWindow, LOG_FIELD_SEPARATOR};

/// Result of one git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The command exited successfully with this stdout
    Success(String),
    /// The git executable could not be started
    ToolUnavailable(String),
    /// The command ran but exited unsuccessfully
    NonZeroExit {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured stderr
        stderr: String,
    },
    /// The command exceeded the configured timeout and was killed
    TimedOut,
}

impl QueryOutcome {
    /// Whether the command exited successfully
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The captured stdout of a successful, non-blank result
    ///
    /// Every other outcome is treated as "no results" and logged at debug level.
    #[must_use]
    pub fn into_output(self) -> Option<String> {
        match self {
            Self::Success(stdout) if !stdout.trim().is_empty() => Some(stdout),
            Self::Success(_) => None,
            Self::ToolUnavailable(reason) => {
                debug!(%reason, "git is unavailable");
                None
            }
            Self::NonZeroExit { code, stderr } => {
                debug!(?code, stderr = %stderr.trim(), "git exited unsuccessfully");
                None
            }
            Self::TimedOut => {
                debug!("git query timed out");
                None
            }
        }
    }

    /// The trimmed stdout of a successful result, or an empty string
    #[must_use]
    pub fn output_or_empty(self) -> String {
        self.into_output()
            .map(|out| out.trim().to_string())
            .unwrap_or_default()
    }
}

/// Which configuration file a config lookup reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigScope {
    /// The repository's own `.git/config`
    Local,
    /// The user's global configuration
    Global,
}

/// Parameters of the commit listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogQuery<'a> {
    /// Days to include
    pub window: DateWindow,
    /// Author filter; an empty pattern disables filtering
    pub author: &'a AuthorPattern,
}

impl<'a> LogQuery<'a> {
    /// Create a query for one author within a window
    #[must_use]
    pub fn new(window: DateWindow, author: &'a AuthorPattern) -> Self {
        Self { window, author }
    }

    /// Arguments following `git -C <repo>`
    ///
    /// Lists commits from all refs, one per line, as
    /// `date<US>subject<US>hash` with short dates.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--all".to_string(),
            format!("--since={}", self.window.since_arg()),
            format!("--until={}", self.window.until_arg()),
        ];
        if !self.author.is_empty() {
            if self.author.extended {
                args.push("--extended-regexp".to_string());
            }
            args.push(format!("--author={}", self.author.pattern));
        }
        let sep = format!("%x{:02x}", u32::from(LOG_FIELD_SEPARATOR));
        args.push(format!("--pretty=format:%ad{sep}%s{sep}%H"));
        args.push("--date=short".to_string());
        args
    }
}

/// The git queries the report pipeline depends on
pub trait GitQuery {
    /// List commits matching `query` across all refs
    fn log(&self, repo: &Path, query: &LogQuery<'_>) -> QueryOutcome;

    /// List local branches containing a commit
    fn branches_containing(&self, repo: &Path, sha: &str) -> QueryOutcome;

    /// Print a commit followed by its parent hashes
    fn parents(&self, repo: &Path, sha: &str) -> QueryOutcome;

    /// Read one configuration value
    fn config_value(&self, repo: &Path, key: &str, scope: ConfigScope) -> QueryOutcome;

    /// List remotes with their URLs (`git remote -v`)
    fn remotes(&self, repo: &Path) -> QueryOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use similar_asserts::assert_eq;

    fn window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_log_args_without_author() {
        let author = AuthorPattern::default();
        let args = LogQuery::new(window(), &author).args();
        assert_eq!(
            args,
            vec![
                "log",
                "--all",
                "--since=2024-01-01 00:00:00",
                "--until=2024-01-07 23:59:59",
                "--pretty=format:%ad%x1f%s%x1f%H",
                "--date=short",
            ]
        );
    }

    #[test]
    fn test_log_args_with_extended_author() {
        let author = AuthorPattern {
            pattern: "alice|bob".to_string(),
            extended: true,
        };
        let args = LogQuery::new(window(), &author).args();
        assert!(args.contains(&"--extended-regexp".to_string()));
        assert!(args.contains(&"--author=alice|bob".to_string()));
    }

    #[test]
    fn test_log_args_with_basic_author() {
        let author = AuthorPattern {
            pattern: "alice@example\\.com".to_string(),
            extended: false,
        };
        let args = LogQuery::new(window(), &author).args();
        assert!(!args.contains(&"--extended-regexp".to_string()));
        assert!(args.contains(&"--author=alice@example\\.com".to_string()));
    }

    #[test]
    fn test_into_output_only_for_non_blank_success() {
        assert_eq!(
            QueryOutcome::Success("abc\n".to_string()).into_output(),
            Some("abc\n".to_string())
        );
        assert_eq!(QueryOutcome::Success("  \n".to_string()).into_output(), None);
        assert_eq!(QueryOutcome::TimedOut.into_output(), None);
        assert_eq!(
            QueryOutcome::ToolUnavailable("not found".to_string()).into_output(),
            None
        );
        let failed = QueryOutcome::NonZeroExit {
            code: Some(128),
            stderr: "fatal: not a git repository".to_string(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.into_output(), None);
    }

    #[test]
    fn test_output_or_empty_trims() {
        assert_eq!(
            QueryOutcome::Success(" alice@example.com\n".to_string()).output_or_empty(),
            "alice@example.com"
        );
        assert_eq!(QueryOutcome::TimedOut.output_or_empty(), "");
    }
}
