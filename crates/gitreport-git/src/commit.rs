//! Commit types produced by the extraction pipeline

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// Field separator of the `git log` pretty format (ASCII unit separator)
pub const LOG_FIELD_SEPARATOR: char = '\u{1f}';

/// Integration state of a commit, by the most advanced branch family containing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchStatus {
    /// Reached a release branch
    Release,
    /// Reached a `zsxr*` branch
    Zsxr,
    /// Reached a pre-test branch
    PreTest,
    /// Only on feature branches
    Feature,
    /// On branches matching no known family
    Other,
    /// Not contained in any local branch
    Unknown,
}

/// Branch statuses from highest to lowest integration priority
pub const BRANCH_PRIORITY: [BranchStatus; 6] = [
    BranchStatus::Release,
    BranchStatus::Zsxr,
    BranchStatus::PreTest,
    BranchStatus::Feature,
    BranchStatus::Other,
    BranchStatus::Unknown,
];

impl BranchStatus {
    /// Position in [`BRANCH_PRIORITY`]; lower ranks win
    #[must_use]
    pub fn rank(self) -> usize {
        BRANCH_PRIORITY
            .iter()
            .position(|status| *status == self)
            .unwrap_or(BRANCH_PRIORITY.len())
    }

    /// Pick the highest-priority status, or `Unknown` when there is none
    pub fn highest(statuses: impl IntoIterator<Item = BranchStatus>) -> BranchStatus {
        statuses
            .into_iter()
            .min_by_key(|status| status.rank())
            .unwrap_or(BranchStatus::Unknown)
    }

    /// The wire name of this status
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Zsxr => "zsxr",
            Self::PreTest => "pre-test",
            Self::Feature => "feature",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BRANCH_PRIORITY
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("unknown branch status: {s}"))
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateWindow")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked serialized form of a [`DateWindow`]
#[derive(Deserialize)]
struct RawDateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateWindow> for DateWindow {
    type Error = GitError;

    fn try_from(raw: RawDateWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateWindow {
    /// Create a window covering `start..=end`
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidDateWindow` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, GitError> {
        if start > end {
            return Err(GitError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// A window covering a single day
    #[must_use]
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First day of the window
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check whether a day falls inside the window
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// `--since` value: the first second of the start day
    #[must_use]
    pub fn since_arg(&self) -> String {
        format!("{} 00:00:00", self.start.format("%Y-%m-%d"))
    }

    /// `--until` value: the last second of the end day
    #[must_use]
    pub fn until_arg(&self) -> String {
        format!("{} 23:59:59", self.end.format("%Y-%m-%d"))
    }
}

/// One line of `git log` output, parsed into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Author date (short form)
    pub date: NaiveDate,
    /// Subject line of the commit message
    pub subject: String,
    /// Commit hash, absent when the line was truncated or malformed
    pub sha: Option<String>,
}

impl LogEntry {
    /// Parse a `date<US>subject<US>hash` line
    ///
    /// A missing or invalid hash yields an entry without one. Lines without a
    /// subject or with an unparseable date yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.splitn(3, LOG_FIELD_SEPARATOR);
        let date = NaiveDate::parse_from_str(fields.next()?.trim(), "%Y-%m-%d").ok()?;
        let subject = fields.next()?.trim().to_string();
        let sha = fields
            .next()
            .map(str::trim)
            .filter(|sha| is_valid_sha(sha))
            .map(str::to_string);

        Some(Self { date, subject, sha })
    }
}

/// Validate a full commit hash (SHA-1 or SHA-256 hex)
#[must_use]
pub fn is_valid_sha(sha: &str) -> bool {
    matches!(sha.len(), 40 | 64) && sha.chars().all(|c| c.is_ascii_hexdigit())
}

/// A non-merge commit by the reported author, ready for task reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommitLine {
    /// Author date of the commit
    pub date: NaiveDate,
    /// Commit subject line
    pub message: String,
    /// Project display name of the owning repository
    pub repository_name: String,
    /// Most advanced branch family containing the commit
    pub branch_status: BranchStatus,
}

/// Stable sort, newest day first; commits of the same day keep their order
pub fn sort_newest_first(lines: &mut [RawCommitLine]) {
    lines.sort_by(|a, b| b.date.cmp(&a.date));
}
