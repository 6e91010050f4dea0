// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The report pipeline
//!
//! Locates repositories, extracts the author's commits from each one in turn,
//! then reduces and deduplicates them into a [`Report`]. A repository that
//! fails is recorded and skipped; it never stops the run.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gitreport_git::commit::sort_newest_first;
use gitreport_git::{
    AuthorResolver, CommitExtractor, DateWindow, GitError, GitQuery, RawCommitLine, RepoLocator,
};
use gitreport_tasks::{
    Report, ReportError, ReportPeriod, commits_by_date, deduplicate_tasks, estimate_unique_tasks,
    reduce_commits,
};
use tracing::{debug, info, warn};

use crate::settings::Settings;

/// A repository whose commits could not be used
#[derive(Debug)]
pub struct RepoFailure {
    /// The repository
    pub repo: PathBuf,
    /// Why it was skipped
    pub error: GitError,
}

/// Everything a run produced
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The finished report
    pub report: Report,
    /// Repositories that were examined
    pub repositories: Vec<PathBuf>,
    /// Repositories skipped because of an error
    pub failures: Vec<RepoFailure>,
}

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The report period could not be computed
    #[error("Failed to compute report period: {0}")]
    Period(#[from] ReportError),
}

/// Drives one report run against a git backend
pub struct ReportPipeline<'a, G: ?Sized> {
    git: &'a G,
    settings: &'a Settings,
}

impl<'a, G: GitQuery + ?Sized> ReportPipeline<'a, G> {
    /// Create a pipeline over the given git backend and settings
    #[must_use]
    pub fn new(git: &'a G, settings: &'a Settings) -> Self {
        Self { git, settings }
    }

    /// Produce the report for the period containing `today`
    ///
    /// `cwd` is used when no repositories are configured.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Period` if the configured offsets leave the
    /// supported calendar range. Repository failures are reported in the
    /// outcome instead.
    pub fn run(&self, cwd: &Path, today: NaiveDate) -> Result<PipelineOutcome, PipelineError> {
        let kind = self.settings.period_kind();
        let period = ReportPeriod::relative_to(kind, &self.settings.period_options(), today)?;
        info!(
            mode = %kind,
            start = %period.window.start(),
            end = %period.window.end(),
            "Report period"
        );

        let repositories =
            RepoLocator::new(self.git).locate(&self.settings.locator_options(), cwd);
        if repositories.is_empty() {
            warn!("No repositories found; check repo_roots and company_git_patterns");
        }
        info!(count = repositories.len(), "Scanning repositories");

        let (commits, failures) = self.collect_commits(&repositories, period.window);
        let total_commits = commits.len();
        info!(total_commits, "Found commits");
        for (date, count) in commits_by_date(&commits) {
            info!(%date, count, "Commits per day");
        }
        let unique = estimate_unique_tasks(&commits);
        info!(
            removed = total_commits.saturating_sub(unique),
            unique, "Collapsing duplicate commits"
        );

        let tasks = deduplicate_tasks(reduce_commits(&commits));
        let report = Report::build(period, tasks, total_commits);

        Ok(PipelineOutcome {
            report,
            repositories,
            failures,
        })
    }

    /// Extract commits from each repository in turn, newest day first
    ///
    /// A repository that fails contributes no commits and is listed among
    /// the failures; reporting them is left to the caller.
    pub fn collect_commits(
        &self,
        repositories: &[PathBuf],
        window: DateWindow,
    ) -> (Vec<RawCommitLine>, Vec<RepoFailure>) {
        let resolver = AuthorResolver::new(self.git);
        let extractor = CommitExtractor::new(self.git);
        let filter = self.settings.author_filter();

        let mut commits = Vec::new();
        let mut failures = Vec::new();
        for repo in repositories {
            let author = resolver.resolve(repo, &filter);
            debug!(repo = %repo.display(), author = %author.pattern, extended = author.extended, "Resolved author");
            match extractor.extract(repo, &author, window) {
                Ok(lines) => commits.extend(lines),
                Err(e) => {
                    debug!(repo = %repo.display(), error = %e, "Skipping repository");
                    failures.push(RepoFailure {
                        repo: repo.clone(),
                        error: e,
                    });
                }
            }
        }
        sort_newest_first(&mut commits);
        (commits, failures)
    }
}
