// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitreport: work reports from your git commits
//!
//! Scans local repositories for the configured author's commits in a day,
//! week or month, collapses them into report tasks, and writes the report as
//! JSON for rendering.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use gitreport::config::{Command, Config};
use gitreport::pipeline::ReportPipeline;
use gitreport::settings::{ConfigError, Settings, SettingsLoader};
use gitreport_git::GitCli;
use tracing::{error, info};

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let loader = SettingsLoader::from_env(&config, &cwd);

    match &config.command {
        Some(Command::Init { path, force }) => init(&loader, path.as_deref(), *force),
        None => generate(&config, &loader, &cwd),
    }
}

/// Write a settings file populated with the defaults
fn init(loader: &SettingsLoader, path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => loader.default_init_path().ok_or(ConfigError::NoConfigDir)?,
    };
    Settings::default()
        .write(&path, force)
        .with_context(|| format!("Failed to initialize settings at {}", path.display()))?;
    println!("Created settings file: {}", path.display());
    Ok(())
}

/// Generate and save the report
fn generate(config: &Config, loader: &SettingsLoader, cwd: &Path) -> Result<()> {
    let loaded = loader.load().context("Failed to load settings")?;
    let mut settings = loaded.settings;
    settings.apply_cli(config);

    let mut git = GitCli::new();
    if let Some(timeout) = settings.git_timeout() {
        git = git.with_timeout(timeout);
    }

    let today = chrono::Local::now().date_naive();
    let outcome = ReportPipeline::new(&git, &settings)
        .run(cwd, today)
        .context("Failed to generate report")?;

    for failure in &outcome.failures {
        error!(repo = %failure.repo.display(), error = %failure.error, "Repository not included in report");
    }

    let output_dir = settings.resolve_output_dir(cwd);
    let path = outcome
        .report
        .save(&output_dir)
        .with_context(|| format!("Failed to write report into {}", output_dir.display()))?;

    let stats = outcome.report.statistics;
    info!(
        commits = stats.total_commits,
        tasks = stats.total_tasks,
        completed = stats.completed,
        testing = stats.testing,
        pending_test = stats.pending_test,
        failed_repositories = outcome.failures.len(),
        "Report complete"
    );
    println!("{}", path.display());
    Ok(())
}
