// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for gitreport
//!
//! Flags given here override the matching keys of the settings file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// gitreport - work reports from your git commits
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gitreport")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to generating a report)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the JSON settings file
    ///
    /// When omitted, the usual locations are searched and the first valid
    /// file is used. A file named here must exist and parse.
    #[arg(short, long, env = "REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report period: day, week or month
    ///
    /// Overrides `stat_mode` from the settings file.
    #[arg(short = 'm', long)]
    pub stat_mode: Option<String>,

    /// Directory the report file is written to
    ///
    /// Overrides `output_dir` from the settings file. Defaults to the desktop
    /// when it exists, else the current directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write a settings file populated with the defaults
    Init {
        /// Where to write the file (defaults to the user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
