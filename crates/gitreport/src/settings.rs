// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report settings
//!
//! Settings come from a JSON file found on a fixed search path, fall back to
//! built-in defaults key by key, and are then adjusted by command-line flags.
//! The resulting [`Settings`] value is immutable for the rest of the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use gitreport_git::{AuthorFilter, LocatorOptions};
use gitreport_git::locator::DEFAULT_MAX_DEPTH;
use gitreport_tasks::{PeriodKind, PeriodOptions};
use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;

/// Legacy environment variable naming a settings file
pub const LEGACY_CONFIG_ENV: &str = "WEEKLY_REPORT_CONFIG";

/// Environment variables supplying default repository roots, in order
pub const REPO_ROOTS_ENV: [&str; 2] = ["REPORT_REPO_ROOTS", "WEEKLY_REPORT_REPO_ROOTS"];

/// Settings file names looked up in the current directory
const CWD_CONFIG_FILES: [&str; 2] = ["report.config.json", "weekly.config.json"];

/// Settings file locations below the user config directory
const CONFIG_DIR_FILES: [&str; 2] = ["report/config.json", "weekly-report/config.json"];

/// Settings file names looked up in the home directory
const HOME_CONFIG_FILES: [&str; 2] = [".report.json", ".weekly-report.json"];

/// Configured author: one pattern or several identities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorSetting {
    /// A pattern passed to git verbatim; empty means the git identity
    Single(String),
    /// Identities matched literally, any of which counts
    List(Vec<String>),
}

impl Default for AuthorSetting {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl AuthorSetting {
    /// The author filter this setting describes
    #[must_use]
    pub fn to_filter(&self) -> AuthorFilter {
        match self {
            Self::Single(pattern) => AuthorFilter::from(pattern.as_str()),
            Self::List(items) => AuthorFilter::from_list(items),
        }
    }
}

/// Settings for one report run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whose commits to report
    #[serde(deserialize_with = "or_default")]
    pub author: AuthorSetting,
    /// Report period: day, week or month
    #[serde(deserialize_with = "or_default")]
    pub stat_mode: String,
    /// First day of the week, Monday = 0 through Sunday = 6
    #[serde(deserialize_with = "lenient_number")]
    pub week_start: u32,
    /// Weeks to go back from the current week
    #[serde(deserialize_with = "lenient_number")]
    pub week_offset: u32,
    /// Months to go back from the current month
    #[serde(deserialize_with = "lenient_number")]
    pub month_offset: u32,
    /// Days to go back from today
    #[serde(deserialize_with = "lenient_number")]
    pub day_offset: u32,
    /// Directories scanned for repositories
    #[serde(deserialize_with = "string_list")]
    pub repo_roots: Vec<String>,
    /// Remote URL substrings a repository must match
    #[serde(deserialize_with = "string_list")]
    pub company_git_patterns: Vec<String>,
    /// Repositories to report on instead of scanning
    #[serde(deserialize_with = "string_list")]
    pub repo_paths: Vec<String>,
    /// Deepest directory level scanned below a root
    #[serde(deserialize_with = "lenient_depth")]
    pub max_scan_depth: usize,
    /// Directory the report file is written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Per-query git timeout in seconds; none waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            author: AuthorSetting::default(),
            stat_mode: "week".to_string(),
            week_start: 0,
            week_offset: 0,
            month_offset: 0,
            day_offset: 0,
            repo_roots: Vec::new(),
            company_git_patterns: Vec::new(),
            repo_paths: Vec::new(),
            max_scan_depth: DEFAULT_MAX_DEPTH,
            output_dir: None,
            git_timeout_secs: None,
        }
    }
}

/// Treat `null` like a missing key
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept a list of strings or one comma-separated string
fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => split_list(&value),
        Some(OneOrMany::Many(values)) => values
            .iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Accept a number or a numeric string; `null` means `default`
fn number_or<'de, D, T>(deserializer: D, default: T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(default),
        Some(NumberOrText::Number(value)) => Ok(value),
        Some(NumberOrText::Text(text)) => text.trim().parse().map_err(|_| {
            D::Error::invalid_value(Unexpected::Str(&text), &"a non-negative integer")
        }),
    }
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
{
    number_or(deserializer, T::default())
}

fn lenient_depth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    number_or(deserializer, DEFAULT_MAX_DEPTH)
}

/// Split a comma-separated list, dropping blank items
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a root list from the environment
///
/// Uses the platform path separator when present, commas otherwise.
#[must_use]
pub fn split_root_list(value: &str) -> Vec<String> {
    let separator = if cfg!(windows) { ';' } else { ':' };
    if value.contains(separator) {
        value
            .split(separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        split_list(value)
    }
}

/// Expand a leading `~` to the home directory
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with(['/', '\\']) => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

impl Settings {
    /// Parse settings from JSON text
    ///
    /// Unknown keys are ignored and missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of settings or a value
    /// is out of range.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check value ranges serde cannot express
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeekStart` if `week_start` is above 6.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.week_start > 6 {
            return Err(ConfigError::InvalidWeekStart(self.week_start));
        }
        Ok(())
    }

    /// Apply command-line overrides
    pub fn apply_cli(&mut self, config: &Config) {
        if let Some(mode) = &config.stat_mode {
            self.stat_mode = mode.clone();
        }
        if let Some(dir) = &config.output_dir {
            self.output_dir = Some(dir.clone());
        }
    }

    /// Report period kind; unknown modes mean weekly
    #[must_use]
    pub fn period_kind(&self) -> PeriodKind {
        PeriodKind::from_mode(&self.stat_mode)
    }

    /// Offsets used to place the report period
    #[must_use]
    pub fn period_options(&self) -> PeriodOptions {
        PeriodOptions {
            week_start: self.week_start,
            week_offset: self.week_offset,
            month_offset: self.month_offset,
            day_offset: self.day_offset,
        }
    }

    /// Repository discovery options
    #[must_use]
    pub fn locator_options(&self) -> LocatorOptions {
        LocatorOptions {
            roots: self.repo_roots.iter().map(|root| expand_home(root)).collect(),
            explicit: self.repo_paths.iter().map(|repo| expand_home(repo)).collect(),
            url_patterns: self.company_git_patterns.clone(),
            max_depth: self.max_scan_depth,
        }
    }

    /// Author filter applied to every repository
    #[must_use]
    pub fn author_filter(&self) -> AuthorFilter {
        self.author.to_filter()
    }

    /// Timeout for each git query
    #[must_use]
    pub fn git_timeout(&self) -> Option<Duration> {
        self.git_timeout_secs.map(Duration::from_secs)
    }

    /// Directory the report is written to
    ///
    /// The configured directory, else the desktop if it exists, else `cwd`.
    #[must_use]
    pub fn resolve_output_dir(&self, cwd: &Path) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        dirs::desktop_dir()
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| cwd.to_path_buf())
    }

    /// Read and validate a settings file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write the settings as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` if the file exists and `force` is
    /// false, or an I/O error if it cannot be written.
    pub fn write(&self, path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json + "\n").map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings together with the file they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    /// The effective settings
    pub settings: Settings,
    /// File the settings were read from; none means built-in defaults
    pub source: Option<PathBuf>,
}

/// Where settings are looked for
///
/// Built from the process environment by [`SettingsLoader::from_env`]; tests
/// construct it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsLoader {
    /// File named on the command line or by `REPORT_CONFIG`
    pub explicit: Option<PathBuf>,
    /// File named by the legacy environment variable
    pub legacy: Option<PathBuf>,
    /// Current working directory
    pub cwd: PathBuf,
    /// User configuration directory
    pub config_dir: Option<PathBuf>,
    /// User home directory
    pub home_dir: Option<PathBuf>,
    /// Default repository roots from the environment
    pub env_roots: Option<String>,
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl SettingsLoader {
    /// Look for settings where the environment says
    #[must_use]
    pub fn from_env(config: &Config, cwd: &Path) -> Self {
        Self {
            explicit: config.config.clone(),
            legacy: non_empty_env(LEGACY_CONFIG_ENV).map(PathBuf::from),
            cwd: cwd.to_path_buf(),
            config_dir: dirs::config_dir(),
            home_dir: dirs::home_dir(),
            env_roots: REPO_ROOTS_ENV.iter().find_map(|name| non_empty_env(name)),
        }
    }

    /// Candidate files searched when no file is named explicitly, in order
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.legacy.iter().cloned().collect();
        paths.extend(CWD_CONFIG_FILES.iter().map(|name| self.cwd.join(name)));
        if let Some(dir) = &self.config_dir {
            paths.extend(CONFIG_DIR_FILES.iter().map(|name| dir.join(name)));
        }
        if let Some(home) = &self.home_dir {
            paths.extend(HOME_CONFIG_FILES.iter().map(|name| home.join(name)));
        }
        paths
    }

    /// Load the effective settings
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or is
    /// invalid. Invalid files found by searching are skipped with a warning.
    pub fn load(&self) -> Result<LoadedSettings, ConfigError> {
        if let Some(path) = &self.explicit {
            let settings = Settings::read(path)?;
            info!(path = %path.display(), "Loaded settings");
            return Ok(self.finish(settings, Some(path.clone())));
        }

        for path in self.candidates() {
            if !path.is_file() {
                continue;
            }
            match Settings::read(&path) {
                Ok(settings) => {
                    info!(path = %path.display(), "Loaded settings");
                    return Ok(self.finish(settings, Some(path)));
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping invalid settings file"),
            }
        }

        debug!("No settings file found, using defaults");
        Ok(self.finish(Settings::default(), None))
    }

    fn finish(&self, mut settings: Settings, source: Option<PathBuf>) -> LoadedSettings {
        if settings.repo_roots.is_empty()
            && let Some(roots) = &self.env_roots
        {
            settings.repo_roots = split_root_list(roots);
            debug!(roots = ?settings.repo_roots, "Using repository roots from environment");
        }
        LoadedSettings { settings, source }
    }

    /// Default location written by `gitreport init`
    #[must_use]
    pub fn default_init_path(&self) -> Option<PathBuf> {
        self.config_dir
            .as_ref()
            .map(|dir| dir.join(CONFIG_DIR_FILES[0]))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON settings
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// `week_start` outside 0..=6
    #[error("week_start must be between 0 (Monday) and 6 (Sunday), got {0}")]
    InvalidWeekStart(u32),

    /// Settings file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Refusing to overwrite an existing settings file
    #[error("Settings file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    /// No user configuration directory on this platform
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a comma-joined list splits back into its trimmed, non-blank items
        #[test]
        fn prop_split_list_round_trip(items in proptest::collection::vec("[a-z./-]{1,12}", 0..6)) {
            let joined = items.join(" , ");
            prop_assert_eq!(split_list(&joined), items);
        }

        /// Property: the string and list forms of a setting agree
        #[test]
        fn prop_string_and_list_forms_agree(items in proptest::collection::vec("[a-z.]{1,10}", 1..5)) {
            let as_string = serde_json::json!({ "company_git_patterns": items.join(",") });
            let as_list = serde_json::json!({ "company_git_patterns": items });
            let from_string: Settings = serde_json::from_value(as_string).expect("string form");
            let from_list: Settings = serde_json::from_value(as_list).expect("list form");
            prop_assert_eq!(from_string, from_list);
        }
    }
}
