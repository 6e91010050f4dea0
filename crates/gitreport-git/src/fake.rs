//! In-memory [`GitQuery`] for unit tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::query::{ConfigScope, GitQuery, LogQuery, QueryOutcome};

fn not_found() -> QueryOutcome {
    QueryOutcome::NonZeroExit {
        code: Some(1),
        stderr: String::new(),
    }
}

/// Canned git responses keyed by repository or commit
#[derive(Default)]
pub(crate) struct FakeGit {
    logs: HashMap<PathBuf, QueryOutcome>,
    branches: HashMap<String, QueryOutcome>,
    parents: HashMap<String, QueryOutcome>,
    config: HashMap<(String, ConfigScope), String>,
    remotes: HashMap<PathBuf, String>,
    pub(crate) log_calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    pub(crate) branch_calls: RefCell<Vec<String>>,
}

impl FakeGit {
    pub(crate) fn with_log(mut self, repo: impl Into<PathBuf>, output: &str) -> Self {
        self.logs
            .insert(repo.into(), QueryOutcome::Success(output.to_string()));
        self
    }

    pub(crate) fn with_log_outcome(mut self, repo: impl Into<PathBuf>, outcome: QueryOutcome) -> Self {
        self.logs.insert(repo.into(), outcome);
        self
    }

    pub(crate) fn with_branches(mut self, sha: &str, output: &str) -> Self {
        self.branches
            .insert(sha.to_string(), QueryOutcome::Success(output.to_string()));
        self
    }

    pub(crate) fn with_branch_outcome(mut self, sha: &str, outcome: QueryOutcome) -> Self {
        self.branches.insert(sha.to_string(), outcome);
        self
    }

    pub(crate) fn with_parents(mut self, sha: &str, parents: &[&str]) -> Self {
        let mut line = vec![sha];
        line.extend_from_slice(parents);
        self.parents.insert(
            sha.to_string(),
            QueryOutcome::Success(format!("{}\n", line.join(" "))),
        );
        self
    }

    pub(crate) fn with_config(mut self, key: &str, scope: ConfigScope, value: &str) -> Self {
        self.config
            .insert((key.to_string(), scope), value.to_string());
        self
    }

    pub(crate) fn with_remotes(mut self, repo: impl Into<PathBuf>, output: &str) -> Self {
        self.remotes.insert(repo.into(), output.to_string());
        self
    }
}

impl GitQuery for FakeGit {
    fn log(&self, repo: &Path, query: &LogQuery<'_>) -> QueryOutcome {
        self.log_calls
            .borrow_mut()
            .push((repo.to_path_buf(), query.args()));
        self.logs.get(repo).cloned().unwrap_or_else(not_found)
    }

    fn branches_containing(&self, _repo: &Path, sha: &str) -> QueryOutcome {
        self.branch_calls.borrow_mut().push(sha.to_string());
        self.branches
            .get(sha)
            .cloned()
            .unwrap_or_else(|| QueryOutcome::Success(String::new()))
    }

    fn parents(&self, _repo: &Path, sha: &str) -> QueryOutcome {
        self.parents.get(sha).cloned().unwrap_or_else(not_found)
    }

    fn config_value(&self, _repo: &Path, key: &str, scope: ConfigScope) -> QueryOutcome {
        self.config
            .get(&(key.to_string(), scope))
            .map(|value| QueryOutcome::Success(format!("{value}\n")))
            .unwrap_or_else(not_found)
    }

    fn remotes(&self, repo: &Path) -> QueryOutcome {
        self.remotes
            .get(repo)
            .map(|output| QueryOutcome::Success(output.clone()))
            .unwrap_or_else(|| QueryOutcome::Success(String::new()))
    }
}
