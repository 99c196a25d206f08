//! Engine configuration from environment variables.

use crate::error::{EngineError, Result};
use lexis_unlock::{FirstRunPolicy, DEFAULT_COMPLETION_THRESHOLD, DEFAULT_RECOMMENDATION_LIMIT};
use std::path::PathBuf;

/// Data directory used when `LEXIS_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "./lexis-data";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding the progress and snapshot records
    pub data_dir: PathBuf,
    /// Mastery at or above which a node counts as completed
    pub completion_threshold: u8,
    /// Recommendations returned when the caller gives no limit
    pub recommendation_limit: usize,
    /// Notifier behaviour when no snapshot exists yet
    pub first_run: FirstRunPolicy,
    /// Skill graph JSON; the built-in curriculum when `None`
    pub graph_path: Option<PathBuf>,
    /// Feature catalogue JSON; the built-in catalogue when `None`
    pub features_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl EngineConfig {
    /// Built-in defaults rooted at `data_dir`, ignoring the environment.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            first_run: FirstRunPolicy::default(),
            graph_path: None,
            features_path: None,
        }
    }

    /// Create config from environment variables with sensible defaults.
    ///
    /// An invalid value is logged and replaced by its default.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from environment variables, rejecting invalid values.
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_vars(|key| std::env::var(key).ok())
    }

    /// Lenient build over an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(DEFAULT_DATA_DIR);
        for error in config.apply_vars(&lookup) {
            tracing::warn!(error = %error, "ignoring invalid configuration value");
        }
        config
    }

    /// Strict build over an arbitrary variable lookup. Fails on the first
    /// invalid value.
    pub fn try_from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(DEFAULT_DATA_DIR);
        match config.apply_vars(&lookup).into_iter().next() {
            Some(error) => Err(error),
            None => Ok(config),
        }
    }

    /// Builder: set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Builder: set the completion threshold.
    pub fn with_completion_threshold(mut self, threshold: u8) -> Self {
        self.completion_threshold = threshold;
        self
    }

    /// Builder: set the default recommendation limit.
    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    /// Builder: set the first-run policy.
    pub fn with_first_run(mut self, policy: FirstRunPolicy) -> Self {
        self.first_run = policy;
        self
    }

    /// Builder: load the skill graph from a file.
    pub fn with_graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = Some(path.into());
        self
    }

    /// Builder: load the feature catalogue from a file.
    pub fn with_features_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.features_path = Some(path.into());
        self
    }

    /// Overwrite every field whose variable is set and valid. Invalid
    /// values leave the field untouched and are returned in lookup order.
    fn apply_vars<F>(&mut self, lookup: &F) -> Vec<EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(dir) = read(lookup, "LEXIS_DATA_DIR", parse_path, &mut errors) {
            self.data_dir = dir;
        }
        if let Some(threshold) =
            read(lookup, "LEXIS_COMPLETION_THRESHOLD", parse_threshold, &mut errors)
        {
            self.completion_threshold = threshold;
        }
        if let Some(limit) = read(lookup, "LEXIS_RECOMMENDATION_LIMIT", parse_limit, &mut errors) {
            self.recommendation_limit = limit;
        }
        if let Some(policy) = read(
            lookup,
            "LEXIS_FIRST_RUN",
            |s| s.parse::<FirstRunPolicy>(),
            &mut errors,
        ) {
            self.first_run = policy;
        }
        if let Some(path) = read(lookup, "LEXIS_GRAPH", parse_path, &mut errors) {
            self.graph_path = Some(path);
        }
        if let Some(path) = read(lookup, "LEXIS_FEATURES", parse_path, &mut errors) {
            self.features_path = Some(path);
        }

        errors
    }
}

fn read<F, T>(
    lookup: &F,
    key: &'static str,
    parse: impl Fn(&str) -> std::result::Result<T, String>,
    errors: &mut Vec<EngineError>,
) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match parse(raw.trim()) {
        Ok(value) => Some(value),
        Err(reason) => {
            errors.push(EngineError::Config { key, reason });
            None
        }
    }
}

fn parse_path(raw: &str) -> std::result::Result<PathBuf, String> {
    if raw.is_empty() {
        return Err("path is empty".to_string());
    }
    Ok(PathBuf::from(raw))
}

fn parse_threshold(raw: &str) -> std::result::Result<u8, String> {
    let value: u8 = raw.parse().map_err(|e| format!("{}: {}", raw, e))?;
    if value > lexis_graph::MAX_MASTERY {
        return Err(format!("{} exceeds {}", value, lexis_graph::MAX_MASTERY));
    }
    Ok(value)
}

fn parse_limit(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(e) => Err(format!("{}: {}", raw, e)),
    }
}
