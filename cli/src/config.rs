// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// reflex Configuration
//
// Defines the YAML configuration for the reflex CLI:
// - Default match options (threshold, limit, exact-first tie-break)
// - Whether searches consider inactive patterns
// - Location of the pattern file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reflex_cortex::application::MatchOptions;

pub const CONFIG_PATH_ENV: &str = "REFLEX_CONFIG_PATH";
pub const PATTERNS_PATH_ENV: &str = "REFLEX_PATTERNS_PATH";

const DEFAULT_PATTERNS_FILE: &str = "patterns.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum confidence (0-100) a match must reach
    pub threshold: f64,
    /// Maximum matches returned (0 = unbounded)
    pub limit: usize,
    /// On equal confidence, list exact matches before keyword matches
    pub exact_first: bool,
    /// Only consider patterns whose strength is at or above their threshold
    pub active_only: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let options = MatchOptions::default();
        Self {
            threshold: options.threshold,
            limit: options.limit,
            exact_first: options.exact_first,
            active_only: false,
        }
    }
}

impl MatchingConfig {
    pub fn to_options(&self) -> MatchOptions {
        MatchOptions::default()
            .with_threshold(self.threshold)
            .with_limit(self.limit)
            .with_exact_first(self.exact_first)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflexConfig {
    pub matching: MatchingConfig,

    /// Pattern file (YAML sequence of patterns)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns_path: Option<PathBuf>,
}

impl ReflexConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. REFLEX_CONFIG_PATH environment variable
    /// 2. ./reflex-config.yaml (working directory)
    /// 3. ~/.reflex/config.yaml (user home)
    /// 4. /etc/reflex/config.yaml (system, Unix)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./reflex-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".reflex").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/reflex/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration: explicit path (must load), then discovery, then defaults.
    /// Environment overrides are applied in every case.
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            Self::from_yaml_file(config_path)?
        } else {
            tracing::debug!("No configuration file found in standard locations. Using defaults.");
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("REFLEX_MATCH_THRESHOLD") {
            match val.parse::<f64>() {
                Ok(threshold) => self.matching.threshold = threshold,
                Err(_) => tracing::warn!("Ignoring invalid REFLEX_MATCH_THRESHOLD: {}", val),
            }
        }

        if let Some(val) = lookup("REFLEX_MATCH_LIMIT") {
            match val.parse::<usize>() {
                Ok(limit) => self.matching.limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid REFLEX_MATCH_LIMIT: {}", val),
            }
        }

        if let Some(val) = lookup("REFLEX_EXACT_FIRST") {
            match val.to_lowercase().as_str() {
                "true" | "1" | "yes" => self.matching.exact_first = true,
                "false" | "0" | "no" => self.matching.exact_first = false,
                _ => tracing::warn!("Ignoring invalid REFLEX_EXACT_FIRST: {}", val),
            }
        }

        if let Some(val) = lookup(PATTERNS_PATH_ENV) {
            if !val.is_empty() {
                self.patterns_path = Some(PathBuf::from(val));
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let threshold = self.matching.threshold;
        if !(0.0..=100.0).contains(&threshold) {
            anyhow::bail!(
                "matching.threshold must be between 0 and 100, got {}",
                threshold
            );
        }

        if let Some(path) = &self.patterns_path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("patterns_path cannot be empty");
            }
        }

        Ok(())
    }

    /// Pattern file to use: explicit override, then config, then `./patterns.yaml`.
    pub fn resolve_patterns_path(&self, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .or_else(|| self.patterns_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATTERNS_FILE))
    }
}
