// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pipeline configuration

use crate::io::UnterminatedSolidPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "geoprism.toml";

/// What to do when a solid's planes do not form a prism
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Abort on the first failing solid
    #[default]
    FailFast,
    /// Record the failure and keep reconstructing the other solids
    Skip,
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prisms closer than this are reported as intersecting
    pub epsilon: f64,
    /// Reconstruct solids and measure distances on the rayon pool
    pub parallel: bool,
    pub on_degenerate: DegeneratePolicy,
    pub unterminated_solid: UnterminatedSolidPolicy,
    /// Tolerance for regularity and cell-containment checks
    pub analysis_tolerance: f64,
    /// `tracing` filter used by the CLI when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            parallel: true,
            on_degenerate: DegeneratePolicy::FailFast,
            unterminated_solid: UnterminatedSolidPolicy::Reject,
            analysis_tolerance: 1e-6,
            log_filter: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `geoprism.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `GEOPRISM_*` environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name; unparsable values are errors
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(epsilon) = lookup("GEOPRISM_EPSILON") {
            self.epsilon = epsilon
                .parse()
                .with_context(|| format!("Invalid GEOPRISM_EPSILON: {}", epsilon))?;
        }

        if let Some(parallel) = lookup("GEOPRISM_PARALLEL") {
            self.parallel = parallel
                .parse()
                .with_context(|| format!("Invalid GEOPRISM_PARALLEL: {}", parallel))?;
        }

        if let Some(filter) = lookup("GEOPRISM_LOG") {
            self.log_filter = Some(filter);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
