//! YAML configuration for lexmetrics.
//!
//! A config file is optional. Lookup order: `--config`, then
//! `lexmetrics.yaml` / `.lexmetrics.yaml` in the working directory, then
//! `config.yaml` in the user config directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::complexity::{CommandAnalyzer, ComplexityAnalyzer, Thresholds};
use crate::profile::Registry;

/// Config file names looked up in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["lexmetrics.yaml", ".lexmetrics.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// Extra extension -> registered extension or language id.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Glob patterns for paths to skip during directory walks (e.g. "**/generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub include_hidden: Option<bool>,
    #[serde(default)]
    pub complexity: ComplexityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ComplexityConfig {
    #[serde(default)]
    pub high: Option<u32>,
    #[serde(default)]
    pub critical: Option<u32>,
    /// External analyzer command; the file path is appended as the last argument.
    #[serde(default)]
    pub command: Vec<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load the explicit config, or a discovered one, or the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(),
        };
        match path {
            Some(p) => {
                info!(path = %p.display(), "loading config");
                Self::parse_file(&p)
            }
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Returns whether hidden directories are walked (defaults to false).
    pub fn should_include_hidden(&self) -> bool {
        self.include_hidden.unwrap_or(false)
    }

    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            high: self.complexity.high.unwrap_or(defaults.high),
            critical: self.complexity.critical.unwrap_or(defaults.critical),
        }
    }

    /// Build the exclusion matcher. `**` matches across directories.
    pub fn exclusion_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid excluded_paths pattern {:?}", pattern))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// The configured external complexity analyzer, if any.
    pub fn complexity_analyzer(&self) -> Option<Box<dyn ComplexityAnalyzer>> {
        CommandAnalyzer::new(&self.complexity.command)
            .map(|a| Box::new(a) as Box<dyn ComplexityAnalyzer>)
    }
}

/// Find a config file in the working directory or the user config directory.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.is_file() {
            return Some(path);
        }
    }
    let dirs = ProjectDirs::from("", "", "lexmetrics")?;
    let path = dirs.config_dir().join("config.yaml");
    path.is_file().then_some(path)
}

/// Validate a config against the registry.
pub fn validate(config: &Config, registry: &Registry) -> anyhow::Result<()> {
    for (ext, target) in &config.aliases {
        if ext.trim_start_matches('.').is_empty() {
            anyhow::bail!("alias with an empty extension");
        }
        if registry.resolve(target).is_none() {
            anyhow::bail!(
                "alias {:?} points at {:?}, which is neither a known extension nor a language id",
                ext,
                target
            );
        }
    }

    config.exclusion_set()?;

    let thresholds = config.thresholds();
    if thresholds.high > thresholds.critical {
        anyhow::bail!(
            "complexity.high ({}) must not exceed complexity.critical ({})",
            thresholds.high,
            thresholds.critical
        );
    }

    Ok(())
}
