//! Optional TOML configuration and the resolved run settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_POSTCODE_FILE: &str = "data/postcodes_swift_sample.csv";
pub const DEFAULT_PUB_FILE: &str = "data/pubnames_swift_sample.csv";
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_MAX_DISTANCE: f64 = 50.0;

/// Defaults read from a config file. Every field may be omitted.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FinderConfig {
    pub postcode_file: Option<PathBuf>,
    pub pub_file: Option<PathBuf>,
    pub limit: Option<usize>,
    pub max_distance: Option<f64>,
    pub preload: Option<bool>,
}

impl FinderConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: FinderConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}

/// Settings for one search after merging command line, config and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub postcode_file: PathBuf,
    pub pub_file: PathBuf,
    pub limit: usize,
    pub max_distance: f64,
    pub preload: bool,
}

impl Settings {
    /// Command line values win over the config file, which wins over the
    /// built-in defaults.
    pub fn resolve(cli: FinderConfig, file: FinderConfig) -> Result<Self> {
        let max_distance = cli
            .max_distance
            .or(file.max_distance)
            .unwrap_or(DEFAULT_MAX_DISTANCE);
        let max_distance = validate_max_distance(max_distance).map_err(anyhow::Error::msg)?;

        Ok(Self {
            postcode_file: cli
                .postcode_file
                .or(file.postcode_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTCODE_FILE)),
            pub_file: cli
                .pub_file
                .or(file.pub_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUB_FILE)),
            limit: cli.limit.or(file.limit).unwrap_or(DEFAULT_LIMIT),
            max_distance,
            preload: cli.preload.or(file.preload).unwrap_or(false),
        })
    }
}

/// A distance cap must be a finite, non-negative number of kilometers.
pub fn validate_max_distance(value: f64) -> std::result::Result<f64, String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "max distance must be a finite, non-negative number of km, got {}",
            value
        ));
    }
    Ok(value)
}
