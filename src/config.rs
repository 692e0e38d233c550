//! Configuration for an evaluation run
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults (`database.db`, the four review tables)
//! 2. `mediarec.toml` in the working directory, or an explicit file
//! 3. `MEDIAREC_*` environment variables (`__` separates nested keys)
//!
//! Command-line flags are applied on top by the binary. The database path is
//! read from `MEDIAREC_DATABASE_PATH` by both this layer and `--db-path`.

use crate::error::{EvalError, Result};
use crate::recommend::collaborative::DEFAULT_NEIGHBOURS;
use crate::storage::validate_identifier;
use crate::types::{Category, SourceTable};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "database.db";

/// Base name of the optional configuration file
const CONFIG_FILE_NAME: &str = "mediarec";

/// Environment variable prefix
const ENV_PREFIX: &str = "MEDIAREC";

/// Where the ground-truth mapping comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GroundTruthKind {
    /// Items rated at or above the category's average media rating
    #[default]
    AboveAverage,
    /// `(user_id, item_key)` rows of a table in the same database
    Table,
    /// JSON file mapping user ids to item key lists
    Json,
}

/// How predictions are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// The user's own highest-rated items
    #[default]
    TopRated,
    /// User-based collaborative filtering
    Collaborative,
    /// Items liked by the raters of the user's favourite item
    CoOccurrence,
}

/// Settings for one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub database_path: PathBuf,
    pub sources: Vec<SourceTable>,
    pub ground_truth: GroundTruthKind,
    pub ground_truth_table: String,
    pub ground_truth_file: Option<PathBuf>,
    pub strategy: Strategy,
    pub neighbours: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            sources: SourceTable::defaults(),
            ground_truth: GroundTruthKind::default(),
            ground_truth_table: "ground_truth".to_string(),
            ground_truth_file: None,
            strategy: Strategy::default(),
            neighbours: DEFAULT_NEIGHBOURS,
        }
    }
}

impl EvalConfig {
    /// Load configuration from file and environment
    ///
    /// With `file = None`, `mediarec.{toml,json,yaml}` is read if present.
    /// An explicit file must exist.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let config: EvalConfig = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Categories covered by the configured sources, in source order
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for source in &self.sources {
            if !categories.contains(&source.category) {
                categories.push(source.category);
            }
        }
        categories
    }

    /// Check the settings before any query runs
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(config_error("at least one review source is required"));
        }
        for source in &self.sources {
            validate_identifier(&source.table)?;
        }

        match self.ground_truth {
            GroundTruthKind::Table => validate_identifier(&self.ground_truth_table)?,
            GroundTruthKind::Json if self.ground_truth_file.is_none() => {
                return Err(config_error(
                    "ground_truth_file is required for the json ground truth",
                ));
            }
            _ => {}
        }

        if self.strategy == Strategy::Collaborative && self.neighbours == 0 {
            return Err(config_error("neighbours must be at least 1"));
        }

        Ok(())
    }
}

fn config_error(message: &str) -> EvalError {
    EvalError::Config(config::ConfigError::Message(message.to_string()))
}
