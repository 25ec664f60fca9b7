use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::preprocess::synonyms::{SynonymEntry, SynonymMap};
use crate::core::search::models::ScoreFieldNames;
use crate::core::search::query::Fuzziness;

/// Errors from the strict config loaders.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub scoring: ScoringConfig,
    pub logging: LoggingConfig,
}

/// Query compilation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Composite field targeted by the phrase-prefix and fuzzy branches.
    pub composite_field: String,
    /// Tie-break sort field for scored queries (ascending).
    pub secondary_sort_field: String,
    /// Page size when the request gives none.
    pub default_per_page: u64,
    /// Largest window the engine serves; `per_page = -1` maps here.
    pub max_result_window: u64,
    /// Type restriction for requests without free text.
    pub default_post_type: String,
    /// Status restriction when the request gives none.
    pub default_post_status: Vec<String>,
    /// Fuzzy branch edit distance.
    pub fuzziness: String,
    pub max_expansions: u32,
    pub prefix_length: u32,
}

/// How the relevance score reaches the sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// `_script` sort evaluated by the engine
    #[default]
    Engine,
    /// Engine sorts by `_score`; the caller re-ranks the hits
    Rerank,
}

/// Relevance scoring settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub mode: ScoringMode,
    /// Use a pre-registered script instead of shipping the source inline.
    pub stored_script_id: Option<String>,
    /// Extra alias → canonical pairs, merged over the built-in table.
    pub synonyms: Vec<SynonymEntry>,
    /// Engine fields read by the scorer.
    pub fields: ScoreFieldNames,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            composite_field: "search_fields".to_string(),
            secondary_sort_field: "post_title.raw".to_string(),
            default_per_page: 10,
            max_result_window: 10_000,
            default_post_type: "post".to_string(),
            default_post_status: vec!["publish".to_string()],
            fuzziness: "AUTO".to_string(),
            max_expansions: 1,
            prefix_length: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SearchConfig {
    pub fn fuzziness(&self) -> Fuzziness {
        Fuzziness {
            distance: self.fuzziness.clone(),
            max_expansions: self.max_expansions,
            prefix_length: self.prefix_length,
        }
    }
}

impl ScoringConfig {
    /// Built-in synonyms with the configured extras applied on top.
    pub fn synonym_map(&self) -> SynonymMap {
        let mut map = SynonymMap::with_defaults();
        map.extend_entries(&self.synonyms);
        map
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/dishrank/config.toml`.
    /// Returns `Default` if the file is missing, unparseable or invalid.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if !config_path.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Self::default();
        }

        match Self::from_file(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Parse and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;
        if search.composite_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "search.composite_field must not be empty".to_string(),
            ));
        }
        if search.default_per_page == 0 {
            return Err(ConfigError::Invalid(
                "search.default_per_page must be at least 1".to_string(),
            ));
        }
        if search.max_result_window < search.default_per_page {
            return Err(ConfigError::Invalid(format!(
                "search.max_result_window ({}) is smaller than default_per_page ({})",
                search.max_result_window, search.default_per_page
            )));
        }
        if self.scoring.fields.text_fields().iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "scoring.fields text field names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("dishrank").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
