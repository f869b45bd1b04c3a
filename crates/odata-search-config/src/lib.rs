//! Configuration system for osearch.
//!
//! osearch uses TOML configuration files named `.osearch.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.osearch.toml` files found, then loading `~/.osearch.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
use odata_search::{DEFAULT_MAX_DEPTH, SearchParser};
pub use parse::{
    RawConfig, RawOutputSettings, RawParserSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};

/// Top-level merged configuration for osearch.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parser settings.
    pub parser: ParserSettings,
    /// Output settings.
    pub output: OutputSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.osearch.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Serializes the effective settings in `.osearch.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            parser: self.parser.clone(),
            output: self.output.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// The settings sections of a config file, for rendering.
#[derive(Serialize)]
struct SerializableSettings {
    /// `[parser]` section.
    parser: ParserSettings,
    /// `[output]` section.
    output: OutputSettings,
}

/// Settings for the `$search` parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Maximum nesting depth of an expression.
    pub max_depth: usize,
}

impl ParserSettings {
    /// Builds a parser with these settings.
    pub fn search_parser(&self) -> SearchParser {
        SearchParser::new(self.max_depth)
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Settings controlling how results are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default rendering for parsed expressions.
    pub format: OutputFormat,
}

/// Rendering format for parsed expressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree.
    #[default]
    Tree,
    /// JSON document.
    Json,
}
