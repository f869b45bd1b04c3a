//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`. Files are given
//! highest precedence first; for every setting the first file that defines it wins.

use std::path::PathBuf;

use odata_search::MAX_SUPPORTED_DEPTH;

use crate::{
    Config, ConfigError, OutputSettings, ParserSettings,
    parse::{RawConfig, RawOutputSettings, RawParserSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: closest to the working directory first,
/// global config last.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut parser = ParserSettings::default();
    let mut output = OutputSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.parser {
            apply_parser_settings(&mut parser, raw, parsed)?;
        }
        if let Some(raw) = &parsed.config.output {
            apply_output_settings(&mut output, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|dir| dir.to_path_buf());

    Ok(Config {
        parser,
        output,
        config_root,
    })
}

/// Applies a `[parser]` section, rejecting depth limits the parser cannot honor.
fn apply_parser_settings(
    result: &mut ParserSettings,
    raw: &RawParserSettings,
    source: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(max_depth) = raw.max_depth {
        if !(1..=MAX_SUPPORTED_DEPTH).contains(&max_depth) {
            return Err(ConfigError::InvalidMaxDepth {
                path: source.path.clone(),
                value: max_depth,
                max: MAX_SUPPORTED_DEPTH,
            });
        }
        result.max_depth = max_depth;
    }
    Ok(())
}

/// Applies an `[output]` section.
fn apply_output_settings(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(format) = raw.format {
        result.format = format;
    }
}
