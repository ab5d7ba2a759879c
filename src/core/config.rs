//! Parser configuration with documented defaults
//!
//! Every knob that changes how permissive the parser is lives here. The
//! defaults reproduce the reference blueprint behavior, except that a broken
//! `start(...)` block is reported instead of silently guessed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{QuickfortError, Result};

/// How the header parser treats a malformed `start(x;y;comment)` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartBlockMode {
    /// Missing `)`, wrong field count or a non-integer coordinate is an error
    #[default]
    Strict,
    /// Best-effort parse: missing pieces default to 0 / no comment
    Lenient,
}

/// Configuration for a single `BlueprintParser`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Handling of malformed `start(...)` header blocks
    pub start_block: StartBlockMode,

    /// Largest allowed factor per expansion dimension
    ///
    /// `d(500x500)` would otherwise write a quarter million cells. Factors
    /// above this bound are clamped to it and a warning is logged.
    pub max_expansion: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            start_block: StartBlockMode::Strict,
            max_expansion: 100,
        }
    }
}

impl ParserConfig {
    /// Config using the permissive `start(...)` parse
    pub fn lenient() -> Self {
        Self {
            start_block: StartBlockMode::Lenient,
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_expansion == 0 {
            return Err(QuickfortError::InvalidConfig(
                "max_expansion must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a TOML config document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ParserConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_block, StartBlockMode::Strict);
        assert_eq!(config.max_expansion, 100);
    }

    #[test]
    fn test_zero_max_expansion_rejected() {
        let config = ParserConfig {
            max_expansion: 0,
            ..ParserConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(QuickfortError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let config = ParserConfig::from_toml_str("start_block = \"lenient\"").unwrap();
        assert_eq!(config.start_block, StartBlockMode::Lenient);
        assert_eq!(config.max_expansion, 100);
    }

    #[test]
    fn test_from_toml_rejects_unknown_field() {
        let result = ParserConfig::from_toml_str("colour = \"blue\"");
        assert!(matches!(result, Err(QuickfortError::ConfigParse(_))));
    }

    #[test]
    fn test_from_toml_validates() {
        let result = ParserConfig::from_toml_str("max_expansion = 0");
        assert!(matches!(result, Err(QuickfortError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = ParserConfig::load(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(QuickfortError::IoError(_))));
    }
}
