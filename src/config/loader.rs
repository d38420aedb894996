//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::LapurdConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LapurdConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration held in memory.
pub fn parse_config(content: &str) -> Result<LapurdConfig, ConfigError> {
    let config: LapurdConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lapurd.toml");
        fs::write(&path, "[site]\napplication = \"HelloWorld\"\nmodules = [\"Foo\"]\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site.modules, vec!["Foo"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_config(&dir.path().join("none.toml")), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        assert!(matches!(parse_config("[site"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_semantic_error_is_reported() {
        let err = parse_config("[site]\napplication = \"\"\n").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: site.application must not be empty");
    }
}
