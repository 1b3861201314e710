//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CacheConfig;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "cairn.toml";

/// Loads and validates `cairn.toml` from a project directory.
///
/// A missing file is not an error: the defaults are returned.
pub fn load_config(project_dir: &Path) -> Result<CacheConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no cache configuration, using defaults");
        return Ok(CacheConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    let config = load_config_from_str(&content)?;
    tracing::debug!(
        path = %config_path.display(),
        file_algorithm = %config.hashing.file_algorithm,
        text_algorithm = %config.hashing.text_algorithm,
        "loaded cache configuration"
    );
    Ok(config)
}

/// Parses and validates a `cairn.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CacheConfig, ConfigError> {
    let config: CacheConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that configuration values are consistent.
fn validate_config(config: &CacheConfig) -> Result<(), ConfigError> {
    let hashing = &config.hashing;
    if hashing.require_path_agreement && !hashing.paths_agree() {
        return Err(ConfigError::ValidationError(format!(
            "hashing.require_path_agreement is set but file_algorithm '{}' \
             differs from text_algorithm '{}'",
            hashing.file_algorithm, hashing.text_algorithm
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_common::HashAlgorithm;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[hashing]
file_algorithm = "sha256"
text_algorithm = "sha256"
cache_file_hashes = false
require_path_agreement = true
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.hashing.file_algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.hashing.text_algorithm, HashAlgorithm::Sha256);
        assert!(!config.hashing.cache_file_hashes);
        assert!(config.hashing.require_path_agreement);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let toml = r#"
[hashing]
text_algorithm = "sha256"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.hashing.file_algorithm, HashAlgorithm::Xxh3_128);
        assert_eq!(config.hashing.text_algorithm, HashAlgorithm::Sha256);
        assert!(config.hashing.cache_file_hashes);
        assert!(!config.hashing.paths_agree());
    }

    #[test]
    fn disagreement_rejected_when_required() {
        let toml = r#"
[hashing]
file_algorithm = "xxh3-128"
text_algorithm = "sha256"
require_path_agreement = true
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("sha256"));
    }

    #[test]
    fn unknown_algorithm_errors() {
        let toml = r#"
[hashing]
file_algorithm = "md5"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("[hashing\nfile_algorithm =").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[hashing]\nfile_algorithm = \"sha256\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.hashing.file_algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, CacheConfig::default());
    }
}
