use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;

use super::schema::{validate, Config};

/// Environment variables consulted when the config file leaves the OCR
/// service credentials blank.
const ENDPOINT_ENV: &str = "AZURE_ENDPOINT";
const API_KEY_ENV: &str = "AZURE_API_KEY";

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config: Config = serde_json::from_str(&raw)?;
    resolve_credentials(&mut config);
    validate(&config)?;

    debug!(
        "Loaded config from {} ({} fields)",
        path.display(),
        config.fields.len()
    );
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the default config
/// instead of an error. Parse and validation failures still surface.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        debug!("No config file at {}, using defaults", path.display());
        let mut config = Config::default();
        resolve_credentials(&mut config);
        Ok(config)
    }
}

fn resolve_credentials(config: &mut Config) {
    if config.ocr.endpoint.is_empty() {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.ocr.endpoint = endpoint;
        }
    }
    if config.ocr.api_key.is_empty() {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.ocr.api_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("formtrace.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_minimal_json_gets_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(tmp.path(), "{}");

        let config = load_config(&path).unwrap();
        assert_eq!(config.fields.len(), 4);
        assert_eq!(config.output_directory, Path::new("output"));
    }

    #[test]
    fn test_load_config_overrides_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"{
                "fields": [{
                    "name": "Batch Number",
                    "headerPattern": "batch\\s+no",
                    "valuePattern": "BN-[0-9]{4}"
                }]
            }"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.fields.len(), 1);
        assert_eq!(config.fields[0].name, "Batch Number");
        assert!(!config.fields[0].case_insensitive_value);
    }

    #[test]
    fn test_load_config_rejects_bad_pattern() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"{
                "fields": [{
                    "name": "Broken",
                    "headerPattern": "[unclosed",
                    "valuePattern": "X"
                }]
            }"#,
        );

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let result = load_config(Path::new("/nonexistent/formtrace.json"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file_falls_back() {
        let config = load_or_default(Path::new("/nonexistent/formtrace.json")).unwrap();
        assert_eq!(config.fields.len(), 4);
    }

    #[test]
    fn test_load_config_malformed_json_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(tmp.path(), "{ not json");

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }
}
