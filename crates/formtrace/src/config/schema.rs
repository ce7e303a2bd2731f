use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_input_pdf")]
    pub input_pdf: PathBuf,
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    #[serde(default)]
    pub ocr: OcrServiceConfig,
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldSpec>,
}

fn default_input_pdf() -> PathBuf {
    PathBuf::from("input/input.pdf")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_pdf: default_input_pdf(),
            output_directory: default_output_directory(),
            ocr: OcrServiceConfig::default(),
            fields: default_fields(),
        }
    }
}

impl Config {
    /// Raw OCR service response, persisted between the ocr and extract stages.
    pub fn ocr_result_path(&self) -> PathBuf {
        self.output_directory.join("ocr_result.json")
    }

    /// Single-row CSV record with one column per configured field.
    pub fn report_path(&self) -> PathBuf {
        self.output_directory.join("extracted_fields.csv")
    }

    pub fn annotated_pdf_path(&self) -> PathBuf {
        self.output_directory.join("annotated_output.pdf")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrServiceConfig {
    /// Service base URL, e.g. "https://myocr.cognitiveservices.azure.com".
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, rename = "apiKey")]
    pub api_key: String,
    #[serde(default = "default_submit_timeout", rename = "submitTimeoutSecs")]
    pub submit_timeout_secs: u64,
    #[serde(default = "default_poll_timeout", rename = "pollTimeoutSecs")]
    pub poll_timeout_secs: u64,
    #[serde(default = "default_poll_interval", rename = "pollIntervalSecs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_max_poll_attempts", rename = "maxPollAttempts")]
    pub max_poll_attempts: u32,
}

fn default_submit_timeout() -> u64 {
    30
}

fn default_poll_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    2
}

fn default_max_poll_attempts() -> u32 {
    10
}

impl Default for OcrServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            submit_timeout_secs: default_submit_timeout(),
            poll_timeout_secs: default_poll_timeout(),
            poll_interval_secs: default_poll_interval(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

/// One target field: a header cue locating the printed label and a value
/// pattern describing the lexical shape of the value itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "headerPattern")]
    pub header_pattern: String,
    #[serde(rename = "valuePattern")]
    pub value_pattern: String,
    /// Header matching is always case-insensitive; value matching is
    /// case-sensitive unless this flag is set.
    #[serde(rename = "caseInsensitiveValue", default)]
    pub case_insensitive_value: bool,
    #[serde(default)]
    pub description: String,
}

/// The shipped field table. Adding a field here (or in the config file)
/// never touches the matching code.
pub fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "Form Tracking Number".to_string(),
            header_pattern: r"form\s+tracking\s+number".to_string(),
            value_pattern: r"TRK-[A-Z0-9]{10,15}".to_string(),
            case_insensitive_value: false,
            description: "Alphanumeric code starting with TRK-".to_string(),
        },
        FieldSpec {
            name: "Part Number".to_string(),
            header_pattern: r"part\s+number|^\s*8\s+Part|PN-".to_string(),
            value_pattern: r"PN-[A-Z0-9]{6,12}".to_string(),
            case_insensitive_value: false,
            description: "Part code in format PN-XXXXX".to_string(),
        },
        FieldSpec {
            name: "Serial Number".to_string(),
            header_pattern: r"serial\s+no|^\s*10\s+Serial|SN-".to_string(),
            value_pattern: r"SN-[A-Z0-9]{6,12}".to_string(),
            case_insensitive_value: false,
            description: "Serial number in format SN-XXXXX".to_string(),
        },
        FieldSpec {
            name: "Date".to_string(),
            header_pattern: r"date|13a|13b".to_string(),
            value_pattern: r"\b\d{1,2}\s+[A-Z]{3,4}\s+\d{4}\b|\d{1,2}[\/\-]\d{1,2}[\/\-]\d{2,4}"
                .to_string(),
            case_insensitive_value: false,
            description: "Date in formats like DD MMM YYYY or 12/03/2023".to_string(),
        },
    ]
}

/// Load-time validation. Pattern compilation is checked here so a bad
/// config fails before any document is touched.
pub fn validate(config: &Config) -> Result<(), crate::error::ConfigError> {
    use crate::error::ConfigError;
    use regex::RegexBuilder;

    if config.fields.is_empty() {
        return Err(ConfigError::Validation {
            message: "at least one field must be configured".to_string(),
        });
    }

    for field in &config.fields {
        if field.name.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "field names must not be empty".to_string(),
            });
        }
        RegexBuilder::new(&field.header_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                name: field.name.clone(),
                reason: e.to_string(),
            })?;
        RegexBuilder::new(&field.value_pattern)
            .case_insensitive(field.case_insensitive_value)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                name: field.name.clone(),
                reason: e.to_string(),
            })?;
    }

    Ok(())
}
