//! Async client for the remote OCR read API.
//!
//! Submission returns an operation URL in the `Operation-Location` header;
//! the result is then polled at a fixed interval up to a bounded attempt
//! count. Transient poll failures are retried; an explicit `failed` status
//! or retry exhaustion is a hard error.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Client;

use crate::config::OcrServiceConfig;
use crate::error::{ConfigError, OcrError};

use super::model::{AnalyzeResult, OperationStatus, ReadOperationResult};

const ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";
const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Handle for a submitted read operation.
#[derive(Debug, Clone)]
pub struct ReadOperation {
    pub operation_url: String,
}

pub struct OcrClient {
    client: Client,
    endpoint: String,
    api_key: String,
    submit_timeout: Duration,
    poll_timeout: Duration,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl OcrClient {
    pub fn from_config(config: &OcrServiceConfig) -> Result<Self, ConfigError> {
        if config.endpoint.is_empty() {
            return Err(ConfigError::Validation {
                message: "OCR service endpoint is not configured".to_string(),
            });
        }
        if config.api_key.is_empty() {
            return Err(ConfigError::Validation {
                message: "OCR service API key is not configured".to_string(),
            });
        }

        let client = Client::builder().build().map_err(|e| ConfigError::Validation {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            submit_timeout: Duration::from_secs(config.submit_timeout_secs),
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_poll_attempts: config.max_poll_attempts,
        })
    }

    /// Submit a document for analysis. The service responds 202 with the
    /// poll URL in the `Operation-Location` header.
    pub async fn submit(&self, payload: Vec<u8>) -> Result<ReadOperation, OcrError> {
        let url = format!("{}{}", self.endpoint, ANALYZE_PATH);
        info!("Submitting {} byte document to {}", payload.len(), url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .timeout(self.submit_timeout)
            .body(payload)
            .send()
            .await
            .map_err(OcrError::Submit)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Rejected { status, body });
        }

        let operation_url = response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(OcrError::MissingOperationLocation)?;

        debug!("Operation URL: {}", operation_url);
        Ok(ReadOperation { operation_url })
    }

    /// Poll the operation until it succeeds, fails, or the attempt limit
    /// is reached. A poll that errors at the HTTP layer counts as an
    /// attempt and is retried after the same fixed delay.
    pub async fn wait_for_result(
        &self,
        operation: &ReadOperation,
    ) -> Result<ReadOperationResult, OcrError> {
        for attempt in 1..=self.max_poll_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.poll_interval).await;
            }

            match self.poll(operation).await {
                Ok(result) => match result.status {
                    OperationStatus::Succeeded => {
                        info!("OCR processing succeeded after {} attempt(s)", attempt);
                        return Ok(result);
                    }
                    OperationStatus::Failed => {
                        warn!("OCR processing reported failure on attempt {}", attempt);
                        return Err(OcrError::Failed);
                    }
                    status => {
                        debug!("Attempt {}: OCR status {:?}", attempt, status);
                    }
                },
                Err(e) => {
                    warn!("Poll attempt {} failed: {}", attempt, e);
                }
            }
        }

        Err(OcrError::RetriesExhausted {
            attempts: self.max_poll_attempts,
        })
    }

    /// Submit and wait in one call, returning the analysis payload.
    pub async fn analyze(&self, payload: Vec<u8>) -> Result<ReadOperationResult, OcrError> {
        let operation = self.submit(payload).await?;
        let result = self.wait_for_result(&operation).await?;
        if result.analyze_result.is_none() {
            return Err(OcrError::MissingResult);
        }
        Ok(result)
    }

    async fn poll(&self, operation: &ReadOperation) -> Result<ReadOperationResult, reqwest::Error> {
        self.client
            .get(&operation.operation_url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(self.poll_timeout)
            .send()
            .await?
            .json::<ReadOperationResult>()
            .await
    }
}

/// Log the summary counts of a completed analysis.
pub fn log_analysis_summary(analyze: &AnalyzeResult) {
    info!(
        "Analysis complete: {} page(s), {} line(s), {} word(s)",
        analyze.total_pages(),
        analyze.total_lines(),
        analyze.total_words()
    );
    if let Some(line) = analyze.read_results.first().and_then(|p| p.lines.first()) {
        debug!("Sample line: {:?} box {:?}", line.text, line.bounding_box);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrServiceConfig;

    fn service_config() -> OcrServiceConfig {
        OcrServiceConfig {
            endpoint: "https://ocr.example.com/".to_string(),
            api_key: "secret".to_string(),
            ..OcrServiceConfig::default()
        }
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let client = OcrClient::from_config(&service_config()).unwrap();
        assert_eq!(client.endpoint, "https://ocr.example.com");
    }

    #[test]
    fn test_from_config_requires_endpoint() {
        let config = OcrServiceConfig {
            api_key: "secret".to_string(),
            ..OcrServiceConfig::default()
        };
        assert!(matches!(
            OcrClient::from_config(&config),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = OcrServiceConfig {
            endpoint: "https://ocr.example.com".to_string(),
            ..OcrServiceConfig::default()
        };
        assert!(matches!(
            OcrClient::from_config(&config),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_poll_settings_come_from_config() {
        let config = OcrServiceConfig {
            poll_interval_secs: 5,
            max_poll_attempts: 3,
            ..service_config()
        };
        let client = OcrClient::from_config(&config).unwrap();
        assert_eq!(client.poll_interval, Duration::from_secs(5));
        assert_eq!(client.max_poll_attempts, 3);
    }
}
