//! Outbound client for the logging/storage backend.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;

use crate::capture::ImagePayload;
use crate::config::GatewayConfig;
use crate::error::SubmissionError;

use super::record::{ImageUploadRequest, ImageUploadResponse, RecordEnvelope, SubmissionRecord};

/// Returned by the image endpoint when it stored the file but produced no
/// URL for it.
pub const UPLOAD_FALLBACK: &str = "Upload successful";

/// Thin client over the two scripting-backend endpoints.
///
/// Both operations are asynchronous and single-shot — no retry, no batching,
/// no queueing. Failures are surfaced for the caller to decide on retry and
/// user feedback.
pub struct IntegrationGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl IntegrationGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Submit one record row: the record's fields plus a UTC timestamp,
    /// JSON-encoded into a single `data` form field.
    pub async fn submit_record(&self, record: &SubmissionRecord) -> Result<(), SubmissionError> {
        let envelope = RecordEnvelope {
            record,
            timestamp: Utc::now(),
        };
        let body = serde_json::to_string(&envelope)?;

        let resp = self
            .client
            .post(&self.config.record_endpoint)
            .timeout(self.config.timeout)
            .form(&[("data", body.as_str())])
            .send()
            .await
            .map_err(|e| SubmissionError::Transport {
                endpoint: "record".into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(SubmissionError::Status {
                endpoint: "record".into(),
                status: resp.status().as_u16(),
            });
        }

        tracing::info!(kind = record.kind(), "Record submitted");
        Ok(())
    }

    /// Submit a binary image payload, base64-encoded with its content type
    /// and correlation id. Returns the stored-file URL reported by the
    /// backend, or [`UPLOAD_FALLBACK`] when the response omits it.
    pub async fn submit_image(
        &self,
        payload: &ImagePayload,
        correlation_id: &str,
    ) -> Result<String, SubmissionError> {
        let request = ImageUploadRequest {
            image_base64: BASE64.encode(&payload.bytes),
            content_type: payload.content_type.clone(),
            license_plate: correlation_id.to_string(),
        };
        let body = serde_json::to_string(&request)?;

        let resp = self
            .client
            .post(&self.config.image_endpoint)
            .timeout(self.config.timeout)
            .form(&[("data", body.as_str())])
            .send()
            .await
            .map_err(|e| SubmissionError::Transport {
                endpoint: "image".into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(SubmissionError::Status {
                endpoint: "image".into(),
                status: resp.status().as_u16(),
            });
        }

        let parsed: ImageUploadResponse =
            resp.json()
                .await
                .map_err(|e| SubmissionError::MalformedResponse {
                    endpoint: "image".into(),
                    reason: e.to_string(),
                })?;

        let reference = parsed.file_url.unwrap_or_else(|| UPLOAD_FALLBACK.to_string());
        tracing::info!(correlation = correlation_id, file = %reference, "Image submitted");
        Ok(reference)
    }
}
