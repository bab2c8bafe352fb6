//! Submission record shapes for the form-ingest backend.
//!
//! The backend accepts one row per POST: a `data` form field holding a JSON
//! document with camelCase keys. Record shapes are a closed union so a field
//! rename shows up at compile time instead of as a silently dropped column.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::{CsatData, VehicleData};

/// One row destined for the logging backend.
///
/// Serialized untagged — the backend keys rows off the fields themselves,
/// not a type discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmissionRecord {
    /// Vehicle details confirmed on the license-confirm screen.
    #[serde(rename_all = "camelCase")]
    VehicleConfirmation {
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        license_plate: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
    },
    /// Satisfaction survey submitted on the csat screen.
    #[serde(rename_all = "camelCase")]
    Csat {
        #[serde(skip_serializing_if = "Option::is_none")]
        license_plate: Option<String>,
        rating: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        feedback: Option<String>,
    },
}

impl SubmissionRecord {
    /// Row for a confirmed vehicle.
    pub fn vehicle_confirmation(vehicle: &VehicleData) -> Self {
        Self::VehicleConfirmation {
            state: vehicle.state.clone(),
            license_plate: vehicle.license_plate.clone(),
            nickname: vehicle.nickname.clone(),
        }
    }

    /// Row for a completed survey. A missing rating serializes as 0 so the
    /// sheet still gets a row if the gate was somehow bypassed.
    pub fn csat(vehicle: &VehicleData, csat: &CsatData) -> Self {
        Self::Csat {
            license_plate: vehicle.license_plate.clone(),
            rating: csat.rating.unwrap_or(0),
            feedback: csat.feedback.clone(),
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VehicleConfirmation { .. } => "vehicle_confirmation",
            Self::Csat { .. } => "csat",
        }
    }
}

/// Wire envelope: the record's fields flattened next to a UTC timestamp.
#[derive(Debug, Serialize)]
pub struct RecordEnvelope<'a> {
    #[serde(flatten)]
    pub record: &'a SubmissionRecord,
    pub timestamp: DateTime<Utc>,
}

/// Wire body for the image endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadRequest {
    pub image_base64: String,
    pub content_type: String,
    /// Correlation key — the backend files images under the plate.
    pub license_plate: String,
}

/// Response from the image endpoint.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    #[serde(default)]
    pub file_url: Option<String>,
}
