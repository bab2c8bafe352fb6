//! Integration gateway — outbound submissions to the scripting backend.

pub mod client;
pub mod record;

pub use client::{IntegrationGateway, UPLOAD_FALLBACK};
pub use record::SubmissionRecord;
