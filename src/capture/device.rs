//! Camera device seam — the contract a platform capture backend implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Facing preference when requesting a camera stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Front camera (the plate-scan prototype).
    User,
    /// Rear camera (installation photos).
    Environment,
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Environment => write!(f, "environment"),
        }
    }
}

/// An encoded still image together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A camera attached to the device.
///
/// `open` requests access and hands back an exclusive stream; denial or a
/// missing device surfaces as [`CameraError::Unavailable`].
#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn open(&self, facing: Facing) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// A live capture stream. Exclusively owned by its holder; `stop` must
/// release the underlying hardware and is safe to call more than once.
pub trait CameraStream: Send {
    /// Extract the current frame as an encoded still image.
    fn grab_frame(&mut self) -> Result<ImagePayload, CameraError>;

    /// Release the underlying device.
    fn stop(&mut self);

    /// Whether the stream still holds the device.
    fn is_live(&self) -> bool;
}
