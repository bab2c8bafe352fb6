//! Capture helper — a single still image from the device camera, or a file.

pub mod device;
pub mod helper;

pub use device::{CameraDevice, CameraStream, Facing, ImagePayload};
pub use helper::{load_image_file, CaptureHelper, CaptureState};
