//! Single-still capture over a camera stream, with a file fallback.

use std::path::Path;
use std::sync::Arc;

use crate::error::CameraError;

use super::device::{CameraDevice, CameraStream, Facing, ImagePayload};

/// Where the helper is in its capture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Previewing,
    Captured,
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Previewing => write!(f, "previewing"),
            Self::Captured => write!(f, "captured"),
        }
    }
}

/// Acquires a single still image from an attached camera.
///
/// Cycle: `Idle → Previewing` (`start`) `→ Captured` (`capture`) `→ Idle`
/// (`retake`/`take_frame`). The stream is a scoped acquisition: every exit
/// path — explicit `stop`, capture completion, restart, or dropping the
/// helper — releases the underlying device.
pub struct CaptureHelper {
    device: Arc<dyn CameraDevice>,
    stream: Option<Box<dyn CameraStream>>,
    frame: Option<ImagePayload>,
}

impl CaptureHelper {
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            stream: None,
            frame: None,
        }
    }

    /// Current state, derived from what the helper holds.
    pub fn state(&self) -> CaptureState {
        if self.stream.is_some() {
            CaptureState::Previewing
        } else if self.frame.is_some() {
            CaptureState::Captured
        } else {
            CaptureState::Idle
        }
    }

    /// Request camera access and begin previewing. On denial the caller is
    /// expected to fall back to manual file selection.
    pub async fn start(&mut self, facing: Facing) -> Result<(), CameraError> {
        // Restarting releases any previous acquisition first.
        self.stop();
        let stream = self.device.open(facing).await?;
        tracing::debug!(%facing, "Camera stream opened");
        self.stream = Some(stream);
        Ok(())
    }

    /// Extract the current frame and stop the stream. Valid only while
    /// previewing.
    pub fn capture(&mut self) -> Result<(), CameraError> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(CameraError::InvalidState {
                operation: "capture".into(),
                state: self.state().to_string(),
            });
        };
        let frame = stream.grab_frame()?;
        self.release_stream();
        self.frame = Some(frame);
        Ok(())
    }

    /// The captured frame, if any.
    pub fn frame(&self) -> Option<&ImagePayload> {
        self.frame.as_ref()
    }

    /// Hand the captured frame to the caller, ending the capture cycle.
    pub fn take_frame(&mut self) -> Option<ImagePayload> {
        self.frame.take()
    }

    /// Release the camera and discard any captured frame. Valid in any state.
    pub fn stop(&mut self) {
        self.release_stream();
        self.frame = None;
    }

    /// Discard the captured frame and return to idle for another attempt.
    pub fn retake(&mut self) {
        self.frame = None;
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("Camera stream released");
        }
    }
}

impl Drop for CaptureHelper {
    fn drop(&mut self) {
        // Teardown must release the hardware no matter which state the
        // helper was left in.
        self.release_stream();
    }
}

/// File-selection fallback: load an image from disk, deriving the content
/// type from the extension. Non-image types are rejected, mirroring the
/// picker's `image/*` restriction.
pub async fn load_image_file(path: &Path) -> Result<ImagePayload, CameraError> {
    let mime = mime_guess::from_path(path)
        .first()
        .ok_or_else(|| CameraError::NotAnImage {
            path: path.display().to_string(),
        })?;
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(CameraError::NotAnImage {
            path: path.display().to_string(),
        });
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(ImagePayload::new(bytes, mime.essence_str()))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Scripted camera backend. Every issued stream gets its own
    /// track-stopped flag, shared with the test so release is observable.
    struct MockDevice {
        deny: bool,
        issued: std::sync::Mutex<Vec<Arc<AtomicBool>>>,
    }

    impl MockDevice {
        fn granting() -> Arc<Self> {
            Arc::new(Self {
                deny: false,
                issued: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn denying() -> Arc<Self> {
            Arc::new(Self {
                deny: true,
                issued: std::sync::Mutex::new(Vec::new()),
            })
        }

        /// Track-stopped flag of the `n`th stream this device handed out.
        fn stopped(&self, n: usize) -> Arc<AtomicBool> {
            Arc::clone(&self.issued.lock().unwrap()[n])
        }
    }

    #[async_trait]
    impl CameraDevice for MockDevice {
        async fn open(&self, _facing: Facing) -> Result<Box<dyn CameraStream>, CameraError> {
            if self.deny {
                return Err(CameraError::Unavailable {
                    reason: "permission denied".into(),
                });
            }
            let stopped = Arc::new(AtomicBool::new(false));
            self.issued.lock().unwrap().push(Arc::clone(&stopped));
            Ok(Box::new(MockStream { stopped }))
        }
    }

    struct MockStream {
        stopped: Arc<AtomicBool>,
    }

    impl CameraStream for MockStream {
        fn grab_frame(&mut self) -> Result<ImagePayload, CameraError> {
            Ok(ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg"))
        }

        fn stop(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }

        fn is_live(&self) -> bool {
            !self.stopped.load(Ordering::SeqCst)
        }
    }

    // ── State machine ───────────────────────────────────────────────

    #[tokio::test]
    async fn start_capture_cycle() {
        let device = MockDevice::granting();
        let mut helper = CaptureHelper::new(Arc::clone(&device) as Arc<dyn CameraDevice>);
        assert_eq!(helper.state(), CaptureState::Idle);

        helper.start(Facing::Environment).await.unwrap();
        assert_eq!(helper.state(), CaptureState::Previewing);

        helper.capture().unwrap();
        assert_eq!(helper.state(), CaptureState::Captured);
        assert!(
            device.stopped(0).load(Ordering::SeqCst),
            "capture must stop the stream"
        );
        assert_eq!(helper.frame().unwrap().content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn stop_while_previewing_releases_the_track() {
        let device = MockDevice::granting();
        let mut helper = CaptureHelper::new(Arc::clone(&device) as Arc<dyn CameraDevice>);
        helper.start(Facing::Environment).await.unwrap();

        helper.stop();
        assert_eq!(helper.state(), CaptureState::Idle);
        assert!(device.stopped(0).load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn capture_outside_previewing_is_invalid() {
        let mut helper = CaptureHelper::new(MockDevice::granting());

        let err = helper.capture().unwrap_err();
        assert!(matches!(err, CameraError::InvalidState { .. }));
        assert!(err.to_string().contains("idle"));
    }

    #[tokio::test]
    async fn retake_discards_the_frame() {
        let mut helper = CaptureHelper::new(MockDevice::granting());
        helper.start(Facing::Environment).await.unwrap();
        helper.capture().unwrap();

        helper.retake();
        assert_eq!(helper.state(), CaptureState::Idle);
        assert!(helper.frame().is_none());
    }

    #[tokio::test]
    async fn take_frame_hands_off_the_payload() {
        let mut helper = CaptureHelper::new(MockDevice::granting());
        helper.start(Facing::Environment).await.unwrap();
        helper.capture().unwrap();

        let frame = helper.take_frame().unwrap();
        assert!(!frame.is_empty());
        assert_eq!(helper.state(), CaptureState::Idle);
        assert!(helper.take_frame().is_none());
    }

    #[tokio::test]
    async fn denial_surfaces_unavailable() {
        let mut helper = CaptureHelper::new(MockDevice::denying());
        let err = helper.start(Facing::User).await.unwrap_err();
        assert!(matches!(err, CameraError::Unavailable { .. }));
        assert_eq!(helper.state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn restart_releases_the_previous_stream() {
        let device = MockDevice::granting();
        let mut helper = CaptureHelper::new(Arc::clone(&device) as Arc<dyn CameraDevice>);
        helper.start(Facing::User).await.unwrap();

        helper.start(Facing::Environment).await.unwrap();
        assert_eq!(helper.state(), CaptureState::Previewing);
        assert!(
            device.stopped(0).load(Ordering::SeqCst),
            "first stream must be released by the restart"
        );
        assert!(!device.stopped(1).load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn drop_releases_the_stream() {
        let device = MockDevice::granting();
        {
            let mut helper = CaptureHelper::new(Arc::clone(&device) as Arc<dyn CameraDevice>);
            helper.start(Facing::Environment).await.unwrap();
            assert!(!device.stopped(0).load(Ordering::SeqCst));
        }
        assert!(
            device.stopped(0).load(Ordering::SeqCst),
            "drop must release the device"
        );
    }

    // ── File fallback ───────────────────────────────────────────────

    #[tokio::test]
    async fn file_fallback_loads_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installation-photo.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let payload = load_image_file(&path).await.unwrap();
        assert_eq!(payload.content_type, "image/jpeg");
        assert_eq!(payload.len(), 4);
    }

    #[tokio::test]
    async fn file_fallback_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not a picture").unwrap();

        let err = load_image_file(&path).await.unwrap_err();
        assert!(matches!(err, CameraError::NotAnImage { .. }));
    }

    #[tokio::test]
    async fn file_fallback_missing_file_is_io() {
        let err = load_image_file(Path::new("/nonexistent/photo.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CameraError::Io(_)));
    }
}
