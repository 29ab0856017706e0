//! The upload/camera mode manager.

use std::path::Path;

use tracing::{debug, warn};

use crate::{
  Error, MAX_UPLOAD_BYTES, Result,
  device::{CameraDevice, CameraStream},
  encode,
};

/// Which acquisition surface is active. The modes are mutually exclusive;
/// only camera mode may hold the device stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
  #[default]
  Upload,
  Camera,
}

/// Outcome of the most recent camera permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
  /// Camera mode has not been entered yet.
  #[default]
  Unknown,
  Granted,
  /// Shown as a persistent warning; cleared only by a later grant.
  Denied,
}

/// Manages the two acquisition modes and produces the inline-encoded photo.
///
/// Writing the produced value into the shared draft is the caller's job; this
/// type only owns the mode state and the camera stream.
pub struct PhotoAcquisition<C: CameraDevice> {
  camera:     C,
  mode:       Mode,
  permission: Permission,
  stream:     Option<C::Stream>,
}

impl<C: CameraDevice> PhotoAcquisition<C> {
  pub fn new(camera: C) -> Self {
    Self {
      camera,
      mode: Mode::Upload,
      permission: Permission::Unknown,
      stream: None,
    }
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn permission(&self) -> Permission {
    self.permission
  }

  /// Whether the capture action is currently enabled.
  pub fn can_capture(&self) -> bool {
    self.mode == Mode::Camera && self.stream.is_some()
  }

  // ── Mode switching ────────────────────────────────────────────────────────

  /// Enter camera mode, requesting device permission first.
  ///
  /// Denial is not an error: the mode still changes, capture stays disabled,
  /// and [`Permission::Denied`] drives the persistent warning. There is no
  /// automatic retry; re-entering camera mode asks again.
  pub async fn enter_camera(&mut self) {
    // Re-entry drops any stale stream before asking again.
    self.stream = None;
    self.mode = Mode::Camera;
    match self.camera.request_access().await {
      Ok(stream) => {
        debug!("camera permission granted");
        self.permission = Permission::Granted;
        self.stream = Some(stream);
      }
      Err(()) => {
        warn!("camera permission denied");
        self.permission = Permission::Denied;
      }
    }
  }

  /// Enter upload mode. Leaving camera mode always releases the stream,
  /// regardless of why the switch happened.
  pub fn enter_upload(&mut self) {
    if self.stream.take().is_some() {
      debug!("camera stream released");
    }
    self.mode = Mode::Upload;
  }

  // ── Producing the photo ───────────────────────────────────────────────────

  /// Upload mode: read `path`, enforce the 4 MiB ceiling, and return the
  /// photo as a sniffed-media-type data URI.
  ///
  /// The size check runs against file metadata before any content is read;
  /// an oversized file produces [`Error::FileTooLarge`] and nothing else.
  pub async fn load_file(&self, path: &Path) -> Result<String> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_UPLOAD_BYTES {
      return Err(Error::FileTooLarge { size });
    }
    let bytes = tokio::fs::read(path).await?;
    encode::data_uri_sniffed(&bytes)
  }

  /// Camera mode: take one still frame, encode it as inline JPEG, and switch
  /// back to upload mode (which releases the stream).
  pub async fn capture(&mut self) -> Result<String> {
    let stream = self.stream.as_mut().ok_or(Error::CaptureDisabled)?;
    let frame = stream.grab_frame().await?;
    let uri = encode::jpeg_data_uri(&frame)?;
    self.enter_upload();
    Ok(uri)
  }
}
