//! Error type for `enroll-capture`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The selected file exceeds [`crate::MAX_UPLOAD_BYTES`]. The photo field
  /// is never touched when this is returned.
  #[error("file is {size} bytes; images must be smaller than 4MB")]
  FileTooLarge { size: u64 },

  /// The file's content is not a recognised image format.
  #[error("file does not look like a PNG, JPEG, WEBP, or GIF image")]
  NotAnImage,

  /// Capture was requested while no camera stream is bound (permission
  /// denied, or not in camera mode).
  #[error("capture is disabled; no active camera stream")]
  CaptureDisabled,

  /// The camera device failed mid-stream (after permission was granted).
  #[error("camera device error: {0}")]
  Device(String),

  #[error("image encode error: {0}")]
  Image(#[from] image::ImageError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
