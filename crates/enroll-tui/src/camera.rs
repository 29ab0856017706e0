//! Runtime camera selection.
//!
//! The acquisition manager is generic over one device type, so the `--camera`
//! flag is dispatched through a small enum rather than a trait object.

use std::path::PathBuf;

use enroll_capture::{
  CameraDevice, CameraStream, DynamicImage, FileCamera, NoCamera,
  device::{FileStream, NeverStream},
};

/// The camera chosen at startup: absent (every request denied) or backed by
/// an image file standing in for a live feed.
pub enum AnyCamera {
  Absent(NoCamera),
  File(FileCamera),
}

impl AnyCamera {
  /// `none` → absent; anything else is treated as an image path.
  pub fn from_source(source: &str) -> Self {
    if source.eq_ignore_ascii_case("none") {
      Self::Absent(NoCamera)
    } else {
      Self::File(FileCamera::new(PathBuf::from(source)))
    }
  }
}

pub enum AnyStream {
  Never(NeverStream),
  File(FileStream),
}

impl CameraStream for AnyStream {
  async fn grab_frame(&mut self) -> enroll_capture::Result<DynamicImage> {
    match self {
      Self::Never(s) => s.grab_frame().await,
      Self::File(s) => s.grab_frame().await,
    }
  }
}

impl CameraDevice for AnyCamera {
  type Stream = AnyStream;

  async fn request_access(&self) -> Result<Self::Stream, ()> {
    match self {
      Self::Absent(c) => c.request_access().await.map(AnyStream::Never),
      Self::File(c) => c.request_access().await.map(AnyStream::File),
    }
  }
}
