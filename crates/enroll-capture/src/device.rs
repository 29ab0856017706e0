//! The camera device seam.
//!
//! Real video capture is platform-specific, so the acquisition logic talks to
//! a [`CameraDevice`] trait instead. Permission negotiation is the async
//! `request_access` call; the granted [`CameraStream`] owns the device for
//! its lifetime and releases it on drop, which is how the mode-switch
//! contract ("leaving camera mode always releases the stream") is enforced
//! on every exit path.

use std::path::PathBuf;

use image::DynamicImage;

use crate::{Error, Result};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A camera that can be asked for access.
pub trait CameraDevice {
  type Stream: CameraStream;

  /// Request permission and, if granted, bind a live stream.
  ///
  /// `Err(())` is a denial — a recoverable, user-visible state, not a
  /// failure of the device.
  async fn request_access(&self) -> std::result::Result<Self::Stream, ()>;
}

/// A bound, live camera stream. Dropping it releases the device.
pub trait CameraStream {
  /// Take exactly one still frame from the live feed.
  async fn grab_frame(&mut self) -> Result<DynamicImage>;
}

// ─── NoCamera ────────────────────────────────────────────────────────────────

/// The absent camera: every access request is denied.
///
/// Default device on terminals without video hardware; the wizard then shows
/// the persistent permission warning and the user falls back to upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

/// Uninhabited — `NoCamera` never produces a stream.
pub enum NeverStream {}

impl CameraStream for NeverStream {
  async fn grab_frame(&mut self) -> Result<DynamicImage> {
    match *self {}
  }
}

impl CameraDevice for NoCamera {
  type Stream = NeverStream;

  async fn request_access(&self) -> std::result::Result<Self::Stream, ()> {
    Err(())
  }
}

// ─── FileCamera ──────────────────────────────────────────────────────────────

/// A camera whose "live feed" is an image file on disk.
///
/// Each grab re-reads and decodes the file, so pointing it at a path that a
/// real capture process overwrites behaves like a low-rate video device.
#[derive(Debug, Clone)]
pub struct FileCamera {
  path: PathBuf,
}

impl FileCamera {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

pub struct FileStream {
  path: PathBuf,
}

impl CameraStream for FileStream {
  async fn grab_frame(&mut self) -> Result<DynamicImage> {
    let bytes = tokio::fs::read(&self.path).await?;
    image::load_from_memory(&bytes).map_err(|e| Error::Device(e.to_string()))
  }
}

impl CameraDevice for FileCamera {
  type Stream = FileStream;

  async fn request_access(&self) -> std::result::Result<Self::Stream, ()> {
    // Access is "granted" iff the backing file is readable right now.
    match tokio::fs::metadata(&self.path).await {
      Ok(m) if m.is_file() => Ok(FileStream { path: self.path.clone() }),
      _ => Err(()),
    }
  }
}
