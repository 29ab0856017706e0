//! Scriptable camera double for tests.

use std::sync::{
  Arc,
  atomic::{AtomicBool, AtomicUsize, Ordering},
};

use image::{DynamicImage, RgbImage};

use crate::{
  Result,
  device::{CameraDevice, CameraStream},
};

/// Shared probe so tests can flip permission and observe stream releases.
#[derive(Debug, Default)]
pub struct MockState {
  pub grant:    AtomicBool,
  pub grabs:    AtomicUsize,
  pub releases: AtomicUsize,
}

/// A camera whose permission answer is scripted through [`MockState`].
#[derive(Clone)]
pub struct MockCamera {
  pub state: Arc<MockState>,
}

impl MockCamera {
  /// A camera that grants (or denies) access until told otherwise.
  pub fn new(grant: bool) -> Self {
    let state = MockState::default();
    state.grant.store(grant, Ordering::SeqCst);
    Self { state: Arc::new(state) }
  }

  pub fn set_grant(&self, grant: bool) {
    self.state.grant.store(grant, Ordering::SeqCst);
  }

  pub fn releases(&self) -> usize {
    self.state.releases.load(Ordering::SeqCst)
  }
}

pub struct MockStream {
  state: Arc<MockState>,
}

impl CameraStream for MockStream {
  async fn grab_frame(&mut self) -> Result<DynamicImage> {
    self.state.grabs.fetch_add(1, Ordering::SeqCst);
    // A flat 8x8 grey frame is enough for the JPEG encoder.
    Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
      8,
      8,
      image::Rgb([128, 128, 128]),
    )))
  }
}

impl Drop for MockStream {
  fn drop(&mut self) {
    self.state.releases.fetch_add(1, Ordering::SeqCst);
  }
}

impl CameraDevice for MockCamera {
  type Stream = MockStream;

  async fn request_access(&self) -> std::result::Result<Self::Stream, ()> {
    if self.state.grant.load(Ordering::SeqCst) {
      Ok(MockStream { state: Arc::clone(&self.state) })
    } else {
      Err(())
    }
  }
}
