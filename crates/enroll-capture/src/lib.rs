//! Photo acquisition for the Enroll wizard.
//!
//! Two mutually exclusive modes produce one output value — an inline
//! (`data:image/...;base64,`) encoded photo:
//!
//! - **Upload** (the default): an image file is read asynchronously,
//!   size-checked against a 4 MiB ceiling, and encoded as a data URI.
//! - **Camera**: a device behind the [`device::CameraDevice`] trait is asked
//!   for permission on entry; a granted stream supplies exactly one still
//!   frame per capture, encoded as JPEG.
//!
//! The camera stream is an exclusively-owned resource: it is acquired only on
//! entry to camera mode and released (dropped) on every path that leaves it,
//! including teardown.

// Native `async fn` in traits; the futures stay on one logical thread.
#![allow(async_fn_in_trait)]

pub mod acquire;
pub mod device;
pub mod encode;
pub mod error;

#[cfg(test)]
pub mod mock;

pub use acquire::{Mode, Permission, PhotoAcquisition};
pub use device::{CameraDevice, CameraStream, FileCamera, NoCamera};
pub use error::{Error, Result};
// Re-exported so downstream camera implementations can name the frame type
// without pinning their own `image` version.
pub use image::DynamicImage;

/// Upload-mode size ceiling: 4 MiB, matching the registration service.
pub const MAX_UPLOAD_BYTES: u64 = 4 * 1024 * 1024;

#[cfg(test)]
mod tests;
