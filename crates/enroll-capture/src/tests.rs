//! Tests for the acquisition modes, the camera lifecycle, and encoding.

use std::{io::Cursor, path::PathBuf};

use image::RgbImage;

use crate::{
  Error, Mode, Permission, PhotoAcquisition, encode,
  mock::MockCamera,
};

fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("enroll-capture-{}-{name}", std::process::id()))
}

fn png_bytes() -> Vec<u8> {
  let img = RgbImage::from_pixel(64, 64, image::Rgb([10, 20, 30]));
  let mut bytes = Vec::new();
  image::DynamicImage::ImageRgb8(img)
    .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
    .unwrap();
  bytes
}

// ─── Modes and permission ────────────────────────────────────────────────────

#[tokio::test]
async fn starts_in_upload_mode() {
  let acq = PhotoAcquisition::new(MockCamera::new(true));
  assert_eq!(acq.mode(), Mode::Upload);
  assert_eq!(acq.permission(), Permission::Unknown);
  assert!(!acq.can_capture());
}

#[tokio::test]
async fn denied_permission_disables_capture_until_granted() {
  let camera = MockCamera::new(false);
  let mut acq = PhotoAcquisition::new(camera.clone());

  acq.enter_camera().await;
  assert_eq!(acq.mode(), Mode::Camera);
  assert_eq!(acq.permission(), Permission::Denied);
  assert!(!acq.can_capture());
  assert!(matches!(acq.capture().await, Err(Error::CaptureDisabled)));

  // No automatic retry: the state stays Denied until camera mode is entered
  // again after the grant.
  camera.set_grant(true);
  assert_eq!(acq.permission(), Permission::Denied);

  acq.enter_camera().await;
  assert_eq!(acq.permission(), Permission::Granted);
  assert!(acq.can_capture());
}

#[tokio::test]
async fn capture_returns_jpeg_and_falls_back_to_upload() {
  let camera = MockCamera::new(true);
  let mut acq = PhotoAcquisition::new(camera.clone());

  acq.enter_camera().await;
  let uri = acq.capture().await.unwrap();

  assert!(uri.starts_with("data:image/jpeg;base64,"));
  assert_eq!(acq.mode(), Mode::Upload);
  // Exactly one frame was taken and the stream was released by the switch.
  assert_eq!(camera.state.grabs.load(std::sync::atomic::Ordering::SeqCst), 1);
  assert_eq!(camera.releases(), 1);
}

#[tokio::test]
async fn leaving_camera_mode_always_releases_the_stream() {
  let camera = MockCamera::new(true);
  let mut acq = PhotoAcquisition::new(camera.clone());

  acq.enter_camera().await;
  assert_eq!(camera.releases(), 0);
  acq.enter_upload();
  assert_eq!(camera.releases(), 1);

  // Re-entry binds a fresh stream; teardown releases it too.
  acq.enter_camera().await;
  drop(acq);
  assert_eq!(camera.releases(), 2);
}

// ─── Upload ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn oversized_file_is_rejected_before_reading() {
  let path = temp_path("oversize.bin");
  tokio::fs::write(&path, vec![0u8; 5 * 1024 * 1024]).await.unwrap();

  let acq = PhotoAcquisition::new(MockCamera::new(true));
  let result = acq.load_file(&path).await;
  tokio::fs::remove_file(&path).await.ok();

  match result {
    Err(Error::FileTooLarge { size }) => assert_eq!(size, 5 * 1024 * 1024),
    other => panic!("expected FileTooLarge, got {other:?}"),
  }
}

#[tokio::test]
async fn png_upload_produces_a_png_data_uri() {
  let path = temp_path("photo.png");
  tokio::fs::write(&path, png_bytes()).await.unwrap();

  let acq = PhotoAcquisition::new(MockCamera::new(true));
  let uri = acq.load_file(&path).await.unwrap();
  tokio::fs::remove_file(&path).await.ok();

  assert!(uri.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn non_image_content_is_rejected() {
  let path = temp_path("notes.txt");
  tokio::fs::write(&path, b"just text").await.unwrap();

  let acq = PhotoAcquisition::new(MockCamera::new(true));
  let result = acq.load_file(&path).await;
  tokio::fs::remove_file(&path).await.ok();

  assert!(matches!(result, Err(Error::NotAnImage)));
}

// ─── Encoding ────────────────────────────────────────────────────────────────

#[test]
fn sniffs_the_supported_formats() {
  assert_eq!(encode::sniff_media_type(&png_bytes()), Some("image/png"));
  assert_eq!(
    encode::sniff_media_type(&[0xFF, 0xD8, 0xFF, 0xE0]),
    Some("image/jpeg")
  );
  assert_eq!(
    encode::sniff_media_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
    Some("image/webp")
  );
  assert_eq!(encode::sniff_media_type(b"GIF89a..."), Some("image/gif"));
  assert_eq!(encode::sniff_media_type(b"plain text"), None);
}

#[test]
fn data_uri_decodes_back_to_its_parts() {
  let bytes = png_bytes();
  let uri = encode::data_uri("image/png", &bytes);
  let (media_type, decoded) = encode::decode_data_uri(&uri).unwrap();
  assert_eq!(media_type, "image/png");
  assert_eq!(decoded, bytes);

  assert!(encode::decode_data_uri("data:image/png;base64,!!!").is_none());
  assert!(encode::decode_data_uri("not a uri").is_none());
}
