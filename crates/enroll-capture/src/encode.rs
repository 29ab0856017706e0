//! Inline image encoding — media-type sniffing and data-URI construction.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use image::DynamicImage;

use crate::{Error, Result};

/// Identify an image format from its magic bytes.
///
/// Only the formats the registration service accepts are recognised.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
  if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
    Some("image/png")
  } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
    Some("image/jpeg")
  } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
    Some("image/webp")
  } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
    Some("image/gif")
  } else {
    None
  }
}

/// Wrap raw image bytes as a `data:<media_type>;base64,` URI.
pub fn data_uri(media_type: &str, bytes: &[u8]) -> String {
  format!("data:{media_type};base64,{}", B64.encode(bytes))
}

/// Sniff the media type of `bytes` and wrap them as a data URI.
pub fn data_uri_sniffed(bytes: &[u8]) -> Result<String> {
  let media_type = sniff_media_type(bytes).ok_or(Error::NotAnImage)?;
  Ok(data_uri(media_type, bytes))
}

/// Encode a captured frame as JPEG and wrap it as a data URI.
pub fn jpeg_data_uri(frame: &DynamicImage) -> Result<String> {
  let mut bytes = Vec::new();
  // The camera gives RGB; JPEG cannot carry an alpha channel.
  frame
    .to_rgb8()
    .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Jpeg(90))?;
  Ok(data_uri("image/jpeg", &bytes))
}

/// Split a data URI back into its media type and decoded bytes.
///
/// The inverse of [`data_uri`]; used by the PDF export to recover the photo.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
  let rest = uri.strip_prefix("data:")?;
  let (media_type, payload) = rest.split_once(";base64,")?;
  let bytes = B64.decode(payload).ok()?;
  Some((media_type.to_string(), bytes))
}
