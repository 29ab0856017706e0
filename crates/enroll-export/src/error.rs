//! Error type for `enroll-export`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The profile's photo field is not a decodable image data URI.
  #[error("photo is not a decodable inline image")]
  BadPhoto,

  #[error("pdf error: {0}")]
  Pdf(#[from] printpdf::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
