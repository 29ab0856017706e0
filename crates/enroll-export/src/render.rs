//! Summary-page layout and PDF generation.

use std::{fs::File, io::BufWriter, path::Path};

use enroll_capture::encode::decode_data_uri;
use enroll_core::profile::RegistrantProfile;
use printpdf::{
  BuiltinFont, Image, ImageTransform, Mm, PdfDocument, image_crate,
};

use crate::{Error, Result};

/// Fixed artifact name used by the wizard's export action.
pub const DEFAULT_FILENAME: &str = "registration-summary.pdf";

// A4 portrait.
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const PHOTO_W: f32 = 60.0;

/// Scale pixel dimensions to a box `width_mm` wide, preserving aspect ratio.
///
/// Only the width is constrained; a tall image may run past the bottom of
/// the page, where the page boundary clips it — the same rule the
/// confirmation view uses.
fn fit_to_width(px_w: u32, px_h: u32, width_mm: f32) -> (f32, f32) {
  let height_mm = width_mm * px_h as f32 / px_w.max(1) as f32;
  (width_mm, height_mm)
}

/// Render `profile` as a one-page A4 summary at `out_path`.
pub fn render_summary(
  profile: &RegistrantProfile,
  out_path: &Path,
) -> Result<()> {
  let (_, photo_bytes) =
    decode_data_uri(&profile.photo).ok_or(Error::BadPhoto)?;
  let photo = image_crate::load_from_memory(&photo_bytes)
    .map_err(|_| Error::BadPhoto)?;

  let (doc, page, layer) =
    PdfDocument::new("Registration Summary", Mm(PAGE_W), Mm(PAGE_H), "summary");
  let layer = doc.get_page(page).get_layer(layer);

  let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
  let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

  // ── Header ────────────────────────────────────────────────────────────────
  layer.use_text(
    "Registration Summary",
    20.0,
    Mm(MARGIN),
    Mm(PAGE_H - MARGIN),
    &bold,
  );

  // ── Photo, left column ────────────────────────────────────────────────────
  let (w_mm, h_mm) = fit_to_width(photo.width(), photo.height(), PHOTO_W);
  let photo_top = PAGE_H - MARGIN - 15.0;
  // printpdf places images by their bottom-left corner; a negative y here
  // means the photo overflows the page and is clipped by the page boundary.
  let dpi = 300.0;
  let scale = w_mm * dpi / (photo.width().max(1) as f32 * 25.4);
  Image::from_dynamic_image(&photo).add_to_layer(layer.clone(), ImageTransform {
    translate_x: Some(Mm(MARGIN)),
    translate_y: Some(Mm(photo_top - h_mm)),
    scale_x: Some(scale),
    scale_y: Some(scale),
    dpi: Some(dpi),
    ..Default::default()
  });

  // ── Fields, right column ──────────────────────────────────────────────────
  let text_x = MARGIN + PHOTO_W + 15.0;
  let mut y = photo_top - 8.0;

  layer.use_text(profile.full_name.as_str(), 16.0, Mm(text_x), Mm(y), &bold);
  y -= 12.0;

  let gender = profile.gender.map(|g| g.display()).unwrap_or_default();
  let born = profile.birth_date_display();
  let rows = [
    ("Email", profile.email.as_str()),
    ("Phone", profile.phone_number.as_str()),
    ("Date of Birth", born.as_str()),
    ("Gender", gender),
    ("University", profile.university.as_str()),
  ];
  for (label, value) in rows {
    layer.use_text(format!("{label}:"), 11.0, Mm(text_x), Mm(y), &bold);
    layer.use_text(value, 11.0, Mm(text_x + 32.0), Mm(y), &font);
    y -= 8.0;
  }

  doc.save(&mut BufWriter::new(File::create(out_path)?))?;
  Ok(())
}
