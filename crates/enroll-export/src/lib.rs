//! Confirmation-summary PDF export.
//!
//! Renders the frozen registrant snapshot onto a single A4 page — photo plus
//! the field values shown on the confirmation screen — and writes it to a
//! file. Export is a presentation convenience: callers treat failure as a
//! logged warning, never as something that blocks the wizard.

mod error;
mod render;

pub use error::{Error, Result};
pub use render::{DEFAULT_FILENAME, render_summary};
