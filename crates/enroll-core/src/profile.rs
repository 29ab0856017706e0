//! The registrant draft — the single record every wizard step reads and
//! writes.
//!
//! The draft starts empty, is mutated field-by-field while collecting, and is
//! cloned as a frozen snapshot when the wizard enters confirmation. The wire
//! form (camelCase keys, `dateOfBirth` as `YYYY-MM-DD`) is produced by the
//! submission client, not here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-reported gender, restricted to the three values the registration
/// service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

  /// Lowercase wire form, matching the serde tag.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Male => "male",
      Self::Female => "female",
      Self::Other => "other",
    }
  }

  /// Capitalised form for the confirmation summary.
  pub fn display(&self) -> &'static str {
    match self {
      Self::Male => "Male",
      Self::Female => "Female",
      Self::Other => "Other",
    }
  }
}

/// One person's registration data.
///
/// `Default` is the empty draft; [`crate::schema::validate`] decides when it
/// is complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantProfile {
  pub full_name:     String,
  pub email:         String,
  pub phone_number:  String,
  pub date_of_birth: Option<NaiveDate>,
  pub university:    String,
  pub gender:        Option<Gender>,
  /// Inline-encoded photo (`data:image/<type>;base64,` URI). Empty until a
  /// photo has been acquired.
  pub photo:         String,
}

impl RegistrantProfile {
  /// Date of birth formatted for the confirmation summary
  /// (e.g. "March 4, 2001"), or the empty string if unset.
  pub fn birth_date_display(&self) -> String {
    self
      .date_of_birth
      .map(|d| d.format("%B %-d, %Y").to_string())
      .unwrap_or_default()
  }
}
