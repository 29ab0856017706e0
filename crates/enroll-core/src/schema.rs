//! Declarative validation schema for the registrant draft.
//!
//! One table maps each field to a predicate and a fixed human-readable
//! message. The same table drives both the live per-field checks (evaluated
//! as the user types) and the full gate check at the collecting→confirming
//! transition — there are no ad hoc checks elsewhere.

use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

use crate::profile::RegistrantProfile;

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The validatable fields of [`RegistrantProfile`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  FullName,
  Email,
  PhoneNumber,
  DateOfBirth,
  University,
  Gender,
  Photo,
}

impl Field {
  pub const ALL: [Field; 7] = [
    Field::FullName,
    Field::Email,
    Field::PhoneNumber,
    Field::DateOfBirth,
    Field::University,
    Field::Gender,
    Field::Photo,
  ];

  /// Label shown next to the input in the form.
  pub fn label(&self) -> &'static str {
    match self {
      Self::FullName => "Full name",
      Self::Email => "Email",
      Self::PhoneNumber => "Phone number",
      Self::DateOfBirth => "Date of birth",
      Self::University => "University",
      Self::Gender => "Gender",
      Self::Photo => "Photo",
    }
  }
}

/// A single failed rule: the field and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   Field,
  pub message: &'static str,
}

// ─── Rule table ──────────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Optional leading `+`, then 2–15 digits with no leading zero.
static PHONE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{1,14}$").unwrap());

struct Rule {
  field:     Field,
  message:   &'static str,
  predicate: fn(&RegistrantProfile) -> bool,
}

/// Rules are evaluated in order; the first failing rule for a field supplies
/// its message. `DateOfBirth` has two rules so "missing" and "not in the
/// past" read differently.
const RULES: [Rule; 8] = [
  Rule {
    field:     Field::FullName,
    message:   "Full name must be at least 2 characters.",
    predicate: |p| p.full_name.trim().chars().count() >= 2,
  },
  Rule {
    field:     Field::Email,
    message:   "Please enter a valid email address.",
    predicate: |p| EMAIL_RE.is_match(&p.email),
  },
  Rule {
    field:     Field::PhoneNumber,
    message:   "Please enter a valid phone number.",
    predicate: |p| PHONE_RE.is_match(&p.phone_number),
  },
  Rule {
    field:     Field::DateOfBirth,
    message:   "Date of birth is required.",
    predicate: |p| p.date_of_birth.is_some(),
  },
  Rule {
    field:     Field::DateOfBirth,
    message:   "Date of birth must be in the past.",
    predicate: |p| match p.date_of_birth {
      // Strictly before today; today itself does not pass.
      Some(d) => d < Local::now().date_naive(),
      None => true,
    },
  },
  Rule {
    field:     Field::University,
    message:   "University name is required.",
    predicate: |p| p.university.trim().chars().count() >= 3,
  },
  Rule {
    field:     Field::Gender,
    message:   "Please select a gender.",
    predicate: |p| p.gender.is_some(),
  },
  Rule {
    field:     Field::Photo,
    message:   "A passport-style photo is required.",
    predicate: |p| p.photo.starts_with("data:image/"),
  },
];

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// Evaluate the rules for one field. `None` means the field passes.
pub fn validate_field(
  profile: &RegistrantProfile,
  field: Field,
) -> Option<&'static str> {
  RULES
    .iter()
    .filter(|r| r.field == field)
    .find(|r| !(r.predicate)(profile))
    .map(|r| r.message)
}

/// Evaluate the full schema, as done at the confirmation gate.
///
/// Returns at most one error per field, in [`Field::ALL`] order.
pub fn validate(
  profile: &RegistrantProfile,
) -> Result<(), Vec<FieldError>> {
  let errors: Vec<FieldError> = Field::ALL
    .iter()
    .filter_map(|&field| {
      validate_field(profile, field).map(|message| FieldError { field, message })
    })
    .collect();

  if errors.is_empty() { Ok(()) } else { Err(errors) }
}
