//! Tests for the validation schema and wizard state machine.

use chrono::{Duration, Local, NaiveDate};

use crate::{
  Error,
  profile::{Gender, RegistrantProfile},
  schema::{self, Field},
  wizard::{FormWizard, Step},
};

fn valid_profile() -> RegistrantProfile {
  RegistrantProfile {
    full_name:     "Alice Liddell".into(),
    email:         "alice@example.edu".into(),
    phone_number:  "+4512345678".into(),
    date_of_birth: NaiveDate::from_ymd_opt(2001, 3, 4),
    university:    "Wonderland University".into(),
    gender:        Some(Gender::Female),
    photo:         "data:image/png;base64,iVBORw0KGgo=".into(),
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[test]
fn fully_valid_profile_passes() {
  assert!(schema::validate(&valid_profile()).is_ok());
}

#[test]
fn empty_draft_fails_every_field() {
  let errors = schema::validate(&RegistrantProfile::default()).unwrap_err();
  assert_eq!(errors.len(), Field::ALL.len());
}

#[test]
fn bad_email_reports_only_the_email_error() {
  let mut profile = valid_profile();
  profile.email = "not-an-email".into();

  let errors = schema::validate(&profile).unwrap_err();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].field, Field::Email);
  assert_eq!(errors[0].message, "Please enter a valid email address.");
}

#[test]
fn phone_rules() {
  let mut profile = valid_profile();
  for ok in ["+4512345678", "4512345678", "12", "+123456789012345"] {
    profile.phone_number = ok.into();
    assert!(
      schema::validate_field(&profile, Field::PhoneNumber).is_none(),
      "expected {ok:?} to pass"
    );
  }
  for bad in ["", "+", "0123", "+0123", "1", "phone", "12 34 56"] {
    profile.phone_number = bad.into();
    assert!(
      schema::validate_field(&profile, Field::PhoneNumber).is_some(),
      "expected {bad:?} to fail"
    );
  }
}

#[test]
fn birth_date_must_be_strictly_in_the_past() {
  let mut profile = valid_profile();
  let today = Local::now().date_naive();

  profile.date_of_birth = None;
  assert_eq!(
    schema::validate_field(&profile, Field::DateOfBirth),
    Some("Date of birth is required.")
  );

  profile.date_of_birth = Some(today);
  assert_eq!(
    schema::validate_field(&profile, Field::DateOfBirth),
    Some("Date of birth must be in the past.")
  );

  profile.date_of_birth = Some(today + Duration::days(1));
  assert!(schema::validate_field(&profile, Field::DateOfBirth).is_some());

  profile.date_of_birth = Some(today - Duration::days(1));
  assert!(schema::validate_field(&profile, Field::DateOfBirth).is_none());
}

#[test]
fn photo_needs_the_image_prefix() {
  let mut profile = valid_profile();

  profile.photo = String::new();
  assert!(schema::validate_field(&profile, Field::Photo).is_some());

  profile.photo = "data:text/plain;base64,aGk=".into();
  assert!(schema::validate_field(&profile, Field::Photo).is_some());

  profile.photo = "data:image/jpeg;base64,/9j/4AAQ".into();
  assert!(schema::validate_field(&profile, Field::Photo).is_none());
}

#[test]
fn short_names_fail() {
  let mut profile = valid_profile();
  profile.full_name = "A".into();
  assert!(schema::validate_field(&profile, Field::FullName).is_some());
  profile.full_name = " a ".into(); // whitespace does not count
  assert!(schema::validate_field(&profile, Field::FullName).is_some());

  profile = valid_profile();
  profile.university = "Au".into();
  assert!(schema::validate_field(&profile, Field::University).is_some());
}

// ─── Wire form ───────────────────────────────────────────────────────────────

#[test]
fn profile_serialises_with_camel_case_keys() {
  let json = serde_json::to_value(valid_profile()).unwrap();
  assert_eq!(json["fullName"], "Alice Liddell");
  assert_eq!(json["phoneNumber"], "+4512345678");
  assert_eq!(json["dateOfBirth"], "2001-03-04");
  assert_eq!(json["gender"], "female");
}

// ─── Wizard ──────────────────────────────────────────────────────────────────

#[test]
fn happy_path_through_all_steps() {
  let mut wizard = FormWizard::new();
  assert_eq!(wizard.step(), Step::Collecting);

  *wizard.draft_mut() = valid_profile();
  wizard.confirm().unwrap();
  assert_eq!(wizard.step(), Step::Confirming);

  let snapshot = wizard.snapshot().unwrap();
  assert_eq!(snapshot, valid_profile());

  wizard.complete().unwrap();
  assert_eq!(wizard.step(), Step::Completed);

  wizard.reset().unwrap();
  assert_eq!(wizard.step(), Step::Collecting);
  assert_eq!(*wizard.draft(), RegistrantProfile::default());
}

#[test]
fn confirm_is_gated_on_validation() {
  let mut wizard = FormWizard::new();
  wizard.draft_mut().full_name = "Alice Liddell".into();

  match wizard.confirm() {
    Err(Error::Invalid(errors)) => assert!(!errors.is_empty()),
    other => panic!("expected Invalid, got {other:?}"),
  }
  // Failed gate leaves the wizard (and draft) where it was.
  assert_eq!(wizard.step(), Step::Collecting);
  assert_eq!(wizard.draft().full_name, "Alice Liddell");
}

#[test]
fn edit_returns_to_collecting_without_data_loss() {
  let mut wizard = FormWizard::new();
  *wizard.draft_mut() = valid_profile();
  wizard.confirm().unwrap();

  wizard.edit().unwrap();
  assert_eq!(wizard.step(), Step::Collecting);
  assert_eq!(*wizard.draft(), valid_profile());
}

#[test]
fn steps_cannot_be_skipped() {
  let mut wizard = FormWizard::new();

  assert!(matches!(
    wizard.complete(),
    Err(Error::InvalidTransition { step: Step::Collecting, .. })
  ));
  assert!(matches!(
    wizard.edit(),
    Err(Error::InvalidTransition { .. })
  ));
  assert!(matches!(
    wizard.reset(),
    Err(Error::InvalidTransition { .. })
  ));
  assert!(wizard.snapshot().is_err());
}

#[test]
fn completed_regresses_only_via_reset() {
  let mut wizard = FormWizard::new();
  *wizard.draft_mut() = valid_profile();
  wizard.confirm().unwrap();
  wizard.complete().unwrap();

  assert!(wizard.confirm().is_err());
  assert!(wizard.edit().is_err());
  assert!(wizard.complete().is_err());

  wizard.reset().unwrap();
  assert_eq!(wizard.step(), Step::Collecting);
}

#[test]
fn clear_draft_keeps_the_collecting_step() {
  let mut wizard = FormWizard::new();
  *wizard.draft_mut() = valid_profile();

  wizard.clear_draft().unwrap();
  assert_eq!(wizard.step(), Step::Collecting);
  assert_eq!(*wizard.draft(), RegistrantProfile::default());

  *wizard.draft_mut() = valid_profile();
  wizard.confirm().unwrap();
  assert!(wizard.clear_draft().is_err());
}
