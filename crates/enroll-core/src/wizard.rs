//! The step state machine that owns the shared draft.
//!
//! Collecting → Confirming → Completed, with edit and reset as the only ways
//! back. Forward progress is gated on full-schema validation; completing is
//! reserved for a successful submission result. Every disallowed transition
//! is an [`Error`], never a panic.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  profile::RegistrantProfile,
  schema,
};

/// The wizard's current step.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Step {
  /// Gathering field values; the draft is mutable.
  #[default]
  Collecting,
  /// Reviewing a frozen snapshot; submission and export are available.
  Confirming,
  /// Submission accepted; terminal until an explicit reset.
  Completed,
}

/// The wizard: one owned draft plus the current step.
///
/// Steps never hold their own copies of the record — all reads and writes go
/// through [`FormWizard::draft`] / [`FormWizard::draft_mut`] so the record
/// cannot diverge between steps.
#[derive(Debug, Default)]
pub struct FormWizard {
  step:  Step,
  draft: RegistrantProfile,
}

impl FormWizard {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn step(&self) -> Step {
    self.step
  }

  pub fn draft(&self) -> &RegistrantProfile {
    &self.draft
  }

  /// Mutable access to the draft for the collecting step (form inputs and
  /// the photo-acquisition output both write through here).
  pub fn draft_mut(&mut self) -> &mut RegistrantProfile {
    &mut self.draft
  }

  /// A frozen copy of the draft for display or transmission.
  ///
  /// Only meaningful once the collecting step is over; calling it earlier is
  /// a transition error.
  pub fn snapshot(&self) -> Result<RegistrantProfile> {
    match self.step {
      Step::Confirming | Step::Completed => Ok(self.draft.clone()),
      step => Err(Error::InvalidTransition { action: "snapshot", step }),
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Collecting → Confirming, gated on the full validation schema.
  ///
  /// On validation failure the wizard stays in Collecting and the per-field
  /// errors are returned in [`Error::Invalid`].
  pub fn confirm(&mut self) -> Result<()> {
    if self.step != Step::Collecting {
      return Err(Error::InvalidTransition { action: "confirm", step: self.step });
    }
    schema::validate(&self.draft).map_err(Error::Invalid)?;
    self.step = Step::Confirming;
    Ok(())
  }

  /// Confirming → Collecting. The draft is untouched; nothing is lost.
  pub fn edit(&mut self) -> Result<()> {
    if self.step != Step::Confirming {
      return Err(Error::InvalidTransition { action: "edit", step: self.step });
    }
    self.step = Step::Collecting;
    Ok(())
  }

  /// Confirming → Completed. Driven only by a successful submission result.
  pub fn complete(&mut self) -> Result<()> {
    if self.step != Step::Confirming {
      return Err(Error::InvalidTransition { action: "complete", step: self.step });
    }
    self.step = Step::Completed;
    Ok(())
  }

  /// Completed → Collecting, clearing the draft to its empty defaults so
  /// another person can be registered.
  pub fn reset(&mut self) -> Result<()> {
    if self.step != Step::Completed {
      return Err(Error::InvalidTransition { action: "reset", step: self.step });
    }
    self.draft = RegistrantProfile::default();
    self.step = Step::Collecting;
    Ok(())
  }

  /// Clear the draft without leaving the collecting step (the form's
  /// "clear" action).
  pub fn clear_draft(&mut self) -> Result<()> {
    if self.step != Step::Collecting {
      return Err(Error::InvalidTransition { action: "clear", step: self.step });
    }
    self.draft = RegistrantProfile::default();
    Ok(())
  }
}
