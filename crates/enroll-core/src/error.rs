//! Error types for `enroll-core`.

use thiserror::Error;

use crate::{schema::FieldError, wizard::Step};

#[derive(Debug, Error)]
pub enum Error {
  /// A wizard operation was attempted from a step that does not permit it.
  #[error("cannot {action} while in the {step:?} step")]
  InvalidTransition { action: &'static str, step: Step },

  /// The draft failed full-schema validation at the confirmation gate.
  #[error("{} field(s) failed validation", .0.len())]
  Invalid(Vec<FieldError>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
