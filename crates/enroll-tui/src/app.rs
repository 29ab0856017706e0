//! Application state and event dispatcher.
//!
//! One [`App`] owns the wizard, the photo-acquisition state, and the HTTP
//! client. Key handling is dispatched per wizard step; the submission runs as
//! a spawned task that reports back over a channel so the event loop never
//! blocks on the network.

use std::{collections::HashSet, path::Path};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use enroll_capture::{Error as CaptureError, Mode, Permission, PhotoAcquisition};
use enroll_client::{ApiClient, Outcome};
use enroll_core::{
  profile::Gender,
  schema::{self, Field},
  wizard::{FormWizard, Step},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{info, warn};

use crate::camera::AnyCamera;

/// Top-level application state.
pub struct App {
  /// The step state machine holding the shared draft.
  pub wizard: FormWizard,

  /// Upload/camera photo acquisition.
  pub acquisition: PhotoAcquisition<AnyCamera>,

  /// Shared HTTP client (single-flight guard lives inside).
  pub client: ApiClient,

  /// Field under the cursor on the form screen.
  pub focus: Field,

  /// Raw text buffer for the date of birth (`YYYY-MM-DD`); parsed into the
  /// draft on every change.
  pub dob_input: String,

  /// Path buffer for the upload pane.
  pub photo_path: String,

  /// Fields the user has edited; untouched fields keep their errors hidden
  /// until a confirm attempt fails.
  pub touched: HashSet<Field>,

  /// Show every field error, set after a failed confirmation gate.
  pub show_all_errors: bool,

  /// One-line status / notification text for the status bar.
  pub status_msg: String,

  /// A submission task is outstanding (drives the "Submitting…" label).
  pub submitting: bool,

  /// The server's confirmation message, shown on the success screen.
  pub success_message: String,

  outcome_tx: UnboundedSender<Outcome>,
  outcome_rx: UnboundedReceiver<Outcome>,
}

impl App {
  pub fn new(client: ApiClient, camera: AnyCamera) -> Self {
    let (outcome_tx, outcome_rx) = unbounded_channel();
    Self {
      wizard: FormWizard::new(),
      acquisition: PhotoAcquisition::new(camera),
      client,
      focus: Field::FullName,
      dob_input: String::new(),
      photo_path: String::new(),
      touched: HashSet::new(),
      show_all_errors: false,
      status_msg: String::new(),
      submitting: false,
      success_message: String::new(),
      outcome_tx,
      outcome_rx,
    }
  }

  /// The error to display for `field` right now, honouring touched state.
  pub fn field_error(&self, field: Field) -> Option<&'static str> {
    if self.show_all_errors || self.touched.contains(&field) {
      schema::validate_field(self.wizard.draft(), field)
    } else {
      None
    }
  }

  // ── Submission results ────────────────────────────────────────────────────

  /// Drain outcomes reported by spawned submission tasks.
  pub fn poll_outcomes(&mut self) {
    while let Ok(outcome) = self.outcome_rx.try_recv() {
      match outcome {
        Outcome::Accepted(message) => {
          self.submitting = false;
          if self.wizard.complete().is_ok() {
            info!("registration accepted: {message}");
            self.status_msg = format!("Registration Successful: {message}");
            self.success_message = message;
          }
        }
        Outcome::Rejected(message) => {
          // The wizard stays in Confirming; the user may retry or edit.
          self.submitting = false;
          warn!("registration rejected: {message}");
          self.status_msg = format!("Registration Failed: {message}");
        }
        Outcome::InFlight => {
          // A duplicate submit was dropped; the first one is still pending.
        }
      }
    }
  }

  fn spawn_submit(&mut self) {
    let Ok(snapshot) = self.wizard.snapshot() else { return };
    self.submitting = true;
    self.status_msg = "Submitting…".into();

    let client = self.client.clone();
    let tx = self.outcome_tx.clone();
    tokio::spawn(async move {
      let outcome = client.submit(&snapshot).await;
      tx.send(outcome).ok();
    });
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.wizard.step() {
      Step::Collecting => self.handle_form_key(key).await,
      Step::Confirming => self.handle_confirm_key(key),
      Step::Completed => self.handle_success_key(key),
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        // Confirm: the collecting→confirming gate.
        KeyCode::Char('n') => self.try_confirm(),
        // Clear the form back to its empty defaults.
        KeyCode::Char('d') => {
          self.wizard.clear_draft()?;
          self.dob_input.clear();
          self.photo_path.clear();
          self.touched.clear();
          self.show_all_errors = false;
          self.status_msg = "Form cleared.".into();
        }
        _ => {}
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Tab | KeyCode::Down => self.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
      _ => match self.focus {
        Field::Gender => self.handle_gender_key(key),
        Field::Photo => self.handle_photo_key(key).await,
        _ => self.handle_text_key(key),
      },
    }
    Ok(true)
  }

  fn try_confirm(&mut self) {
    match self.wizard.confirm() {
      Ok(()) => {
        self.status_msg = String::new();
        self.show_all_errors = false;
      }
      Err(enroll_core::Error::Invalid(_)) => {
        self.show_all_errors = true;
        self.status_msg = "Fix the highlighted fields before continuing.".into();
      }
      Err(e) => warn!("confirm: {e}"),
    }
  }

  fn handle_text_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Enter => {
        self.focus_next();
        return;
      }
      KeyCode::Char(c) => {
        self.touched.insert(self.focus);
        if let Some(buffer) = self.text_buffer() {
          buffer.push(c);
        }
      }
      KeyCode::Backspace => {
        self.touched.insert(self.focus);
        if let Some(buffer) = self.text_buffer() {
          buffer.pop();
        }
      }
      _ => return,
    }
    if self.focus == Field::DateOfBirth {
      self.reparse_birth_date();
    }
  }

  fn handle_gender_key(&mut self, key: KeyEvent) {
    let selected = match key.code {
      KeyCode::Char('m') => Some(Gender::Male),
      KeyCode::Char('f') => Some(Gender::Female),
      KeyCode::Char('o') => Some(Gender::Other),
      KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
        // Cycle through the three values.
        let next = match self.wizard.draft().gender {
          None => Gender::Male,
          Some(Gender::Male) => Gender::Female,
          Some(Gender::Female) => Gender::Other,
          Some(Gender::Other) => Gender::Male,
        };
        Some(next)
      }
      KeyCode::Enter => {
        self.focus_next();
        return;
      }
      _ => None,
    };
    if let Some(gender) = selected {
      self.touched.insert(Field::Gender);
      self.wizard.draft_mut().gender = Some(gender);
    }
  }

  async fn handle_photo_key(&mut self, key: KeyEvent) {
    match key.code {
      // Toggle between the two mutually exclusive modes.
      KeyCode::F(2) => self.toggle_camera().await,
      KeyCode::Enter => match self.acquisition.mode() {
        Mode::Upload => self.load_photo().await,
        Mode::Camera => self.capture_photo().await,
      },
      KeyCode::Char(c) if self.acquisition.mode() == Mode::Upload => {
        self.photo_path.push(c);
      }
      KeyCode::Backspace if self.acquisition.mode() == Mode::Upload => {
        self.photo_path.pop();
      }
      _ => {}
    }
  }

  // ── Photo acquisition ─────────────────────────────────────────────────────

  async fn toggle_camera(&mut self) {
    match self.acquisition.mode() {
      Mode::Upload => {
        self.acquisition.enter_camera().await;
        if self.acquisition.permission() == Permission::Denied {
          self.status_msg =
            "Camera Access Denied — enable camera access or upload a file.".into();
        } else {
          self.status_msg = "Camera ready. Enter takes the photo.".into();
        }
      }
      Mode::Camera => {
        self.acquisition.enter_upload();
        self.status_msg = String::new();
      }
    }
  }

  async fn load_photo(&mut self) {
    let path = self.photo_path.trim().to_string();
    if path.is_empty() {
      self.status_msg = "Type the path of an image file, then press Enter.".into();
      return;
    }
    match self.acquisition.load_file(Path::new(&path)).await {
      Ok(uri) => {
        self.touched.insert(Field::Photo);
        self.wizard.draft_mut().photo = uri;
        self.status_msg = "Photo ready.".into();
      }
      // Size and format rejections leave the photo field untouched.
      Err(e @ (CaptureError::FileTooLarge { .. } | CaptureError::NotAnImage)) => {
        self.status_msg = e.to_string();
      }
      Err(e) => {
        warn!("photo upload failed: {e}");
        self.status_msg = format!("Could not read the file: {e}");
      }
    }
  }

  async fn capture_photo(&mut self) {
    match self.acquisition.capture().await {
      Ok(uri) => {
        self.touched.insert(Field::Photo);
        self.wizard.draft_mut().photo = uri;
        self.status_msg = "Photo captured.".into();
      }
      Err(CaptureError::CaptureDisabled) => {
        self.status_msg =
          "Camera Access Denied — enable camera access or upload a file.".into();
      }
      Err(e) => {
        warn!("capture failed: {e}");
        self.status_msg = format!("Capture failed: {e}");
      }
    }
  }

  // ── Confirmation and success screens ──────────────────────────────────────

  fn handle_confirm_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      // Back to the form; no data is lost.
      KeyCode::Char('e') | KeyCode::Esc => {
        self.wizard.edit()?;
        self.status_msg = String::new();
      }
      KeyCode::Char('d') => self.export_pdf(),
      KeyCode::Char('s') | KeyCode::Enter => self.spawn_submit(),
      _ => {}
    }
    Ok(true)
  }

  fn handle_success_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      // Register another person: back to an empty form.
      KeyCode::Char('r') | KeyCode::Enter => {
        self.wizard.reset()?;
        self.acquisition.enter_upload();
        self.dob_input.clear();
        self.photo_path.clear();
        self.touched.clear();
        self.show_all_errors = false;
        self.success_message.clear();
        self.status_msg = String::new();
      }
      _ => {}
    }
    Ok(true)
  }

  fn export_pdf(&mut self) {
    let Ok(snapshot) = self.wizard.snapshot() else { return };
    let path = Path::new(enroll_export::DEFAULT_FILENAME);
    match enroll_export::render_summary(&snapshot, path) {
      Ok(()) => {
        self.status_msg = format!("Saved {}", enroll_export::DEFAULT_FILENAME);
      }
      // Export is a convenience; failure degrades to a logged warning.
      Err(e) => {
        warn!("pdf export failed: {e}");
        self.status_msg = "Could not export the summary PDF (see log).".into();
      }
    }
  }

  // ── Focus and buffers ─────────────────────────────────────────────────────

  fn focus_next(&mut self) {
    let i = Field::ALL.iter().position(|&f| f == self.focus).unwrap_or(0);
    self.focus = Field::ALL[(i + 1) % Field::ALL.len()];
  }

  fn focus_prev(&mut self) {
    let i = Field::ALL.iter().position(|&f| f == self.focus).unwrap_or(0);
    self.focus = Field::ALL[(i + Field::ALL.len() - 1) % Field::ALL.len()];
  }

  /// The text buffer edited by the focused field, if it has one.
  fn text_buffer(&mut self) -> Option<&mut String> {
    let draft = match self.focus {
      Field::DateOfBirth => return Some(&mut self.dob_input),
      Field::Photo => return Some(&mut self.photo_path),
      _ => self.wizard.draft_mut(),
    };
    match self.focus {
      Field::FullName => Some(&mut draft.full_name),
      Field::Email => Some(&mut draft.email),
      Field::PhoneNumber => Some(&mut draft.phone_number),
      Field::University => Some(&mut draft.university),
      _ => None,
    }
  }

  fn reparse_birth_date(&mut self) {
    self.wizard.draft_mut().date_of_birth =
      NaiveDate::parse_from_str(self.dob_input.trim(), "%Y-%m-%d").ok();
  }
}
