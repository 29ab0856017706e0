//! Async HTTP client for the registration service.
//!
//! One operation: [`ApiClient::submit`] — a single POST of the finalised
//! record to the `/register` endpoint. The wire contract is fixed: camelCase
//! keys, `dateOfBirth` as `YYYY-MM-DD`, a JSON response carrying either a
//! `message` (success) or an `error` (failure). A single-flight flag drops
//! any submit issued while another is outstanding.

use std::{
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
  time::Duration,
};

use enroll_core::profile::RegistrantProfile;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Shown when the server supplies no usable error text (network failure,
/// unparseable body, missing fields).
pub const FALLBACK_ERROR: &str = "Registration failed";

/// Connection settings for the registration service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// The result of one submit attempt, ready for the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// 2xx — the server's confirmation message.
  Accepted(String),
  /// Anything else — the server's error text, or [`FALLBACK_ERROR`].
  Rejected(String),
  /// Dropped without a network call: another submission is outstanding.
  InFlight,
}

// ─── Wire record ─────────────────────────────────────────────────────────────

/// The transformed record sent over the wire. Everything passes through
/// unchanged except the date of birth, canonicalised to `YYYY-MM-DD` text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionRecord<'a> {
  full_name:     &'a str,
  email:         &'a str,
  phone_number:  &'a str,
  date_of_birth: String,
  university:    &'a str,
  gender:        &'a str,
  photo:         &'a str,
}

impl<'a> SubmissionRecord<'a> {
  fn from_profile(profile: &'a RegistrantProfile) -> Self {
    Self {
      full_name:     &profile.full_name,
      email:         &profile.email,
      phone_number:  &profile.phone_number,
      // Submit runs on a validated snapshot; an unset date would have been
      // caught at the confirmation gate, and the server rejects blanks.
      date_of_birth: profile
        .date_of_birth
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default(),
      university:    &profile.university,
      gender:        profile.gender.map(|g| g.as_str()).unwrap_or_default(),
      photo:         &profile.photo,
    }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the registration endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based, and clones
/// share the single-flight flag.
#[derive(Clone)]
pub struct ApiClient {
  client:    Client,
  config:    ApiConfig,
  in_flight: Arc<AtomicBool>,
}

/// Clears the single-flight flag on every exit path from `submit`.
struct ClearFlag<'a>(&'a AtomicBool);

impl Drop for ClearFlag<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

impl ApiClient {
  /// Bounded 30-second timeout; no automatic retry.
  pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      config,
      in_flight: Arc::new(AtomicBool::new(false)),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  /// `POST /register` — one round trip, at most one outstanding at a time.
  pub async fn submit(&self, profile: &RegistrantProfile) -> Outcome {
    if self.in_flight.swap(true, Ordering::SeqCst) {
      debug!("submission already in flight; dropping this request");
      return Outcome::InFlight;
    }
    let _guard = ClearFlag(&self.in_flight);

    let record = SubmissionRecord::from_profile(profile);
    let resp = match self
      .client
      .post(self.url("/register"))
      .json(&record)
      .send()
      .await
    {
      Ok(resp) => resp,
      Err(e) => {
        warn!("submission transport error: {e}");
        return Outcome::Rejected(FALLBACK_ERROR.to_string());
      }
    };

    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);

    if status.is_success() {
      match body.get("message").and_then(Value::as_str) {
        Some(message) => Outcome::Accepted(message.to_string()),
        None => {
          warn!("{status} response without a confirmation message");
          Outcome::Rejected(FALLBACK_ERROR.to_string())
        }
      }
    } else {
      let text = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_ERROR);
      warn!("submission rejected ({status}): {text}");
      Outcome::Rejected(text.to_string())
    }
  }
}
