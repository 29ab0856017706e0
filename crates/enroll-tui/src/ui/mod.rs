//! TUI rendering — orchestrates the per-step screens.

pub mod confirm;
pub mod form;
pub mod success;

use chrono::Local;
use enroll_core::wizard::Step;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.wizard.step() {
    Step::Collecting => form::draw(f, rows[1], app),
    Step::Confirming => confirm::draw(f, rows[1], app),
    Step::Completed => success::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let step_label = match app.wizard.step() {
    Step::Collecting => "Step 1 of 3 — Your Details",
    Step::Confirming => "Step 2 of 3 — Confirm",
    Step::Completed => "Step 3 of 3 — Done",
  };
  let left = Span::styled(
    format!(" enroll  {step_label}"),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{} ", Local::now().format("%Y-%m-%d")),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);
  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.wizard.step() {
    Step::Collecting => (
      "FORM",
      "Tab/↑↓ move  Ctrl-N continue  Ctrl-D clear  Ctrl-C quit",
    ),
    Step::Confirming if app.submitting => ("CONFIRM", "Submitting…"),
    Step::Confirming => (
      "CONFIRM",
      "e edit  d download PDF  s submit  q quit",
    ),
    Step::Completed => ("DONE", "r register another  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Rough size label for an inline photo ("12 KB of image/png").
pub(crate) fn photo_summary(photo: &str) -> Option<String> {
  let media_type = photo.strip_prefix("data:")?.split(';').next()?;
  let payload = photo.split_once(";base64,")?.1;
  // Base64 expands by 4/3; good enough for a display hint.
  let kb = payload.len() * 3 / 4 / 1024;
  Some(format!("{kb} KB of {media_type}"))
}
