//! Collecting-step screen: the field list and the photo pane.

use enroll_capture::{Mode, Permission};
use enroll_core::{profile::Gender, schema::Field};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
    .split(area);

  draw_fields(f, cols[0], app);
  draw_photo_pane(f, cols[1], app);
}

// ─── Field list ───────────────────────────────────────────────────────────────

const TEXT_FIELDS: [Field; 6] = [
  Field::FullName,
  Field::Email,
  Field::PhoneNumber,
  Field::DateOfBirth,
  Field::University,
  Field::Gender,
];

fn draw_fields(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Your Details ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let draft = app.wizard.draft();
  let mut lines: Vec<Line> = Vec::new();

  for field in TEXT_FIELDS {
    let focused = app.focus == field;
    let value = match field {
      Field::FullName => draft.full_name.clone(),
      Field::Email => draft.email.clone(),
      Field::PhoneNumber => draft.phone_number.clone(),
      Field::DateOfBirth => app.dob_input.clone(),
      Field::University => draft.university.clone(),
      Field::Gender => gender_picker(draft.gender),
      // Photo is rendered by its own pane.
      Field::Photo => String::new(),
    };

    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    let cursor = if focused && field != Field::Gender { "▏" } else { "" };

    lines.push(Line::from(vec![
      Span::styled(format!("{marker}{:<14}", field.label()), label_style),
      Span::raw(value),
      Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    if let Some(message) = app.field_error(field) {
      lines.push(Line::from(Span::styled(
        format!("  {message}"),
        Style::default().fg(Color::Red),
      )));
    }
    lines.push(Line::from(""));
  }

  if app.focus == Field::DateOfBirth {
    lines.push(Line::from(Span::styled(
      "  Format: YYYY-MM-DD",
      Style::default().fg(Color::DarkGray),
    )));
  }
  if app.focus == Field::Gender {
    lines.push(Line::from(Span::styled(
      "  m/f/o or Space to choose",
      Style::default().fg(Color::DarkGray),
    )));
  }

  f.render_widget(Paragraph::new(lines), inner);
}

fn gender_picker(selected: Option<Gender>) -> String {
  Gender::ALL
    .iter()
    .map(|g| {
      if selected == Some(*g) {
        format!("[{}]", g.display())
      } else {
        format!(" {} ", g.display())
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

// ─── Photo pane ───────────────────────────────────────────────────────────────

fn draw_photo_pane(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Field::Photo;
  let border = if focused { Color::Cyan } else { Color::DarkGray };
  let block = Block::default()
    .title(" Your Photo ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  // Mode tabs.
  let (upload_style, camera_style) = match app.acquisition.mode() {
    Mode::Upload => (
      Style::default().fg(Color::Black).bg(Color::Cyan),
      Style::default().fg(Color::Gray),
    ),
    Mode::Camera => (
      Style::default().fg(Color::Gray),
      Style::default().fg(Color::Black).bg(Color::Cyan),
    ),
  };
  lines.push(Line::from(vec![
    Span::styled(" Upload ", upload_style),
    Span::raw("  "),
    Span::styled(" Camera ", camera_style),
    Span::styled("   F2 switches", Style::default().fg(Color::DarkGray)),
  ]));
  lines.push(Line::from(""));

  // Current photo state.
  match super::photo_summary(&app.wizard.draft().photo) {
    Some(summary) => lines.push(Line::from(Span::styled(
      format!("Photo ready — {summary}"),
      Style::default().fg(Color::Green),
    ))),
    None => lines.push(Line::from(Span::styled(
      "No photo yet",
      Style::default().fg(Color::Gray),
    ))),
  }
  lines.push(Line::from(""));

  match app.acquisition.mode() {
    Mode::Upload => {
      let cursor = if focused { "▏" } else { "" };
      lines.push(Line::from(vec![
        Span::styled("Path: ", Style::default().fg(Color::Gray)),
        Span::raw(app.photo_path.clone()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
      ]));
      lines.push(Line::from(Span::styled(
        "Enter loads the file. Max 4MB. PNG, JPG, WEBP.",
        Style::default().fg(Color::DarkGray),
      )));
    }
    Mode::Camera => match app.acquisition.permission() {
      Permission::Granted => {
        lines.push(Line::from(Span::styled(
          "● Live camera bound",
          Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(Span::styled(
          "Enter takes one photo and returns to Upload.",
          Style::default().fg(Color::DarkGray),
        )));
      }
      _ => {
        // Persistent warning until a later grant; capture stays disabled.
        lines.push(Line::from(Span::styled(
          "Camera Access Required",
          Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
          "Please allow camera access, or switch back to Upload (F2).",
          Style::default().fg(Color::Red),
        )));
      }
    },
  }

  if let Some(message) = app.field_error(Field::Photo) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      message,
      Style::default().fg(Color::Red),
    )));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
