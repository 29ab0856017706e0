//! Confirming-step screen: the frozen snapshot plus the action row.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Confirm Your Details ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  // The wizard is in Confirming here, so the snapshot exists.
  let Ok(profile) = app.wizard.snapshot() else { return };

  let label = |s: &'static str| {
    Span::styled(
      format!("{s:<16}"),
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
  };

  let photo = super::photo_summary(&profile.photo)
    .map(|s| format!("inline photo, {s}"))
    .unwrap_or_else(|| "(no photo)".into());
  let gender = profile.gender.map(|g| g.display()).unwrap_or_default();

  let mut lines = vec![
    Line::from(Span::styled(
      "Please review your registration summary below.",
      Style::default().fg(Color::Gray),
    )),
    Line::from(""),
    Line::from(Span::styled(
      profile.full_name.clone(),
      Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(vec![label("Email"), Span::raw(profile.email.clone())]),
    Line::from(vec![label("Phone"), Span::raw(profile.phone_number.clone())]),
    Line::from(vec![
      label("Date of Birth"),
      Span::raw(profile.birth_date_display()),
    ]),
    Line::from(vec![label("Gender"), Span::raw(gender)]),
    Line::from(vec![
      label("University"),
      Span::raw(profile.university.clone()),
    ]),
    Line::from(vec![label("Photo"), Span::raw(photo)]),
    Line::from(""),
  ];

  if app.submitting {
    lines.push(Line::from(Span::styled(
      "Submitting…",
      Style::default().fg(Color::Yellow),
    )));
  } else {
    lines.push(Line::from(vec![
      Span::styled("[e] ", Style::default().fg(Color::Cyan)),
      Span::raw("Edit Details   "),
      Span::styled("[d] ", Style::default().fg(Color::Cyan)),
      Span::raw("Download PDF   "),
      Span::styled("[s] ", Style::default().fg(Color::Cyan)),
      Span::raw("Confirm & Submit"),
    ]));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
