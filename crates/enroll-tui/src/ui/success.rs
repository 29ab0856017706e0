//! Completed-step screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Registration Successful ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Green));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let message = if app.success_message.is_empty() {
    "Your registration has been received.".to_string()
  } else {
    app.success_message.clone()
  };

  let lines = vec![
    Line::from(""),
    Line::from(Span::styled(
      "  ✓ All done!",
      Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(Span::raw(format!("  {message}"))),
    Line::from(""),
    Line::from(vec![
      Span::styled("  [r] ", Style::default().fg(Color::Cyan)),
      Span::raw("Register another person   "),
      Span::styled("[q] ", Style::default().fg(Color::Cyan)),
      Span::raw("Quit"),
    ]),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}
