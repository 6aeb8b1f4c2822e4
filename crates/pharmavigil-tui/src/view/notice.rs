use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::help::centered_rect;

/// Render a blocking notice as a centered popup.
///
/// The terminal analogue of the web client's alert(): input is swallowed
/// until the notice is dismissed.
pub fn render(f: &mut Frame, theme: &Theme, text: &str) {
    let area = f.area();
    let popup = centered_rect(52, 7, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {text}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to dismiss",
            Style::default().fg(theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Error "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
