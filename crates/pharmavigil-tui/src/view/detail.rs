use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use pharmavigil_client::Severity;

use crate::app::App;
use crate::theme::Theme;
use crate::view::{dash, events_label};

/// Render the history entry detail screen.
pub fn render(f: &mut Frame, app: &App, index: usize) {
    let theme = &app.theme;
    let area = f.area();
    let Some(entry) = app.history.get(index) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // breadcrumb
        Constraint::Min(5),    // scrollable content
        Constraint::Length(1), // footer
    ])
    .split(area);

    // --- Breadcrumb ---
    let breadcrumb = Line::from(vec![
        Span::styled(" PHARMAVIGIL ", theme.header_style()),
        Span::styled(" > ", Style::default().fg(theme.dim)),
        Span::styled(
            "History",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(theme.dim)),
        Span::styled(format!("Report #{}", entry.id), Style::default().fg(theme.text)),
    ]);
    f.render_widget(Paragraph::new(breadcrumb), chunks[0]);

    // --- Content ---
    let mut lines: Vec<Line> = Vec::new();

    section_header(&mut lines, "REPORT", theme);
    let submitted = entry
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    labeled_line(&mut lines, "Submitted", &submitted, theme);
    match &entry.raw_report {
        Some(raw) => {
            lines.push(Line::from(""));
            for raw_line in raw.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {raw_line}"),
                    Style::default().fg(theme.text),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  (report text not available)",
                Style::default().fg(theme.dim),
            )));
        }
    }

    lines.push(Line::from(""));
    section_header(&mut lines, "EXTRACTION", theme);
    labeled_line(&mut lines, "Drug", dash(entry.drug.as_deref()), theme);
    labeled_line(
        &mut lines,
        "Adverse Events",
        &events_label(&entry.adverse_events),
        theme,
    );
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<16}", "Severity"), Style::default().fg(theme.dim)),
        Span::styled(
            entry.severity.map_or("-", Severity::label),
            theme.severity_style(entry.severity),
        ),
    ]));
    labeled_line(&mut lines, "Outcome", dash(entry.outcome.as_deref()), theme);

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(content, chunks[1]);

    // --- Footer ---
    let footer = Line::from(Span::styled(
        " j/k:scroll  Esc:back  ?:help  q:quit",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), chunks[2]);
}

fn section_header<'a>(lines: &mut Vec<Line<'a>>, title: &'a str, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
    )));
}

fn labeled_line<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: &str, theme: &Theme) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:<16}"), Style::default().fg(theme.dim)),
        Span::styled(value.to_string(), Style::default().fg(theme.text)),
    ]));
}
