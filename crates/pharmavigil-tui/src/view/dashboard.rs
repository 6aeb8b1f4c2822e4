use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap,
};

use pharmavigil_client::{Severity, SeverityDistribution};

use crate::app::{App, Focus};
use crate::theme::Theme;
use crate::view::{dash, events_label, spinner_char, truncate};

/// Render the dashboard: report editor, extraction result, history table,
/// and severity distribution chart.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Min(10),   // cards
        Constraint::Length(1), // footer
    ])
    .split(area);

    render_header(f, chunks[0], theme);

    let columns = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    let left = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[0]);
    let right = Layout::vertical([Constraint::Length(9), Constraint::Min(6)]).split(columns[1]);

    render_editor(f, left[0], app);
    render_history(f, left[1], app);
    render_result(f, right[0], app);
    render_chart(f, right[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" PHARMAVIGIL ", theme.header_style()),
        Span::styled(
            " Adverse-Event Report Assistant",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(header, area);
}

fn render_editor(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Editor;

    let title = if app.processing.in_flight() {
        format!(" Report {} Processing... ", spinner_char(app.tick))
    } else if focused {
        " Report (editing) ".to_string()
    } else {
        " Report (i to edit) ".to_string()
    };

    let border_style = if focused {
        theme.focused_border_style()
    } else {
        theme.border_style()
    };

    let body = if app.input.is_empty() {
        Paragraph::new(Span::styled("Enter report text...", Style::default().fg(theme.dim)))
    } else {
        Paragraph::new(app.input.as_str()).style(Style::default().fg(theme.text))
    };

    f.render_widget(
        body.wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        ),
        area,
    );
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    match &app.result {
        Some(result) => {
            labeled_line(&mut lines, "Drug", dash(result.drug.as_deref()), theme);
            labeled_line(
                &mut lines,
                "Adverse Events",
                &events_label(&result.adverse_events),
                theme,
            );
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", "Severity"), Style::default().fg(theme.dim)),
                Span::styled(
                    result.severity.map_or("-", Severity::label),
                    theme.severity_style(result.severity),
                ),
            ]));
            labeled_line(&mut lines, "Outcome", dash(result.outcome.as_deref()), theme);

            if app.translating.in_flight() {
                lines.push(Line::from(Span::styled(
                    format!("  {} Translating...", spinner_char(app.tick)),
                    Style::default().fg(theme.spinner),
                )));
            } else if let Some(translation) = &app.translation {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<16}", translation.language.label()),
                        Style::default().fg(theme.dim),
                    ),
                    Span::styled(
                        translation.translated.clone(),
                        Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  No result yet.",
                Style::default().fg(theme.dim),
            )));
        }
    }

    let content = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" Extraction Result "),
    );
    f.render_widget(content, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let header = Row::new(
        ["When", "Drug", "Events", "Severity", "Outcome"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
    )
    .height(1);

    let rows: Vec<Row> = app
        .history
        .iter()
        .map(|entry| {
            let when = entry
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            Row::new(vec![
                Cell::from(when).style(Style::default().fg(theme.dim)),
                Cell::from(truncate(dash(entry.drug.as_deref()), 18)),
                Cell::from(truncate(&events_label(&entry.adverse_events), 24)),
                Cell::from(entry.severity.map_or("-", Severity::label))
                    .style(theme.severity_style(entry.severity)),
                Cell::from(truncate(dash(entry.outcome.as_deref()), 12)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Min(10),
            Constraint::Min(14),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" History ({}) ", app.history.len())),
    )
    .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    if !app.history.is_empty() {
        state.select(Some(app.history_cursor));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dist = SeverityDistribution::of(&app.history);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Severity Distribution ");

    if dist.total() == 0 {
        let empty = Paragraph::new(Span::styled(
            "  No classified reports yet.",
            Style::default().fg(theme.dim),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = Severity::ALL
        .iter()
        .map(|&sev| {
            Bar::default()
                .value(dist.count(sev) as u64)
                .label(Line::from(sev.label()))
                .style(Style::default().fg(theme.severity_color(sev)))
                .value_style(
                    Style::default()
                        .fg(theme.header_fg)
                        .bg(theme.severity_color(sev)),
                )
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(2)
        .block(block);
    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let status = if app.processing.in_flight() {
        format!(" {} processing ", spinner_char(app.tick))
    } else if app.translating.in_flight() {
        format!(" {} translating ", spinner_char(app.tick))
    } else {
        String::new()
    };

    let hints = match app.focus {
        Focus::Editor => "Esc:done  Ctrl+p:process  Ctrl+x:clear",
        Focus::History => "i:edit  p:process  c:clear  f:French  w:Swahili  Enter:detail  ?:help  q:quit",
    };

    let footer = Line::from(vec![
        Span::styled(status, Style::default().fg(theme.spinner)),
        Span::styled(format!(" {hints}"), theme.footer_style()),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}

fn labeled_line<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: &str, theme: &Theme) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:<16}"), Style::default().fg(theme.dim)),
        Span::styled(value.to_string(), Style::default().fg(theme.text)),
    ]));
}
