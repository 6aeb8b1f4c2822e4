use ratatui::style::{Color, Modifier, Style};

use pharmavigil_client::Severity;

/// Color theme for the TUI.
pub struct Theme {
    pub mild: Color,
    pub moderate: Color,
    pub severe: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub error: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Default clinical theme; severity colors match the web client's pills.
    pub fn clinical() -> Self {
        Self {
            mild: Color::Green,
            moderate: Color::Yellow,
            severe: Color::Red,

            header_fg: Color::Black,
            header_bg: Color::Cyan,
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(25, 45, 55),
            active: Color::Cyan,
            spinner: Color::Cyan,
            error: Color::Red,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Mild => self.mild,
            Severity::Moderate => self.moderate,
            Severity::Severe => self.severe,
        }
    }

    /// Style for a severity pill; absent severities render dim.
    pub fn severity_style(&self, severity: Option<Severity>) -> Style {
        match severity {
            Some(sev) => Style::default()
                .fg(self.severity_color(sev))
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(self.dim),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().bg(self.highlight_bg).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border of the pane that currently owns keyboard input.
    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.active)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
