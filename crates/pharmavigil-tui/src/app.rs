use pharmavigil_client::{ExtractionResult, HistoryEntry, Translation};

use crate::action::{Action, Command};
use crate::model::guard::RequestGuard;
use crate::theme::Theme;
use crate::tui_event::{BackendEvent, HistoryOrigin};

/// Sample report shown in the editor on first launch.
pub const SAMPLE_REPORT: &str =
    "Patient experienced severe nausea and headache after taking Drug X. Patient recovered.";

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    /// Detail view for the history entry at this index.
    EntryDetail(usize),
}

/// Which dashboard pane owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    History,
}

/// Main application state.
///
/// Owns everything the client knows: the report editor text, the latest
/// extraction result, its translation, the history list, and the two
/// in-flight guards. Mutated only by [`update`](App::update) and
/// [`handle_backend_event`](App::handle_backend_event); all backend I/O is
/// requested through the returned [`Command`] and performed elsewhere.
pub struct App {
    pub screen: Screen,
    pub focus: Focus,
    /// Report editor contents; free text, may be empty, never validated.
    pub input: String,
    pub result: Option<ExtractionResult>,
    /// Translation of the current result's outcome; cleared on every new
    /// submission and at the start of every translate request.
    pub translation: Option<Translation>,
    pub history: Vec<HistoryEntry>,
    pub history_cursor: usize,
    pub processing: RequestGuard,
    pub translating: RequestGuard,
    /// Blocking notice text; while present, all input except dismiss/quit is
    /// swallowed.
    pub notice: Option<String>,
    pub show_help: bool,
    pub tick: usize,
    pub should_quit: bool,
    pub detail_scroll: u16,
    /// Height of the visible history table (set on resize, used for paging).
    pub visible_rows: usize,
    pub theme: Theme,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Dashboard,
            focus: Focus::History,
            input: SAMPLE_REPORT.to_string(),
            result: None,
            translation: None,
            history: Vec::new(),
            history_cursor: 0,
            processing: RequestGuard::default(),
            translating: RequestGuard::default(),
            notice: None,
            show_help: false,
            tick: 0,
            should_quit: false,
            detail_scroll: 0,
            visible_rows: 20,
            theme: Theme::clinical(),
        }
    }

    /// Process a user action. Returns a backend command when the action
    /// requires I/O.
    pub fn update(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Action::DismissNotice => {
                self.notice = None;
            }
            Action::FocusEditor => {
                if self.screen == Screen::Dashboard {
                    self.focus = Focus::Editor;
                }
            }
            Action::LeaveEditor => {
                self.focus = Focus::History;
            }
            Action::InsertChar(c) => {
                if self.focus == Focus::Editor {
                    self.input.push(c);
                }
            }
            Action::InsertNewline => {
                if self.focus == Focus::Editor {
                    self.input.push('\n');
                }
            }
            Action::Backspace => {
                if self.focus == Focus::Editor {
                    self.input.pop();
                }
            }
            Action::ClearInput => {
                // Clears the editor only; result, translation, and history
                // are left as they are.
                self.input.clear();
            }
            Action::Process => {
                if self.processing.try_begin() {
                    // A new submission invalidates the old translation before
                    // the request is even issued.
                    self.translation = None;
                    return Some(Command::ProcessReport {
                        report: self.input.clone(),
                    });
                }
            }
            Action::Translate(language) => {
                // No-op unless the current result carries a non-empty outcome.
                let outcome = self.result.as_ref().and_then(|r| r.outcome.clone())?;
                if self.translating.try_begin() {
                    self.translation = None;
                    return Some(Command::Translate { outcome, language });
                }
            }
            Action::MoveDown => match self.screen {
                Screen::Dashboard => {
                    if self.history_cursor + 1 < self.history.len() {
                        self.history_cursor += 1;
                    }
                }
                Screen::EntryDetail(_) => {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                }
            },
            Action::MoveUp => match self.screen {
                Screen::Dashboard => {
                    self.history_cursor = self.history_cursor.saturating_sub(1);
                }
                Screen::EntryDetail(_) => {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                }
            },
            Action::PageDown => {
                let page = self.visible_rows.max(1);
                match self.screen {
                    Screen::Dashboard => {
                        self.history_cursor = (self.history_cursor + page)
                            .min(self.history.len().saturating_sub(1));
                    }
                    Screen::EntryDetail(_) => {
                        self.detail_scroll = self.detail_scroll.saturating_add(page as u16);
                    }
                }
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1);
                match self.screen {
                    Screen::Dashboard => {
                        self.history_cursor = self.history_cursor.saturating_sub(page);
                    }
                    Screen::EntryDetail(_) => {
                        self.detail_scroll = self.detail_scroll.saturating_sub(page as u16);
                    }
                }
            }
            Action::GoTop => match self.screen {
                Screen::Dashboard => self.history_cursor = 0,
                Screen::EntryDetail(_) => self.detail_scroll = 0,
            },
            Action::GoBottom => match self.screen {
                Screen::Dashboard => {
                    self.history_cursor = self.history.len().saturating_sub(1);
                }
                Screen::EntryDetail(_) => {
                    self.detail_scroll = u16::MAX; // clamped by Paragraph rendering
                }
            },
            Action::DrillIn => {
                if self.screen == Screen::Dashboard && self.history_cursor < self.history.len() {
                    self.detail_scroll = 0;
                    self.screen = Screen::EntryDetail(self.history_cursor);
                }
            }
            Action::NavigateBack => {
                if matches!(self.screen, Screen::EntryDetail(_)) {
                    self.screen = Screen::Dashboard;
                }
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(8);
            }
            Action::None => {}
        }
        None
    }

    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::HistoryLoaded { origin, entries } => {
                self.history = entries;
                self.clamp_history_cursor();
                // The refresh after a process response is the tail of the
                // processing cycle; only that release is valid here.
                if origin == HistoryOrigin::AfterProcess {
                    self.processing.finish();
                }
            }
            BackendEvent::HistoryFailed { origin, error } => match origin {
                // Startup load failures stay silent; the dashboard starts empty.
                HistoryOrigin::Startup => {}
                HistoryOrigin::AfterProcess => {
                    self.processing.finish();
                    self.notice = Some(format!("Failed to refresh history: {error}"));
                }
            },
            BackendEvent::ProcessCompleted { result } => {
                // Guard stays held until the follow-up history event settles.
                self.result = Some(result);
            }
            BackendEvent::ProcessFailed { error } => {
                self.processing.finish();
                self.notice = Some(format!("Failed to process report: {error}"));
            }
            BackendEvent::TranslateCompleted { translation } => {
                self.translating.finish();
                self.translation = Some(translation);
            }
            BackendEvent::TranslateFailed { error } => {
                self.translating.finish();
                self.notice = Some(format!("Translation failed: {error}"));
            }
        }
    }

    fn clamp_history_cursor(&mut self) {
        if self.history.is_empty() {
            self.history_cursor = 0;
        } else if self.history_cursor >= self.history.len() {
            self.history_cursor = self.history.len() - 1;
        }
        // A replaced history can invalidate an open detail screen.
        if let Screen::EntryDetail(index) = self.screen {
            if index >= self.history.len() {
                self.screen = Screen::Dashboard;
            }
        }
    }

    /// Render the current screen.
    pub fn view(&self, f: &mut ratatui::Frame) {
        match self.screen {
            Screen::Dashboard => crate::view::dashboard::render(f, self),
            Screen::EntryDetail(index) => crate::view::detail::render(f, self, index),
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
        if let Some(text) = &self.notice {
            crate::view::notice::render(f, &self.theme, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmavigil_client::{Language, Severity};
    use serde_json::json;

    fn sample_result() -> ExtractionResult {
        serde_json::from_value(json!({
            "drug": "Drug X",
            "adverse_events": ["nausea", "headache"],
            "severity": "moderate",
            "outcome": "recovered",
        }))
        .unwrap()
    }

    fn sample_history() -> Vec<HistoryEntry> {
        serde_json::from_value(json!([
            { "id": 2, "created_at": "2025-06-02T00:00:00Z", "severity": "mild" },
            { "id": 1, "created_at": "2025-06-01T00:00:00Z", "severity": "severe" },
        ]))
        .unwrap()
    }

    fn sample_translation() -> Translation {
        serde_json::from_value(json!({
            "outcome": "recovered",
            "language": "fr",
            "translated": "rétabli",
        }))
        .unwrap()
    }

    #[test]
    fn process_emits_command_and_clears_translation() {
        let mut app = App::new();
        app.result = Some(sample_result());
        app.translation = Some(sample_translation());
        app.input = "Patient had a mild rash.".to_string();

        let cmd = app.update(Action::Process);
        assert_eq!(
            cmd,
            Some(Command::ProcessReport {
                report: "Patient had a mild rash.".to_string()
            })
        );
        assert!(app.translation.is_none());
        assert!(app.processing.in_flight());
    }

    #[test]
    fn process_guard_blocks_second_submission() {
        let mut app = App::new();
        assert!(app.update(Action::Process).is_some());
        assert!(app.update(Action::Process).is_none());
    }

    #[test]
    fn failed_process_leaves_result_and_history_untouched() {
        let mut app = App::new();
        app.result = Some(sample_result());
        app.history = sample_history();
        let before_result = app.result.clone();
        let before_history = app.history.clone();

        app.update(Action::Process);
        app.handle_backend_event(BackendEvent::ProcessFailed {
            error: "connection refused".to_string(),
        });

        assert_eq!(app.result, before_result);
        assert_eq!(app.history, before_history);
        assert!(!app.processing.in_flight());
        assert!(app.notice.as_deref().unwrap().starts_with("Failed to process report"));
    }

    #[test]
    fn process_success_scenario_updates_result_then_history() {
        let mut app = App::new();
        app.update(Action::Process);

        app.handle_backend_event(BackendEvent::ProcessCompleted {
            result: sample_result(),
        });
        // Guard is still held: the history refresh has not settled yet.
        assert!(app.processing.in_flight());

        let result = app.result.as_ref().unwrap();
        assert_eq!(result.drug.as_deref(), Some("Drug X"));
        assert_eq!(result.adverse_events.join(", "), "nausea, headache");
        assert_eq!(result.severity.unwrap().label(), "moderate");
        assert_eq!(result.outcome.as_deref(), Some("recovered"));

        app.handle_backend_event(BackendEvent::HistoryLoaded {
            origin: HistoryOrigin::AfterProcess,
            entries: sample_history(),
        });
        assert!(!app.processing.in_flight());
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn translate_is_noop_without_outcome() {
        let mut app = App::new();
        assert!(app.update(Action::Translate(Language::French)).is_none());
        assert!(!app.translating.in_flight());

        // A result whose outcome decoded to absent is equally insufficient.
        app.result = Some(serde_json::from_value(json!({ "outcome": "" })).unwrap());
        assert!(app.update(Action::Translate(Language::Swahili)).is_none());
        assert!(!app.translating.in_flight());
    }

    #[test]
    fn translate_emits_command_for_current_outcome() {
        let mut app = App::new();
        app.result = Some(sample_result());

        let cmd = app.update(Action::Translate(Language::Swahili));
        assert_eq!(
            cmd,
            Some(Command::Translate {
                outcome: "recovered".to_string(),
                language: Language::Swahili,
            })
        );
        assert!(app.translating.in_flight());
        // Second press while in flight is swallowed.
        assert!(app.update(Action::Translate(Language::Swahili)).is_none());
    }

    #[test]
    fn failed_translate_leaves_translation_unset() {
        let mut app = App::new();
        app.result = Some(sample_result());
        app.translation = Some(sample_translation());

        app.update(Action::Translate(Language::Swahili));
        // Cleared before the request starts, so a failure has nothing to revert to.
        assert!(app.translation.is_none());

        app.handle_backend_event(BackendEvent::TranslateFailed {
            error: "timeout".to_string(),
        });
        assert!(app.translation.is_none());
        assert!(!app.translating.in_flight());
        assert!(app.notice.as_deref().unwrap().starts_with("Translation failed"));
    }

    #[test]
    fn successful_translate_sets_translation() {
        let mut app = App::new();
        app.result = Some(sample_result());
        app.update(Action::Translate(Language::French));

        app.handle_backend_event(BackendEvent::TranslateCompleted {
            translation: sample_translation(),
        });
        assert_eq!(app.translation.as_ref().unwrap().translated, "rétabli");
        assert!(!app.translating.in_flight());
    }

    #[test]
    fn startup_history_events_do_not_release_processing_guard() {
        let mut app = App::new();
        app.update(Action::Process);

        app.handle_backend_event(BackendEvent::HistoryFailed {
            origin: HistoryOrigin::Startup,
            error: "connection refused".to_string(),
        });
        assert!(app.processing.in_flight());
        assert!(app.notice.is_none()); // startup load failure stays silent

        app.handle_backend_event(BackendEvent::HistoryLoaded {
            origin: HistoryOrigin::Startup,
            entries: sample_history(),
        });
        assert!(app.processing.in_flight());
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn clear_resets_input_only() {
        let mut app = App::new();
        app.result = Some(sample_result());
        app.translation = Some(sample_translation());
        app.history = sample_history();

        app.update(Action::ClearInput);
        assert!(app.input.is_empty());
        assert!(app.result.is_some());
        assert!(app.translation.is_some());
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn editor_keys_only_apply_with_editor_focus() {
        let mut app = App::new();
        app.input.clear();

        app.update(Action::InsertChar('x'));
        assert!(app.input.is_empty());

        app.update(Action::FocusEditor);
        app.update(Action::InsertChar('x'));
        app.update(Action::InsertNewline);
        app.update(Action::InsertChar('y'));
        assert_eq!(app.input, "x\ny");

        app.update(Action::Backspace);
        assert_eq!(app.input, "x\n");
    }

    #[test]
    fn history_replacement_clamps_cursor_and_detail_screen() {
        let mut app = App::new();
        app.history = sample_history();
        app.history_cursor = 1;
        app.update(Action::DrillIn);
        assert_eq!(app.screen, Screen::EntryDetail(1));

        app.handle_backend_event(BackendEvent::HistoryLoaded {
            origin: HistoryOrigin::Startup,
            entries: serde_json::from_value(json!([
                { "id": 3, "created_at": "2025-06-03T00:00:00Z", "severity": "moderate" },
            ]))
            .unwrap(),
        });
        assert_eq!(app.history_cursor, 0);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.history[0].severity, Some(Severity::Moderate));
    }

    #[test]
    fn empty_input_still_submits() {
        let mut app = App::new();
        app.update(Action::ClearInput);
        let cmd = app.update(Action::Process);
        assert_eq!(
            cmd,
            Some(Command::ProcessReport {
                report: String::new()
            })
        );
    }
}
