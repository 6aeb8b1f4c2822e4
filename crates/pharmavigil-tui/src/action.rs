use pharmavigil_client::Language;

/// Actions that the TUI can process, mapped from keyboard input or internal events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    DismissNotice,
    FocusEditor,
    LeaveEditor,
    InsertChar(char),
    InsertNewline,
    Backspace,
    ClearInput,
    Process,
    Translate(Language),
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    DrillIn,
    NavigateBack,
    Tick,
    Resize(u16, u16),
    None,
}

/// Backend requests emitted by [`App::update`](crate::app::App::update).
///
/// The event loop hands these to [`backend::dispatch`](crate::backend::dispatch);
/// the controller itself never performs I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ProcessReport { report: String },
    Translate { outcome: String, language: Language },
}
