use pharmavigil_client::{ExtractionResult, HistoryEntry, Translation};

/// Where a history fetch was issued from.
///
/// A startup fetch that completes late must not release the processing guard,
/// so history events carry their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrigin {
    Startup,
    AfterProcess,
}

/// Events flowing from backend request tasks to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A history fetch completed; the list fully replaces the local copy.
    HistoryLoaded {
        origin: HistoryOrigin,
        entries: Vec<HistoryEntry>,
    },
    /// A history fetch failed. Startup failures are silent; a failed refresh
    /// after processing surfaces a notice.
    HistoryFailed {
        origin: HistoryOrigin,
        error: String,
    },
    /// `/process-report` returned a new extraction result.
    ProcessCompleted { result: ExtractionResult },
    ProcessFailed { error: String },
    /// `/translate` returned a translation for the current outcome.
    TranslateCompleted { translation: Translation },
    TranslateFailed { error: String },
}
