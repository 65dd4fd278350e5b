use crate::{ArticleSummary, Generation, Notecard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input. `at` is the RFC 3339 time of the click.
    UrlSubmitted { at: String },
    /// Engine finished fetching and cleaning the article.
    ArticleFetched {
        generation: Generation,
        at: String,
        result: Result<ArticleSummary, String>,
    },
    /// Engine finished generating notecards.
    NotecardsGenerated {
        generation: Generation,
        at: String,
        result: Result<Vec<Notecard>, String>,
    },
    /// User clicked download on the card at 0-based `position`.
    ExportRequested { position: usize },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
