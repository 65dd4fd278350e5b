use crate::{Generation, Notecard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchArticle {
        generation: Generation,
        title: String,
    },
    GenerateNotecards {
        generation: Generation,
        content: String,
    },
    /// Deliver one card as a file. `position` is 0-based.
    ExportNotecard { position: usize, notecard: Notecard },
}
