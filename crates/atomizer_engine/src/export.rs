use crate::filename::notecard_filename;
use crate::Notecard;

pub const NOTECARD_MEDIA_TYPE: &str = "text/markdown";

/// A rendered notecard ready to be saved or served by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotecardArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

impl NotecardArtifact {
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Markdown body for the card at 0-based `position`.
pub fn render_notecard(card: &Notecard, position: usize) -> String {
    format!(
        "# {title}\n\n{content}\n\n---\nNotecard {n}\n",
        title = card.title,
        content = card.content,
        n = position + 1
    )
}

pub fn export_notecard(card: &Notecard, position: usize) -> NotecardArtifact {
    NotecardArtifact {
        file_name: notecard_filename(position, &card.title),
        media_type: NOTECARD_MEDIA_TYPE,
        contents: render_notecard(card, position),
    }
}
