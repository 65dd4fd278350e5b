use crate::view_model::{AppViewModel, NotecardView};

/// Submission token. Every submission bumps it; engine results carry the
/// token they were started with.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notecard {
    pub title: String,
    pub content: String,
}

/// Cleaned article as delivered by the fetch stage. Only forwarded to the
/// generation effect, never stored in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    session: SessionState,
    generation: Generation,
    error: Option<String>,
    debug_log: Vec<String>,
    notecards: Vec<Notecard>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            generation: self.generation,
            input: self.input.clone(),
            error: self.error.clone(),
            debug_log: self.debug_log.clone(),
            notecards: self
                .notecards
                .iter()
                .enumerate()
                .map(|(index, card)| NotecardView {
                    position: index + 1,
                    title: card.title.clone(),
                    content: card.content.clone(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn notecard(&self, position: usize) -> Option<&Notecard> {
        self.notecards.get(position)
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True when a result tagged with `generation` belongs to the submission
    /// that is still waiting for it.
    pub(crate) fn accepts(&self, generation: Generation) -> bool {
        self.session == SessionState::Loading && self.generation == generation
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    /// Resets the session for a new submission and returns its token.
    pub(crate) fn begin_submission(&mut self) -> Generation {
        self.generation += 1;
        self.session = SessionState::Loading;
        self.error = None;
        self.debug_log.clear();
        self.notecards.clear();
        self.mark_dirty();
        self.generation
    }

    pub(crate) fn log(&mut self, at: &str, message: impl AsRef<str>) {
        self.debug_log.push(format!("{at}: {}", message.as_ref()));
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, at: &str, message: String) {
        self.log(at, format!("Error: {message}"));
        self.error = Some(message);
        self.session = SessionState::Failed;
    }

    pub(crate) fn succeed(&mut self, notecards: Vec<Notecard>) {
        self.notecards = notecards;
        self.session = SessionState::Success;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
