use crate::{Generation, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub generation: Generation,
    pub input: String,
    pub error: Option<String>,
    pub debug_log: Vec<String>,
    pub notecards: Vec<NotecardView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotecardView {
    /// 1-based, as shown to the user.
    pub position: usize,
    pub title: String,
    pub content: String,
}

impl AppViewModel {
    pub fn is_loading(&self) -> bool {
        self.session == SessionState::Loading
    }
}
