//! WikiAtomizer core: pure session state machine, URL resolution and view-model helpers.
mod effect;
mod msg;
mod resolve;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use resolve::{resolve_title, ResolveError};
pub use state::{AppState, ArticleSummary, Generation, Notecard, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, NotecardView};
