use std::sync::Arc;
use std::time::Duration;

use atomizer_core::{update, AppState, AppViewModel, Msg, SessionState};
use chrono::Utc;

use crate::effects::{map_event, EffectRunner, ExportOutcome};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// Owns the session state and feeds it messages from the user and the engine.
pub struct Controller {
    state: AppState,
    effects: EffectRunner,
    clock: Clock,
}

impl Controller {
    pub fn new(effects: EffectRunner) -> Self {
        Self::with_clock(effects, Arc::new(|| Utc::now().to_rfc3339()))
    }

    pub fn with_clock(effects: EffectRunner, clock: Clock) -> Self {
        Self {
            state: AppState::new(),
            effects,
            clock,
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn session(&self) -> SessionState {
        self.state.session()
    }

    pub fn effects(&self) -> &EffectRunner {
        &self.effects
    }

    /// Returns whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<ExportOutcome> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects)
    }

    /// Starts a new submission. Any pipeline still in flight keeps running but
    /// its results will be discarded.
    pub fn submit(&mut self, url: &str) {
        self.dispatch(Msg::InputChanged(url.to_string()));
        let at = (self.clock)();
        self.dispatch(Msg::UrlSubmitted { at });
    }

    /// Applies every engine event that is already available. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.effects.try_recv() {
            let at = (self.clock)();
            self.dispatch(map_event(event, at));
            handled += 1;
        }
        handled
    }

    /// Blocks until the current submission settles.
    pub fn wait_until_settled(&mut self) -> AppViewModel {
        while self.state.session() == SessionState::Loading {
            if let Some(event) = self.effects.recv_timeout(POLL_INTERVAL) {
                let at = (self.clock)();
                self.dispatch(map_event(event, at));
            }
        }
        self.state.view()
    }

    /// Exports the card at 0-based `position`; `None` when no such card is shown.
    pub fn export(&mut self, position: usize) -> Option<ExportOutcome> {
        self.dispatch(Msg::ExportRequested { position }).pop()
    }

    pub fn export_all(&mut self) -> Vec<ExportOutcome> {
        let count = self.state.view().notecards.len();
        (0..count)
            .filter_map(|position| self.export(position))
            .collect()
    }
}
