use std::fmt::Write;

use atomizer_core::{AppViewModel, NotecardView, SessionState};

use crate::effects::ExportOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_debug_log: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_debug_log: true,
        }
    }
}

pub fn session_label(session: SessionState) -> &'static str {
    match session {
        SessionState::Idle => "Idle",
        SessionState::Loading => "Processing Wikipedia article...",
        SessionState::Success => "Done",
        SessionState::Failed => "Failed",
    }
}

/// Renders the session as terminal text: status line, error banner, cards, debug log.
pub fn render(view: &AppViewModel, options: RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Session: {} | Notecards: {}",
        session_label(view.session),
        view.notecards.len()
    );

    if let Some(error) = &view.error {
        let _ = writeln!(out, "\nError:\n{error}");
    }

    if view.session == SessionState::Success && view.notecards.is_empty() {
        out.push_str("\nThe article produced no notecards.\n");
    }
    for card in &view.notecards {
        out.push('\n');
        render_card(&mut out, card);
    }

    if options.show_debug_log && !view.debug_log.is_empty() {
        out.push_str("\nDebug Log:\n");
        for line in &view.debug_log {
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

fn render_card(out: &mut String, card: &NotecardView) {
    let rule = "-".repeat(card.title.chars().count().clamp(8, 72));
    let _ = writeln!(out, "{}\n{rule}\n{}", card.title, card.content);
    let _ = writeln!(out, "Notecard {}", card.position);
}

pub fn render_exports(outcomes: &[ExportOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        match &outcome.result {
            Ok(path) => {
                let _ = writeln!(
                    out,
                    "Saved notecard {} to {}",
                    outcome.position + 1,
                    path.display()
                );
            }
            Err(err) => {
                let _ = writeln!(
                    out,
                    "Could not save notecard {}: {err}",
                    outcome.position + 1
                );
            }
        }
    }
    out
}
