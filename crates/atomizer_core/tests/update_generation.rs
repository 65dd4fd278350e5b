use atomizer_core::{update, AppState, ArticleSummary, Effect, Msg, Notecard, SessionState};

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(
        state,
        Msg::UrlSubmitted {
            at: "t0".to_string(),
        },
    )
}

fn generated(generation: u64, titles: &[&str]) -> Msg {
    Msg::NotecardsGenerated {
        generation,
        at: "t9".to_string(),
        result: Ok(titles
            .iter()
            .map(|title| Notecard {
                title: title.to_string(),
                content: format!("About {title}"),
            })
            .collect()),
    }
}

#[test]
fn stale_article_is_discarded_after_resubmission() {
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (mut state, _) = submit_url(state, "https://en.wikipedia.org/wiki/Dog");
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut next, effects) = update(
        state,
        Msg::ArticleFetched {
            generation: 1,
            at: "t1".to_string(),
            result: Ok(ArticleSummary {
                title: "Cat".to_string(),
                content: "Cats purr.".to_string(),
            }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());
}

#[test]
fn older_pipeline_settling_last_does_not_overwrite_newer_result() {
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, _) = submit_url(state, "https://en.wikipedia.org/wiki/Dog");

    let (state, _) = update(state, generated(2, &["Barking"]));
    assert_eq!(state.session(), SessionState::Success);

    let (state, effects) = update(state, generated(1, &["Purring", "Whiskers"]));
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.session, SessionState::Success);
    assert_eq!(view.notecards.len(), 1);
    assert_eq!(view.notecards[0].title, "Barking");
}

#[test]
fn stale_failure_does_not_touch_loading_session() {
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, _) = submit_url(state, "https://en.wikipedia.org/wiki/Dog");

    let (state, _) = update(
        state,
        Msg::NotecardsGenerated {
            generation: 1,
            at: "t3".to_string(),
            result: Err("Failed to generate notecards: boom".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.session, SessionState::Loading);
    assert_eq!(view.error, None);
}

#[test]
fn duplicate_result_for_settled_session_is_ignored() {
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, _) = update(state, generated(1, &["Purring"]));
    let (state, _) = update(state, generated(1, &["Again", "Twice"]));

    assert_eq!(state.view().notecards.len(), 1);
}

#[test]
fn export_request_carries_the_selected_card() {
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, _) = update(state, generated(1, &["Purring", "Whiskers"]));

    let (state, effects) = update(state, Msg::ExportRequested { position: 1 });
    assert_eq!(
        effects,
        vec![Effect::ExportNotecard {
            position: 1,
            notecard: Notecard {
                title: "Whiskers".to_string(),
                content: "About Whiskers".to_string(),
            },
        }]
    );

    let (_, effects) = update(state, Msg::ExportRequested { position: 5 });
    assert!(effects.is_empty());
}
