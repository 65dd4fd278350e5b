use std::sync::Once;

use atomizer_core::{
    update, AppState, ArticleSummary, Effect, Msg, Notecard, NotecardView, SessionState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(atomizer_logging::initialize_for_tests);
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(
        state,
        Msg::UrlSubmitted {
            at: "t0".to_string(),
        },
    )
}

fn card(title: &str, content: &str) -> Notecard {
    Notecard {
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn article_fetched(generation: u64, title: &str, content: &str) -> Msg {
    Msg::ArticleFetched {
        generation,
        at: "t1".to_string(),
        result: Ok(ArticleSummary {
            title: title.to_string(),
            content: content.to_string(),
        }),
    }
}

#[test]
fn submit_trims_input_and_requests_fetch() {
    init_logging();
    let (mut state, effects) = submit_url(
        AppState::new(),
        "  https://en.wikipedia.org/wiki/Photosynthesis \n",
    );
    let view = state.view();

    assert_eq!(view.session, SessionState::Loading);
    assert!(view.is_loading());
    assert_eq!(view.generation, 1);
    assert_eq!(view.error, None);
    assert_eq!(
        view.debug_log,
        vec![
            "t0: Starting to process URL: https://en.wikipedia.org/wiki/Photosynthesis"
                .to_string(),
            "t0: Fetching Wikipedia article...".to_string(),
        ]
    );
    assert_eq!(
        effects,
        vec![Effect::FetchArticle {
            generation: 1,
            title: "Photosynthesis".to_string(),
        }]
    );
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn blank_submission_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("   ".to_string()));
    let (next, effects) = update(
        state.clone(),
        Msg::UrlSubmitted {
            at: "t0".to_string(),
        },
    );

    assert_eq!(next, state);
    assert_eq!(next.session(), SessionState::Idle);
    assert!(effects.is_empty());
}

#[test]
fn resolution_failure_never_reaches_network() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "https://example.com/wiki/Cat");
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.session, SessionState::Failed);
    let error = view.error.expect("error banner");
    assert!(error.contains("Not a Wikipedia URL"), "{error}");
    assert_eq!(view.debug_log.last().unwrap(), &format!("t0: Error: {error}"));
}

#[test]
fn fetched_article_triggers_generation_without_being_kept() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, effects) = update(state, article_fetched(1, "Cat", "Cats purr."));

    assert_eq!(
        effects,
        vec![Effect::GenerateNotecards {
            generation: 1,
            content: "Cats purr.".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.session, SessionState::Loading);
    assert_eq!(
        &view.debug_log[2..],
        &[
            "t1: Article fetched: Cat (10 characters)".to_string(),
            "t1: Generating notecards...".to_string(),
        ]
    );
}

#[test]
fn generated_notecards_complete_the_session() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, _) = update(state, article_fetched(1, "Cat", "Cats purr."));
    let (state, effects) = update(
        state,
        Msg::NotecardsGenerated {
            generation: 1,
            at: "t2".to_string(),
            result: Ok(vec![card("Purring", "Cats purr."), card("Fur", "Cats have fur.")]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.session, SessionState::Success);
    assert_eq!(view.error, None);
    assert_eq!(
        view.notecards,
        vec![
            NotecardView {
                position: 1,
                title: "Purring".to_string(),
                content: "Cats purr.".to_string(),
            },
            NotecardView {
                position: 2,
                title: "Fur".to_string(),
                content: "Cats have fur.".to_string(),
            },
        ]
    );
    assert_eq!(view.debug_log.last().unwrap(), "t2: Generated 2 notecards");
}

#[test]
fn fetch_failure_populates_error_banner() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, effects) = update(
        state,
        Msg::ArticleFetched {
            generation: 1,
            at: "t1".to_string(),
            result: Err("Wikipedia API error: 404 Not Found".to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.session, SessionState::Failed);
    assert_eq!(
        view.error.as_deref(),
        Some("Wikipedia API error: 404 Not Found")
    );
    assert!(view.notecards.is_empty());
}

#[test]
fn resubmission_clears_previous_results() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://en.wikipedia.org/wiki/Cat");
    let (state, _) = update(state, article_fetched(1, "Cat", "Cats purr."));
    let (state, _) = update(
        state,
        Msg::NotecardsGenerated {
            generation: 1,
            at: "t2".to_string(),
            result: Ok(vec![card("Purring", "Cats purr.")]),
        },
    );
    assert_eq!(state.view().notecards.len(), 1);

    let (state, effects) = submit_url(state, "https://en.wikipedia.org/wiki/Dog");
    let view = state.view();

    assert_eq!(view.session, SessionState::Loading);
    assert_eq!(view.generation, 2);
    assert!(view.notecards.is_empty());
    assert_eq!(view.error, None);
    assert_eq!(view.debug_log.len(), 2);
    assert_eq!(
        effects,
        vec![Effect::FetchArticle {
            generation: 2,
            title: "Dog".to_string(),
        }]
    );
}

#[test]
fn failed_session_can_be_resubmitted() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "not a url");
    assert_eq!(state.session(), SessionState::Failed);

    let (state, effects) = submit_url(state, "https://en.wikipedia.org/wiki/Dog");
    assert_eq!(state.session(), SessionState::Loading);
    assert_eq!(state.view().error, None);
    assert_eq!(effects.len(), 1);
}
