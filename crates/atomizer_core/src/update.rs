use crate::{resolve_title, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::UrlSubmitted { at } => {
            let url = state.input().trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }

            let generation = state.begin_submission();
            state.log(&at, format!("Starting to process URL: {url}"));
            match resolve_title(&url) {
                Ok(title) => {
                    state.log(&at, "Fetching Wikipedia article...");
                    vec![Effect::FetchArticle { generation, title }]
                }
                Err(err) => {
                    state.fail(&at, err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::ArticleFetched {
            generation,
            at,
            result,
        } => {
            // Results from a superseded submission are dropped.
            if !state.accepts(generation) {
                return (state, Vec::new());
            }
            match result {
                Ok(article) => {
                    state.log(
                        &at,
                        format!(
                            "Article fetched: {} ({} characters)",
                            article.title,
                            article.content.chars().count()
                        ),
                    );
                    state.log(&at, "Generating notecards...");
                    vec![Effect::GenerateNotecards {
                        generation,
                        content: article.content,
                    }]
                }
                Err(message) => {
                    state.fail(&at, message);
                    Vec::new()
                }
            }
        }
        Msg::NotecardsGenerated {
            generation,
            at,
            result,
        } => {
            if !state.accepts(generation) {
                return (state, Vec::new());
            }
            match result {
                Ok(notecards) => {
                    state.log(&at, format!("Generated {} notecards", notecards.len()));
                    state.succeed(notecards);
                }
                Err(message) => state.fail(&at, message),
            }
            Vec::new()
        }
        Msg::ExportRequested { position } => match state.notecard(position) {
            Some(card) => vec![Effect::ExportNotecard {
                position,
                notecard: card.clone(),
            }],
            None => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
