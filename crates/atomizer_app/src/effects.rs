use std::path::PathBuf;
use std::time::Duration;

use atomizer_core::{ArticleSummary, Effect, Msg, Notecard};
use atomizer_engine::{export_notecard, AtomicFileWriter, EngineEvent, EngineHandle, PersistError};
use atomizer_logging::{atom_info, atom_warn};

/// Result of delivering one notecard to disk. `position` is 0-based.
#[derive(Debug)]
pub struct ExportOutcome {
    pub position: usize,
    pub result: Result<PathBuf, PersistError>,
}

/// Executes core effects: network stages go to the engine, exports are
/// rendered and written synchronously.
pub struct EffectRunner {
    engine: EngineHandle,
    writer: AtomicFileWriter,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, writer: AtomicFileWriter) -> Self {
        Self { engine, writer }
    }

    pub fn output_dir(&self) -> &std::path::Path {
        self.writer.dir()
    }

    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<ExportOutcome> {
        let mut exports = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchArticle { generation, title } => {
                    atom_info!("FetchArticle generation={} title={}", generation, title);
                    self.engine.fetch_article(generation, title);
                }
                Effect::GenerateNotecards {
                    generation,
                    content,
                } => {
                    atom_info!(
                        "GenerateNotecards generation={} content_len={}",
                        generation,
                        content.len()
                    );
                    self.engine.generate_notecards(generation, content);
                }
                Effect::ExportNotecard { position, notecard } => {
                    let artifact = export_notecard(&to_engine_card(notecard), position);
                    let result = self.writer.write_artifact(&artifact);
                    if let Err(err) = &result {
                        atom_warn!("Export of notecard {} failed: {}", position + 1, err);
                    }
                    exports.push(ExportOutcome { position, result });
                }
            }
        }
        exports
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.engine.recv_timeout(timeout)
    }
}

/// Converts an engine event into a core message stamped with `at`.
pub fn map_event(event: EngineEvent, at: String) -> Msg {
    match event {
        EngineEvent::ArticleFetched { generation, result } => Msg::ArticleFetched {
            generation,
            at,
            result: result
                .map(|article| ArticleSummary {
                    title: article.title,
                    content: article.content,
                })
                .map_err(|err| err.to_string()),
        },
        EngineEvent::NotecardsGenerated { generation, result } => Msg::NotecardsGenerated {
            generation,
            at,
            result: result
                .map(|cards| cards.into_iter().map(to_core_card).collect())
                .map_err(|err| err.to_string()),
        },
    }
}

fn to_core_card(card: atomizer_engine::Notecard) -> Notecard {
    Notecard {
        title: card.title,
        content: card.content,
    }
}

fn to_engine_card(card: Notecard) -> atomizer_engine::Notecard {
    atomizer_engine::Notecard {
        title: card.title,
        content: card.content,
    }
}
