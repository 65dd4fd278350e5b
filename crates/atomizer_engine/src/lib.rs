//! WikiAtomizer engine: Wikipedia fetch, notecard generation, export and effect execution.
mod clean;
mod completion;
mod engine;
mod export;
mod fetch;
mod filename;
mod generate;
mod persist;
mod types;

pub use clean::{clean_article_html, normalize_text, HtmlCleaner, DEFAULT_REMOVED_SELECTORS};
pub use completion::{
    ChatMessage, CompletionClient, CompletionSettings, OpenAiClient, DEFAULT_COMPLETION_API,
    DEFAULT_MODEL,
};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{export_notecard, render_notecard, NotecardArtifact, NOTECARD_MEDIA_TYPE};
pub use fetch::{ArticleFetcher, WikipediaFetcher, WikipediaSettings, DEFAULT_WIKIPEDIA_API};
pub use filename::{notecard_filename, slugify};
pub use generate::{
    build_prompt, parse_notecards, truncate_chars, GeneratorSettings, NotecardGenerator,
    SYSTEM_INSTRUCTION,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    Article, CompletionError, EngineError, EngineEvent, FetchError, GenerationFailed, Generation,
    Notecard,
};
