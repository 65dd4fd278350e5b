use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use atomizer_logging::{atom_debug, atom_warn};

use crate::completion::{CompletionSettings, OpenAiClient};
use crate::fetch::{ArticleFetcher, WikipediaFetcher, WikipediaSettings};
use crate::generate::{GeneratorSettings, NotecardGenerator};
use crate::{EngineError, EngineEvent, Generation};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub wikipedia: WikipediaSettings,
    pub completion: CompletionSettings,
    pub generator: GeneratorSettings,
}

enum EngineCommand {
    FetchArticle {
        generation: Generation,
        title: String,
    },
    GenerateNotecards {
        generation: Generation,
        content: String,
    },
}

struct Services {
    fetcher: Box<dyn ArticleFetcher>,
    generator: NotecardGenerator<OpenAiClient>,
}

/// Runs the network stages on a background tokio runtime.
///
/// Commands are processed concurrently; every event carries the generation
/// of the command that produced it so the caller can drop stale results.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<std::sync::Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    /// Builds both API clients up front, so a missing credential fails here.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let fetcher = WikipediaFetcher::new(config.wikipedia)?;
        let client = OpenAiClient::new(config.completion)?;
        let services = Arc::new(Services {
            fetcher: Box::new(fetcher),
            generator: NotecardGenerator::new(client, config.generator),
        });
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let services = services.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(&services, command).await;
                    if event_tx.send(event).is_err() {
                        atom_debug!("Engine event dropped; receiver gone");
                    }
                });
            }
            atom_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(std::sync::Mutex::new(event_rx)),
        })
    }

    pub fn fetch_article(&self, generation: Generation, title: impl Into<String>) {
        self.send(EngineCommand::FetchArticle {
            generation,
            title: title.into(),
        });
    }

    pub fn generate_notecards(&self, generation: Generation, content: impl Into<String>) {
        self.send(EngineCommand::GenerateNotecards {
            generation,
            content: content.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            atom_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(services: &Services, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchArticle { generation, title } => {
            let result = services.fetcher.fetch_article(&title).await;
            if let Err(err) = &result {
                atom_warn!("Fetch for generation {} failed: {}", generation, err);
            }
            EngineEvent::ArticleFetched { generation, result }
        }
        EngineCommand::GenerateNotecards {
            generation,
            content,
        } => {
            let result = services.generator.generate(&content).await;
            if let Err(err) = &result {
                atom_warn!("Generation {} failed: {}", generation, err);
            }
            EngineEvent::NotecardsGenerated { generation, result }
        }
    }
}
