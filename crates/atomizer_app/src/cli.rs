use std::path::PathBuf;
use std::time::Duration;

use atomizer_engine::{
    CompletionSettings, EngineConfig, GeneratorSettings, WikipediaSettings,
    DEFAULT_COMPLETION_API, DEFAULT_MODEL, DEFAULT_WIKIPEDIA_API,
};
use clap::Parser;

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "wikiatomizer",
    about = "Turn a Wikipedia article into short, self-contained notecards",
    version
)]
pub struct Cli {
    /// Wikipedia article URL, e.g. https://en.wikipedia.org/wiki/Photosynthesis
    pub url: String,

    /// Completion API credential
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Completion model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum number of notecards to ask for
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_cards: u64,

    /// MediaWiki API endpoint
    #[arg(long, default_value = DEFAULT_WIKIPEDIA_API)]
    pub wikipedia_api: String,

    /// Base URL of an OpenAI-compatible completion API
    #[arg(long, default_value = DEFAULT_COMPLETION_API)]
    pub completion_api: String,

    /// Directory that exported notecards are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Export the notecard at this 1-based position (repeatable)
    #[arg(long = "export", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub export: Vec<u64>,

    /// Export every generated notecard
    #[arg(long, conflicts_with = "export")]
    pub export_all: bool,

    /// Per-request timeout in seconds for both APIs; 0 waits indefinitely
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where process logs go
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,

    /// Do not print the session debug log
    #[arg(long)]
    pub hide_debug_log: bool,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        let mut wikipedia = WikipediaSettings {
            api_url: self.wikipedia_api.clone(),
            ..WikipediaSettings::default()
        };
        let mut completion = CompletionSettings {
            api_key: self.api_key.clone(),
            base_url: self.completion_api.clone(),
            model: self.model.clone(),
            ..CompletionSettings::default()
        };
        if let Some(secs) = self.timeout_secs {
            let timeout = (secs > 0).then(|| Duration::from_secs(secs));
            wikipedia.request_timeout = timeout;
            completion.request_timeout = timeout;
        }

        EngineConfig {
            wikipedia,
            completion,
            generator: GeneratorSettings {
                max_cards: usize::try_from(self.max_cards).unwrap_or(usize::MAX),
                ..GeneratorSettings::default()
            },
        }
    }

    /// Requested export positions, 0-based, in the order given.
    pub fn export_positions(&self) -> Vec<usize> {
        self.export
            .iter()
            .filter_map(|n| usize::try_from(*n).ok())
            .map(|n| n - 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use crate::logging::LogDestination;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn defaults_match_engine_defaults() {
        let cli = Cli::try_parse_from([
            "wikiatomizer",
            "https://en.wikipedia.org/wiki/Cat",
            "--api-key",
            "sk-x",
        ])
        .unwrap();
        let config = cli.engine_config();

        assert_eq!(cli.log, LogDestination::File);
        assert_eq!(config.generator.max_cards, 10);
        assert_eq!(config.generator.max_input_chars, 4000);
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-x"));
        assert_eq!(config.completion.model, "gpt-3.5-turbo");
        assert_eq!(config.completion.max_tokens, 2000);
        assert_eq!(config.wikipedia.api_url, "https://en.wikipedia.org/w/api.php");
    }

    #[test]
    fn export_positions_are_zero_based() {
        let cli = Cli::try_parse_from([
            "wikiatomizer",
            "https://en.wikipedia.org/wiki/Cat",
            "--export",
            "2",
            "--export",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.export_positions(), vec![1, 0]);
    }

    #[test]
    fn zero_export_position_is_rejected() {
        let result = Cli::try_parse_from([
            "wikiatomizer",
            "https://en.wikipedia.org/wiki/Cat",
            "--export",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeout_disables_request_timeouts() {
        let cli = Cli::try_parse_from([
            "wikiatomizer",
            "https://en.wikipedia.org/wiki/Cat",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        let config = cli.engine_config();
        assert_eq!(config.wikipedia.request_timeout, None);
        assert_eq!(config.completion.request_timeout, None);

        let cli = Cli::try_parse_from([
            "wikiatomizer",
            "https://en.wikipedia.org/wiki/Cat",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(
            cli.engine_config().wikipedia.request_timeout,
            Some(Duration::from_secs(5))
        );
    }
}
