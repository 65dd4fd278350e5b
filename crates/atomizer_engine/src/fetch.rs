use std::time::Duration;

use atomizer_logging::{atom_debug, atom_info};
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::clean::HtmlCleaner;
use crate::{Article, FetchError};

pub const DEFAULT_WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
pub(crate) const USER_AGENT: &str = concat!(
    "WikiAtomizer/",
    env!("CARGO_PKG_VERSION"),
    " (notecard generator)"
);

#[derive(Debug, Clone)]
pub struct WikipediaSettings {
    pub api_url: String,
    pub connect_timeout: Duration,
    /// `None` waits for the response indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_WIKIPEDIA_API.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(60)),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch_article(&self, title: &str) -> Result<Article, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    title: String,
    text: ParsedText,
}

#[derive(Debug, Deserialize)]
struct ParsedText {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    info: Option<String>,
}

/// Fetches rendered article HTML through the MediaWiki `action=parse` API.
#[derive(Debug, Clone)]
pub struct WikipediaFetcher {
    settings: WikipediaSettings,
    client: reqwest::Client,
    cleaner: HtmlCleaner,
}

impl WikipediaFetcher {
    pub fn new(settings: WikipediaSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        Ok(Self {
            settings,
            client,
            cleaner: HtmlCleaner::default(),
        })
    }

    pub fn with_cleaner(mut self, cleaner: HtmlCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    fn request_url(&self, title: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &self.settings.api_url,
            &[
                ("action", "parse"),
                ("page", title),
                ("format", "json"),
                ("prop", "text"),
                ("origin", "*"),
            ],
        )
        .map_err(|err| FetchError::Network(format!("invalid API url: {err}")))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(len) = response.content_length() {
            if len > max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes,
                    actual: len,
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes,
                    actual: next_len,
                });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ArticleFetcher for WikipediaFetcher {
    async fn fetch_article(&self, title: &str) -> Result<Article, FetchError> {
        let url = self.request_url(title)?;
        atom_info!("Fetching Wikipedia article title={} url={}", title, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let bytes = self.read_body(response).await?;
        atom_debug!("Wikipedia response for {}: {} bytes", title, bytes.len());

        let parsed: ParseResponse = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::MalformedResponse(err.to_string()))?;
        let page = match (parsed.parse, parsed.error) {
            (Some(page), _) => page,
            (None, Some(error)) => {
                return Err(FetchError::MalformedResponse(format!(
                    "{}: {}",
                    error.code.as_deref().unwrap_or("error"),
                    error.info.as_deref().unwrap_or("no details")
                )));
            }
            (None, None) => {
                return Err(FetchError::MalformedResponse(
                    "missing parse.text[\"*\"]".to_string(),
                ));
            }
        };

        let content = self.cleaner.clean(&page.text.html);
        atom_info!(
            "Article fetched: {} ({} characters)",
            page.title,
            content.chars().count()
        );

        Ok(Article {
            title: page.title,
            content,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    FetchError::Network(err.to_string())
}
