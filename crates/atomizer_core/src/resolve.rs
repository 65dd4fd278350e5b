use thiserror::Error;
use url::Url;

const WIKIPEDIA_HOST_MARKER: &str = "wikipedia.org";
const WIKI_PATH_PREFIX: &str = "/wiki/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Not a Wikipedia URL: {0}")]
    NotWikipedia(String),
    #[error("No article title found in URL: {0}")]
    NoTitleFound(String),
}

/// Extract the page title from a Wikipedia article URL.
///
/// Accepts `/wiki/<title>` paths and falls back to a `title` query parameter
/// (`/w/index.php?title=<title>`). The path form is returned exactly as it
/// appears in the URL, without percent-decoding.
pub fn resolve_title(raw: &str) -> Result<String, ResolveError> {
    let url = Url::parse(raw).map_err(|err| ResolveError::InvalidUrl(format!("{raw} ({err})")))?;

    let is_wikipedia = url
        .host_str()
        .is_some_and(|host| host.contains(WIKIPEDIA_HOST_MARKER));
    if !is_wikipedia {
        return Err(ResolveError::NotWikipedia(raw.to_string()));
    }

    if let Some(title) = title_from_path(url.path()) {
        return Ok(title.to_string());
    }

    url.query_pairs()
        .find(|(key, _)| key == "title")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ResolveError::NoTitleFound(raw.to_string()))
}

fn title_from_path(path: &str) -> Option<&str> {
    let start = path.find(WIKI_PATH_PREFIX)? + WIKI_PATH_PREFIX.len();
    Some(&path[start..]).filter(|title| !title.is_empty())
}
