use atomizer_logging::{atom_info, atom_warn};
use serde_json::Value;

use crate::completion::{ChatMessage, CompletionClient};
use crate::{CompletionError, GenerationFailed, Notecard};

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that breaks down complex \
articles into simple, atomic concepts. Always respond with valid JSON in the specified format.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Upper bound on cards requested from the model.
    pub max_cards: usize,
    /// Article characters included in the prompt; the rest is dropped.
    pub max_input_chars: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_cards: 10,
            max_input_chars: 4000,
        }
    }
}

/// Turns article text into notecards with one completion request.
pub struct NotecardGenerator<C> {
    client: C,
    settings: GeneratorSettings,
}

impl<C: CompletionClient> NotecardGenerator<C> {
    pub fn new(client: C, settings: GeneratorSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> GeneratorSettings {
        self.settings
    }

    pub async fn generate(&self, article_content: &str) -> Result<Vec<Notecard>, GenerationFailed> {
        atom_info!(
            "Generating notecards for article length: {}",
            article_content.chars().count()
        );
        let prompt = build_prompt(article_content, &self.settings);
        let messages = [ChatMessage::system(SYSTEM_INSTRUCTION), ChatMessage::user(prompt)];

        let raw = self.client.complete_json(&messages).await?;
        let cards = parse_notecards(&raw).inspect_err(|err| {
            atom_warn!(
                "Rejected completion ({}): {}",
                err,
                atomizer_logging::excerpt(&raw, 500)
            );
        })?;
        atom_info!("Generated {} notecards", cards.len());
        Ok(cards)
    }
}

/// First `max_chars` characters of `text`, cut on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn build_prompt(article_content: &str, settings: &GeneratorSettings) -> String {
    let excerpt = truncate_chars(article_content, settings.max_input_chars);
    format!(
        r#"Analyze the following Wikipedia article content and break it down into at most {max} key concepts or ideas.
Each concept should be self-contained and atomic (focused on a single idea).
Format your response as a JSON object with a 'notecards' array containing objects with 'title' and 'content' properties.

Example format:
{{
  "notecards": [
    {{
      "title": "First Concept Title",
      "content": "First concept explanation"
    }},
    {{
      "title": "Second Concept Title",
      "content": "Second concept explanation"
    }}
  ]
}}

Article content:
{excerpt}"#,
        max = settings.max_cards,
    )
}

/// Validates a completion body shaped `{"notecards": [{"title", "content"}, ...]}`.
///
/// Any invalid element rejects the whole batch.
pub fn parse_notecards(raw: &str) -> Result<Vec<Notecard>, CompletionError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| CompletionError::MalformedJson(err.to_string()))?;

    let items = value
        .get("notecards")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            CompletionError::InvalidSchema("response does not contain a notecards array".into())
        })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<Notecard, CompletionError> {
            let title = required_text(item, "title", index)?;
            let content = required_text(item, "content", index)?;
            Ok(Notecard { title, content })
        })
        .collect()
}

fn required_text(item: &Value, field: &str, index: usize) -> Result<String, CompletionError> {
    item.get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CompletionError::InvalidSchema(format!("notecard {} is missing {field}", index + 1))
        })
}
