use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ShortsError, ShortsResult};

/// One trivia question with its correct answer.
///
/// Text may carry HTML entities (as served by Open Trivia DB); use [`Fact::decoded`] before
/// rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fact {
    /// Question text.
    pub question: String,
    /// Correct answer text.
    pub correct_answer: String,
}

impl Fact {
    /// Build a fact from plain strings.
    pub fn new(question: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Return a copy with HTML entities in both fields decoded.
    pub fn decoded(&self) -> Self {
        Self {
            question: decode_entities(&self.question),
            correct_answer: decode_entities(&self.correct_answer),
        }
    }
}

/// Decode HTML entities (`&quot;`, `&#039;`, `&amp;`, ...) into plain text.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

// Open Trivia DB response envelope. Extra fields per result (category, difficulty,
// incorrect_answers, ...) are ignored.
#[derive(serde::Deserialize)]
struct TriviaResponse {
    response_code: i64,
    results: Vec<Fact>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum FactsDocument {
    List(Vec<Fact>),
    Response(TriviaResponse),
}

/// Parse facts from JSON: either a bare array of facts or an Open Trivia DB response.
pub fn parse_facts(json: &str) -> ShortsResult<Vec<Fact>> {
    let doc: FactsDocument = serde_json::from_str(json)
        .map_err(|e| ShortsError::validation(format!("invalid facts json: {e}")))?;
    match doc {
        FactsDocument::List(facts) => Ok(facts),
        FactsDocument::Response(resp) if resp.response_code == 0 => Ok(resp.results),
        FactsDocument::Response(resp) => Err(ShortsError::validation(format!(
            "trivia source returned response_code {}",
            resp.response_code
        ))),
    }
}

/// Read and parse a facts JSON file.
pub fn load_facts(path: &Path) -> ShortsResult<Vec<Fact>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read facts '{}'", path.display()))?;
    parse_facts(&text)
}

#[cfg(test)]
#[path = "../../tests/unit/facts/model.rs"]
mod tests;
