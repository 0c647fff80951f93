use serde::Deserialize;

use super::types::{MalformedItemPolicy, Publication};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("search payload is empty")]
    EmptyPayload,
    #[error("search payload is not a response/results document: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("result {index} is malformed: {source}")]
    Item {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("result {index} has no contributor tag")]
    MissingAuthor { index: usize },
}

/// Records extracted from one search payload.
///
/// `error` is set when extraction stopped early. `publications` then holds
/// whatever was extracted before the problem was reached.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub publications: Vec<Publication>,
    pub error: Option<ParseError>,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    web_title: String,
    section_name: String,
    web_url: String,
    web_publication_date: String,
    tags: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributorTag {
    web_title: String,
}

pub fn parse_search_response(raw: &str, policy: MalformedItemPolicy) -> ParsedBatch {
    if raw.trim().is_empty() {
        return ParsedBatch {
            error: Some(ParseError::EmptyPayload),
            ..ParsedBatch::default()
        };
    }

    let envelope: SearchEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(error) => {
            return ParsedBatch {
                error: Some(ParseError::Envelope(error)),
                ..ParsedBatch::default()
            };
        }
    };

    let results = envelope.response.results;
    let mut batch = ParsedBatch {
        publications: Vec::with_capacity(results.len()),
        ..ParsedBatch::default()
    };
    for (index, item) in results.into_iter().enumerate() {
        match publication_from_item(index, item) {
            Ok(publication) => batch.publications.push(publication),
            Err(error) => match policy {
                MalformedItemPolicy::Truncate => {
                    batch.error = Some(error);
                    break;
                }
                MalformedItemPolicy::Skip => {
                    tracing::warn!(index, error = %error, "skipping malformed search result");
                    batch.skipped += 1;
                }
            },
        }
    }

    batch
}

fn publication_from_item(
    index: usize,
    item: serde_json::Value,
) -> Result<Publication, ParseError> {
    let result: SearchResult =
        serde_json::from_value(item).map_err(|source| ParseError::Item { index, source })?;
    let first_tag = result
        .tags
        .into_iter()
        .next()
        .ok_or(ParseError::MissingAuthor { index })?;
    let author: ContributorTag =
        serde_json::from_value(first_tag).map_err(|source| ParseError::Item { index, source })?;

    Ok(Publication::new(
        result.web_title,
        author.web_title,
        result.section_name,
        result.web_url,
        result.web_publication_date,
    ))
}
