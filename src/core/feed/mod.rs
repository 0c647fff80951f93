pub mod fetcher;
pub mod parser;
pub mod types;

use fetcher::{fetch_search_body, FetchError};
use parser::{parse_search_response, ParseError};
use types::{MalformedItemPolicy, Publication};

use crate::config::AppConfig;

/// Result of one fetch cycle.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<Publication>),
    NoData,
    NetworkFailure(FetchError),
    ParseFailure {
        kept: Vec<Publication>,
        error: ParseError,
    },
}

impl LoadOutcome {
    pub fn publications(&self) -> &[Publication] {
        match self {
            LoadOutcome::Loaded(publications) => publications,
            LoadOutcome::ParseFailure { kept, .. } => kept,
            LoadOutcome::NoData | LoadOutcome::NetworkFailure(_) => &[],
        }
    }

    pub fn into_publications(self) -> Vec<Publication> {
        match self {
            LoadOutcome::Loaded(publications) => publications,
            LoadOutcome::ParseFailure { kept, .. } => kept,
            LoadOutcome::NoData | LoadOutcome::NetworkFailure(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedService {
    client: reqwest::Client,
    policy: MalformedItemPolicy,
}

impl FeedService {
    pub fn new(client: reqwest::Client, policy: MalformedItemPolicy) -> Self {
        Self { client, policy }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = fetcher::build_client(config.connect_timeout, config.read_timeout)?;
        Ok(Self::new(client, config.malformed_items))
    }

    /// Fetches and parses `url`, never failing: every problem is logged and
    /// turns into an empty (or shortened) list.
    pub async fn fetch(&self, url: &str) -> Vec<Publication> {
        self.load(url).await.into_publications()
    }

    pub async fn load(&self, url: &str) -> LoadOutcome {
        let body = match fetch_search_body(&self.client, url).await {
            Ok(body) => body,
            Err(error) => {
                tracing::error!(url, error = %error, "problem retrieving search results");
                return LoadOutcome::NetworkFailure(error);
            }
        };
        if body.trim().is_empty() {
            tracing::warn!(url, "search response body is empty");
            return LoadOutcome::NoData;
        }

        let batch = parse_search_response(&body, self.policy);
        if let Some(error) = batch.error {
            tracing::error!(
                url,
                kept = batch.publications.len(),
                error = %error,
                "problem parsing search results"
            );
            return LoadOutcome::ParseFailure {
                kept: batch.publications,
                error,
            };
        }
        if batch.publications.is_empty() {
            tracing::info!(url, skipped = batch.skipped, "search returned no publications");
            return LoadOutcome::NoData;
        }

        tracing::info!(
            url,
            count = batch.publications.len(),
            skipped = batch.skipped,
            "loaded publications"
        );
        LoadOutcome::Loaded(batch.publications)
    }
}
