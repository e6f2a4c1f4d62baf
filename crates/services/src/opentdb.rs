use std::env;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use trivia_core::model::{Difficulty, QuestionKind, QuestionRecord};

use crate::decode::decode_entities;
use crate::error::SourceError;
use crate::source::QuestionSource;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_AMOUNT: u32 = 10;
/// Largest batch the API serves in one request.
pub const MAX_AMOUNT: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTdbConfig {
    pub base_url: String,
    pub amount: u32,
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub kind: Option<QuestionKind>,
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            amount: DEFAULT_AMOUNT,
            category: None,
            difficulty: None,
            kind: None,
        }
    }
}

impl OpenTdbConfig {
    /// Read `TRIVIA_*` variables, falling back to defaults for missing or
    /// unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("TRIVIA_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.base_url),
            amount: parse_env("TRIVIA_AMOUNT").unwrap_or(defaults.amount),
            category: parse_env("TRIVIA_CATEGORY"),
            difficulty: parse_env("TRIVIA_DIFFICULTY"),
            kind: parse_env("TRIVIA_TYPE"),
        }
    }

    /// Query string pairs for a request of `amount` questions.
    #[must_use]
    pub fn query(&self, amount: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("amount", amount.to_string())];
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            params.push(("difficulty", difficulty.as_str().to_string()));
        }
        if let Some(kind) = self.kind {
            params.push(("type", kind.as_str().to_string()));
        }
        params
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!("ignoring unparsable {key}={raw:?}");
    }
    parsed
}

/// Question source backed by the Open Trivia Database HTTP API.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    config: OpenTdbConfig,
}

impl OpenTdbSource {
    #[must_use]
    pub fn new(config: OpenTdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, amount: u32) -> Result<Vec<QuestionRecord>, SourceError> {
        if amount == 0 || amount > MAX_AMOUNT {
            return Err(SourceError::InvalidAmount {
                requested: amount,
                max: MAX_AMOUNT,
            });
        }

        debug!("fetching {amount} question(s) from {}", self.config.base_url);
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.config.query(amount))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body: ApiResponse = response.json().await?;
        into_records(body)
    }
}

/// Parse a raw API body into decoded question records.
///
/// # Errors
///
/// Returns `SourceError::Decode` for malformed JSON and the mapped response
/// code error when the API reports a failure.
pub fn parse_body(body: &str) -> Result<Vec<QuestionRecord>, SourceError> {
    let body: ApiResponse = serde_json::from_str(body)?;
    into_records(body)
}

fn into_records(body: ApiResponse) -> Result<Vec<QuestionRecord>, SourceError> {
    match body.response_code {
        0 => Ok(body.results.into_iter().map(RawQuestion::into_record).collect()),
        1 => Err(SourceError::NoResults),
        2 => Err(SourceError::InvalidParameter),
        5 => Err(SourceError::RateLimited),
        code => Err(SourceError::Api { code }),
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    category: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl RawQuestion {
    fn into_record(self) -> QuestionRecord {
        let incorrect: Vec<String> = self
            .incorrect_answers
            .iter()
            .map(|answer| decode_entities(answer))
            .collect();
        let mut record = QuestionRecord::new(
            decode_entities(&self.question),
            decode_entities(&self.correct_answer),
            incorrect,
        );

        if let Some(category) = self.category {
            record = record.with_category(decode_entities(&category));
        }
        if let Some(difficulty) = self.difficulty.and_then(|d| d.parse().ok()) {
            record = record.with_difficulty(difficulty);
        }
        if let Some(kind) = self.kind.and_then(|k| k.parse().ok()) {
            record = record.with_kind(kind);
        }
        record
    }
}
