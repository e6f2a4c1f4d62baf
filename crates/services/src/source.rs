use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use trivia_core::model::QuestionRecord;

use crate::error::SourceError;

/// Supplies batches of trivia questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `amount` questions.
    async fn fetch(&self, amount: u32) -> Result<Vec<QuestionRecord>, SourceError>;
}

/// In-memory source for tests and offline play.
///
/// Serves the first `amount` records of a fixed batch, or a canned failure.
#[derive(Clone, Default)]
pub struct StaticSource {
    questions: Vec<QuestionRecord>,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<u32>>>,
}

impl StaticSource {
    #[must_use]
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions,
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A source whose every fetch fails with `SourceError::Unavailable`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Batch sizes requested so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<u32> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn fetch(&self, amount: u32) -> Result<Vec<QuestionRecord>, SourceError> {
        self.requests
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?
            .push(amount);

        if let Some(reason) = &self.failure {
            return Err(SourceError::Unavailable(reason.clone()));
        }

        let take = usize::try_from(amount).unwrap_or(usize::MAX);
        Ok(self.questions.iter().take(take).cloned().collect())
    }
}
