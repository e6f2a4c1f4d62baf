use std::sync::Arc;

use log::{error, info};

use trivia_core::{Clock, QuizSession, QuizSettings};

use crate::error::QuizLoopError;
use crate::opentdb::DEFAULT_AMOUNT;
use crate::source::QuestionSource;

/// Fetches one batch from a question source and seeds a fresh session with it.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    clock: Clock,
    amount: u32,
    seed: Option<u64>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, settings: QuizSettings) -> Self {
        Self {
            source,
            settings,
            clock: Clock::default(),
            amount: DEFAULT_AMOUNT,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Use a fixed shuffle seed for every session this service starts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn empty_session(&self) -> QuizSession {
        let settings = self.settings.clone();
        let session = match self.seed {
            Some(seed) => QuizSession::with_seed(settings, seed),
            None => QuizSession::new(settings),
        };
        session.with_clock(self.clock)
    }

    /// Fetch a batch and return an initialized session.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::Source` if the fetch fails.
    pub async fn start_session(&self) -> Result<QuizSession, QuizLoopError> {
        let questions = self.source.fetch(self.amount).await?;
        info!("fetched {} question(s)", questions.len());

        let mut session = self.empty_session();
        session.initialize(questions)?;
        Ok(session)
    }

    /// Like [`QuizLoopService::start_session`], but a failed fetch is logged and
    /// yields a session that stays `Empty`.
    pub async fn start_or_empty(&self) -> QuizSession {
        match self.start_session().await {
            Ok(session) => session,
            Err(err) => {
                error!("error fetching trivia: {err}");
                self.empty_session()
            }
        }
    }
}
