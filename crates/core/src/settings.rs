/// How repeated submissions on the same question are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReanswerPolicy {
    /// Every submission is re-evaluated and replaces the previous outcome.
    #[default]
    Overwrite,
    /// The first submission sticks; later ones return it unchanged.
    KeepFirst,
}

/// Knobs for a quiz session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSettings {
    /// Shuffle question order once when the batch is loaded.
    pub shuffle_questions: bool,
    pub reanswer: ReanswerPolicy,
}

impl QuizSettings {
    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn with_reanswer(mut self, policy: ReanswerPolicy) -> Self {
        self.reanswer = policy;
        self
    }
}
