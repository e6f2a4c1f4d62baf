use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── METADATA ──────────────────────────────────────────────────────────────────
//

/// Error returned when a metadata value is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("unknown question type: {0}")]
    UnknownKind(String),
}

/// Difficulty tag attached by the question source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(MetadataError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Multiple choice or true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Multiple => "multiple",
            QuestionKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiple" => Ok(Self::Multiple),
            "boolean" => Ok(Self::Boolean),
            other => Err(MetadataError::UnknownKind(other.to_string())),
        }
    }
}

//
// ─── RECORD ISSUES ─────────────────────────────────────────────────────────────
//

/// Shape problems in a record that the session tolerates but reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    /// No incorrect answers; the question renders with a single choice.
    NoIncorrectAnswers,
    /// The correct answer also appears among the incorrect answers, so more
    /// than one choice will be flagged correct.
    CorrectAnswerDuplicated { occurrences: usize },
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::NoIncorrectAnswers => write!(f, "no incorrect answers"),
            RecordIssue::CorrectAnswerDuplicated { occurrences } => write!(
                f,
                "correct answer repeated {occurrences} time(s) among incorrect answers"
            ),
        }
    }
}

//
// ─── QUESTION RECORD ───────────────────────────────────────────────────────────
//

/// One trivia question as delivered by a question source.
///
/// Text fields are expected to be already decoded; the core compares answers
/// by exact string identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    prompt: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    kind: Option<QuestionKind>,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers: incorrect_answers.into_iter().map(Into::into).collect(),
            category: None,
            difficulty: None,
            kind: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn kind(&self) -> Option<QuestionKind> {
        self.kind
    }

    /// Number of answers in the choice pool (correct + incorrect).
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.incorrect_answers.len() + 1
    }

    /// Lists shape problems in this record. An empty list means well-formed.
    #[must_use]
    pub fn issues(&self) -> Vec<RecordIssue> {
        let mut issues = Vec::new();
        if self.incorrect_answers.is_empty() {
            issues.push(RecordIssue::NoIncorrectAnswers);
        }
        let occurrences = self
            .incorrect_answers
            .iter()
            .filter(|answer| **answer == self.correct_answer)
            .count();
        if occurrences > 0 {
            issues.push(RecordIssue::CorrectAnswerDuplicated { occurrences });
        }
        issues
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_record_has_no_issues() {
        let record = QuestionRecord::new("2+2?", "4", ["3", "5", "22"]);
        assert!(record.issues().is_empty());
        assert_eq!(record.pool_size(), 4);
    }

    #[test]
    fn reports_empty_incorrect_list() {
        let record = QuestionRecord::new("Only one?", "yes", Vec::<String>::new());
        assert_eq!(record.issues(), vec![RecordIssue::NoIncorrectAnswers]);
        assert_eq!(record.pool_size(), 1);
    }

    #[test]
    fn reports_duplicated_correct_answer() {
        let record = QuestionRecord::new("Dup?", "a", ["a", "b", "a"]);
        assert_eq!(
            record.issues(),
            vec![RecordIssue::CorrectAnswerDuplicated { occurrences: 2 }]
        );
    }

    #[test]
    fn metadata_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("boolean".parse::<QuestionKind>().unwrap(), QuestionKind::Boolean);
        assert!(matches!(
            "impossible".parse::<Difficulty>(),
            Err(MetadataError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn metadata_defaults_when_missing_in_json() {
        let json = r#"{"prompt":"p","correct_answer":"c","incorrect_answers":["i"]}"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category(), None);
        assert_eq!(record.difficulty(), None);
        assert_eq!(record.incorrect_answers(), ["i".to_string()]);
    }
}
