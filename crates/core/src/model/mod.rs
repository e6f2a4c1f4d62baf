mod choice;
mod ids;
mod question;
mod session;

pub use ids::{ChoiceLabel, ParseLabelError};

pub use choice::{AnswerChoice, AnswerOutcome};
pub use question::{Difficulty, MetadataError, QuestionKind, QuestionRecord, RecordIssue};
pub use session::{QuestionResult, QuizProgress, QuizState, QuizSummary};
