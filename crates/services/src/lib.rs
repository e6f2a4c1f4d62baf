#![forbid(unsafe_code)]

pub mod decode;
pub mod error;
pub mod opentdb;
pub mod quiz_loop;
pub mod source;

pub use trivia_core::Clock;

pub use error::{QuizLoopError, SourceError};
pub use opentdb::{OpenTdbConfig, OpenTdbSource};
pub use quiz_loop::QuizLoopService;
pub use source::{QuestionSource, StaticSource};
