#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod quiz;
pub mod settings;
pub mod shuffle;
pub mod time;

pub use error::SessionError;
pub use quiz::QuizSession;
pub use settings::{QuizSettings, ReanswerPolicy};
pub use time::Clock;
