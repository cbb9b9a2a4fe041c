//! Quiz engine: question building, assembly, grading, session state and
//! statistics.

pub mod assembler;
pub mod builder;
pub mod grading;
pub mod session;
pub mod stats;

pub use assembler::{build_quiz, build_quiz_from_words};
pub use builder::{build_question, build_question_of_kind};
pub use grading::{grade, GradeResult, WrongEntry};
pub use session::{Phase, SessionState};
pub use stats::{AttemptRecord, MissedWord, StatsTracker};
