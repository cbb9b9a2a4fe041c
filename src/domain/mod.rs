pub mod question;
pub mod word;

pub use question::{Question, QuestionKind, Quiz};
pub use word::{QuizMode, WordEntry, I_ADJ, NA_ADJ};
