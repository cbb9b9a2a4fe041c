//! Vocabulary content: loading the word list and deriving sub-pools.

pub mod words;

pub use words::{PoolSummary, WordPool, REQUIRED_COLUMNS};
