pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod quiz;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
