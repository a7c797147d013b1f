//! Look up a GitHub user, list their repositories, and keep the query across
//! restarts.

pub mod app;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod github;
pub mod logger;
pub mod session;
pub mod state;
pub mod ui;
pub mod usecase;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
