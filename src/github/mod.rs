//! GitHub API access.
//!
//! `GitHub` is the boundary between transport and domain: whatever goes wrong
//! below it (status errors, connectivity, malformed payloads) comes out as an
//! `Outcome::Failure` carrying a user-facing message. Nothing above this
//! module ever handles a transport error.

mod client;
mod error;
mod models;
mod resource;

pub use client::Client;
pub use error::{
    extract_error_message, GithubError, ERROR_PARSING_MESSAGE, NETWORK_ERROR_MESSAGE,
    UNKNOWN_ERROR_MESSAGE,
};
pub use models::{OwnerWire, RepoWire, UserWire};
pub use resource::*;

use crate::config::Config;
use async_trait::async_trait;
use log::*;

/// Result of a single remote call after transport errors were normalized.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Source of user and repository records.
///
/// Implemented by `GitHub`; use cases only ever talk to this trait.
#[async_trait]
pub trait UserDataSource: Send + Sync {
    /// Fetch the profile for `user_id`.
    async fn fetch_user(&self, user_id: &str) -> Outcome<UserWire>;

    /// Fetch the repositories owned by `user_id`.
    async fn fetch_repos(&self, user_id: &str) -> Outcome<Vec<RepoWire>>;
}

/// Responsible for asynchronous interaction with the GitHub API including
/// normalization of every failure into an `Outcome`.
///
pub struct GitHub {
    client: Client,
}

impl GitHub {
    /// Returns a new instance for the given configuration.
    ///
    pub fn new(config: &Config) -> Result<GitHub, GithubError> {
        debug!(
            "Initializing GitHub client for {} (token: {})...",
            config.base_url,
            if config.access_token.is_some() {
                "set"
            } else {
                "none"
            }
        );
        Ok(GitHub {
            client: Client::new(config)?,
        })
    }

    fn settle<T>(context: &str, user_id: &str, result: Result<T, GithubError>) -> Outcome<T> {
        match result {
            Ok(data) => Outcome::Success(data),
            Err(e) => {
                error!("{} failed for '{}': {}", context, user_id, e);
                Outcome::Failure(e.user_message())
            }
        }
    }
}

#[async_trait]
impl UserDataSource for GitHub {
    async fn fetch_user(&self, user_id: &str) -> Outcome<UserWire> {
        debug!("Requesting user details for '{}'...", user_id);
        let result = self.client.get::<UserWire>(&["users", user_id]).await;
        let outcome = GitHub::settle("fetch_user", user_id, result);
        if outcome.is_success() {
            debug!("Retrieved user details for '{}'", user_id);
        }
        outcome
    }

    async fn fetch_repos(&self, user_id: &str) -> Outcome<Vec<RepoWire>> {
        debug!("Requesting repositories for '{}'...", user_id);
        let result = self
            .client
            .get::<Vec<RepoWire>>(&["users", user_id, "repos"])
            .await;
        if let Ok(repos) = &result {
            debug!("Retrieved {} repositories for '{}'", repos.len(), user_id);
        }
        GitHub::settle("fetch_repos", user_id, result)
    }
}
