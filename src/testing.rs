//! Test doubles shared by the unit tests of several modules.

use crate::github::{OwnerWire, Outcome, RepoWire, UserDataSource, UserWire};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    User(String),
    Repos(String),
}

/// In-memory `UserDataSource` that records every call.
///
/// Unknown users fail with "Not Found"; unknown repository lists are empty.
#[derive(Default)]
pub(crate) struct StubSource {
    users: HashMap<String, Outcome<UserWire>>,
    repos: HashMap<String, Outcome<Vec<RepoWire>>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(Call, Instant)>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        StubSource::default()
    }

    pub(crate) fn with_user(mut self, user_id: &str, outcome: Outcome<UserWire>) -> Self {
        self.users.insert(user_id.to_string(), outcome);
        self
    }

    pub(crate) fn with_repos(mut self, user_id: &str, outcome: Outcome<Vec<RepoWire>>) -> Self {
        self.repos.insert(user_id.to_string(), outcome);
        self
    }

    /// Every call for `user_id` sleeps this long before answering.
    pub(crate) fn with_delay(mut self, user_id: &str, delay: Duration) -> Self {
        self.delays.insert(user_id.to_string(), delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Call, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn user_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|(call, _)| match call {
                Call::User(id) => Some(id),
                Call::Repos(_) => None,
            })
            .collect()
    }

    pub(crate) fn repo_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|(call, _)| match call {
                Call::Repos(id) => Some(id),
                Call::User(_) => None,
            })
            .collect()
    }

    async fn record(&self, call: Call, user_id: &str) {
        self.calls.lock().unwrap().push((call, Instant::now()));
        if let Some(delay) = self.delays.get(user_id) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl UserDataSource for StubSource {
    async fn fetch_user(&self, user_id: &str) -> Outcome<UserWire> {
        self.record(Call::User(user_id.to_string()), user_id).await;
        self.users
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| Outcome::Failure("Not Found".to_string()))
    }

    async fn fetch_repos(&self, user_id: &str) -> Outcome<Vec<RepoWire>> {
        self.record(Call::Repos(user_id.to_string()), user_id).await;
        self.repos
            .get(user_id)
            .cloned()
            .unwrap_or(Outcome::Success(vec![]))
    }
}

pub(crate) fn user(id: u64, name: &str) -> UserWire {
    UserWire {
        id,
        name: Some(name.to_string()),
        avatar_url: Some(format!("https://avatars.githubusercontent.com/u/{}?v=4", id)),
        ..UserWire::default()
    }
}

pub(crate) fn repo(id: u64, name: &str) -> RepoWire {
    RepoWire {
        id,
        name: name.to_string(),
        full_name: format!("octocat/{}", name),
        owner: OwnerWire {
            kind: "User".to_string(),
            ..OwnerWire::default()
        },
        forks_count: Some(id * 10),
        watchers_count: Some(id),
        stargazers_count: Some(id),
        ..RepoWire::default()
    }
}
