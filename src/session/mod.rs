//! Durable, screen-scoped query state.
//!
//! The coordinator never keeps its query inputs in plain fields: every write
//! goes through a `SessionStore` so a restarted process resumes with the same
//! search term, trigger id and selection.

mod error;
mod file;

pub use error::SessionError;
pub use file::FileSessionStore;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Session key holding the text typed into the search box.
pub const SEARCH_QUERY_KEY: &str = "query";
/// Session key holding the user id that drives the repository fetch.
pub const USER_ID_KEY: &str = "userId";
/// Session key holding the selected repository id.
pub const SELECTED_REPO_ID_KEY: &str = "repoID";

/// Key-value persistence port for session state.
///
/// A `set` is visible to `get` immediately. It may reach durable storage
/// later; once `flush` returns `Ok`, every earlier `set` is durable and a
/// store reopened afterwards observes it.
pub trait SessionStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Must not block on I/O.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Block until every earlier `set` is durable.
    fn flush(&self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Session store that lives only as long as the process.
///
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore::default()
    }

    /// Store pre-populated with `entries`, as if restored from a checkpoint.
    ///
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemorySessionStore {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Typed view of the values the coordinator keeps in the session.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_term: String,
    pub user_id: String,
    pub selected_repo_id: Option<u64>,
}

impl QueryState {
    /// Read the query state out of `store`, defaulting anything missing or
    /// unparseable.
    ///
    pub fn restore(store: &dyn SessionStore) -> QueryState {
        QueryState {
            search_term: store.get(SEARCH_QUERY_KEY).unwrap_or_default(),
            user_id: store.get(USER_ID_KEY).unwrap_or_default(),
            selected_repo_id: store
                .get(SELECTED_REPO_ID_KEY)
                .and_then(|id| id.parse().ok()),
        }
    }
}
