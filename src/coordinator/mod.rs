//! Query coordination for the user search screen.
//!
//! The coordinator owns the query inputs (search term, the user id feeding
//! the repository fetch, selected repository) through a `SessionStore`, and
//! drives the two use cases into their state stores:
//!
//! - `search` looks up the stored term. Lookups are latest-wins.
//! - A successful lookup hands its term to `set_user_id`, which feeds the
//!   repository pipeline. The pipeline drops empty ids, waits for the id to
//!   settle for `DEBOUNCE_WINDOW`, then replaces any in-flight fetch.

mod supervisor;

pub use supervisor::{next_settled, TaskSlot};

use crate::github::{RepositorySummary, UserDataSource, UserProfile};
use crate::session::{
    QueryState, SessionStore, SEARCH_QUERY_KEY, SELECTED_REPO_ID_KEY, USER_ID_KEY,
};
use crate::state::{StateStore, ViewState};
use crate::usecase::{FetchUserInfo, FetchUserRepos};
use futures::StreamExt;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Quiet period the user id must hold before repositories are fetched.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Store holding the looked-up profile.
pub type UserStore = StateStore<UserProfile>;
/// Store holding the repositories of the current user id.
pub type ReposStore = StateStore<Vec<RepositorySummary>>;

/// Writes the durable user id and pushes it into the repository pipeline.
///
#[derive(Clone)]
struct RepoTrigger {
    session: Arc<dyn SessionStore>,
    sender: mpsc::UnboundedSender<String>,
}

impl RepoTrigger {
    fn fire(&self, user_id: &str) {
        if let Err(e) = self.session.set(USER_ID_KEY, user_id) {
            error!("Failed to persist user id '{}': {}", user_id, e);
        }
        self.push(user_id);
    }

    fn push(&self, user_id: &str) {
        if self.sender.send(user_id.to_owned()).is_err() {
            warn!("Repository pipeline stopped; dropping user id '{}'", user_id);
        }
    }
}

/// Coordinates search input, user lookup and repository listing.
///
/// Must be created inside a tokio runtime. Dropping it aborts the pipeline
/// and any fetch still in flight.
pub struct QueryCoordinator {
    session: Arc<dyn SessionStore>,
    user_store: UserStore,
    repos_store: ReposStore,
    fetch_user: FetchUserInfo,
    trigger: RepoTrigger,
    search_query: watch::Sender<String>,
    lookup: TaskSlot,
    pipeline: JoinHandle<()>,
}

impl QueryCoordinator {
    /// Coordinator restored from `session` with the default debounce window.
    ///
    pub fn new(source: Arc<dyn UserDataSource>, session: Arc<dyn SessionStore>) -> Self {
        QueryCoordinator::with_debounce_window(source, session, DEBOUNCE_WINDOW)
    }

    /// Coordinator restored from `session`. A non-empty stored user id
    /// re-enters the repository pipeline straight away.
    ///
    pub fn with_debounce_window(
        source: Arc<dyn UserDataSource>,
        session: Arc<dyn SessionStore>,
        window: Duration,
    ) -> Self {
        let restored = QueryState::restore(session.as_ref());
        debug!("Restored query state {:?}", restored);

        let user_store = UserStore::new(ViewState::default());
        let repos_store = ReposStore::new(ViewState::default());
        let (sender, receiver) = mpsc::unbounded_channel();
        let pipeline = tokio::spawn(repo_pipeline(
            receiver,
            window,
            FetchUserRepos::new(Arc::clone(&source)),
            repos_store.clone(),
        ));
        let trigger = RepoTrigger {
            session: Arc::clone(&session),
            sender,
        };
        if !restored.user_id.is_empty() {
            info!("Resuming repositories for '{}'...", restored.user_id);
            trigger.push(&restored.user_id);
        }
        let (search_query, _) = watch::channel(restored.search_term);

        QueryCoordinator {
            session,
            user_store,
            repos_store,
            fetch_user: FetchUserInfo::new(source),
            trigger,
            search_query,
            lookup: TaskSlot::new("user lookup"),
            pipeline,
        }
    }

    pub fn user_store(&self) -> &UserStore {
        &self.user_store
    }

    pub fn repos_store(&self) -> &ReposStore {
        &self.repos_store
    }

    /// Record the text in the search box. Does not fetch anything.
    ///
    pub fn on_search_query_change(&self, term: &str) {
        if let Err(e) = self.session.set(SEARCH_QUERY_KEY, term) {
            error!("Failed to persist search query: {}", e);
        }
        self.search_query.send_replace(term.to_owned());
    }

    /// Live view of the search term; starts at the current value.
    ///
    pub fn observe_search_query(&self) -> watch::Receiver<String> {
        self.search_query.subscribe()
    }

    pub fn search_query(&self) -> String {
        self.search_query.borrow().clone()
    }

    /// Look up the stored search term, replacing any lookup in flight. Does
    /// nothing for an empty term.
    ///
    pub async fn search(&mut self) {
        let term = self.search_query();
        if term.is_empty() {
            debug!("Skipping user lookup for empty search term.");
            return;
        }
        info!("Searching for user '{}'...", term);
        if self.lookup.is_running() {
            debug!("Superseding the user lookup in flight.");
        }

        let mut states = self.fetch_user.execute(&term);
        let store = self.user_store.clone();
        let trigger = self.trigger.clone();
        self.lookup
            .replace(async move {
                while let Some(state) = states.next().await {
                    let found = state.success;
                    store.update_state(state.into());
                    if found {
                        trigger.fire(&term);
                    }
                }
            })
            .await;
    }

    /// Feed `user_id` into the repository pipeline and persist it.
    ///
    pub fn set_user_id(&self, user_id: &str) {
        self.trigger.fire(user_id);
    }

    pub fn set_selected_repo_id(&self, repo_id: u64) {
        if let Err(e) = self
            .session
            .set(SELECTED_REPO_ID_KEY, &repo_id.to_string())
        {
            error!("Failed to persist selected repository: {}", e);
        }
    }

    pub fn selected_repo_id(&self) -> Option<u64> {
        QueryState::restore(self.session.as_ref()).selected_repo_id
    }

    /// The selected repository looked up in the latest loaded list. `None`
    /// when nothing is selected, nothing is loaded, or the id is stale.
    ///
    pub fn selected_repo(&self) -> Option<RepositorySummary> {
        let repo_id = self.selected_repo_id()?;
        self.repos_store.with_state(|state| {
            state
                .data
                .as_ref()
                .and_then(|repos| repos.iter().find(|repo| repo.id == repo_id).cloned())
        })
    }

    /// Clear the message and error shown for the user lookup.
    ///
    pub fn dismiss_error(&self) {
        self.user_store.clear_messages();
    }

    /// Whether either the lookup or the repository fetch is loading.
    ///
    pub fn is_loading(&self) -> bool {
        self.user_store.with_state(|state| state.is_loading)
            || self.repos_store.with_state(|state| state.is_loading)
    }
}

impl Drop for QueryCoordinator {
    fn drop(&mut self) {
        self.pipeline.abort();
    }
}

/// Debounce user ids and keep exactly one repository fetch running for the
/// latest settled id.
///
async fn repo_pipeline(
    mut user_ids: mpsc::UnboundedReceiver<String>,
    window: Duration,
    fetch_repos: FetchUserRepos,
    store: ReposStore,
) {
    let mut slot = TaskSlot::new("repository fetch");
    while let Some(user_id) = next_settled(&mut user_ids, window).await {
        info!("Fetching repositories for '{}'...", user_id);
        let mut states = fetch_repos.execute(&user_id);
        let store = store.clone();
        slot.replace(async move {
            while let Some(state) = states.next().await {
                store.update_state(state.into());
            }
        })
        .await;
    }
    debug!("Repository pipeline closed.");
}
