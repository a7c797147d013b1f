use super::progress_sequence;
use crate::github::{RepoWire, RepositorySummary, UserDataSource};
use crate::state::DataState;
use futures::stream::BoxStream;
use std::sync::Arc;

/// Fetches the repositories of a user and reports progress along the way.
///
#[derive(Clone)]
pub struct FetchUserRepos {
    source: Arc<dyn UserDataSource>,
}

impl FetchUserRepos {
    pub fn new(source: Arc<dyn UserDataSource>) -> Self {
        FetchUserRepos { source }
    }

    /// Progress sequence for listing the repositories of `user_id`. Callers
    /// must not pass an empty id.
    ///
    pub fn execute(&self, user_id: &str) -> BoxStream<'static, DataState<Vec<RepositorySummary>>> {
        let source = Arc::clone(&self.source);
        let user_id = user_id.to_owned();
        progress_sequence(
            async move { source.fetch_repos(&user_id).await },
            to_summaries,
        )
    }
}

fn to_summaries(repos: Vec<RepoWire>) -> Vec<RepositorySummary> {
    repos.into_iter().map(RepositorySummary::from).collect()
}
