use super::progress_sequence;
use crate::github::{UserDataSource, UserProfile};
use crate::state::DataState;
use futures::stream::BoxStream;
use log::*;
use std::sync::Arc;

/// Fetches a user profile and reports progress along the way.
///
#[derive(Clone)]
pub struct FetchUserInfo {
    source: Arc<dyn UserDataSource>,
}

impl FetchUserInfo {
    pub fn new(source: Arc<dyn UserDataSource>) -> Self {
        FetchUserInfo { source }
    }

    /// Progress sequence for looking up `user_id`. Callers must not pass an
    /// empty id.
    ///
    pub fn execute(&self, user_id: &str) -> BoxStream<'static, DataState<UserProfile>> {
        debug!("Preparing user lookup for '{}'", user_id);
        let source = Arc::clone(&self.source);
        let user_id = user_id.to_owned();
        progress_sequence(
            async move { source.fetch_user(&user_id).await },
            UserProfile::from,
        )
    }
}
