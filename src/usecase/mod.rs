//! Use cases turning one remote call into a progress sequence.
//!
//! Each `execute` returns a cold stream: nothing happens until it is polled,
//! and every call is an independent fetch. The stream always yields exactly
//! two states, `loading(true)` and then either `success` or `error`.

mod user_info;
mod user_repos;

pub use user_info::FetchUserInfo;
pub use user_repos::FetchUserRepos;

use crate::github::Outcome;
use crate::state::DataState;
use futures::future::Future;
use futures::stream::{self, BoxStream, StreamExt};

/// Build the two-element progress stream around a pending fetch.
///
fn progress_sequence<W, T, F>(fetch: F, map: fn(W) -> T) -> BoxStream<'static, DataState<T>>
where
    W: Send + 'static,
    T: Send + 'static,
    F: Future<Output = Outcome<W>> + Send + 'static,
{
    stream::once(async { DataState::loading(true) })
        .chain(stream::once(async move {
            match fetch.await {
                Outcome::Success(wire) => DataState::success(map(wire)),
                Outcome::Failure(message) => DataState::error(message),
            }
        }))
        .boxed()
}
