use super::view_state::{RequestProgress, ViewState, ViewStatePatch};
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the latest reconciled view state for one screen-scoped entity.
///
/// Patches are applied inside a single `send_modify`, so a subscriber sees
/// either the state before a patch or after it, never a mix of two patches.
pub struct StateStore<T> {
    sender: Arc<watch::Sender<ViewState<T>>>,
}

impl<T> StateStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Store seeded with `initial`.
    ///
    pub fn new(initial: ViewState<T>) -> Self {
        let (sender, _) = watch::channel(initial);
        StateStore {
            sender: Arc::new(sender),
        }
    }

    /// Merge the fields present in `patch` into the current state.
    ///
    pub fn update_state(&self, patch: ViewStatePatch<T>) {
        self.sender.send_modify(|state| {
            patch.apply_to(state);
            debug_assert!(
                state.error_message.is_none()
                    || (!state.is_loading && state.progress == RequestProgress::Completed),
                "error shown while loading or before completion"
            );
        });
    }

    /// Dismiss any pending message or error, leaving everything else alone.
    ///
    pub fn clear_messages(&self) {
        self.update_state(ViewStatePatch::new().message(None).error_message(None));
    }

    /// Live stream of states; the receiver starts at the current value.
    ///
    pub fn observe(&self) -> watch::Receiver<ViewState<T>> {
        self.sender.subscribe()
    }

    /// Copy of the current state.
    ///
    pub fn snapshot(&self) -> ViewState<T> {
        self.sender.borrow().clone()
    }

    /// Run `f` against the current state without cloning it.
    ///
    pub fn with_state<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> R {
        f(&self.sender.borrow())
    }
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        StateStore {
            sender: Arc::clone(&self.sender),
        }
    }
}
