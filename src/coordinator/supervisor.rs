use futures::future::Future;
use log::*;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};

/// Holds at most one running task for a logical slot.
///
/// Replacing the task aborts the previous one and waits for it to finish
/// unwinding before the replacement is spawned, so a superseded task can
/// never publish anything after its successor started.
pub struct TaskSlot {
    name: &'static str,
    current: Option<JoinHandle<()>>,
}

impl TaskSlot {
    pub fn new(name: &'static str) -> Self {
        TaskSlot {
            name,
            current: None,
        }
    }

    /// Cancel whatever runs in the slot and start `task` in its place.
    ///
    pub async fn replace<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel().await;
        self.current = Some(tokio::spawn(task));
    }

    /// Abort the running task, if any, and wait until it is gone.
    ///
    pub async fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {
                    debug!("Cancelled superseded '{}' task.", self.name);
                }
                Err(e) => error!("Task '{}' failed: {}", self.name, e),
            }
        }
    }

    /// Whether a task was started and has not finished yet.
    ///
    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = &self.current {
            handle.abort();
        }
    }
}

/// Wait for the next value that stays unchanged for `window`.
///
/// Empty values are dropped before they reach the window, so they neither
/// emit nor restart the timer. When the input closes while a value is
/// pending, that value is returned; after that `None`.
pub async fn next_settled(
    input: &mut mpsc::UnboundedReceiver<String>,
    window: Duration,
) -> Option<String> {
    let mut latest = loop {
        let value = input.recv().await?;
        if !value.is_empty() {
            break value;
        }
    };
    let mut deadline = Instant::now() + window;
    loop {
        match timeout_at(deadline, input.recv()).await {
            Ok(Some(value)) if value.is_empty() => {}
            Ok(Some(value)) => {
                latest = value;
                deadline = Instant::now() + window;
            }
            Ok(None) | Err(_) => return Some(latest),
        }
    }
}
