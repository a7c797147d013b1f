use super::input::USAGE;
use crate::coordinator::QueryCoordinator;
use crate::ui::text;
use anyhow::Result;
use log::*;
use std::io::Write;

/// Specify different user command event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SearchQueryChanged(String),
    Search,
    SetUserId(String),
    SelectRepo(u64),
    ShowSelected,
    DismissError,
    Status,
    Help,
    Quit,
}

/// Specify struct for applying command events to the coordinator.
///
pub struct Handler<'a, W: Write> {
    coordinator: &'a mut QueryCoordinator,
    out: &'a mut W,
}

impl<'a, W: Write> Handler<'a, W> {
    /// Return new instance writing any direct output to `out`.
    ///
    pub fn new(coordinator: &'a mut QueryCoordinator, out: &'a mut W) -> Self {
        Handler { coordinator, out }
    }

    /// Handle command events by type. Returns result with value true if
    /// should continue or false if exit was requested.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<bool> {
        debug!("Processing command event '{:?}'...", event);
        match event {
            Event::SearchQueryChanged(term) => self.coordinator.on_search_query_change(&term),
            Event::Search => self.coordinator.search().await,
            Event::SetUserId(user_id) => self.coordinator.set_user_id(&user_id),
            Event::SelectRepo(repo_id) => {
                self.coordinator.set_selected_repo_id(repo_id);
                self.show_selected()?;
            }
            Event::ShowSelected => self.show_selected()?,
            Event::DismissError => self.coordinator.dismiss_error(),
            Event::Status => self.status()?,
            Event::Help => writeln!(self.out, "{}", USAGE)?,
            Event::Quit => {
                info!("Exit requested.");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn show_selected(&mut self) -> Result<()> {
        let selected = self.coordinator.selected_repo();
        if selected.is_none() {
            warn!(
                "Selected repository {:?} is not in the loaded list.",
                self.coordinator.selected_repo_id()
            );
        }
        self.write_lines(text::repo_detail(selected.as_ref()))
    }

    fn status(&mut self) -> Result<()> {
        let mut lines = vec![format!("search: '{}'", self.coordinator.search_query())];
        if self.coordinator.is_loading() {
            lines.push("(loading)".to_string());
        }
        lines.extend(text::profile(&self.coordinator.user_store().snapshot()));
        lines.extend(text::repos(&self.coordinator.repos_store().snapshot()));
        self.write_lines(lines)
    }

    fn write_lines(&mut self, lines: Vec<String>) -> Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Outcome;
    use crate::session::{MemorySessionStore, SessionStore, SELECTED_REPO_ID_KEY};
    use crate::testing::{repo, user, StubSource};
    use std::sync::Arc;
    use std::time::Duration;

    fn coordinator(session: Arc<MemorySessionStore>) -> QueryCoordinator {
        let source = StubSource::new()
            .with_user("octocat", Outcome::Success(user(1, "The Octocat")))
            .with_repos("octocat", Outcome::Success(vec![repo(1, "Hello-World")]));
        QueryCoordinator::new(Arc::new(source), session)
    }

    #[tokio::test(start_paused = true)]
    async fn search_then_select() {
        let session = Arc::new(MemorySessionStore::new());
        let mut coordinator = coordinator(session.clone());
        let mut out = Vec::new();
        let mut handler = Handler::new(&mut coordinator, &mut out);

        assert!(handler
            .handle(Event::SearchQueryChanged("octocat".to_string()))
            .await
            .unwrap());
        assert!(handler.handle(Event::Search).await.unwrap());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(handler.handle(Event::SelectRepo(1)).await.unwrap());
        assert!(handler.handle(Event::Status).await.unwrap());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Hello-World (Public)"));
        assert!(printed.contains("search: 'octocat'"));
        assert!(printed.contains("User #1: The Octocat"));
        assert_eq!(session.get(SELECTED_REPO_ID_KEY).as_deref(), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_selection_is_reported_not_fatal() {
        let mut coordinator = coordinator(Arc::new(MemorySessionStore::new()));
        let mut out = Vec::new();
        let mut handler = Handler::new(&mut coordinator, &mut out);

        assert!(handler.handle(Event::SelectRepo(99)).await.unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "No repository selected.\n");
    }

    #[tokio::test]
    async fn quit_stops() {
        let mut coordinator = coordinator(Arc::new(MemorySessionStore::new()));
        let mut out = Vec::new();
        let mut handler = Handler::new(&mut coordinator, &mut out);
        assert!(!handler.handle(Event::Quit).await.unwrap());
        assert!(handler.handle(Event::Help).await.unwrap());
    }
}
