use crate::config::Config;
use crate::coordinator::{QueryCoordinator, ReposStore, UserStore};
use crate::events::command::{Event, Handler as CommandHandler};
use crate::events::input::{parse_line, USAGE};
use crate::github::{GitHub, UserDataSource};
use crate::logger;
use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::ui::text;
use anyhow::Result;
use log::*;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

/// Oversees input processing, query coordination, and terminal output.
///
pub struct App {
    coordinator: QueryCoordinator,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        logger::init(config.log_level_filter())?;

        info!("Starting application...");
        if let Some(path) = config.file_path() {
            debug!("Loaded configuration from {}", path.display());
        }
        let source: Arc<dyn UserDataSource> = Arc::new(GitHub::new(&config)?);
        let session: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => {
                let store = FileSessionStore::open(path)?;
                debug!("Restored session from {}", store.path().display());
                Arc::new(store)
            }
            None => Arc::new(MemorySessionStore::new()),
        };
        let mut app = App {
            coordinator: QueryCoordinator::new(source, Arc::clone(&session)),
        };

        let renderer = app.start_renderer();
        app.start_input().await?;
        renderer.abort();
        drop(app);

        tokio::task::spawn_blocking(move || session.flush()).await??;

        info!("Exiting application...");
        Ok(())
    }

    /// Spawn a task printing both stores whenever either of them changes.
    ///
    fn start_renderer(&self) -> JoinHandle<()> {
        debug!("Starting state renderer...");
        let users = self.coordinator.user_store().clone();
        let repos = self.coordinator.repos_store().clone();
        tokio::spawn(render_loop(users, repos))
    }

    /// Read commands from stdin until exit is requested or input ends.
    ///
    async fn start_input(&mut self) -> Result<()> {
        println!("{}", USAGE);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = io::stdout();
        while let Some(line) = lines.next_line().await? {
            let events = match parse_line(&line) {
                Ok(events) => events,
                Err(e) => {
                    writeln!(stdout, "{}", e)?;
                    continue;
                }
            };
            let mut handler = CommandHandler::new(&mut self.coordinator, &mut stdout);
            for event in events {
                match handler.handle(event).await {
                    Ok(true) => (),
                    Ok(false) => {
                        debug!("Received application exit request.");
                        return Ok(());
                    }
                    Err(e) => error!("Failed to handle command event: {}", e),
                }
            }
            stdout.flush()?;
        }
        debug!("Input closed.");
        let mut handler = CommandHandler::new(&mut self.coordinator, &mut stdout);
        handler.handle(Event::Status).await?;
        Ok(())
    }
}

async fn render_loop(users: UserStore, repos: ReposStore) {
    let mut user_rx = users.observe();
    let mut repos_rx = repos.observe();
    loop {
        tokio::select! {
            changed = user_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = user_rx.borrow_and_update().clone();
                print_lines(text::profile(&state));
            }
            changed = repos_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = repos_rx.borrow_and_update().clone();
                print_lines(text::repos(&state));
            }
        }
    }
}

fn print_lines(lines: Vec<String>) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        if writeln!(out, "{}", line).is_err() {
            return;
        }
    }
}
