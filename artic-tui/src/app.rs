//! Event loop.
//!
//! The loop is the only place widget state changes. Fetches run as spawned
//! tasks and report back over a channel; terminal input, fetch completions
//! and spinner ticks are handled one at a time.

use std::io;

use artic_lib::fetch::{FetchCompletion, FetchRequest};
use artic_lib::{ArticClient, Fetcher, TableController};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use log::{debug, error, info};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::config::ViewerConfig;
use crate::input::{Action, action_for};
use crate::render::Terminal;
use crate::view::TableView;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("client error: {0}")]
    Client(#[from] artic_lib::error::Error),
}

/// Whether the loop keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct App {
    config: ViewerConfig,
    table: TableController,
    fetcher: Fetcher,
    view: TableView,
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl App {
    /// Builds the client and table from `config`.
    ///
    /// Returns the app and the receiving end of its completion channel.
    pub fn new(
        config: ViewerConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<FetchCompletion>), AppError> {
        let mut builder = ArticClient::builder().endpoint(config.endpoint.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let table = TableController::new(config.page_size).with_response_order(config.response_order);
        let (tx, rx) = mpsc::unbounded_channel();

        Ok((
            Self {
                config,
                table,
                fetcher: Fetcher::new(client),
                view: TableView::new(),
                completions: tx,
            },
            rx,
        ))
    }

    pub async fn run(
        mut self,
        terminal: &mut Terminal,
        mut completions: mpsc::UnboundedReceiver<FetchCompletion>,
    ) -> Result<(), AppError> {
        let mut events = EventStream::new();
        let mut spinner = tokio::time::interval(self.config.spinner_frame);
        spinner.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let request = self.table.mount();
        self.spawn_fetch(request);

        loop {
            terminal.draw(|buf| self.view.draw(&self.table, buf))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_event(event) == Flow::Exit {
                            info!("quit requested");
                            break;
                        }
                    }
                    Some(Err(e)) => error!("event stream error: {}", e),
                    None => break,
                },
                Some(completion) = completions.recv() => {
                    self.table.finish_fetch(completion);
                    self.view.clamp_cursor(self.table.records().len());
                }
                _ = spinner.tick(), if self.table.is_loading() => {
                    self.view.advance_spinner();
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Flow {
        let Event::Key(key) = event else {
            return Flow::Continue;
        };
        let Some(action) = action_for(key) else {
            return Flow::Continue;
        };
        debug!("action: {:?}", action);

        let rows = self.table.records().len();
        let window = self.table.window();
        let page_count = self.table.page_count();

        let request = match action {
            Action::Quit => return Flow::Exit,
            Action::CursorUp => {
                self.view.cursor_up();
                None
            }
            Action::CursorDown => {
                self.view.cursor_down(rows);
                None
            }
            Action::ToggleRow => {
                if let Some(checked) = self.view.toggle_row(&self.table) {
                    self.table.select(&checked);
                }
                None
            }
            Action::TogglePage => {
                let checked = self.view.toggle_page(&self.table);
                self.table.select(&checked);
                None
            }
            Action::PrevPage => window
                .index()
                .checked_sub(1)
                .and_then(|index| self.table.go_to_page(index)),
            Action::NextPage => (window.index() + 1 < page_count)
                .then(|| self.table.go_to_page(window.index() + 1))
                .flatten(),
            Action::FirstPage => self.table.go_to_page(0),
            Action::LastPage => page_count
                .checked_sub(1)
                .and_then(|last| self.table.go_to_page(last)),
            Action::LargerPages => self
                .config
                .larger_page_size(window.size())
                .and_then(|size| self.table.set_page_size(size)),
            Action::SmallerPages => self
                .config
                .smaller_page_size(window.size())
                .and_then(|size| self.table.set_page_size(size)),
            Action::Reload => Some(self.table.reload()),
        };

        if let Some(request) = request {
            self.view.reset_cursor();
            self.spawn_fetch(request);
        }
        Flow::Continue
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let fetcher = self.fetcher.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completion = fetcher.load(request).await;
            // receiver is gone once the app has quit
            let _ = completions.send(completion);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artic_lib::model::{Artwork, ResultSet};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    // nothing listens on the discard port, so spawned fetches fail fast
    const OFFLINE: &str = "http://127.0.0.1:9/api/v1/artworks";

    type Completions = mpsc::UnboundedReceiver<FetchCompletion>;

    /// An app showing the first page of a collection of `total` artworks.
    fn mounted(total: u64) -> (App, Completions) {
        let (mut app, rx) = App::new(ViewerConfig::default().endpoint(OFFLINE)).unwrap();
        let request = app.table.mount();
        settle(&mut app, request, total);
        (app, rx)
    }

    fn settle(app: &mut App, request: FetchRequest, total: u64) {
        let start = request.window.first() as u64 + 1;
        let end = (start + request.window.size() as u64).min(total + 1);
        let records = (start..end)
            .map(|id| Artwork::new(id, format!("Artwork {id}")))
            .collect();
        app.table.finish_fetch(FetchCompletion {
            request,
            result: Ok(ResultSet::new(records, total)),
        });
    }

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn latest_ticket(app: &App) -> u64 {
        app.table.latest_request().map(|r| r.ticket).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_prev_on_first_page_issues_nothing() {
        let (mut app, _rx) = mounted(25);
        let ticket = latest_ticket(&app);

        assert_eq!(press(&mut app, KeyCode::Left), Flow::Continue);
        press(&mut app, KeyCode::Home);

        assert_eq!(latest_ticket(&app), ticket);
        assert_eq!(app.table.window().index(), 0);
        assert!(!app.table.is_loading());
    }

    #[tokio::test]
    async fn test_next_stops_at_last_page() {
        let (mut app, _rx) = mounted(25);

        press(&mut app, KeyCode::End);
        let request = app.table.latest_request().unwrap();
        assert_eq!(request.window.index(), 2);
        settle(&mut app, request, 25);

        press(&mut app, KeyCode::Right);
        assert_eq!(latest_ticket(&app), request.ticket);
        assert_eq!(app.table.window().index(), 2);
    }

    #[tokio::test]
    async fn test_empty_collection_has_no_last_page() {
        let (mut app, _rx) = mounted(0);
        let ticket = latest_ticket(&app);

        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Right);

        assert_eq!(latest_ticket(&app), ticket);
        assert_eq!(app.table.window().index(), 0);
    }

    #[tokio::test]
    async fn test_new_request_resets_cursor() {
        let (mut app, _rx) = mounted(25);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.view.cursor(), 2);

        press(&mut app, KeyCode::Right);

        assert_eq!(app.table.window().index(), 1);
        assert!(app.table.is_loading());
        assert_eq!(app.view.cursor(), 0);
    }

    #[tokio::test]
    async fn test_rows_per_page_keys() {
        let (mut app, _rx) = mounted(100);
        press(&mut app, KeyCode::Right);
        let request = app.table.latest_request().unwrap();
        settle(&mut app, request, 100);

        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.table.window().size(), 20);
        assert_eq!(app.table.window().index(), 0);

        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.table.window().size(), 5);

        let ticket = latest_ticket(&app);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(latest_ticket(&app), ticket);
    }

    #[tokio::test]
    async fn test_reload_and_quit() {
        let (mut app, _rx) = mounted(25);
        let ticket = latest_ticket(&app);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(latest_ticket(&app), ticket + 1);

        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Exit);
    }
}
