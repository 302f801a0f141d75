use txfeed::app::App;
use txfeed::config::Config;
use txfeed::error::FeedResult;
use txfeed::feed::{FeedKind, PageRequest, PageResult};
use txfeed::logging;
use txfeed::search::SearchQuery;
use txfeed::ui;

use anyhow::Result;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::io::stdout;
use tokio::sync::mpsc;
use tracing::info;
use tui_input::backend::crossterm::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::init_tracing()?;
    let config = Config::load()?;
    info!(log = ?log_path, "starting txfeed");

    run_tui(config).await?;

    Ok(())
}

/// Messages from async tasks back to the main loop
enum AsyncMessage {
    Page {
        view_id: u64,
        generation: u64,
        result: FeedResult<PageResult>,
    },
    Domain {
        view_id: u64,
        name: Option<String>,
    },
    Total {
        view_id: u64,
        kind: FeedKind,
        total: u64,
    },
}

async fn run_tui(config: Config) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);

    let (tx, mut rx) = mpsc::channel::<AsyncMessage>(10);

    let result = run_event_loop(&mut terminal, &mut app, tx, &mut rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AsyncMessage>,
    rx: &mut mpsc::Receiver<AsyncMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Check for async results
        while let Ok(msg) = rx.try_recv() {
            match msg {
                AsyncMessage::Page {
                    view_id,
                    generation,
                    result,
                } => app.apply_page(view_id, generation, result),
                AsyncMessage::Domain { view_id, name } => app.set_domain(view_id, name),
                AsyncMessage::Total {
                    view_id,
                    kind,
                    total,
                } => app.set_total(view_id, kind, total),
            }
        }

        // Poll for input events
        if event::poll(std::time::Duration::from_millis(50))? {
            let ev = event::read()?;

            if let Event::Key(key) = &ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global keys
                match key.code {
                    KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    _ => {}
                }

                // Screen-specific keys
                if app.is_on_home() {
                    if app.needs_setup() {
                        match key.code {
                            KeyCode::Enter => {
                                if let Err(e) = app.submit_setup() {
                                    app.set_error(e);
                                }
                            }
                            KeyCode::Esc => {}
                            _ => {
                                app.setup_input.handle_event(&ev);
                            }
                        }
                    } else {
                        // Normal search mode with history
                        match key.code {
                            KeyCode::Enter => {
                                if let Some(query) = app.get_selected_history_query() {
                                    app.clear_history_selection();
                                    // Move it to the top of the history
                                    let _ = app.config.add_recent_search(query.clone());
                                    execute_search(app, &query, &tx);
                                } else if let Some(query) = app.submit_search() {
                                    execute_search(app, &query, &tx);
                                }
                            }
                            KeyCode::Up => {
                                app.select_history_prev();
                            }
                            KeyCode::Down => {
                                app.select_history_next();
                            }
                            KeyCode::Delete | KeyCode::Backspace
                                if app.selected_history_index.is_some() =>
                            {
                                app.delete_selected_history();
                            }
                            KeyCode::Esc => {}
                            _ => {
                                if app.selected_history_index.is_some() {
                                    app.clear_history_selection();
                                }
                                app.search_input.handle_event(&ev);
                            }
                        }
                    }
                } else {
                    let request = match key.code {
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.select_prev();
                            None
                        }
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Tab => app.cycle_feed_kind(),
                        KeyCode::Char('n') | KeyCode::Right => app.next_page(),
                        KeyCode::Char('p') | KeyCode::Left => app.prev_page(),
                        KeyCode::Char('+') | KeyCode::Char('=') => app.grow_page_size(),
                        KeyCode::Char('-') => app.shrink_page_size(),
                        KeyCode::Char('r') => app.retry(),
                        KeyCode::Enter => {
                            if let Some(address) = app.selected_counterparty() {
                                execute_search(app, &address, &tx);
                            }
                            None
                        }
                        KeyCode::Backspace | KeyCode::Char('b') => {
                            app.go_back();
                            None
                        }
                        KeyCode::Char('h') => {
                            app.go_home();
                            None
                        }
                        _ => None,
                    };

                    if let Some(request) = request {
                        spawn_fetch(app, request, &tx);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn execute_search(app: &mut App, query: &str, tx: &mpsc::Sender<AsyncMessage>) {
    let account = match SearchQuery::parse(query) {
        SearchQuery::Address(account) => account,
        SearchQuery::Invalid(reason) => {
            app.set_error(reason);
            return;
        }
    };

    if app.needs_setup() {
        app.set_error("No GraphQL endpoint configured.".into());
        return;
    }

    let request = app.open_account(&account);
    if let Some(request) = request {
        spawn_fetch(app, request, tx);
    }
    spawn_totals(app, &account, tx);
    spawn_domain_lookup(app, account, tx);
}

/// Count-only fetches so every tab shows its total before it is opened
fn spawn_totals(app: &App, account: &str, tx: &mpsc::Sender<AsyncMessage>) {
    let (Some(controller), Some(view)) = (app.controller.as_ref(), app.feed_view()) else {
        return;
    };
    let view_id = view.id;

    for kind in FeedKind::ALL.into_iter().filter(|kind| *kind != view.kind()) {
        let controller = controller.clone();
        let account = account.to_string();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Ok(total) = controller.fetch_total(&account, kind).await {
                let _ = tx
                    .send(AsyncMessage::Total {
                        view_id,
                        kind,
                        total,
                    })
                    .await;
            }
        });
    }
}

/// Run one page fetch in the background and report it to the issuing view
fn spawn_fetch(app: &App, request: PageRequest, tx: &mpsc::Sender<AsyncMessage>) {
    let (Some(controller), Some(view)) = (app.controller.clone(), app.feed_view()) else {
        return;
    };
    let view_id = view.id;
    let tx = tx.clone();

    tokio::spawn(async move {
        let generation = request.generation;
        let result = controller.fetch_page(&request).await;
        let _ = tx
            .send(AsyncMessage::Page {
                view_id,
                generation,
                result,
            })
            .await;
    });
}

fn spawn_domain_lookup(app: &App, account: String, tx: &mpsc::Sender<AsyncMessage>) {
    let (Some(controller), Some(view)) = (app.controller.as_ref(), app.feed_view()) else {
        return;
    };
    let resolver = controller.resolver().clone();
    if !resolver.is_enabled() {
        return;
    }
    let view_id = view.id;
    let tx = tx.clone();

    tokio::spawn(async move {
        let name = resolver.resolve_name(&account).await;
        let _ = tx.send(AsyncMessage::Domain { view_id, name }).await;
    });
}
