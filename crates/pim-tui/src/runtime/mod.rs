//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results flow through a single "inbox" channel:
//! - Spawned handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//!
//! Every API call is wrapped in a TaskStarted/TaskCompleted lifecycle so the
//! reducer can drop completions of superseded tasks.

mod handlers;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use pim_core::api::ApiClient;
use pim_core::session::Session;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll cadence while any task is running (keeps the spinner moving).
const BUSY_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Poll cadence when idle.
const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(250);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
    should_quit: bool,
}

impl TuiRuntime {
    /// Creates a new TUI runtime. Must be called from within a tokio
    /// runtime context so effect handlers can be spawned.
    pub fn new(api: ApiClient, state: AppState) -> Result<Self> {
        // Panic hook goes in BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: std::time::Instant::now(),
            should_quit: false,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        self.kick_initial_refresh();
        let result = self.event_loop();
        let restore = terminal::restore_terminal();
        result.and(restore)
    }

    /// Starting on the dashboard (restored session) fetches immediately.
    fn kick_initial_refresh(&mut self) {
        let refresh = self
            .state
            .tui
            .dashboard()
            .filter(|d| !d.loaded_once)
            .map(|d| UiEffect::Refresh {
                username: d.username.clone(),
                term: None,
            });
        if let Some(effect) = refresh {
            self.execute_effect(effect);
        }
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Renders are batched to tick cadence; input and async
                // results mark the frame dirty for the next draw.
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, plus the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            BUSY_POLL_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block until the next tick is due unless there is already work.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted
    /// lifecycle. The task id is recorded by the reducer before the
    /// completion can arrive, since both go through the inbox in order.
    fn spawn_task<F, Fut>(&mut self, kind: TaskKind, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let id: TaskId = self.state.tui.task_seq.next_id();
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let api = self.api.clone();
        match effect {
            UiEffect::Quit => {
                self.should_quit = true;
            }
            UiEffect::Login { username, password } => {
                self.spawn_task(TaskKind::Login, move || {
                    handlers::login(api, username, password)
                });
            }
            UiEffect::Register { username, password } => {
                self.spawn_task(TaskKind::Register, move || {
                    handlers::register(api, username, password)
                });
            }
            UiEffect::Refresh { username, term } => {
                self.spawn_task(TaskKind::Refresh, move || {
                    handlers::refresh(api, username, term)
                });
            }
            UiEffect::CreateArticle {
                username,
                password,
                title,
                content,
            } => {
                self.spawn_task(TaskKind::Create, move || {
                    handlers::create_article(api, username, password, title, content)
                });
            }
            UiEffect::UpdateArticle {
                id,
                username,
                password,
                title,
                content,
            } => {
                self.spawn_task(TaskKind::Update, move || {
                    handlers::update_article(api, id, username, password, title, content)
                });
            }
            UiEffect::DeleteArticle { id } => {
                self.spawn_task(TaskKind::Delete, move || handlers::delete_article(api, id));
            }
            // Session persistence is fast local disk I/O; run it inline and
            // surface failures in the log rather than the UI.
            UiEffect::PersistSession { username } => {
                if let Err(error) = Session::new(username).save() {
                    tracing::error!("failed to persist session: {error:#}");
                }
            }
            UiEffect::ClearSession => {
                if let Err(error) = Session::clear() {
                    tracing::error!("failed to clear session: {error:#}");
                }
            }
        }
    }
}
