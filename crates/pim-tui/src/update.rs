//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::articles::DashboardState;
use crate::features::auth::{self, AuthState};
use crate::features::notice::Notice;
use crate::overlays::{ConfirmState, EditorState, Overlay, OverlayTransition, OverlayUpdate, ViewerState};
use crate::state::{AppState, Screen};

/// Row-level operations on the dashboard list, keyed by record identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.tick = app.tui.tick.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if !ok {
                // A newer task of the same kind superseded this one.
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task completion");
                vec![]
            } else {
                update(app, *completed.result)
            }
        }
        UiEvent::LoginResult { username, result } => match result {
            Ok(()) => {
                app.tui.notice = None;
                // Results still in flight for a previous session must not
                // land on this dashboard.
                app.tui.tasks.clear_all();
                app.tui.screen = Screen::Dashboard(DashboardState::new(&username));
                vec![
                    UiEffect::PersistSession {
                        username: username.clone(),
                    },
                    UiEffect::Refresh {
                        username,
                        term: None,
                    },
                ]
            }
            Err(failure) => {
                app.tui.notice = Some(Notice::error(failure.message()));
                vec![]
            }
        },
        UiEvent::RegisterResult { result } => {
            app.tui.notice = Some(match result {
                Ok(()) => Notice::info("Registration successful. You can now sign in."),
                Err(failure) => Notice::error(failure.message()),
            });
            vec![]
        }
        UiEvent::ArticlesLoaded { result } => {
            let Some(dashboard) = app.tui.dashboard_mut() else {
                return vec![];
            };
            match result {
                Ok(articles) => {
                    dashboard.replace_articles(articles);
                }
                Err(failure) => {
                    // The prior rendered set stays visible.
                    tracing::warn!(status = failure.status(), "refresh failed: {failure}");
                    app.tui.notice = Some(Notice::error(failure.message()));
                }
            }
            vec![]
        }
        UiEvent::MutationFinished { kind, result } => {
            app.tui.notice = Some(match &result {
                Ok(()) => Notice::info(format!("Article {} successfully.", kind.past_tense())),
                Err(failure) => Notice::error(failure.message()),
            });
            // Refresh unconditionally so the list reflects whatever the
            // server actually did, even after a reported failure.
            match app.tui.dashboard() {
                Some(dashboard) => vec![UiEffect::Refresh {
                    username: dashboard.username.clone(),
                    term: dashboard.search.active_term().map(str::to_string),
                }],
                None => vec![],
            }
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Overlays own the keyboard while open.
    if let Some(mut overlay) = app.overlay.take() {
        let overlay_update = overlay.handle_key(&app.tui, key);
        if matches!(overlay_update.transition, OverlayTransition::Stay) {
            app.overlay = Some(overlay);
        }
        return apply_overlay_update(app, overlay_update);
    }

    match &mut app.tui.screen {
        Screen::Entry(auth_state) => {
            let outcome = auth::handle_key(auth_state, &app.tui.tasks, key);
            if let Some(notice) = outcome.notice {
                app.tui.notice = Some(notice);
            }
            if outcome.quit {
                return vec![UiEffect::Quit];
            }
            outcome.effects
        }
        Screen::Dashboard(_) => handle_dashboard_key(app, key),
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let Some(dashboard) = app.tui.dashboard_mut() else {
        return vec![];
    };

    if dashboard.search.focused {
        return handle_search_key(dashboard, key, ctrl);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('l') if ctrl => {
            app.tui.screen = Screen::Entry(AuthState::default());
            app.tui.notice = None;
            app.tui.tasks.clear_all();
            vec![UiEffect::ClearSession]
        }
        KeyCode::Char('/') | KeyCode::Char('s') => {
            dashboard.search.focused = true;
            vec![]
        }
        KeyCode::Char('r') => refresh_effect(dashboard),
        KeyCode::Char('j') | KeyCode::Down => {
            dashboard.select_next();
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            dashboard.select_previous();
            vec![]
        }
        KeyCode::Char('n') => {
            app.overlay = Some(Overlay::Editor(EditorState::create()));
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('v') => selected_row_action(app, RowAction::View),
        KeyCode::Char('e') => selected_row_action(app, RowAction::Edit),
        KeyCode::Char('d') | KeyCode::Delete => selected_row_action(app, RowAction::Delete),
        _ => vec![],
    }
}

fn handle_search_key(dashboard: &mut DashboardState, key: KeyEvent, ctrl: bool) -> Vec<UiEffect> {
    match key.code {
        // Esc clears the filter and restores the full list.
        KeyCode::Esc => {
            dashboard.search.focused = false;
            if dashboard.search.term.is_empty() {
                return vec![];
            }
            dashboard.search.term.clear();
            refresh_effect(dashboard)
        }
        KeyCode::Enter => {
            dashboard.search.focused = false;
            refresh_effect(dashboard)
        }
        KeyCode::Backspace => {
            dashboard.search.term.pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            dashboard.search.term.push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// A refresh scoped to the dashboard's current identity and filter.
fn refresh_effect(dashboard: &DashboardState) -> Vec<UiEffect> {
    vec![UiEffect::Refresh {
        username: dashboard.username.clone(),
        term: dashboard.search.active_term().map(str::to_string),
    }]
}

fn selected_row_action(app: &mut AppState, action: RowAction) -> Vec<UiEffect> {
    let Some(id) = app
        .tui
        .dashboard()
        .and_then(DashboardState::selected_article)
        .map(|article| article.id.clone())
    else {
        return vec![];
    };
    dispatch_row_action(app, action, &id)
}

/// Resolves a row action against the rendered set by record identity.
///
/// A missing identity is recoverable: the rendered copy was superseded by a
/// refresh, so the action becomes a no-op with a notice instead of acting on
/// the wrong record.
pub fn dispatch_row_action(app: &mut AppState, action: RowAction, id: &str) -> Vec<UiEffect> {
    let Some(article) = app.tui.dashboard().and_then(|d| d.find(id)) else {
        tracing::warn!(id, ?action, "row action target not in rendered set");
        app.tui.notice = Some(Notice::error("That article is no longer listed."));
        return vec![];
    };

    app.overlay = Some(match action {
        RowAction::View => Overlay::Viewer(ViewerState::new(&article.title, &article.content)),
        RowAction::Edit => Overlay::Editor(EditorState::edit(
            &article.id,
            &article.title,
            &article.content,
        )),
        RowAction::Delete => Overlay::Confirm(ConfirmState::new(&article.id, &article.title)),
    });
    vec![]
}

fn apply_overlay_update(app: &mut AppState, overlay_update: OverlayUpdate) -> Vec<UiEffect> {
    if let Some(notice) = overlay_update.notice {
        app.tui.notice = Some(notice);
    }
    overlay_update.effects
}

#[cfg(test)]
mod tests {
    use pim_core::api::{ApiFailure, ArticleRecord};

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::events::MutationKind;
    use crate::overlays::EditorStep;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }))
    }

    fn article(id: &str, title: &str) -> ArticleRecord {
        ArticleRecord {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("{title} body"),
        }
    }

    fn dashboard_app(articles: Vec<ArticleRecord>) -> AppState {
        let mut app = AppState::dashboard("alice");
        if let Some(dashboard) = app.tui.dashboard_mut() {
            dashboard.replace_articles(articles);
        }
        app
    }

    #[test]
    fn login_success_switches_screen_and_persists_session() {
        let mut app = AppState::entry();
        let effects = update(
            &mut app,
            UiEvent::LoginResult {
                username: "alice".to_string(),
                result: Ok(()),
            },
        );

        assert!(matches!(app.tui.screen, Screen::Dashboard(_)));
        assert_eq!(
            effects,
            vec![
                UiEffect::PersistSession {
                    username: "alice".to_string()
                },
                UiEffect::Refresh {
                    username: "alice".to_string(),
                    term: None
                },
            ]
        );
    }

    #[test]
    fn login_failure_surfaces_server_message_verbatim() {
        let mut app = AppState::entry();
        let effects = update(
            &mut app,
            UiEvent::LoginResult {
                username: "alice".to_string(),
                result: Err(ApiFailure::Request {
                    status: 401,
                    message: "Invalid username or password".to_string(),
                }),
            },
        );

        assert!(effects.is_empty());
        assert!(matches!(app.tui.screen, Screen::Entry(_)));
        let notice = app.tui.notice.as_ref().unwrap();
        assert_eq!(notice.text, "Invalid username or password");
    }

    #[test]
    fn failed_refresh_keeps_prior_rendered_set() {
        let mut app = dashboard_app(vec![article("1", "Kept")]);
        update(
            &mut app,
            UiEvent::ArticlesLoaded {
                result: Err(ApiFailure::Network {
                    message: "Network error. Is the server running?".to_string(),
                }),
            },
        );

        let dashboard = app.tui.dashboard().unwrap();
        assert_eq!(dashboard.articles.len(), 1);
        assert_eq!(app.tui.notice.as_ref().unwrap().text, "Network error. Is the server running?");
    }

    #[test]
    fn mutation_always_ends_in_a_refresh() {
        let mut app = dashboard_app(vec![]);
        let ok_effects = update(
            &mut app,
            UiEvent::MutationFinished {
                kind: MutationKind::Create,
                result: Ok(()),
            },
        );
        let err_effects = update(
            &mut app,
            UiEvent::MutationFinished {
                kind: MutationKind::Delete,
                result: Err(ApiFailure::Request {
                    status: 404,
                    message: "Article not found".to_string(),
                }),
            },
        );

        let refresh = UiEffect::Refresh {
            username: "alice".to_string(),
            term: None,
        };
        assert_eq!(ok_effects, vec![refresh.clone()]);
        assert_eq!(err_effects, vec![refresh]);
        assert_eq!(app.tui.notice.as_ref().unwrap().text, "Article not found");
    }

    #[test]
    fn mutation_refresh_preserves_active_search_term() {
        let mut app = dashboard_app(vec![]);
        app.tui.dashboard_mut().unwrap().search.term = "rust".to_string();

        let effects = update(
            &mut app,
            UiEvent::MutationFinished {
                kind: MutationKind::Update,
                result: Ok(()),
            },
        );
        assert_eq!(
            effects,
            vec![UiEffect::Refresh {
                username: "alice".to_string(),
                term: Some("rust".to_string()),
            }]
        );
    }

    #[test]
    fn stale_task_completion_is_dropped() {
        let mut app = dashboard_app(vec![article("1", "Old")]);
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Refresh,
                started: TaskStarted { id: TaskId(1) },
            },
        );
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Refresh,
                started: TaskStarted { id: TaskId(2) },
            },
        );

        // Completion of the superseded task must not touch the list.
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Refresh,
                completed: TaskCompleted {
                    id: TaskId(1),
                    result: Box::new(UiEvent::ArticlesLoaded { result: Ok(vec![]) }),
                },
            },
        );
        assert_eq!(app.tui.dashboard().unwrap().articles.len(), 1);

        // The newest task's completion wins.
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Refresh,
                completed: TaskCompleted {
                    id: TaskId(2),
                    result: Box::new(UiEvent::ArticlesLoaded {
                        result: Ok(vec![article("9", "New")]),
                    }),
                },
            },
        );
        assert_eq!(app.tui.dashboard().unwrap().articles[0].id, "9");
    }

    #[test]
    fn refresh_from_previous_session_cannot_reach_next_login() {
        let mut app = dashboard_app(vec![]);
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Refresh,
                started: TaskStarted { id: TaskId(1) },
            },
        );

        // Logout while alice's refresh is still in flight, then bob signs in.
        update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                state: crossterm::event::KeyEventState::NONE,
            })),
        );
        update(
            &mut app,
            UiEvent::LoginResult {
                username: "bob".to_string(),
                result: Ok(()),
            },
        );

        // Alice's refresh completes late; it must be dropped, not rendered.
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Refresh,
                completed: TaskCompleted {
                    id: TaskId(1),
                    result: Box::new(UiEvent::ArticlesLoaded {
                        result: Ok(vec![article("a1", "alice private note")]),
                    }),
                },
            },
        );

        let dashboard = app.tui.dashboard().unwrap();
        assert_eq!(dashboard.username, "bob");
        assert!(dashboard.articles.is_empty());
    }

    #[test]
    fn edit_key_seeds_editor_from_rendered_copy() {
        let mut app = dashboard_app(vec![article("7", "Seeded")]);
        update(&mut app, key(KeyCode::Char('e')));

        let Some(Overlay::Editor(editor)) = &app.overlay else {
            panic!("expected editor overlay");
        };
        assert_eq!(editor.target.as_deref(), Some("7"));
        assert_eq!(editor.title, "Seeded");
        assert_eq!(editor.content, "Seeded body");
        assert_eq!(editor.step, EditorStep::Form);
    }

    #[test]
    fn row_action_on_missing_identity_is_a_noop_with_notice() {
        let mut app = dashboard_app(vec![article("1", "Only")]);
        let effects = dispatch_row_action(&mut app, RowAction::Edit, "999");

        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn search_enter_triggers_search_refresh() {
        let mut app = dashboard_app(vec![]);
        update(&mut app, key(KeyCode::Char('/')));
        for c in "rust".chars() {
            update(&mut app, key(KeyCode::Char(c)));
        }
        let effects = update(&mut app, key(KeyCode::Enter));

        assert_eq!(
            effects,
            vec![UiEffect::Refresh {
                username: "alice".to_string(),
                term: Some("rust".to_string()),
            }]
        );
        assert!(!app.tui.dashboard().unwrap().search.focused);
    }

    #[test]
    fn search_esc_clears_term_and_restores_full_list() {
        let mut app = dashboard_app(vec![]);
        update(&mut app, key(KeyCode::Char('/')));
        update(&mut app, key(KeyCode::Char('x')));
        let effects = update(&mut app, key(KeyCode::Esc));

        assert_eq!(
            effects,
            vec![UiEffect::Refresh {
                username: "alice".to_string(),
                term: None,
            }]
        );
        assert!(app.tui.dashboard().unwrap().search.term.is_empty());
    }

    #[test]
    fn ctrl_l_logs_out_to_the_entry_screen() {
        let mut app = dashboard_app(vec![article("1", "A")]);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                state: crossterm::event::KeyEventState::NONE,
            })),
        );

        assert_eq!(effects, vec![UiEffect::ClearSession]);
        assert!(matches!(app.tui.screen, Screen::Entry(_)));
    }

    #[test]
    fn confirm_overlay_delete_flows_through_to_effect() {
        let mut app = dashboard_app(vec![article("5", "Doomed")]);
        update(&mut app, key(KeyCode::Char('d')));
        assert!(matches!(app.overlay, Some(Overlay::Confirm(_))));

        let effects = update(&mut app, key(KeyCode::Char('y')));
        assert_eq!(
            effects,
            vec![UiEffect::DeleteArticle {
                id: "5".to_string()
            }]
        );
        assert!(app.overlay.is_none());
    }

    #[test]
    fn articles_loaded_on_entry_screen_is_ignored() {
        let mut app = AppState::entry();
        let effects = update(
            &mut app,
            UiEvent::ArticlesLoaded {
                result: Ok(vec![article("1", "A")]),
            },
        );
        assert!(effects.is_empty());
    }
}
