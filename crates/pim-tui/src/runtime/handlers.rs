//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform one API call and return
//! the `UiEvent` carrying its result. The runtime spawns them with
//! `spawn_task` so every call gets the TaskStarted/TaskCompleted lifecycle.

use pim_core::api::ApiClient;

use crate::events::{MutationKind, UiEvent};

pub async fn login(api: ApiClient, username: String, password: String) -> UiEvent {
    let result = api.login(&username, &password).await;
    UiEvent::LoginResult { username, result }
}

pub async fn register(api: ApiClient, username: String, password: String) -> UiEvent {
    let result = api.register(&username, &password).await;
    UiEvent::RegisterResult { result }
}

pub async fn refresh(api: ApiClient, username: String, term: Option<String>) -> UiEvent {
    let result = match &term {
        Some(term) => api.search_articles(&username, term).await,
        None => api.list_articles(&username).await,
    };
    UiEvent::ArticlesLoaded { result }
}

pub async fn create_article(
    api: ApiClient,
    username: String,
    password: String,
    title: String,
    content: String,
) -> UiEvent {
    let result = api
        .create_article(&username, &password, &title, &content)
        .await;
    UiEvent::MutationFinished {
        kind: MutationKind::Create,
        result,
    }
}

pub async fn update_article(
    api: ApiClient,
    id: String,
    username: String,
    password: String,
    title: String,
    content: String,
) -> UiEvent {
    let result = api
        .update_article(&id, &username, &password, &title, &content)
        .await;
    UiEvent::MutationFinished {
        kind: MutationKind::Update,
        result,
    }
}

pub async fn delete_article(api: ApiClient, id: String) -> UiEvent {
    let result = api.delete_article(&id).await;
    UiEvent::MutationFinished {
        kind: MutationKind::Delete,
        result,
    }
}
