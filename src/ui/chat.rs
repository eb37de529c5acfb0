//! Chat thread view.
//!
//! `ChatContainer` keeps one [`ChatSession`] in a signal. Sending appends the
//! user's message before the request goes out, then reconciles with the reply;
//! the first reply of a new conversation registers it in the sidebar and moves
//! the route to `/chat/:id`.

use dioxus::{
    logger::tracing::{info, warn},
    prelude::*,
    router::Navigator,
};

use crate::{
    AppSettings, Route,
    api::{ChatSummary, SendRequest, SharedBackend},
    state::{ChatDirectory, ChatSession, ModelRegistry},
    ui::{
        box_select::{BoxSelect, SelectOption},
        chat_input::ChatInput,
        message::MessageBubble,
    },
};

#[component]
pub fn NewChat() -> Element {
    rsx! {
        ChatContainer { chat_id: None }
    }
}

#[component]
pub fn ChatEl(id: String) -> Element {
    rsx! {
        ChatContainer { key: "{id}", chat_id: Some(id.clone()) }
    }
}

/// Sends one request and folds the reply into the session.
async fn dispatch(
    req: SendRequest,
    mut session: Signal<ChatSession>,
    mut directory: Signal<ChatDirectory>,
    backend: Signal<SharedBackend>,
    nav: Navigator,
) {
    let be = backend.cloned();
    let result = be.send_message(&req).await;
    if let Err(e) = &result {
        warn!("Send failed: {e}");
    }
    let Some(chat_id) = session.with_mut(|s| s.finish_send(result)) else {
        return;
    };
    info!("Conversation started as chat {chat_id}");
    let label = session
        .read()
        .derived_label()
        .unwrap_or_else(|| "New chat".to_string());
    directory.with_mut(|d| {
        d.upsert(ChatSummary { chat_id: chat_id.clone(), label });
        d.select(Some(chat_id.clone()));
        d.hand_off(session.cloned());
    });
    nav.replace(Route::ChatEl { id: chat_id });
}

#[component]
pub fn ChatContainer(chat_id: Option<String>) -> Element {
    let nav = navigator();
    let backend = use_context::<Signal<SharedBackend>>();
    let settings = use_context::<Signal<AppSettings>>();
    let registry = use_context::<Signal<ModelRegistry>>();
    let mut directory = use_context::<Signal<ChatDirectory>>();
    // A conversation that just got its id continues where it left off.
    let mut session = use_signal(|| {
        chat_id
            .as_deref()
            .and_then(|id| directory.peek().live_session(id).cloned())
            .unwrap_or_default()
    });

    // Fetch history on mount for an existing chat.
    let initial = chat_id.clone();
    use_future(move || {
        let initial = initial.clone();
        async move {
            directory.with_mut(|d| d.select(initial.clone()));
            let Some(id) = initial else { return };
            if directory.with_mut(|d| d.claim(&id)).is_some() {
                return;
            }
            session.with_mut(|s| s.begin_load(&id));
            let be = backend.cloned();
            let result = be.chat_history(&id).await;
            if let Err(e) = &result {
                warn!("Could not load chat {id}: {e}");
            }
            session.with_mut(|s| s.finish_load(&id, result));
        }
    });

    // Pick a model once the registry has loaded, unless the user already chose.
    use_effect(move || {
        let preferred = settings.read().default_model_id.clone();
        let default = registry.read().default_model_id(preferred.as_deref());
        if session.peek().model_id.is_none() && default.is_some() {
            session.with_mut(|s| s.select_model(default));
        }
    });

    let send = move |_: ()| async move {
        let Some(req) = session.with_mut(|s| s.begin_send()) else {
            return;
        };
        dispatch(req, session, directory, backend, nav).await;
    };

    let retry = move |_| async move {
        let Some(req) = session.with_mut(|s| s.begin_retry()) else {
            return;
        };
        dispatch(req, session, directory, backend, nav).await;
    };

    let model_options: Vec<SelectOption> = registry
        .read()
        .models
        .iter()
        .map(|m| SelectOption::new(m.model_id.clone(), format!("{} · {}", m.model_name, m.provider)))
        .collect();

    let s = session.read();
    let messages = s.messages.clone();
    let loading = s.loading;
    let error = s.error.clone();
    let input = s.input.clone();
    let model_id = s.model_id.clone();
    let can_retry = s.can_retry();
    drop(s);

    rsx! {
        div { class: "chat",
            div { class: "chat-header",
                label { "Model" }
                BoxSelect {
                    value: model_id,
                    options: model_options,
                    allow_none: false,
                    on_select: move |id: Option<String>| {
                        session.with_mut(|s| s.select_model(id));
                    },
                }
            }
            div { class: "chat-thread",
                if messages.is_empty() && !loading {
                    div { class: "chat-empty", "Ask a question about your documents." }
                }
                for (i, m) in messages.into_iter().enumerate() {
                    MessageBubble { key: "{i}", msg: m }
                }
                if loading {
                    div { class: "chat-status", "Waiting for a response..." }
                }
                if let Some(error_msg) = error {
                    div { class: "error-box",
                        div { style: "font-weight: bold; margin-bottom: 0.5em;", "Error occurred:" }
                        div { class: "error-text", "{error_msg}" }
                        div {
                            if can_retry {
                                button { class: "danger", onclick: retry, "Retry" }
                            }
                            button {
                                class: "secondary",
                                onclick: move |_| {
                                    session.with_mut(|s| s.dismiss_error());
                                },
                                "Dismiss"
                            }
                        }
                    }
                }
            }
            div { class: "chat-footer",
                ChatInput {
                    value: input,
                    disabled: loading,
                    on_input: move |text: String| {
                        session.with_mut(|s| s.set_input(text));
                    },
                    on_send: send,
                }
            }
        }
    }
}
