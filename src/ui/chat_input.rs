use dioxus::prelude::*;

const SEND_ICON: Asset = asset!("/assets/send.svg");

/// Controlled input bar: the text lives in the caller's chat session.
/// Enter sends, Shift+Enter inserts a newline.
#[component]
pub fn ChatInput(
    value: String,
    disabled: bool,
    on_input: Callback<String, ()>,
    on_send: Callback<(), ()>,
) -> Element {
    let empty = value.trim().is_empty();
    let send_disabled = if disabled || empty { Some(true) } else { None };
    let disabled = if disabled { Some(true) } else { None };
    rsx! {
        div { class: "chat-input",
            textarea {
                placeholder: "Ask anything...",
                disabled,
                value: "{value}",
                oninput: move |e: Event<FormData>| on_input(e.value()),
                onkeydown: move |e: Event<KeyboardData>| {
                    if e.key() == Key::Enter && !e.modifiers().shift() {
                        e.prevent_default();
                        if !empty {
                            on_send(());
                        }
                    }
                },
            }
            button {
                title: "Send",
                disabled: send_disabled,
                onclick: move |_| on_send(()),
                img { src: SEND_ICON }
            }
        }
    }
}
