use dioxus::prelude::*;

use crate::api::{Message, Role};

#[component]
pub fn MessageBubble(msg: Message) -> Element {
    match msg.role {
        Role::User => rsx! {
            div { class: "message-row right",
                div { class: "message human-message",
                    for line in msg.content.lines() {
                        p { "{line}" }
                    }
                }
            }
        },
        Role::Assistant => {
            let el = crate::md2rsx::markdown_to_rsx(&msg.content)?;
            rsx! {
                div { class: "message-row left",
                    div { class: "message ai-message", {el} }
                }
            }
        }
        Role::System => rsx! {
            div { class: "message system-message", "{msg.content}" }
        },
    }
}
