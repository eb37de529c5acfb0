use dioxus::prelude::*;

/// One selectable entry: the value handed back and the text shown.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

#[component]
pub fn BoxSelect(
    value: Option<String>,
    options: Vec<SelectOption>,
    #[props(default = true)] allow_none: bool,
    on_select: Callback<Option<String>, ()>,
) -> Element {
    let selected_none_class = if value.is_none() { "selected" } else { "" };
    rsx! {
        div { class: "box-select",
            if allow_none {
                div {
                    class: "option {selected_none_class}",
                    onclick: move |_e| { on_select(None) },
                    "-- Select One --"
                }
            }
            if options.is_empty() {
                div { class: "option empty", "Nothing to choose from yet" }
            }
            {
                options
                    .into_iter()
                    .map(move |o| {
                        let selected = value.as_deref() == Some(o.value.as_str());
                        let selected_class = if selected { "selected" } else { "" };
                        let v = o.value.clone();
                        rsx! {
                            div {
                                key: "{o.value}",
                                class: "option {selected_class}",
                                onclick: move |_e| { on_select(Some(v.clone())) },
                                "{o.label}"
                            }
                        }
                    })
            }
        }
    }
}
