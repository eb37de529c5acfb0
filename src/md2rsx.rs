//! Renders assistant replies (Markdown) as Dioxus elements.
//!
//! Containers are collected on a stack of frames; a frame is closed on the
//! matching end event and turned into one element of its parent frame.

use dioxus::prelude::*;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Default)]
struct Frame {
    children: Vec<Element>,
    href: Option<String>,
    lang: Option<String>,
}

fn push(stack: &mut [Frame], node: Element) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

pub fn markdown_to_rsx(md: &str) -> Element {
    let parser = Parser::new_ext(md, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut stack: Vec<Frame> = vec![Frame::default()];

    for ev in parser {
        match ev {
            Event::Start(tag) => {
                let mut frame = Frame::default();
                match tag {
                    Tag::Link { dest_url, .. } => frame.href = Some(dest_url.to_string()),
                    Tag::CodeBlock(CodeBlockKind::Fenced(lang)) if !lang.is_empty() => {
                        frame.lang = Some(format!("language-{lang}"));
                    }
                    _ => {}
                }
                stack.push(frame);
            }
            Event::End(tag) => {
                // The root frame is never closed by an end event.
                if stack.len() < 2 {
                    continue;
                }
                let Some(frame) = stack.pop() else { continue };
                let children = frame.children.into_iter();
                let node = match tag {
                    TagEnd::Paragraph => rsx! { p { {children} } },
                    TagEnd::Heading(level) => match level {
                        HeadingLevel::H1 => rsx! { h1 { {children} } },
                        HeadingLevel::H2 => rsx! { h2 { {children} } },
                        HeadingLevel::H3 => rsx! { h3 { {children} } },
                        HeadingLevel::H4 => rsx! { h4 { {children} } },
                        HeadingLevel::H5 => rsx! { h5 { {children} } },
                        _ => rsx! { h6 { {children} } },
                    },
                    TagEnd::BlockQuote(_) => rsx! { blockquote { {children} } },
                    TagEnd::CodeBlock => {
                        let class = frame.lang.unwrap_or_default();
                        rsx! { pre { code { class: "{class}", {children} } } }
                    }
                    TagEnd::List(true) => rsx! { ol { {children} } },
                    TagEnd::List(false) => rsx! { ul { {children} } },
                    TagEnd::Item => rsx! { li { {children} } },
                    TagEnd::Table => rsx! { table { {children} } },
                    TagEnd::TableHead => rsx! { thead { tr { {children} } } },
                    TagEnd::TableRow => rsx! { tr { {children} } },
                    TagEnd::TableCell => rsx! { td { {children} } },
                    TagEnd::Emphasis => rsx! { em { {children} } },
                    TagEnd::Strong => rsx! { strong { {children} } },
                    TagEnd::Strikethrough => rsx! { s { {children} } },
                    TagEnd::Link => {
                        let href = frame.href.unwrap_or_default();
                        rsx! { a { href: "{href}", target: "_blank", {children} } }
                    }
                    // Raw HTML from a model is shown as text, never injected.
                    _ => rsx! { span { {children} } },
                };
                push(&mut stack, node);
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                push(&mut stack, rsx! { "{text}" });
            }
            Event::Code(code) => push(&mut stack, rsx! { code { "{code}" } }),
            Event::Rule => push(&mut stack, rsx! { hr {} }),
            Event::HardBreak => push(&mut stack, rsx! { br {} }),
            Event::SoftBreak => push(&mut stack, rsx! { " " }),
            _ => {}
        }
    }

    let children = stack.into_iter().flat_map(|f| f.children);
    rsx! {
        div { class: "markdown", {children} }
    }
}
