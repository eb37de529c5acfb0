use super::*;
use crate::api::Backend;
use crate::state::mock_backend::MockBackend;

fn summary(id: &str, label: &str) -> ChatSummary {
    ChatSummary { chat_id: id.into(), label: label.into() }
}

fn directory() -> ChatDirectory {
    ChatDirectory {
        chats: vec![summary("a", "Sore throat"), summary("b", "Quarterly report"), summary("c", "Throat culture")],
        ..Default::default()
    }
}

#[tokio::test]
async fn deleting_selected_chat_removes_it_and_clears_selection() {
    let backend = MockBackend::new();
    let mut dir = directory();
    dir.select(Some("b".into()));

    backend.delete_chat("b").await.unwrap();
    let was_selected = dir.remove("b");

    assert!(was_selected);
    assert_eq!(dir.selected, None);
    assert!(dir.chats.iter().all(|c| c.chat_id != "b"));
    assert_eq!(dir.chats.len(), 2);
}

#[test]
fn deleting_other_chat_keeps_selection() {
    let mut dir = directory();
    dir.select(Some("a".into()));
    assert!(!dir.remove("c"));
    assert_eq!(dir.selected.as_deref(), Some("a"));
    assert_eq!(dir.chats.len(), 2);
}

#[test]
fn filter_is_case_insensitive() {
    let dir = directory();
    let ids: Vec<_> = dir.filtered("THROAT").iter().map(|c| c.chat_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(dir.filtered("  ").len(), 3);
}

#[test]
fn upsert_inserts_new_chats_first_and_replaces_known_ones() {
    let mut dir = directory();
    dir.upsert(summary("d", "New"));
    assert_eq!(dir.chats[0].chat_id, "d");

    dir.upsert(summary("b", "Renamed"));
    assert_eq!(dir.chats.len(), 4);
    assert_eq!(dir.chats[2].label, "Renamed");
}

#[test]
fn rename_unknown_chat_reports_false() {
    let mut dir = directory();
    assert!(dir.rename("a", "Throat remedies"));
    assert_eq!(dir.chats[0].label, "Throat remedies");
    assert!(!dir.rename("zzz", "x"));
}

#[tokio::test]
async fn fetch_failure_keeps_previous_list() {
    let backend = MockBackend::new();
    backend.fail_next(500, "Could not load chats");
    let mut dir = directory();

    dir.begin_fetch();
    let result = backend.list_chats().await;
    dir.finish_fetch(result);

    assert_eq!(dir.error.as_deref(), Some("Could not load chats"));
    assert_eq!(dir.chats.len(), 3);
    assert!(!dir.loading);
}

#[test]
fn refetch_drops_selection_of_vanished_chat() {
    let mut dir = directory();
    dir.select(Some("c".into()));
    dir.finish_fetch(Ok(vec![summary("a", "Sore throat")]));
    assert_eq!(dir.selected, None);
}

#[tokio::test]
async fn new_conversation_is_handed_to_its_route() {
    let backend = MockBackend::new();
    *backend.reply_chat_id.borrow_mut() = Some("c-9".into());
    let mut session = ChatSession::new(None);
    session.set_input("Is ibuprofen safe with coffee?".into());
    let req = session.begin_send().unwrap();
    let chat_id = session.finish_send(backend.send_message(&req).await).unwrap();

    let mut dir = ChatDirectory::default();
    dir.hand_off(session.clone());

    assert!(dir.live_session("someone-else").is_none());
    assert_eq!(dir.claim("someone-else"), None);

    let resumed = dir.live_session(&chat_id).cloned().unwrap();
    assert_eq!(resumed.messages.len(), 2);
    assert_eq!(dir.claim(&chat_id), Some(session));
    assert_eq!(dir.claim(&chat_id), None, "claimed only once");
}

#[test]
fn sessions_without_an_id_are_not_handed_off() {
    let mut dir = ChatDirectory::default();
    dir.hand_off(ChatSession::new(None));
    assert_eq!(dir, ChatDirectory::default());
}
