use super::*;
use crate::test_support::{CountingForm, RecordingOpener, ScriptedPrompt};

fn user_session() -> Session {
    let mut session = Session::new();
    session.login("user", "password").expect("user login");
    session
}

fn seeded_store() -> RecordStore {
    let mut store = RecordStore::new();
    store.add("http://a.com", "A");
    store.add("http://b.com", "B");
    store
}

#[test]
fn requires_user_session() {
    let store = RecordStore::new();
    let mut session = Session::new();
    assert!(matches!(
        UserController::new(&session, &store),
        Err(RegistryError::AccessDenied {
            required: Role::User
        })
    ));
    session.login("admin", "password").expect("admin login");
    assert!(UserController::new(&session, &store).is_err());
}

#[test]
fn browse_on_empty_store_signals_no_data() {
    let session = user_session();
    let store = RecordStore::new();
    let user = UserController::new(&session, &store).expect("user");
    assert_eq!(user.browse().expect_err("empty"), RegistryError::NoData);
}

#[test]
fn browse_returns_full_snapshot() {
    let session = user_session();
    let store = seeded_store();
    let user = UserController::new(&session, &store).expect("user");
    let snapshot = user.browse().expect("records");
    assert_eq!(snapshot.len(), 2);
    assert!(store.is_current(&snapshot));
}

#[test]
fn keyword_search_on_empty_store_does_not_prompt() {
    let session = user_session();
    let store = RecordStore::new();
    let user = UserController::new(&session, &store).expect("user");
    let mut prompt = ScriptedPrompt::answering([Some("a")]);
    assert_eq!(
        user.browse_by_keyword(&mut prompt).expect_err("empty"),
        RegistryError::NoData
    );
    assert!(prompt.asked.is_empty());
}

#[test]
fn cancelled_keyword_prompt_yields_nothing() {
    let session = user_session();
    let store = seeded_store();
    let user = UserController::new(&session, &store).expect("user");
    let mut prompt = ScriptedPrompt::answering([None::<&str>]);
    assert_eq!(user.browse_by_keyword(&mut prompt).map(|s| s.is_some()), Ok(false));
    assert_eq!(prompt.asked[0].0, KEYWORD_PROMPT);
}

#[test]
fn keyword_search_matches_names_only() {
    let session = user_session();
    let store = seeded_store();
    let user = UserController::new(&session, &store).expect("user");

    let mut prompt = ScriptedPrompt::answering([Some("a")]);
    let hits = user
        .browse_by_keyword(&mut prompt)
        .expect("search")
        .expect("not cancelled");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.get(0).expect("hit").url, "http://a.com");

    let mut prompt = ScriptedPrompt::answering([Some("http")]);
    assert_eq!(
        user.browse_by_keyword(&mut prompt).expect_err("no matches"),
        RegistryError::NoMatches {
            keyword: "http".into()
        }
    );
}

#[test]
fn empty_keyword_lists_everything() {
    let session = user_session();
    let store = seeded_store();
    let user = UserController::new(&session, &store).expect("user");
    assert_eq!(user.search("").expect("all").len(), 2);
}

#[test]
fn open_uses_the_snapshot_position() {
    let session = user_session();
    let store = seeded_store();
    let user = UserController::new(&session, &store).expect("user");
    let hits = user.search("b").expect("hits");
    let opener = RecordingOpener::default();

    // Position 0 of the filtered view is B, not A.
    user.open_selected(0, &hits, &opener).expect("open");
    assert_eq!(opener.opened.borrow().as_slice(), ["http://b.com"]);
}

#[test]
fn open_failure_carries_the_url() {
    let session = user_session();
    let mut store = RecordStore::new();
    store.add("not a uri", "broken");
    let user = UserController::new(&session, &store).expect("user");
    let snapshot = user.browse().expect("records");
    let opener = RecordingOpener::default();

    let err = user
        .open_selected(0, &snapshot, &opener)
        .expect_err("malformed");
    assert!(matches!(err, RegistryError::OpenFailed { ref url, .. } if url == "not a uri"));
    assert!(opener.opened.borrow().is_empty());
}

#[test]
fn open_past_the_end_is_not_a_selection() {
    let session = user_session();
    let store = seeded_store();
    let user = UserController::new(&session, &store).expect("user");
    let snapshot = user.browse().expect("records");
    assert_eq!(
        user.open_selected(2, &snapshot, &RecordingOpener::default()),
        Err(RegistryError::SelectionRequired)
    );
}

#[test]
fn footprint_form_is_rendered_once() {
    let session = user_session();
    let store = RecordStore::new();
    let user = UserController::new(&session, &store).expect("user");
    let mut form = CountingForm::default();
    user.open_footprint_form(&mut form);
    assert_eq!(form.rendered, 1);
}
