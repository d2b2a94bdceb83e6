mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Answer, FakeGateway, FakeProvider, creds, feed, post, session_for};
use pretty_assertions::assert_eq;
use snap_auth::SessionStore;
use snap_client::{
    DeleteOutcome, Graph, NavError, NavState, NavigationGate, Route, sign_out_confirmed,
};
use snap_core::{Identity, PostId};

#[tokio::test]
async fn gate_waits_for_session_initialization() {
    let store = SessionStore::new(Arc::new(FakeProvider::default()));
    let gate = NavigationGate::attach(&store.reader());

    assert_eq!(gate.graph(), Graph::Loading);
    assert_eq!(gate.navigate(Route::SignUp), Err(NavError::NotReady));

    store.initialize(Duration::from_secs(1)).await;
    assert_eq!(gate.state(), NavState::Unauthenticated);
    assert_eq!(gate.stack(), vec![Route::SignIn]);
    gate.navigate(Route::SignUp).unwrap();
}

#[tokio::test]
async fn gate_attached_late_mounts_current_graph() {
    let store = session_for(Some("u1")).await;
    let gate = NavigationGate::attach(&store.reader());

    assert_eq!(gate.graph(), Graph::Content);
    assert_eq!(gate.current(), Some(Route::Feed));
}

#[tokio::test]
async fn rapid_transitions_end_on_latest_identity() {
    let store = session_for(None).await;
    let gate = NavigationGate::attach(&store.reader());
    let mut changes = gate.watch();

    store.sign_in(&creds("u1")).await.unwrap();
    gate.navigate(Route::PostDetail(PostId(1))).unwrap();
    store.sign_out().await.unwrap();
    store.sign_in(&creds("u2")).await.unwrap();

    assert_eq!(
        gate.state(),
        NavState::Authenticated(Identity::new("u2", Some("u2@example.com".into())))
    );
    assert_eq!(gate.stack(), vec![Route::Feed]);
    assert_eq!(
        changes.borrow_and_update().identity().map(|i| i.uid.as_str()),
        Some("u2")
    );
}

#[tokio::test]
async fn signed_out_gate_rejects_content_routes() {
    let store = session_for(Some("u1")).await;
    let gate = NavigationGate::attach(&store.reader());
    gate.navigate(Route::Profile).unwrap();

    store.sign_out().await.unwrap();
    assert_eq!(gate.graph(), Graph::Auth);
    assert_eq!(
        gate.navigate(Route::Compose),
        Err(NavError::NotMounted(Route::Compose))
    );
}

#[tokio::test]
async fn delete_from_detail_leaves_the_detail_view() {
    let gw = FakeGateway::with_posts(vec![post(1, "Beach", "u1")]);
    let store = session_for(Some("u1")).await;
    let gate = NavigationGate::attach(&store.reader());
    let feed = feed(&gw, &store);
    feed.refresh().await.unwrap();

    gate.navigate(Route::PostDetail(PostId(1))).unwrap();
    if let DeleteOutcome::Deleted { leave_detail: true } =
        feed.delete(PostId(1), &Answer::yes()).await.unwrap()
    {
        gate.leave_detail(PostId(1));
    }
    assert_eq!(gate.stack(), vec![Route::Feed]);
}

#[tokio::test]
async fn sign_out_needs_confirmation() {
    let store = session_for(Some("u1")).await;
    let gate = NavigationGate::attach(&store.reader());

    assert!(!sign_out_confirmed(&store, &Answer::no()).await.unwrap());
    assert_eq!(gate.graph(), Graph::Content);

    let confirm = Answer::yes();
    assert!(sign_out_confirmed(&store, &confirm).await.unwrap());
    assert_eq!(confirm.prompts.lock()[0].title, "Logout");
    assert_eq!(gate.graph(), Graph::Auth);
}
