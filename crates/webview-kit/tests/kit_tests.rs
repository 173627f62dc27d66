use serde_json::json;
use webview_kit::{CancelToken, ContentMessage, ScriptCall, SurfaceEvent, surface_channel};

// ── CancelToken ──────────────────────────────────────────────────────

#[test]
fn cancel_token_starts_uncancelled() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn cancel_token_cancel_is_sticky() {
    let token = CancelToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn cancel_token_clone_shares_state() {
    let t1 = CancelToken::new();
    let t2 = t1.clone();
    assert!(!t2.is_cancelled());
    t1.cancel();
    assert!(t2.is_cancelled());
}

#[tokio::test]
async fn cancel_token_cancelled_returns_immediately_when_already_cancelled() {
    let token = CancelToken::new();
    token.cancel();
    // Must not hang
    token.cancelled().await;
}

#[tokio::test]
async fn cancel_token_cancelled_resolves_on_cancel() {
    let token = CancelToken::new();
    let t2 = token.clone();
    let handle = tokio::spawn(async move {
        t2.cancelled().await;
        true
    });
    // Give the spawned task time to start waiting
    tokio::task::yield_now().await;
    token.cancel();
    assert!(handle.await.unwrap());
}

// ── ScriptCall codec ─────────────────────────────────────────────────

#[test]
fn script_call_round_trips_through_render_and_parse() {
    let call = ScriptCall::new("runHotelSearch").with_argument(json!({
        "location": "Boston",
        "dateStart": "2017-01-01",
    }));
    let script = call.render("window.JSAPI").unwrap();
    assert_eq!(ScriptCall::parse("window.JSAPI", &script), Some(call));
}

#[test]
fn script_call_render_keeps_string_arguments_quoted() {
    let script = ScriptCall::new("setHotelSort")
        .with_argument(json!("priceAscend"))
        .render("window.JSAPI")
        .unwrap();
    assert_eq!(script, r#"window.JSAPI.setHotelSort("priceAscend")"#);
}

#[test]
fn script_call_parse_rejects_trailing_code() {
    assert_eq!(
        ScriptCall::parse("window.JSAPI", "window.JSAPI.run();alert(1)"),
        None
    );
}

// ── ContentMessage envelope ──────────────────────────────────────────

#[test]
fn content_message_bare_has_null_body() {
    let msg = ContentMessage::bare("API_READY");
    assert_eq!(msg.body, serde_json::Value::Null);
}

#[test]
fn content_message_decodes_from_posted_json() {
    let msg: ContentMessage = serde_json::from_value(json!({
        "name": "HOTEL_API_RESULTS_READY",
        "body": { "results": [] },
    }))
    .unwrap();
    assert_eq!(msg.name, "HOTEL_API_RESULTS_READY");
    assert_eq!(msg.body, json!({ "results": [] }));
}

// ── surface_channel ──────────────────────────────────────────────────

#[tokio::test]
async fn surface_channel_delivers_events_in_order() {
    let (tx, mut rx) = surface_channel(4);
    tx.send(SurfaceEvent::Message(ContentMessage::bare("API_READY")))
        .await
        .unwrap();
    tx.send(SurfaceEvent::LoadFailed {
        reason: "connection refused".into(),
    })
    .await
    .unwrap();

    assert_eq!(
        rx.recv().await,
        Some(SurfaceEvent::Message(ContentMessage::bare("API_READY")))
    );
    match rx.recv().await {
        Some(SurfaceEvent::LoadFailed { reason }) => {
            assert_eq!(reason, "connection refused");
        }
        other => panic!("expected LoadFailed, got {other:?}"),
    }
}
