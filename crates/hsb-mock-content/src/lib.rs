//! Scriptable mock of the embedded hotel search content.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::mpsc;

use hsb_core::{CALL_RUN_SEARCH, JSAPI_NAMESPACE, MSG_API_READY, MSG_HOTEL_SELECTED, MSG_RESULTS_READY};
use webview_kit::{ContentMessage, ScriptCall, SurfaceError, SurfaceEvent, WebSurface, surface_channel};

/// How the mock reacts to a `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadBehavior {
    /// Post `API_READY` once the load is recorded, like a healthy page.
    #[default]
    AnnounceReady,

    /// Report a load failure, like an unreachable server.
    Fail,

    /// Record the load and do nothing, for tests that drive readiness
    /// by hand.
    Silent,
}

/// In-process stand-in for the embedded search page.
///
/// Records all host traffic and plays the content's half of the
/// protocol. Everything observable is snapshot-based so tests can make
/// assertions without racing the session task.
pub struct MockContent {
    events: mpsc::Sender<SurfaceEvent>,
    behavior: LoadBehavior,
    loads: Mutex<Vec<String>>,
    scripts: Mutex<Vec<String>>,
    results: Mutex<Option<Vec<Value>>>,
}

impl MockContent {
    /// Create a mock and the surface-event receiver its host loop consumes.
    pub fn connect(behavior: LoadBehavior) -> (Arc<Self>, mpsc::Receiver<SurfaceEvent>) {
        let (events, receiver) = surface_channel(64);
        let mock = Arc::new(Self {
            events,
            behavior,
            loads: Mutex::new(Vec::new()),
            scripts: Mutex::new(Vec::new()),
            results: Mutex::new(None),
        });
        (mock, receiver)
    }

    /// Answer every future `runHotelSearch` call with these results.
    pub fn respond_with_results(&self, results: Vec<Value>) {
        *self.results.lock().expect("mock lock poisoned") = Some(results);
    }

    /// URLs the host asked to load, in order.
    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().expect("mock lock poisoned").clone()
    }

    /// Raw scripts the host evaluated, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().expect("mock lock poisoned").clone()
    }

    /// The host's `JSAPI` calls, decoded back out of the scripts.
    pub fn calls(&self) -> Vec<ScriptCall> {
        self.scripts()
            .iter()
            .filter_map(|script| ScriptCall::parse(JSAPI_NAMESPACE, script))
            .collect()
    }

    /// Post an arbitrary inbound message, well-formed or not.
    pub async fn emit(&self, message: ContentMessage) {
        let _ = self.events.send(SurfaceEvent::Message(message)).await;
    }

    /// Post the ready signal.
    pub async fn announce_ready(&self) {
        self.emit(ContentMessage::bare(MSG_API_READY)).await;
    }

    /// Post a hotel-selected message with this payload.
    pub async fn select_hotel(&self, selection: Value) {
        self.emit(ContentMessage::new(MSG_HOTEL_SELECTED, selection))
            .await;
    }

    /// Post a results-ready message wrapping these results.
    pub async fn post_results(&self, results: Vec<Value>) {
        self.emit(ContentMessage::new(
            MSG_RESULTS_READY,
            json!({ "results": results }),
        ))
        .await;
    }

    /// Report an asynchronous load failure.
    pub async fn fail_load(&self, reason: impl Into<String>) {
        let _ = self
            .events
            .send(SurfaceEvent::LoadFailed {
                reason: reason.into(),
            })
            .await;
    }
}

#[async_trait]
impl WebSurface for MockContent {
    async fn load(&self, url: &str) -> Result<(), SurfaceError> {
        self.loads
            .lock()
            .expect("mock lock poisoned")
            .push(url.to_owned());
        match self.behavior {
            LoadBehavior::AnnounceReady => self.announce_ready().await,
            LoadBehavior::Fail => self.fail_load("connection refused").await,
            LoadBehavior::Silent => {}
        }
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<(), SurfaceError> {
        self.scripts
            .lock()
            .expect("mock lock poisoned")
            .push(script.to_owned());
        let call = ScriptCall::parse(JSAPI_NAMESPACE, script);
        if let Some(call) = call
            && call.function == CALL_RUN_SEARCH
        {
            let fixture = self.results.lock().expect("mock lock poisoned").clone();
            if let Some(results) = fixture {
                self.post_results(results).await;
            }
        }
        Ok(())
    }
}

/// Three fixture results in the shape the search page renders.
pub fn sample_results() -> Vec<Value> {
    vec![
        json!({
            "price": 140,
            "hotel": {
                "id": 1,
                "name": "Parker House",
                "address": "60 School St",
                "imageURL": "http://media.example.com/parker-house.jpg",
            },
        }),
        json!({
            "price": 95,
            "hotel": {
                "id": 2,
                "name": "The Verb",
                "address": "1271 Boylston St",
                "imageURL": "http://media.example.com/the-verb.jpg",
            },
        }),
        json!({
            "price": 210,
            "hotel": {
                "id": 3,
                "name": "The Lenox",
                "address": "61 Exeter St",
            },
        }),
    ]
}

/// A hotel-selected payload wrapping the first fixture result.
pub fn sample_selection() -> Value {
    json!({ "result": sample_results()[0] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_announces_ready_by_default() {
        let (mock, mut events) = MockContent::connect(LoadBehavior::default());
        mock.load("http://example.com/search").await.unwrap();

        assert_eq!(mock.loads(), vec!["http://example.com/search"]);
        match events.recv().await {
            Some(SurfaceEvent::Message(message)) => assert_eq!(message.name, MSG_API_READY),
            other => panic!("expected ready message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failing_load_reports_a_reason() {
        let (mock, mut events) = MockContent::connect(LoadBehavior::Fail);
        mock.load("http://example.com/search").await.unwrap();

        assert!(matches!(
            events.recv().await,
            Some(SurfaceEvent::LoadFailed { .. })
        ));
    }

    #[tokio::test]
    async fn run_search_is_answered_with_fixture_results() {
        let (mock, mut events) = MockContent::connect(LoadBehavior::Silent);
        mock.respond_with_results(sample_results());
        mock.eval(r#"window.JSAPI.runHotelSearch({"location":"Boston","dateStart":"2024-06-01","dateEnd":"2024-06-05"})"#)
            .await
            .unwrap();

        match events.recv().await {
            Some(SurfaceEvent::Message(message)) => {
                assert_eq!(message.name, MSG_RESULTS_READY);
                assert_eq!(message.body["results"].as_array().map(Vec::len), Some(3));
            }
            other => panic!("expected results message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sort_and_filter_calls_are_recorded_not_answered() {
        let (mock, mut events) = MockContent::connect(LoadBehavior::Silent);
        mock.eval(r#"window.JSAPI.setHotelSort("name")"#).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function, "setHotelSort");
        assert!(events.try_recv().is_err());
    }
}
