//! Browser operations against a scripted backend.

use std::sync::Mutex;

use async_trait::async_trait;
use movieverse_browser::{
    Browser, BrowserEvent, RequestKind, session::EMPTY_QUERY,
};
use movieverse_client::{ApiError, MovieBackend};
use movieverse_model::{IdOrigin, MovieId, Payload};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct ScriptedBackend {
    popular: Option<Value>,
    recommend: Option<Value>,
    details: Option<Value>,
    random: Option<Value>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn respond(
        &self,
        call: String,
        body: &Option<Value>,
    ) -> Result<Payload, ApiError> {
        self.calls.lock().unwrap().push(call);
        match body {
            Some(body) => Ok(Payload::from_value(body.clone())),
            None => Err(ApiError::Decode(
                serde_json::from_str::<Value>("<html>").unwrap_err(),
            )),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieBackend for ScriptedBackend {
    async fn popular(&self) -> Result<Payload, ApiError> {
        self.respond("popular".into(), &self.popular)
    }

    async fn movie(&self, id: MovieId) -> Result<Payload, ApiError> {
        self.respond(format!("movie {id}"), &self.details)
    }

    async fn recommend(&self, title: &str) -> Result<Payload, ApiError> {
        self.respond(format!("recommend {title}"), &self.recommend)
    }

    async fn random(&self) -> Result<Payload, ApiError> {
        self.respond("random".into(), &self.random)
    }
}

#[tokio::test]
async fn popular_fills_the_list() {
    let mut browser = Browser::new(ScriptedBackend {
        popular: Some(json!([
            {"title": "Inception", "movie_id": 27205, "genres": "['Action']"},
            {"movie_id": 3},
            {"title": "Heat"},
        ])),
        ..Default::default()
    });

    browser.load_popular().await;
    let state = browser.state();
    assert!(!state.loading);
    assert_eq!(state.movies.len(), 2);
    assert_eq!(state.movies[0].genres, vec!["Action"]);
    assert_eq!(state.notice, None);
}

#[tokio::test]
async fn blank_search_never_calls_the_backend() {
    let mut browser = Browser::new(ScriptedBackend::default());

    browser.search("   ").await;
    assert_eq!(browser.state().notice.as_deref(), Some(EMPTY_QUERY));
    assert!(browser.backend().calls().is_empty());
}

#[tokio::test]
async fn search_sends_the_trimmed_title() {
    let mut browser = Browser::new(ScriptedBackend {
        recommend: Some(json!([{"title": "Interstellar", "movie_id": 157336}])),
        ..Default::default()
    });

    browser.search("  Inception ").await;
    assert_eq!(browser.backend().calls(), vec!["recommend Inception"]);
    assert_eq!(browser.state().search_query, "Inception");
    assert_eq!(browser.state().heading, "Recommended for \"Inception\"");
    assert_eq!(browser.state().movies[0].id, MovieId(157336));
}

#[tokio::test]
async fn transport_failure_clears_list_and_surfaces_notice() {
    let mut browser = Browser::new(ScriptedBackend {
        popular: Some(json!([{"title": "A", "movie_id": 1}])),
        ..Default::default()
    });
    browser.load_popular().await;
    assert_eq!(browser.state().movies.len(), 1);

    browser.search("A").await;
    let state = browser.state();
    assert!(state.movies.is_empty());
    assert!(!state.loading);
    assert!(
        state
            .notice
            .as_deref()
            .is_some_and(|n| n.contains("malformed JSON"))
    );
}

#[tokio::test]
async fn opening_a_backend_card_fetches_details() {
    let mut browser = Browser::new(ScriptedBackend {
        popular: Some(json!([{"title": "The Dark Knight", "movie_id": 155}])),
        details: Some(json!({
            "title": "The Dark Knight",
            "director": "['Christopher Nolan']",
            "runtime": 152,
        })),
        ..Default::default()
    });
    browser.load_popular().await;

    browser.open_card(1).await;
    let selected = browser.state().selected.clone().expect("overlay");
    assert_eq!(selected.id, MovieId(155));
    assert_eq!(selected.id_origin, IdOrigin::Backend);
    assert_eq!(selected.director, "Christopher Nolan");
    assert_eq!(browser.backend().calls(), vec!["popular", "movie 155"]);

    browser.close_details();
    assert_eq!(browser.state().selected, None);
}

#[tokio::test]
async fn synthesized_cards_open_without_a_request() {
    let mut browser = Browser::new(ScriptedBackend {
        random: Some(json!({"title": "Heat", "overview": "Robbers."})),
        ..Default::default()
    });
    browser.surprise().await;
    assert_eq!(browser.state().heading, "Surprise Pick");

    browser.open_card(1).await;
    assert_eq!(
        browser.state().selected.as_ref().map(|m| m.title.as_str()),
        Some("Heat")
    );
    assert_eq!(browser.backend().calls(), vec!["random"]);
}

#[tokio::test]
async fn details_failure_keeps_the_list() {
    let mut browser = Browser::new(ScriptedBackend {
        popular: Some(json!([{"title": "A", "movie_id": 1}])),
        details: None,
        ..Default::default()
    });
    browser.load_popular().await;

    browser.open_details(MovieId(1)).await;
    let state = browser.state();
    assert_eq!(state.movies.len(), 1);
    assert_eq!(state.selected, None);
    assert!(state.notice.is_some());
}

#[tokio::test]
async fn out_of_range_card_is_a_notice() {
    let mut browser = Browser::new(ScriptedBackend::default());
    browser.open_card(0).await;
    assert_eq!(
        browser.state().notice.as_deref(),
        Some("There is no movie number 0")
    );
    assert!(browser.backend().calls().is_empty());
}

#[tokio::test]
async fn error_envelope_is_shown_like_a_failure() {
    let mut browser = Browser::new(ScriptedBackend {
        recommend: Some(json!({"error": "not found"})),
        ..Default::default()
    });
    browser.search("Nope").await;
    assert!(browser.state().movies.is_empty());
    assert_eq!(browser.state().notice.as_deref(), Some("not found"));
    assert!(RequestKind::Search.replaces_list());
}

#[tokio::test]
async fn triggers_are_ignored_while_a_request_is_outstanding() {
    let mut browser = Browser::new(ScriptedBackend {
        popular: Some(json!([{"title": "A", "movie_id": 1}])),
        ..Default::default()
    });
    browser.dispatch(BrowserEvent::RequestStarted(RequestKind::Random));

    browser.load_popular().await;
    browser.search("Heat").await;
    assert!(browser.backend().calls().is_empty());
    assert!(browser.state().loading);

    browser.dispatch(BrowserEvent::RequestFailed {
        kind: RequestKind::Random,
        message: "gave up".into(),
    });
    browser.load_popular().await;
    assert_eq!(browser.backend().calls(), vec!["popular"]);
    assert_eq!(browser.state().movies.len(), 1);
}
