//! Runs browser operations end to end against a [`MovieBackend`].

use movieverse_client::{ApiError, MovieBackend};
use movieverse_model::{MovieId, Payload, normalize_payload};
use tracing::{debug, info, warn};

use crate::state::{BrowserEvent, BrowserState, RequestKind};

pub const EMPTY_QUERY: &str = "Type a movie title to get recommendations";

/// Owns the browser state and the backend it talks to.
#[derive(Debug)]
pub struct Browser<B> {
    backend: B,
    state: BrowserState,
}

impl<B: MovieBackend> Browser<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: BrowserState::new(),
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn dispatch(&mut self, event: BrowserEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }

    pub async fn load_popular(&mut self) {
        if !self.begin(RequestKind::Popular) {
            return;
        }
        let result = self.backend.popular().await;
        self.finish_list(RequestKind::Popular, result);
    }

    /// Recommendations for a title. Blank queries never reach the backend.
    pub async fn search(&mut self, query: &str) {
        let query = query.trim();
        self.dispatch(BrowserEvent::QueryChanged(query.to_string()));
        if query.is_empty() {
            self.dispatch(BrowserEvent::NoticeRaised(EMPTY_QUERY.to_string()));
            return;
        }

        if !self.begin(RequestKind::Search) {
            return;
        }
        let result = self.backend.recommend(query).await;
        self.finish_list(RequestKind::Search, result);
    }

    pub async fn surprise(&mut self) {
        if !self.begin(RequestKind::Random) {
            return;
        }
        let result = self.backend.random().await;
        self.finish_list(RequestKind::Random, result);
    }

    /// Open the overlay for `id`.
    ///
    /// Cards whose id was synthesized are shown from the list, since the
    /// backend cannot resolve those ids.
    pub async fn open_details(&mut self, id: MovieId) {
        if self.state.find(id).is_some_and(|m| !m.has_backend_id()) {
            self.dispatch(BrowserEvent::CardSelected(id));
            return;
        }

        if !self.begin(RequestKind::Details) {
            return;
        }
        let event = match self.backend.movie(id).await {
            Ok(payload) => BrowserEvent::DetailsLoaded {
                requested: id,
                outcome: normalize(RequestKind::Details, payload),
            },
            Err(err) => failed(RequestKind::Details, err),
        };
        self.dispatch(event);
    }

    /// Open the overlay for the card at a 1-based position.
    pub async fn open_card(&mut self, position: usize) {
        let id = position
            .checked_sub(1)
            .and_then(|index| self.state.movies.get(index))
            .map(|movie| movie.id);
        match id {
            Some(id) => self.open_details(id).await,
            None => self.dispatch(BrowserEvent::NoticeRaised(format!(
                "There is no movie number {position}"
            ))),
        }
    }

    pub fn close_details(&mut self) {
        self.dispatch(BrowserEvent::DetailsClosed);
    }

    /// Apply `RequestStarted` unless a request is still outstanding.
    fn begin(&mut self, kind: RequestKind) -> bool {
        if !self.state.can_start_request() {
            debug!(?kind, "request already in flight, ignoring trigger");
            return false;
        }
        self.dispatch(BrowserEvent::RequestStarted(kind));
        true
    }

    fn finish_list(
        &mut self,
        kind: RequestKind,
        result: Result<Payload, ApiError>,
    ) {
        let event = match result {
            Ok(payload) => BrowserEvent::ListLoaded {
                kind,
                outcome: normalize(kind, payload),
            },
            Err(err) => failed(kind, err),
        };
        self.dispatch(event);
    }
}

fn normalize(
    kind: RequestKind,
    payload: Payload,
) -> movieverse_model::BatchOutcome {
    let outcome = normalize_payload(payload);
    match &outcome.error {
        Some(error) => warn!(?kind, %error, "backend reported an error"),
        None => info!(
            ?kind,
            movies = outcome.movies.len(),
            skipped = outcome.skipped,
            "response normalized"
        ),
    }
    outcome
}

fn failed(kind: RequestKind, err: ApiError) -> BrowserEvent {
    warn!(?kind, error = %err, "backend request failed");
    BrowserEvent::RequestFailed {
        kind,
        message: err.to_string(),
    }
}
