//! Browser state and its transitions.
//!
//! The state is a plain value owned by whoever drives the UI. Every change
//! goes through [`BrowserState::apply`], which consumes the old state and an
//! event and returns the new state.

use movieverse_model::{BatchOutcome, IdOrigin, MovieId, NormalizedMovie};

pub const POPULAR_HEADING: &str = "Popular Movies";
pub const SURPRISE_HEADING: &str = "Surprise Pick";
pub const DETAILS_UNAVAILABLE: &str = "Movie details are not available";

/// The backend operation an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Popular,
    Search,
    Details,
    Random,
}

impl RequestKind {
    /// Whether completing this request replaces the movie list.
    pub fn replaces_list(&self) -> bool {
        !matches!(self, RequestKind::Details)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    QueryChanged(String),
    /// Sets the loading flag. A second request may start while one is
    /// outstanding; whichever completes last wins.
    RequestStarted(RequestKind),
    ListLoaded {
        kind: RequestKind,
        outcome: BatchOutcome,
    },
    /// Detail response for `requested`. The backend's detail records omit
    /// the id, so the requested one is adopted when none came back.
    DetailsLoaded {
        requested: MovieId,
        outcome: BatchOutcome,
    },
    RequestFailed {
        kind: RequestKind,
        message: String,
    },
    /// Open the overlay for a card already in the list, without a request.
    CardSelected(MovieId),
    DetailsClosed,
    NoticeRaised(String),
    NoticeDismissed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserState {
    pub movies: Vec<NormalizedMovie>,
    /// Movie shown in the detail overlay.
    pub selected: Option<NormalizedMovie>,
    pub loading: bool,
    pub search_query: String,
    pub heading: String,
    /// Last user-visible error or hint.
    pub notice: Option<String>,
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            heading: POPULAR_HEADING.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn apply(mut self, event: BrowserEvent) -> Self {
        match event {
            BrowserEvent::QueryChanged(query) => {
                self.search_query = query;
            }
            BrowserEvent::RequestStarted(_) => {
                self.loading = true;
                self.notice = None;
            }
            BrowserEvent::ListLoaded { kind, outcome } => {
                self.loading = false;
                self.heading = list_heading(kind, &self.search_query);
                self.notice = outcome.error.or_else(|| {
                    (kind == RequestKind::Search && outcome.movies.is_empty())
                        .then(|| {
                            format!(
                                "No recommendations found for \"{}\"",
                                self.search_query
                            )
                        })
                });
                self.movies = outcome.movies;
            }
            BrowserEvent::DetailsLoaded { requested, outcome } => {
                self.loading = false;
                match (outcome.error, outcome.movies.into_iter().next()) {
                    (Some(message), _) => {
                        self.selected = None;
                        self.notice = Some(message);
                    }
                    (None, Some(mut movie)) => {
                        if movie.id_origin == IdOrigin::Synthesized {
                            movie.id = requested;
                            movie.id_origin = IdOrigin::Backend;
                        }
                        self.selected = Some(movie);
                    }
                    (None, None) => {
                        self.selected = None;
                        self.notice = Some(DETAILS_UNAVAILABLE.to_string());
                    }
                }
            }
            BrowserEvent::RequestFailed { kind, message } => {
                self.loading = false;
                if kind.replaces_list() {
                    self.movies.clear();
                }
                self.selected = None;
                self.notice = Some(message);
            }
            BrowserEvent::CardSelected(id) => {
                match self.movies.iter().find(|m| m.id == id) {
                    Some(movie) => self.selected = Some(movie.clone()),
                    None => {
                        self.notice = Some(DETAILS_UNAVAILABLE.to_string());
                    }
                }
            }
            BrowserEvent::DetailsClosed => {
                self.selected = None;
            }
            BrowserEvent::NoticeRaised(message) => {
                self.notice = Some(message);
            }
            BrowserEvent::NoticeDismissed => {
                self.notice = None;
            }
        }
        self
    }

    /// UI gate against re-triggering while a request is outstanding.
    pub fn can_start_request(&self) -> bool {
        !self.loading
    }

    pub fn find(&self, id: MovieId) -> Option<&NormalizedMovie> {
        self.movies.iter().find(|m| m.id == id)
    }
}

fn list_heading(kind: RequestKind, query: &str) -> String {
    match kind {
        RequestKind::Search => format!("Recommended for \"{query}\""),
        RequestKind::Random => SURPRISE_HEADING.to_string(),
        RequestKind::Popular | RequestKind::Details => {
            POPULAR_HEADING.to_string()
        }
    }
}
