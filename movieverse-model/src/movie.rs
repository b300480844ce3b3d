use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a normalized movie.
///
/// Either the backend's own id or one synthesized from the record's content;
/// see [`IdOrigin`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl MovieId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a [`MovieId`] came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IdOrigin {
    /// Taken from `movie_id` or `id`; the backend can resolve it.
    #[default]
    Backend,
    /// Derived from title and release date; unknown to the backend.
    Synthesized,
}

/// A movie record with every field present and type-correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMovie {
    pub id: MovieId,
    pub id_origin: IdOrigin,
    pub title: String,
    pub overview: String,
    pub poster_url: String,
    pub vote_average: f64,
    pub release_date: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub director: String,
    pub runtime: u32,
    pub tagline: String,
}

impl NormalizedMovie {
    /// Whether `GET /movie/{id}` can be expected to know this movie.
    pub fn has_backend_id(&self) -> bool {
        self.id_origin == IdOrigin::Backend
    }

    /// Leading year of the release date, if it has one.
    pub fn release_year(&self) -> Option<i32> {
        let year = self.release_date.get(..4)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        year.parse().ok()
    }
}
