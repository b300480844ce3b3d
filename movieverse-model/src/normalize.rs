//! Raw backend record to [`NormalizedMovie`].
//!
//! Every field is resolved on its own. A malformed field falls back to its
//! default from [`crate::defaults`] and is logged at debug level; it never
//! affects the other fields of the same record.

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;
use url::Url;

use crate::defaults;
use crate::list_decode::decode_list;
use crate::movie::{IdOrigin, MovieId, NormalizedMovie};
use crate::raw::{RawMovieRecord, non_blank_str};

/// Largest integer that survives a round trip through an `f64`.
const MAX_EXACT_INTEGER: u64 = (1 << 53) - 1;

/// Normalize one raw record. Never fails.
pub fn normalize(raw: &RawMovieRecord) -> NormalizedMovie {
    let title = text_or(raw.title.as_ref(), defaults::TITLE);
    let release_date = release_date(raw);

    let (id, id_origin) = match backend_id(raw) {
        Some(id) => (id, IdOrigin::Backend),
        None => (synthesize_id(&title, &release_date), IdOrigin::Synthesized),
    };

    NormalizedMovie {
        id,
        id_origin,
        overview: text_or(raw.overview.as_ref(), defaults::OVERVIEW),
        poster_url: poster_url(raw),
        vote_average: vote_average(raw.vote_average.as_ref()),
        genres: string_list("genres", raw.genres.as_ref()),
        cast: string_list("cast", raw.cast.as_ref()),
        director: director(raw.director.as_ref()),
        runtime: runtime(raw.runtime.as_ref()),
        tagline: text_or(raw.tagline.as_ref(), defaults::TAGLINE),
        title,
        release_date,
    }
}

/// Stable id for a record the backend did not identify.
///
/// The same title and release date always produce the same id, so cards keep
/// their identity across re-renders. The result is a positive integer below
/// 2^53.
pub fn synthesize_id(title: &str, release_date: &str) -> MovieId {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update([0x1f]);
    hasher.update(release_date.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    MovieId((u64::from_be_bytes(prefix) >> 11).max(1))
}

fn backend_id(raw: &RawMovieRecord) -> Option<MovieId> {
    [("movie_id", raw.movie_id.as_ref()), ("id", raw.id.as_ref())]
        .into_iter()
        .filter_map(|(field, value)| Some((field, value?)))
        .find_map(|(field, value)| {
            let parsed = positive_integer(value);
            if parsed.is_none() {
                debug!(field, %value, "ignoring unusable movie id");
            }
            parsed
        })
        .map(MovieId)
}

fn positive_integer(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| {
                    f.fract() == 0.0
                        && (0.0..=MAX_EXACT_INTEGER as f64).contains(f)
                })
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.filter(|id| *id > 0)
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    non_blank_str(value).unwrap_or(fallback).to_owned()
}

fn poster_url(raw: &RawMovieRecord) -> String {
    [raw.poster.as_ref(), raw.poster_path.as_ref()]
        .into_iter()
        .filter_map(non_blank_str)
        .find_map(resolve_poster)
        .unwrap_or_else(|| defaults::POSTER_URL.to_owned())
}

fn resolve_poster(candidate: &str) -> Option<String> {
    if candidate.starts_with('/') && !candidate.starts_with("//") {
        return Some(format!("{}{candidate}", defaults::TMDB_POSTER_BASE));
    }

    match Url::parse(candidate) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https") && url.has_host() =>
        {
            Some(candidate.to_owned())
        }
        _ => {
            debug!(poster = candidate, "ignoring poster that is not a URL");
            None
        }
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

fn vote_average(value: Option<&Value>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    match finite_number(value) {
        Some(score) if score >= 0.0 => score,
        _ => {
            debug!(%value, "vote_average unusable, defaulting to 0");
            0.0
        }
    }
}

fn runtime(value: Option<&Value>) -> u32 {
    let Some(value) = value else {
        return 0;
    };
    match finite_number(value) {
        Some(minutes) if minutes >= 0.0 => minutes.min(u32::MAX as f64) as u32,
        _ => {
            debug!(%value, "runtime unusable, defaulting to 0");
            0
        }
    }
}

fn release_date(raw: &RawMovieRecord) -> String {
    if let Some(date) = non_blank_str(raw.release_date.as_ref()) {
        return date.to_owned();
    }

    let year = raw.year.as_ref().and_then(|value| match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    });

    match year {
        Some(year) if (1..=9999).contains(&year) => format!("{year:04}-01-01"),
        Some(_) | None => {
            if let Some(value) = raw.year.as_ref() {
                debug!(%value, "year unusable, using default release date");
            }
            defaults::RELEASE_DATE.to_owned()
        }
    }
}

fn string_list(field: &'static str, value: Option<&Value>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        Some(Value::String(encoded)) if encoded.trim().is_empty() => Vec::new(),
        Some(Value::String(encoded)) => {
            decode_list(encoded).unwrap_or_else(|err| {
                debug!(field, error = %err, "could not decode list field");
                Vec::new()
            })
        }
        Some(other) => {
            debug!(field, value = %other, "list field has unexpected type");
            Vec::new()
        }
    }
}

fn director(value: Option<&Value>) -> String {
    let name = match value {
        Some(Value::String(encoded)) => match decode_list(encoded) {
            Ok(names) => names.into_iter().next(),
            Err(_) => Some(encoded.clone()),
        },
        Some(Value::Array(items)) => {
            items.iter().find_map(Value::as_str).map(str::to_owned)
        }
        _ => None,
    };

    name.map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| defaults::DIRECTOR.to_owned())
}
