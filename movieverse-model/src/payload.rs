//! Top-level response payloads and batch normalization.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::movie::NormalizedMovie;
use crate::normalize::normalize;
use crate::raw::RawMovieRecord;

/// Message used when the payload is neither a record, a list, nor an error.
pub const UNEXPECTED_PAYLOAD: &str = "unexpected response payload";

/// Shape of a backend response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{"error": "..."}`
    Error(String),
    /// A bare record object.
    Single(RawMovieRecord),
    /// An array of records; non-object entries are already dropped.
    Many(Vec<RawMovieRecord>),
}

impl Payload {
    /// Classify a decoded JSON body.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(message)) = map.get("error") {
                    return Payload::Error(message.clone());
                }
                Payload::from_record(Value::Object(map))
            }
            Value::Array(items) => {
                let total = items.len();
                let records: Vec<_> = items
                    .into_iter()
                    .filter_map(RawMovieRecord::from_value)
                    .collect();
                if records.len() < total {
                    debug!(
                        dropped = total - records.len(),
                        "ignoring non-object entries in response array"
                    );
                }
                Payload::Many(records)
            }
            other => {
                debug!(payload = %other, "response is not a record or list");
                Payload::Error(UNEXPECTED_PAYLOAD.to_owned())
            }
        }
    }

    /// Decode and classify a raw response body.
    ///
    /// Bare `NaN` and `Infinity` tokens are read as `null`, so one missing
    /// float column degrades that field instead of the whole body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = match std::str::from_utf8(body) {
            Ok(text) => serde_json::from_str(&replace_non_finite(text))?,
            Err(_) => serde_json::from_slice(body)?,
        };
        Ok(Payload::from_value(value))
    }

    /// The backend-reported error, if this is an error envelope.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Payload::Error(message) => Some(message),
            Payload::Single(_) | Payload::Many(_) => None,
        }
    }

    fn from_record(value: Value) -> Self {
        match RawMovieRecord::from_value(value) {
            Some(record) => Payload::Single(record),
            None => Payload::Error(UNEXPECTED_PAYLOAD.to_owned()),
        }
    }
}

const NON_FINITE: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Rewrite non-finite number tokens outside string literals to `null`.
fn replace_non_finite(text: &str) -> Cow<'_, str> {
    if !NON_FINITE.iter().any(|token| text.contains(token)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) =
            NON_FINITE.iter().find(|token| rest.starts_with(**token))
        {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    debug!("replaced non-finite number tokens in response body");
    Cow::Owned(out)
}

/// Result of normalizing one payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub movies: Vec<NormalizedMovie>,
    /// Error to surface to the user; set only for error envelopes.
    pub error: Option<String>,
    /// Records dropped for lacking a usable title.
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Normalize every displayable record in a payload, preserving order.
pub fn normalize_payload(payload: Payload) -> BatchOutcome {
    let records = match payload {
        Payload::Error(message) => return BatchOutcome::failed(message),
        Payload::Single(record) => vec![record],
        Payload::Many(records) => records,
    };

    let total = records.len();
    let movies: Vec<_> = records
        .iter()
        .filter(|record| record.has_usable_title())
        .map(normalize)
        .collect();
    let skipped = total - movies.len();
    if skipped > 0 {
        debug!(skipped, "dropped records without a title");
    }

    BatchOutcome {
        movies,
        error: None,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_is_recognized() {
        let payload = Payload::from_value(json!({"error": "not found"}));
        assert_eq!(payload, Payload::Error("not found".into()));
        assert_eq!(payload.error_message(), Some("not found"));
    }

    #[test]
    fn non_string_error_field_is_a_record() {
        let outcome = normalize_payload(Payload::from_value(
            json!({"title": "X", "error": false}),
        ));
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.movies.len(), 1);
        assert_eq!(outcome.movies[0].title, "X");

        let payload = Payload::from_value(json!({"error": {"code": 500}}));
        assert!(matches!(payload, Payload::Single(_)));
        assert_eq!(payload.error_message(), None);
    }

    #[test]
    fn null_error_field_is_a_record() {
        let payload =
            Payload::from_value(json!({"error": null, "title": "Heat"}));
        assert!(matches!(payload, Payload::Single(_)));
    }

    #[test]
    fn bare_object_is_a_single_record() {
        let outcome = normalize_payload(Payload::from_value(json!({
            "title": "Heat", "movie_id": 949
        })));
        assert_eq!(outcome.movies.len(), 1);
        assert_eq!(outcome.movies[0].id.value(), 949);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn arrays_drop_non_objects() {
        let payload = Payload::from_value(json!([{"title": "A"}, 3, "B"]));
        let Payload::Many(records) = payload else {
            panic!("expected a list payload");
        };
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn scalars_are_unexpected() {
        for body in [json!(null), json!(5), json!("hi"), json!(true)] {
            assert_eq!(
                Payload::from_value(body).error_message(),
                Some(UNEXPECTED_PAYLOAD)
            );
        }
    }

    #[test]
    fn untitled_records_are_counted_as_skipped() {
        let outcome = normalize_payload(Payload::from_value(json!([
            {"title": "A"},
            {"overview": "no title"},
            {"title": ""},
            {"title": "B"},
        ])));
        let titles: Vec<_> =
            outcome.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn invalid_json_body_is_an_error() {
        assert!(Payload::from_slice(b"<html>").is_err());
        assert_eq!(
            Payload::from_slice(br#"[{"title": "A"}]"#)
                .map(normalize_payload)
                .unwrap()
                .movies
                .len(),
            1
        );
    }

    #[test]
    fn non_finite_numbers_degrade_to_defaults() {
        let body = br#"{"title":"Avatar","tagline":NaN,"runtime":NaN,
            "vote_average":-Infinity,"overview":"NaN and Infinity"}"#;
        let outcome = normalize_payload(Payload::from_slice(body).unwrap());
        let movie = &outcome.movies[0];
        assert_eq!(movie.title, "Avatar");
        assert_eq!(movie.tagline, crate::defaults::TAGLINE);
        assert_eq!(movie.runtime, 0);
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.overview, "NaN and Infinity");
    }

    #[test]
    fn escaped_quotes_keep_string_state() {
        assert_eq!(
            replace_non_finite(r#"["a \"NaN\" b", NaN, Infinity]"#),
            r#"["a \"NaN\" b", null, null]"#
        );
        assert!(matches!(replace_non_finite("[1, 2]"), Cow::Borrowed(_)));
    }
}
