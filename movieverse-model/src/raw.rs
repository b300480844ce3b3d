use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie record exactly as the backend sent it.
///
/// Every field is an untyped [`Value`] so that a wrong type in one field
/// never rejects the whole record. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<Value>,
}

impl RawMovieRecord {
    /// Build a record from a JSON object. Non-objects yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Whether the record carries a title worth showing.
    pub fn has_usable_title(&self) -> bool {
        non_blank_str(self.title.as_ref()).is_some()
    }
}

/// Trimmed string content of a value, if it is a non-blank string.
pub(crate) fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_field_types_do_not_reject_the_record() {
        let raw = RawMovieRecord::from_value(json!({
            "title": "Heat",
            "runtime": {"minutes": 170},
            "genres": 42,
            "unrelated": true,
        }))
        .unwrap();

        assert_eq!(raw.title, Some(json!("Heat")));
        assert_eq!(raw.genres, Some(json!(42)));
        assert_eq!(raw.runtime, Some(json!({"minutes": 170})));
    }

    #[test]
    fn nulls_read_as_missing() {
        let raw =
            RawMovieRecord::from_value(json!({"title": null, "id": null}))
                .unwrap();
        assert_eq!(raw.title, None);
        assert_eq!(raw.id, None);
        assert!(!raw.has_usable_title());
    }

    #[test]
    fn non_objects_are_not_records() {
        assert!(RawMovieRecord::from_value(json!("Heat")).is_none());
        assert!(RawMovieRecord::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn blank_titles_are_not_usable() {
        let raw = RawMovieRecord::from_value(json!({"title": "   "})).unwrap();
        assert!(!raw.has_usable_title());
        let raw = RawMovieRecord::from_value(json!({"title": 7})).unwrap();
        assert!(!raw.has_usable_title());
    }
}
