//! Values substituted for missing or malformed raw fields.

pub const TITLE: &str = "Unknown Movie";
pub const OVERVIEW: &str = "No overview available";
pub const POSTER_URL: &str =
    "https://placehold.co/500x750/1F2937/FFFFFF?text=No+Poster";
pub const RELEASE_DATE: &str = "2000-01-01";
pub const DIRECTOR: &str = "Unknown Director";
pub const TAGLINE: &str = "No tagline available";

/// Prefix for relative TMDB poster paths such as `/abc123.jpg`.
pub const TMDB_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
