//! Paths served by the movie backend.

use movieverse_model::MovieId;

pub const POPULAR: &str = "/popular";
pub const MOVIE: &str = "/movie/{id}";
pub const RECOMMEND: &str = "/recommend";
pub const RANDOM: &str = "/random";

pub fn movie(id: MovieId) -> String {
    MOVIE.replace("{id}", &id.to_string())
}
