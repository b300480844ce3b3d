//! Plain-text rendering of the browser state.

use std::fmt::Write as _;

use movieverse_model::NormalizedMovie;

use crate::state::BrowserState;

const WIDTH: usize = 72;
const CARD_OVERVIEW_LINES: usize = 3;

pub fn format_rating(vote_average: f64) -> String {
    format!("{vote_average:.1}")
}

pub fn format_runtime(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, 0) => "n/a".to_string(),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

fn year_label(movie: &NormalizedMovie) -> String {
    movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string())
}

/// One card of the grid. `position` is the 1-based number shown to the user.
pub fn render_card(position: usize, movie: &NormalizedMovie) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{position}] {}  ★ {}  ({})",
        movie.title,
        format_rating(movie.vote_average),
        year_label(movie)
    );
    if !movie.genres.is_empty() {
        let _ = writeln!(out, "    {}", movie.genres.join(" · "));
    }

    let lines = textwrap::wrap(&movie.overview, WIDTH - 4);
    for line in lines.iter().take(CARD_OVERVIEW_LINES) {
        let _ = writeln!(out, "    {line}");
    }
    if lines.len() > CARD_OVERVIEW_LINES {
        let _ = writeln!(out, "    …");
    }
    out
}

/// The detail overlay.
pub fn render_details(movie: &NormalizedMovie) -> String {
    let rule = "═".repeat(WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(out, "“{}”", movie.tagline);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "★ {}   ⏱ {}   📅 {}",
        format_rating(movie.vote_average),
        format_runtime(movie.runtime),
        movie.release_date
    );
    let _ = writeln!(out, "Director: {}", movie.director);
    if !movie.genres.is_empty() {
        let _ = writeln!(out, "Genres:   {}", movie.genres.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", textwrap::fill(&movie.overview, WIDTH));
    if !movie.cast.is_empty() {
        let _ = writeln!(out);
        let cast = format!("Cast: {}", movie.cast.join(", "));
        let _ = writeln!(out, "{}", textwrap::fill(&cast, WIDTH));
    }
    let _ = writeln!(out, "Poster: {}", movie.poster_url);
    let _ = writeln!(out, "{rule}");
    out
}

/// Heading, notice, loading indicator, cards, and the overlay if open.
pub fn render(state: &BrowserState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", state.heading);
    let _ = writeln!(out, "{}", "─".repeat(state.heading.chars().count()));

    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "! {notice}");
    }

    if state.loading {
        let _ = writeln!(out, "Loading…");
    } else if state.movies.is_empty() {
        let _ = writeln!(out, "No movies to show.");
    } else {
        for (index, movie) in state.movies.iter().enumerate() {
            out.push_str(&render_card(index + 1, movie));
        }
    }

    if let Some(selected) = &state.selected {
        let _ = writeln!(out);
        out.push_str(&render_details(selected));
    }
    out
}
