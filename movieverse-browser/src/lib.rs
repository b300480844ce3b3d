//! Terminal front-end for a MovieVerse recommendation backend.
//!
//! [`state`] holds the view state and its pure transitions, [`session`]
//! drives backend calls into it, and [`view`] renders it as text.
#![allow(missing_docs)]

pub mod cli;
pub mod interactive;
pub mod session;
pub mod state;
pub mod view;

pub use session::Browser;
pub use state::{BrowserEvent, BrowserState, RequestKind};
