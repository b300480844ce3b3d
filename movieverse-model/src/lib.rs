//! Movie records shared across MovieVerse crates, and the normalization that
//! turns loosely-typed backend responses into them.
#![allow(missing_docs)]

pub mod defaults;
pub mod error;
pub mod list_decode;
pub mod movie;
pub mod normalize;
pub mod payload;
pub mod raw;

pub use error::ListDecodeError;
pub use list_decode::decode_list;
pub use movie::{IdOrigin, MovieId, NormalizedMovie};
pub use normalize::{normalize, synthesize_id};
pub use payload::{BatchOutcome, Payload, normalize_payload};
pub use raw::RawMovieRecord;
