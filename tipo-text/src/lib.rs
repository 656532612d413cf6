//! Text preparation for typing practice
//!
//! This crate turns raw article text from upstream search APIs into clean,
//! typeable sentences. It has two stages: [`normalize`] strips HTML markup
//! and editorial noise, and [`segment`] splits the result into an ordered
//! list of sentences, folding fragments that are too short to stand alone
//! into their neighbors.
//!
//! Both stages are pure functions over arbitrary strings. They never fail;
//! malformed input degrades to best-effort cleanup.

#![warn(missing_docs)]

pub mod normalize;
pub mod segment;

pub use normalize::{collapse_whitespace, normalize};
pub use segment::{segment, SHORT_FRAGMENT_CHARS};
