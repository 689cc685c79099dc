//! Shared utility functions.
//!
//! This module contains reusable text utilities used across the codebase:
//! - `html`: tag stripping and entity decoding for feed snippets
//! - `slug`: URL-safe slug derivation

mod html;
mod slug;

pub use html::{clean_description, decode_entities, strip_tags};
pub use slug::slugify;
