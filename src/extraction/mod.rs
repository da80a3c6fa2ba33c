//! Content processing module
//!
//! Sanitization and size bounding of captured document markup.

pub mod content;

pub use content::{remove_data_uris, sanitize_markup, truncate_body};
