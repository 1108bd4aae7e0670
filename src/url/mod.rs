//! URL handling module for indexscope
//!
//! This module turns raw user input into the ordered list of absolute URLs a
//! batch inspects, and provides the URL validity check shared with the
//! sitemap loader.

mod extract;
mod validate;

pub use extract::extract_urls;
pub use validate::{is_valid_url, parse_absolute_url};
