//! Helper functions shared by the content, resolver and page layers
//!
//! Dates, slugs and URLs are handled here so that every layer formats
//! them the same way.

mod date;
mod slugs;
mod url;

pub use date::*;
pub use slugs::*;
pub use url::*;
