//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL below the blog's base path
///
/// # Examples
/// ```ignore
/// url_for("/blog", "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(base_path: &str, path: &str) -> String {
    let root = base_path.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Link to a single post
///
/// # Examples
/// ```ignore
/// post_url("/blog", "hello-world") // -> "/blog/hello-world"
/// ```
pub fn post_url(base_path: &str, slug: &str) -> String {
    url_for(base_path, &encode_segment(slug))
}

/// Percent-encode a value for use as one URL path segment or query value
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

pub fn twitter_url(handle: &str) -> String {
    format!("https://twitter.com/{}", encode_segment(strip_at(handle)))
}

pub fn github_url(handle: &str) -> String {
    format!("https://github.com/{}", encode_segment(strip_at(handle)))
}

pub fn linkedin_url(handle: &str) -> String {
    format!(
        "https://www.linkedin.com/in/{}",
        encode_segment(strip_at(handle))
    )
}

fn strip_at(handle: &str) -> &str {
    handle.trim().trim_start_matches('@')
}
