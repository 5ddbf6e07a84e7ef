//! Slug helpers

/// Turn a title into a URL-safe identifier
///
/// Lower-cases the input, replaces every run of non-alphanumeric characters
/// with a single hyphen and trims hyphens from both ends. Non-ASCII letters
/// are transliterated first, so `"Café"` becomes `"cafe"`.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!  2024") // -> "hello-world-2024"
/// ```
pub fn slugify(input: &str) -> String {
    ::slug::slugify(input)
}

/// Whether a slug can safely be joined onto the content directory
///
/// Slugs that would escape the directory or address a hidden file never
/// resolve to a file post.
pub fn is_file_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
        && !slug.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify("Hello, World!  2024"), "hello-world-2024");
        assert_eq!(slugify("  --Rust & Async--  "), "rust-async");
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        let inputs = [
            "Hello, World!  2024",
            "already-a-slug",
            "--trailing--",
            "MiXeD   Case___Words",
            "über straße",
            "",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_file_safe_slug() {
        assert!(is_file_safe_slug("hello-world"));
        assert!(is_file_safe_slug("2024 notes"));
        assert!(!is_file_safe_slug(""));
        assert!(!is_file_safe_slug("../secret"));
        assert!(!is_file_safe_slug("nested/post"));
        assert!(!is_file_safe_slug(".hidden"));
    }
}
