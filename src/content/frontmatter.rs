//! Front-matter parsing

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Front-matter of a file post
///
/// Every field is validated once here. Missing or unusable values become
/// empty strings, and `draft` stays unset unless the header holds a boolean.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub description: String,
    pub author: String,
    pub draft: Option<bool>,
}

impl FrontMatter {
    /// Split a post file into front-matter and body
    ///
    /// Never fails: a malformed header yields empty fields and the body is
    /// whatever follows the header. Text without a header is all body.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();

        match trimmed.strip_prefix("---") {
            Some(rest) => Self::parse_yaml(trimmed, rest),
            None => (FrontMatter::default(), content),
        }
    }

    fn parse_yaml<'a>(content: &'a str, rest: &'a str) -> (Self, &'a str) {
        // The opening delimiter must be alone on its line
        if !rest.is_empty() && !rest.starts_with(['\n', '\r']) {
            return (FrontMatter::default(), content);
        }
        let rest = rest.trim_start_matches(['\n', '\r']);

        let (yaml_content, remaining) = if let Some(body) = rest.strip_prefix("---") {
            ("", body)
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A leading thematic break followed by prose is not a header
        if !looks_like_yaml(yaml_content) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<Value>(yaml_content) {
            Ok(Value::Mapping(map)) => (Self::from_mapping(&map), remaining),
            Ok(_) => {
                tracing::warn!("Front-matter is not a key/value mapping, ignoring it");
                (FrontMatter::default(), remaining)
            }
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, using defaults: {}", e);
                (FrontMatter::default(), remaining)
            }
        }
    }

    fn from_mapping(map: &Mapping) -> Self {
        Self {
            title: string_field(map, "title"),
            date: string_field(map, "date"),
            description: string_field(map, "description"),
            author: string_field(map, "author"),
            draft: bool_field(map, "draft"),
        }
    }
}

/// Valid YAML front-matter has at least one `key: value` line, or is a
/// YAML sequence throughout
fn looks_like_yaml(yaml_content: &str) -> bool {
    has_key_line(yaml_content) || is_sequence(yaml_content)
}

fn is_sequence(yaml_content: &str) -> bool {
    let mut lines = yaml_content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .peekable();

    lines.peek().is_some()
        && lines.all(|line| line == "-" || line.starts_with("- ") || line.starts_with(' '))
}

fn has_key_line(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let before_colon = &trimmed[..colon_pos];
        let is_valid_key = !before_colon.is_empty()
            && before_colon
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(before_colon, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

fn string_field(map: &Mapping, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Tagged(tagged)) => match &tagged.value {
            Value::String(s) => s.clone(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

fn bool_field(map: &Mapping, key: &str) -> Option<bool> {
    match map.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
