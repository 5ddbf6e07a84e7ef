//! Row types of the post table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::helpers::{iso_timestamp, slugify};

/// A row of the post table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabasePost {
    /// Text or integer primary key, kept as text
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub draft: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    /// Empty when the column is null; such posts sort as the oldest
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

/// Nullable columns map to the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer id, got {}",
            other
        ))),
    }
}

/// Input for creating a database post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub content: String,
    pub draft: Option<bool>,
    pub date: Option<String>,
    pub slug: Option<String>,
}

/// The row actually sent to the database, with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostInsert {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub author: String,
    pub content: String,
    pub draft: bool,
    pub date: String,
}

impl NewPost {
    /// Apply insert defaults: slug from the title, date from `now`, not a draft
    pub fn into_insert(self, now: DateTime<Utc>) -> PostInsert {
        let slug = self
            .slug
            .filter(|slug| !slug.trim().is_empty())
            .unwrap_or_else(|| slugify(&self.title));
        let date = self
            .date
            .filter(|date| !date.trim().is_empty())
            .unwrap_or_else(|| iso_timestamp(&now));

        PostInsert {
            slug,
            title: self.title,
            description: self.description,
            author: self.author,
            content: self.content,
            draft: self.draft.unwrap_or(false),
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_insert_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let insert = NewPost {
            title: "Hello, World!  2024".to_string(),
            author: "jane".to_string(),
            content: "Body".to_string(),
            ..Default::default()
        }
        .into_insert(now);

        assert_eq!(insert.slug, "hello-world-2024");
        assert_eq!(insert.date, "2024-05-01T12:00:00.000Z");
        assert!(!insert.draft);
        assert_eq!(insert.description, None);
    }

    #[test]
    fn test_insert_keeps_explicit_values() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let insert = NewPost {
            title: "Title".to_string(),
            description: Some("About it".to_string()),
            author: "jane".to_string(),
            content: String::new(),
            draft: Some(true),
            date: Some("2023-01-01".to_string()),
            slug: Some("custom".to_string()),
        }
        .into_insert(now);

        assert_eq!(insert.slug, "custom");
        assert_eq!(insert.date, "2023-01-01");
        assert!(insert.draft);
        assert_eq!(insert.description.as_deref(), Some("About it"));
    }

    #[test]
    fn test_blank_slug_falls_back_to_title() {
        let insert = NewPost {
            title: "Second Post".to_string(),
            slug: Some("  ".to_string()),
            ..Default::default()
        }
        .into_insert(Utc::now());
        assert_eq!(insert.slug, "second-post");
    }

    #[test]
    fn test_row_tolerates_null_description() {
        let json = r#"{
            "id": "1", "slug": "a", "title": "A", "description": null,
            "author": "jane", "content": null, "draft": null,
            "created_at": "2024-01-01T00:00:00+00:00",
            "updated_at": "2024-01-01T00:00:00+00:00",
            "date": "2024-01-01T00:00:00+00:00"
        }"#;
        let row: DatabasePost = serde_json::from_str(json).unwrap();
        assert_eq!(row.description, None);
        assert_eq!(row.slug, "a");
        assert_eq!(row.content, "");
        assert!(!row.draft);
    }

    #[test]
    fn test_row_with_integer_id_and_null_dates() {
        let json = r#"[{
            "id": 1, "slug": "a", "title": "A", "description": null,
            "author": "jane", "content": "Body", "draft": false,
            "created_at": null, "updated_at": null, "date": null
        }]"#;
        let rows: Vec<DatabasePost> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].date, "");
        assert_eq!(rows[0].created_at, "");
    }

    #[test]
    fn test_row_rejects_structured_id() {
        let json = r#"{ "id": {"a": 1}, "slug": "a", "title": "A" }"#;
        assert!(serde_json::from_str::<DatabasePost>(json).is_err());
    }
}
