//! Post resolver - merges file posts and database posts
//!
//! The database wins every slug collision: when listing, its record
//! replaces the file record; when looking up a single post, the file source
//! is only consulted if the database has nothing for the slug. Database
//! failures degrade to "no database posts" and are logged; an unreadable
//! content directory is returned as an error.

mod index;

pub use index::PostIndex;

use crate::content::{FilePostSource, PostRecord};
use crate::error::Result;
use crate::store::PostStore;

/// Every post from both sources, newest first, one record per slug
pub async fn resolve_all_posts(
    files: &FilePostSource,
    store: &dyn PostStore,
) -> Result<Vec<PostRecord>> {
    let (file_posts, database_posts) =
        tokio::join!(async { files.load_posts() }, database_posts(store));
    let file_posts = file_posts?;

    tracing::debug!(
        "Merging {} file posts with {} database posts",
        file_posts.len(),
        database_posts.len()
    );

    Ok(merge_posts(file_posts, database_posts))
}

/// Merge already-loaded posts; database records replace file records
pub fn merge_posts(file_posts: Vec<PostRecord>, database_posts: Vec<PostRecord>) -> Vec<PostRecord> {
    let mut index = PostIndex::new();
    index.extend(file_posts);
    index.extend(database_posts);
    index.into_sorted()
}

/// All database posts in listing form, or none if the database fails
pub async fn database_posts(store: &dyn PostStore) -> Vec<PostRecord> {
    match store.list_posts().await {
        Ok(rows) => rows.into_iter().map(PostRecord::from).collect(),
        Err(e) => {
            tracing::error!("Error fetching database posts: {}", e);
            Vec::new()
        }
    }
}

/// One post with its body, or `None` if neither source has the slug
///
/// The database is asked first and its answer is final. A database error
/// counts as a miss, so the file source is tried next.
pub async fn resolve_one_by_slug(
    slug: &str,
    files: &FilePostSource,
    store: &dyn PostStore,
) -> Result<Option<PostRecord>> {
    match store.find_by_slug(slug).await {
        Ok(Some(row)) => return Ok(Some(PostRecord::from_database_with_content(row))),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Error fetching database post {:?}: {}", slug, e);
        }
    }

    let post = files.load_post(slug)?;
    if post.is_none() {
        tracing::debug!("Post not found: {}", slug);
    }

    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostOrigin;
    use crate::error::BlogError;
    use crate::store::{DatabasePost, MemoryPostStore, NewPost, StoreError};
    use async_trait::async_trait;
    use std::fs;
    use std::path::Path;

    /// A database that is always down
    struct UnavailableStore;

    #[async_trait]
    impl PostStore for UnavailableStore {
        async fn list_posts(&self) -> std::result::Result<Vec<DatabasePost>, StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn find_by_slug(
            &self,
            _slug: &str,
        ) -> std::result::Result<Option<DatabasePost>, StoreError> {
            Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        async fn insert_post(&self, _post: NewPost) -> std::result::Result<DatabasePost, StoreError> {
            unreachable!("not used in these tests")
        }
    }

    fn row(slug: &str, title: &str, date: &str) -> DatabasePost {
        DatabasePost {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            description: None,
            author: "db-author".to_string(),
            content: format!("Database body of {}", slug),
            draft: false,
            created_at: date.to_string(),
            updated_at: date.to_string(),
            date: date.to_string(),
        }
    }

    fn write_post(dir: &Path, slug: &str, title: &str, date: &str) {
        fs::write(
            dir.join(format!("{}.mdx", slug)),
            format!(
                "---\ntitle: {}\ndate: {}\ndescription: From a file\nauthor: file-author\n---\nFile body of {}\n",
                title, date, slug
            ),
        )
        .unwrap();
    }

    fn files(dir: &Path) -> FilePostSource {
        FilePostSource::new(dir, vec!["mdx".to_string()])
    }

    fn assert_newest_first(posts: &[PostRecord]) {
        for pair in posts.windows(2) {
            assert!(
                pair[0].timestamp() >= pair[1].timestamp(),
                "{} ({}) sorted before {} ({})",
                pair[0].slug,
                pair[0].date,
                pair[1].slug,
                pair[1].date
            );
        }
    }

    #[tokio::test]
    async fn test_merge_scenario() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "a", "A from file", "2024-01-01");
        write_post(dir.path(), "b", "B from file", "2024-03-01");
        let store = MemoryPostStore::with_posts(vec![
            row("b", "B from database", "2024-03-05"),
            row("c", "C from database", "2024-02-01"),
        ]);

        let posts = resolve_all_posts(&files(dir.path()), &store).await.unwrap();

        let summary: Vec<_> = posts
            .iter()
            .map(|p| (p.slug.as_str(), p.origin, p.date.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("b", PostOrigin::Database, "2024-03-05"),
                ("c", PostOrigin::Database, "2024-02-01"),
                ("a", PostOrigin::File, "2024-01-01"),
            ]
        );

        let b = &posts[0];
        assert_eq!(b.title, "B from database");
        assert_eq!(b.description, "");
        assert_eq!(b.author, "db-author");
        assert!(posts.iter().all(|p| p.content.is_none()));
    }

    #[tokio::test]
    async fn test_database_failure_returns_file_posts() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "x", "X", "2024-01-01");

        let posts = resolve_all_posts(&files(dir.path()), &UnavailableStore)
            .await
            .unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "x");
        assert_eq!(posts[0].origin, PostOrigin::File);
    }

    #[tokio::test]
    async fn test_missing_content_directory_is_not_masked() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryPostStore::with_posts(vec![row("c", "C", "2024-02-01")]);

        let err = resolve_all_posts(&files(&dir.path().join("missing")), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::ContentUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_drafts_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("wip.mdx"),
            "---\ntitle: WIP\ndate: 2024-01-01\ndraft: true\n---\n",
        )
        .unwrap();
        let mut draft_row = row("db-wip", "DB WIP", "2024-01-02");
        draft_row.draft = true;
        let store = MemoryPostStore::with_posts(vec![draft_row]);

        let posts = resolve_all_posts(&files(dir.path()), &store).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(PostRecord::is_draft));
    }

    #[tokio::test]
    async fn test_merged_output_is_sorted_for_mixed_inputs() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "f1", "F1", "2023-12-31");
        write_post(dir.path(), "f2", "F2", "someday");
        write_post(dir.path(), "f3", "F3", "2024-06-01 08:00:00");
        write_post(dir.path(), "shared", "Shared", "2020-01-01");
        let store = MemoryPostStore::with_posts(vec![
            row("d1", "D1", "2024-06-01T09:00:00+00:00"),
            row("shared", "Shared", "2025-01-01T00:00:00Z"),
            row("d2", "D2", ""),
        ]);

        let posts = resolve_all_posts(&files(dir.path()), &store).await.unwrap();
        assert_eq!(posts.len(), 6);
        assert_newest_first(&posts);
        assert_eq!(posts[0].slug, "shared");
        assert_eq!(posts[0].origin, PostOrigin::Database);

        let empty = MemoryPostStore::new();
        let file_only = resolve_all_posts(&files(dir.path()), &empty).await.unwrap();
        assert_eq!(file_only.len(), 4);
        assert_newest_first(&file_only);
        assert!(file_only.iter().all(|p| p.origin == PostOrigin::File));
    }

    #[tokio::test]
    async fn test_lookup_prefers_database() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "b", "B from file", "2024-03-01");
        let mut sparse = row("b", "B from database", "2024-03-05");
        sparse.content = String::new();
        let store = MemoryPostStore::with_posts(vec![sparse]);

        let post = resolve_one_by_slug("b", &files(dir.path()), &store)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.origin, PostOrigin::Database);
        assert_eq!(post.title, "B from database");
        assert_eq!(post.description, "");
        assert_eq!(post.content.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_lookup_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "a", "A from file", "2024-01-01");

        let post = resolve_one_by_slug("a", &files(dir.path()), &MemoryPostStore::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.origin, PostOrigin::File);
        assert_eq!(post.title, "A from file");
        assert_eq!(post.content.as_deref(), Some("File body of a\n"));
    }

    #[tokio::test]
    async fn test_lookup_treats_database_error_as_miss() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "a", "A from file", "2024-01-01");

        let post = resolve_one_by_slug("a", &files(dir.path()), &UnavailableStore)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(post.origin, PostOrigin::File);

        let missing = resolve_one_by_slug("zzz", &files(dir.path()), &UnavailableStore)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_lookup_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryPostStore::with_posts(vec![row("c", "C", "2024-02-01")]);

        let post = resolve_one_by_slug("missing", &files(dir.path()), &store)
            .await
            .unwrap();
        assert!(post.is_none());
    }
}
