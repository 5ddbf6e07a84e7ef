//! File post source - loads posts from the content directory

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, PostRecord};
use crate::config::BlogConfig;
use crate::error::{BlogError, Result};
use crate::helpers::is_file_safe_slug;

/// Reads posts from a flat directory of markdown files
///
/// Each regular file is one post; its name without the extension is the
/// slug. Symbolic links, hidden files, subdirectories and files with other
/// extensions are ignored.
#[derive(Debug, Clone)]
pub struct FilePostSource {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl FilePostSource {
    /// Create a source over `dir`, accepting the given extensions in order
    pub fn new<P: Into<PathBuf>>(dir: P, extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            extensions,
        }
    }

    /// Create the source configured for a site rooted at `base_dir`
    pub fn from_config(base_dir: &Path, config: &BlogConfig) -> Self {
        Self::new(base_dir.join(&config.content_path), config.extensions.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every post's front-matter, without bodies
    ///
    /// An unreadable content directory is an error; callers are not
    /// expected to recover from it. When one slug exists with several
    /// extensions, the file `load_post` would pick is the one listed.
    pub fn load_posts(&self) -> Result<Vec<PostRecord>> {
        // slug -> (extension rank, record)
        let mut posts: IndexMap<String, (usize, PostRecord)> = IndexMap::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BlogError::ContentUnavailable {
                path: self.dir.clone(),
                source: io::Error::from(e),
            })?;

            let file_type = entry.file_type();
            if file_type.is_symlink() || !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let Some((slug, rank)) = self.slug_for(path) else {
                continue;
            };
            if posts.get(&slug).is_some_and(|(kept, _)| *kept < rank) {
                continue;
            }

            let content = read_post(path)?;
            let (fm, _) = FrontMatter::parse(&content);
            let post = PostRecord::from_front_matter(slug.clone(), fm, None);
            posts.insert(slug, (rank, post));
        }

        tracing::debug!("Loaded {} file posts from {:?}", posts.len(), self.dir);

        Ok(posts.into_values().map(|(_, post)| post).collect())
    }

    /// Load one post with its body, trying each extension in order
    ///
    /// Returns `Ok(None)` when no post file exists for the slug.
    pub fn load_post(&self, slug: &str) -> Result<Option<PostRecord>> {
        if !is_file_safe_slug(slug) {
            return Ok(None);
        }

        for ext in &self.extensions {
            let path = self.dir.join(format!("{}.{}", slug, ext));

            let metadata = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(BlogError::ReadPost { path, source: e }),
            };
            if !metadata.is_file() {
                continue;
            }

            let content = read_post(&path)?;
            let (fm, body) = FrontMatter::parse(&content);
            return Ok(Some(PostRecord::from_front_matter(
                slug.to_string(),
                fm,
                Some(body.to_string()),
            )));
        }

        Ok(None)
    }

    /// Slug and extension rank of a post file, or `None` if the file is
    /// not a post
    fn slug_for(&self, path: &Path) -> Option<(String, usize)> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with('.') {
            return None;
        }

        let ext = path.extension()?.to_str()?;
        let rank = self.extensions.iter().position(|e| e == ext)?;

        path.file_stem()
            .and_then(|s| s.to_str())
            .map(|stem| (stem.to_string(), rank))
    }
}

/// Read a post file; invalid UTF-8 is replaced rather than rejected
fn read_post(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| BlogError::ReadPost {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => {
            tracing::warn!("Post file {:?} is not valid UTF-8, decoding lossily", path);
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
