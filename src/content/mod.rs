//! Content module - post records, file posts, front-matter and rendering

mod components;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use components::{fake_task, ComponentFn, ComponentOverrides, ElementProps};
pub use frontmatter::FrontMatter;
pub use loader::FilePostSource;
pub use markdown::MarkdownRenderer;
pub use post::{PostOrigin, PostRecord};
