//! Configuration module

mod authors;
mod site;

pub use authors::{AuthorDirectory, AuthorInfo, SocialHandles};
pub use site::BlogConfig;
pub use site::DatabaseConfig;
