//! Command implementations for the `blogfront` binary

pub mod clean;
pub mod generate;
pub mod list;
pub mod new;
pub mod show;
