pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod export;
pub mod feedback;
pub mod import;
pub mod list;
pub mod show;
pub mod write;
