pub mod clean;
pub mod config;
pub mod folder;
pub mod history;
pub mod init;
pub mod list;
pub mod task;
