pub mod config;
mod entity;
pub mod files;
pub mod history;
pub mod lock;
pub mod paths;
pub mod repo;
pub mod tasks;
