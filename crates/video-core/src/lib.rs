pub mod catalog;
pub mod config;
pub mod feed;
pub mod format;
pub mod platform;
pub mod types;
