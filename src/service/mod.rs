pub mod config;
pub mod publisher;
