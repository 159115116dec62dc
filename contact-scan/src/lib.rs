pub mod config;
pub mod export;
pub mod helpers;
pub mod jobs;
