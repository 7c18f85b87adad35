pub mod cli;
pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod jobs;
pub mod nodes;
pub mod report;
