pub mod config;
pub mod control;
pub mod logging;

pub mod download;
pub mod episode;
pub mod feed;
pub mod fetch;
pub mod naming;
pub mod progress;
pub mod report;
