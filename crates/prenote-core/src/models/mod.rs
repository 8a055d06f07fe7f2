//! Data models: rules, scores, persisted records and configuration.

pub mod config;
pub mod hassle;
pub mod info;
pub mod rules;
pub mod weekday;
