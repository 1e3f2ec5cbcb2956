pub mod api;
pub mod chain;
pub mod config;
pub mod metrics;
pub mod stats;
