//! Book catalog search with generated summaries and discussion questions.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod club;
pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod render;
