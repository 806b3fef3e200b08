//! Shared utilities for news-sentiment
//!
//! This crate provides common functionality used across the news-sentiment
//! workspace: logging setup and environment-driven configuration helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_or, env_parse, load_dotenv};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
