//! HTTP networking module
//!
//! Provides the client for the news summarization backend.

mod client;

pub use client::{ApiClient, FetchError, NewsClient};
