//! Client for the Pexels video search API.
//!
//! Searches for stock clips and streams their files to disk.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::PexelsClient;
pub use config::PexelsConfig;
pub use error::{PexelsError, PexelsResult};
pub use types::{ClipSource, SearchResponse, VideoHit};
