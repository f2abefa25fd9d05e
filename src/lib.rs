//! Argo Processor Library
//!
//! Ingests directory trees of Argo float profile CSV files and serves a
//! per-float aggregate.
//!
//! This library provides tools for:
//! - Streaming delimited files with quote-aware line splitting
//! - Normalizing inconsistent column names through a declarative alias table
//! - Reconstructing a time axis from JULD, calendar dates or cycle numbers
//! - Grouping measurements by float and cutting them into deployment cycles
//! - Serving the result through a lazily built, single-flight cache
//!
//! ```no_run
//! use argo_processor::{AggregationCache, ArgoConfig, IngestionPipeline};
//!
//! # async fn example() -> argo_processor::Result<()> {
//! let cache = AggregationCache::new(IngestionPipeline::new(ArgoConfig::default()));
//! let aggregate = cache.get_all().await?;
//! println!("{} floats", aggregate.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod processor;
pub mod view;

// Re-export commonly used types
pub use cache::{AggregateSource, AggregationCache, CacheState};
pub use config::ArgoConfig;
pub use error::{ArgoError, Result};
pub use models::{Aggregate, Cycle, Entry, FloatRecord, ProfilePoint, SourceKind};
pub use processor::IngestionPipeline;
