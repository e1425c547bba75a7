// ABOUTME: Build pipeline orchestration.
// ABOUTME: Stage enumeration, cache fallback, and the sequential driver.

mod builder;
mod cache;
mod error;
mod stages;

pub use builder::{Pipeline, PipelineOutputs};
pub use cache::{CacheWarmth, FALLBACK_TAG, cache_targets, tag_candidates, warm_cache};
pub use error::{PipelineError, PipelineErrorKind};
pub use stages::{all_stages, base_stages};
