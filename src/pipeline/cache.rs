// ABOUTME: Warm-cache tag fallback and cache-from target enumeration.
// ABOUTME: Prefers the run-specific tag, then falls back to latest.

use std::collections::HashSet;

use crate::docker::ContainerCli;
use crate::types::{Repository, RunTag, StageName};

/// The least-specific pull candidate: the default branch's most recent
/// build, giving new branches a reasonable chance at a cache hit.
pub const FALLBACK_TAG: &str = "latest";

/// Pull candidates in priority order: the exact ref context first, then
/// the default branch fallback.
pub fn tag_candidates(run_tag: &RunTag) -> [String; 2] {
    [run_tag.to_string(), FALLBACK_TAG.to_string()]
}

/// Every reference that could plausibly serve as a cache source: all
/// stages crossed with the candidate tags. Deduplicated, since the run tag
/// can degenerate to `latest` itself; the result is consumed as a flat
/// --cache-from list where order carries no meaning.
pub fn cache_targets(
    repository: &Repository,
    stages: &[StageName],
    run_tag: &RunTag,
) -> Vec<String> {
    let tags = tag_candidates(run_tag);
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for stage in stages {
        for tag in &tags {
            let reference = repository.tagged(stage, tag);
            if seen.insert(reference.clone()) {
                targets.push(reference);
            }
        }
    }
    targets
}

/// Outcome of a warm-cache attempt for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheWarmth {
    /// A candidate pulled successfully; further candidates were skipped.
    Warmed { reference: String },
    /// Every candidate failed. Expected on first builds; the stage builds
    /// without a warm cache.
    Cold,
}

/// Try to pull each candidate tag in priority order, stopping at the first
/// success. Failed attempts are logged and swallowed, never fatal.
pub async fn warm_cache<C: ContainerCli>(
    cli: &C,
    repository: &Repository,
    stage: &StageName,
    run_tag: &RunTag,
) -> CacheWarmth {
    for tag in tag_candidates(run_tag) {
        let reference = repository.tagged(stage, &tag);
        tracing::debug!("pulling {reference} for layer cache");
        match cli.pull(&reference).await {
            Ok(0) => return CacheWarmth::Warmed { reference },
            Ok(code) => {
                tracing::debug!("cache pull missed {reference} (exit code {code})");
            }
            Err(e) => {
                tracing::debug!("cache pull could not run for {reference}: {e}");
            }
        }
    }
    CacheWarmth::Cold
}
