// ABOUTME: Image reference construction and tag rewriting.
// ABOUTME: Tolerant of registry hosts that carry a port (host:port/...).

use std::fmt;

use super::stage_name::StageName;

/// The configured registry-and-repository prefix that every stage image
/// lives under, e.g. `example.com:5000/acme/app`. No validation of the
/// character set; the registry is free to reject what it doesn't like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository(String);

impl Repository {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Untagged image name for a build stage.
    pub fn untagged(&self, stage: &StageName) -> String {
        format!("{}/{}", self.0, stage)
    }

    /// Tagged image reference for a build stage.
    pub fn tagged(&self, stage: &StageName, tag: &str) -> String {
        format!("{}:{}", self.untagged(stage), tag)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Replace the tag on `reference`, or append one if it has none.
///
/// Only the last `/`-separated segment is inspected for the tag separator,
/// so a colon inside the registry host (`host:5000/app`) is never mistaken
/// for the tag colon. Within the last segment the split happens at the
/// first `:`; stage names never contain one.
pub fn replace_or_append_tag(reference: &str, new_tag: &str) -> String {
    match reference.rsplit_once('/') {
        Some((prefix, last)) => {
            let name = last.split_once(':').map_or(last, |(name, _)| name);
            format!("{prefix}/{name}:{new_tag}")
        }
        // No slash at all: the whole reference is the last segment.
        None => {
            let name = reference
                .split_once(':')
                .map_or(reference, |(name, _)| name);
            format!("{name}:{new_tag}")
        }
    }
}
