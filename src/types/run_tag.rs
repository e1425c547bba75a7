// ABOUTME: The deterministic tag identifying artifacts of one CI invocation.
// ABOUTME: Derived from the triggering ref and the build-backend flag.

use std::fmt;

/// Tag applied to every image built during one invocation, e.g.
/// `refs_pull_1_merge-bk1`. Constant for the invocation's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunTag(String);

impl RunTag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derive the tag from the triggering ref. Slashes are not valid in
    /// image tags, so they flatten to underscores; the buildkit flag is
    /// appended because the two backends produce incompatible cache layers.
    pub fn derive(ref_name: &str, buildkit: bool) -> Self {
        let friendly = ref_name.replace('/', "_");
        Self(format!("{}-bk{}", friendly, if buildkit { 1 } else { 0 }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
