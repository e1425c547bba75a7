// ABOUTME: Validated domain types for the build pipeline.
// ABOUTME: Stage names, run tags, repository prefixes, and tag rewriting.

mod image_ref;
mod run_tag;
mod stage_name;

pub use image_ref::{Repository, replace_or_append_tag};
pub use run_tag::RunTag;
pub use stage_name::{StageName, StageNameError};
