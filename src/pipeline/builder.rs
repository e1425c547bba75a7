// ABOUTME: Pipeline driver: builds, pushes, and promotes each stage.
// ABOUTME: The first fatal error aborts everything that follows.

use crate::config::BuildInputs;
use crate::context::InvocationContext;
use crate::docker::{BuildRequest, ContainerCli};
use crate::types::{RunTag, StageName, replace_or_append_tag};

use super::cache::{self, CacheWarmth, FALLBACK_TAG};
use super::error::PipelineError;
use super::stages;

/// Resolved outputs of one pipeline invocation, surfaced back to CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutputs {
    pub commit: String,
    pub server_tag: String,
    pub testenv_tag: Option<String>,
}

/// Sequential driver over the container CLI. One instance per invocation;
/// nothing runs concurrently, so a fatal error leaves no in-flight work.
pub struct Pipeline<'a, C: ContainerCli> {
    inputs: &'a BuildInputs,
    context: &'a InvocationContext,
    cli: &'a C,
    run_tag: RunTag,
}

impl<'a, C: ContainerCli> Pipeline<'a, C> {
    pub fn new(inputs: &'a BuildInputs, context: &'a InvocationContext, cli: &'a C) -> Self {
        let run_tag = context.run_tag();
        Self {
            inputs,
            context,
            cli,
            run_tag,
        }
    }

    /// Build every declared stage: base stages in order, then the optional
    /// test environment, then the server stage.
    pub async fn run(&self) -> Result<PipelineOutputs, PipelineError> {
        let base = stages::base_stages(self.inputs).map_err(config_error)?;
        if base.is_empty() {
            tracing::warn!("no base stages declared; the build will have limited caching");
        }

        // Keep intermediate stages fresh on `latest` so new branches get a
        // cache hit on their first build.
        let base_extra: Vec<String> = if self.context.is_default_branch() {
            vec![FALLBACK_TAG.to_string()]
        } else {
            vec![]
        };
        for stage in &base {
            self.build_stage(stage, &base_extra).await?;
        }

        let commit = self.context.commit_hash();
        let mut extra_tags = vec![commit.clone()];
        if self.context.is_default_branch() && self.inputs.tag_latest_on_default {
            extra_tags.push(FALLBACK_TAG.to_string());
        }
        if let Some(custom) = &self.inputs.custom_tag {
            extra_tags.push(custom.clone());
        }

        let testenv_tag = match &self.inputs.testenv_stage {
            None => {
                tracing::info!("testenv-stage not set; skipping build");
                None
            }
            Some(stage) => Some(self.build_stage(stage, &extra_tags).await?),
        };

        let server_tag = self
            .build_stage(&self.inputs.server_stage, &extra_tags)
            .await?;

        Ok(PipelineOutputs {
            commit,
            server_tag,
            testenv_tag,
        })
    }

    /// Build one stage: warm the cache, build against the full cache-from
    /// set, push the primary reference, then apply each promotional tag in
    /// order. Returns the primary reference.
    pub async fn build_stage(
        &self,
        stage: &StageName,
        extra_tags: &[String],
    ) -> Result<String, PipelineError> {
        match cache::warm_cache(self.cli, &self.inputs.repository, stage, &self.run_tag).await {
            CacheWarmth::Warmed { reference } => {
                tracing::debug!("layer cache for {stage} warmed from {reference}");
            }
            CacheWarmth::Cold => {
                tracing::debug!("no cache image available for stage {stage}");
            }
        }

        let all = stages::all_stages(self.inputs).map_err(config_error)?;
        let cache_from = cache::cache_targets(&self.inputs.repository, &all, &self.run_tag);

        let mut build_args = self.inputs.build_args.clone();
        if self.context.buildkit {
            build_args.push("BUILDKIT_INLINE_CACHE=1".to_string());
        }

        let target = self.inputs.repository.tagged(stage, self.run_tag.as_str());
        tracing::info!("building stage {stage} as {target}");
        let request = BuildRequest {
            build_args,
            cache_from,
            dockerfile: self.inputs.dockerfile.clone(),
            tag: target.clone(),
            target: stage.to_string(),
            context: self.inputs.context.clone(),
        };
        match self.cli.build(&request).await? {
            0 => {}
            code => {
                return Err(PipelineError::BuildFailed {
                    stage: stage.to_string(),
                    code,
                });
            }
        }

        self.push(&target).await?;

        for tag in extra_tags {
            self.promote(&target, tag).await?;
        }

        Ok(target)
    }

    async fn push(&self, reference: &str) -> Result<(), PipelineError> {
        tracing::debug!("pushing {reference}");
        match self.cli.push(reference).await? {
            0 => Ok(()),
            code => Err(PipelineError::PushFailed {
                reference: reference.to_string(),
                code,
            }),
        }
    }

    /// Alias the primary reference under an extra tag and push the alias.
    /// A partially-pushed promotion set is a pipeline failure, so the
    /// first error aborts the remaining tags.
    async fn promote(&self, primary: &str, tag: &str) -> Result<String, PipelineError> {
        let reference = replace_or_append_tag(primary, tag);
        match self.cli.tag(primary, &reference).await? {
            0 => {}
            code => return Err(PipelineError::TagFailed { reference, code }),
        }
        self.push(&reference).await?;
        Ok(reference)
    }
}

fn config_error(err: crate::types::StageNameError) -> PipelineError {
    PipelineError::Config(err.to_string())
}
