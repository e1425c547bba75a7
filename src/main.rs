// ABOUTME: Entry point for the skala CLI application.
// ABOUTME: Resolves CI context and inputs, then drives the requested helper.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use skala::check::{self, GithubChecks};
use skala::config::{BuildInputs, CheckInputs, InputSource};
use skala::context::InvocationContext;
use skala::docker::DockerCommand;
use skala::error::{Error, Result};
use skala::output::Outputs;
use skala::pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let context = InvocationContext::from_env()?;
    let source = InputSource::from_env();

    match cli.command {
        Commands::Build => {
            let inputs = BuildInputs::parse(&source)?;
            let docker = DockerCommand::new(inputs.quiet);
            let pipeline = Pipeline::new(&inputs, &context, &docker);
            let outputs = pipeline.run().await?;

            let sink = Outputs::from_env();
            record(&sink, "commit", &outputs.commit)?;
            if let Some(tag) = &outputs.testenv_tag {
                record(&sink, "testenv-tag", tag)?;
            }
            record(&sink, "server-tag", &outputs.server_tag)?;
            Ok(())
        }
        Commands::Check => {
            let inputs = CheckInputs::parse(&source)?;
            let reporter =
                GithubChecks::new(&inputs.token, &context.repo_owner, &context.repo_name)?;
            let docker = DockerCommand::new(false);
            check::run_check(&docker, &reporter, &inputs, &context.commit_hash()).await?;
            Ok(())
        }
    }
}

fn record(sink: &Outputs, key: &str, value: &str) -> Result<()> {
    sink.set(key, value)
        .map_err(|source| Error::Outputs { source })
}
