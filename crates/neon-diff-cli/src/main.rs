//! neon-schema-diff CLI
//!
//! Computes the schema diff between a Neon branch and its parent and
//! publishes it as a single, idempotently updated comment on a pull
//! request. Intended to run once per CI invocation.

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use neon_diff_core::api::{PullRequestContext, DEFAULT_API_HOST};
use neon_diff_core::pipeline::{self, PipelineConfig};

mod http;
mod outputs;

/// Posts a schema diff between a Neon branch and its parent to a pull request.
#[derive(Parser)]
#[command(name = "neon-schema-diff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Neon project id.
    #[arg(long, env = "NEON_PROJECT_ID")]
    project_id: String,

    /// Branch to diff against its parent.
    #[arg(long, env = "NEON_BRANCH_NAME")]
    branch_name: String,

    /// Neon API key.
    #[arg(long, env = "NEON_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Control-plane endpoint.
    #[arg(long, env = "NEON_API_HOST", default_value = DEFAULT_API_HOST)]
    api_host: String,

    /// Database to introspect (defaults to the Neon default database).
    #[arg(long, env = "NEON_DATABASE")]
    database: Option<String>,

    /// Role used for introspection (defaults to the Neon default role).
    #[arg(long, env = "NEON_USERNAME")]
    username: Option<String>,

    /// GitHub token used to publish the comment.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Repository in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Pull request number to comment on.
    #[arg(long, env = "PR_NUMBER")]
    pull_request: u64,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pr = pull_request_context(&cli.repository, cli.pull_request)?;

    let control_plane = http::neon::NeonClient::new(&cli.api_host, &cli.api_key)?;
    let review = http::github::GitHubClient::new(&cli.github_token)?;

    let config = PipelineConfig {
        project_id: cli.project_id,
        branch_name: cli.branch_name,
        role: cli.username,
        database: cli.database,
    };

    debug!("Running schema-diff action");
    let output = pipeline::run(&config, &control_plane, &review, &pr).await?;

    outputs::publish("schemadiff", &output.sql_diff)?;
    outputs::publish("comment_url", &output.comment_url)?;
    Ok(())
}

fn pull_request_context(repository: &str, number: u64) -> anyhow::Result<PullRequestContext> {
    let (owner, repo) = repository.split_once('/').ok_or_else(|| {
        anyhow::anyhow!("Repository must be in owner/name form, got '{repository}'")
    })?;
    if owner.is_empty() || repo.is_empty() {
        anyhow::bail!("Repository must be in owner/name form, got '{repository}'");
    }
    Ok(PullRequestContext {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_splits_into_owner_and_name() {
        let pr = pull_request_context("acme/app", 7).unwrap();
        assert_eq!(pr.owner, "acme");
        assert_eq!(pr.repo, "app");
        assert_eq!(pr.number, 7);
    }

    #[test]
    fn malformed_repository_is_rejected() {
        assert!(pull_request_context("acme", 7).is_err());
        assert!(pull_request_context("/app", 7).is_err());
        assert!(pull_request_context("acme/", 7).is_err());
    }
}
