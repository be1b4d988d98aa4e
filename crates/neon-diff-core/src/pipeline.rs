//! End-to-end orchestration: fetch, render, publish.

use tracing::{debug, info};

use crate::api::{ControlPlaneApi, PullRequestContext, ReviewApi};
use crate::error::Result;
use crate::{fetcher, publisher, render};

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Neon project to resolve branches in.
    pub project_id: String,
    /// Branch to diff against its parent.
    pub branch_name: String,
    /// Role for schema introspection; falls back to the Neon default role.
    pub role: Option<String>,
    /// Database to introspect; falls back to the Neon default database.
    pub database: Option<String>,
}

/// What a successful run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Raw unified diff between the parent and child schemas.
    pub sql_diff: String,
    /// URL of the published comment.
    pub comment_url: String,
}

/// Runs the whole pipeline once.
///
/// Fails fast: the first error from any step aborts the run and surfaces
/// with the originating message unchanged. No step is retried and no
/// partial output is produced.
pub async fn run<C, R>(
    config: &PipelineConfig,
    control_plane: &C,
    review: &R,
    pr: &PullRequestContext,
) -> Result<PipelineOutput>
where
    C: ControlPlaneApi,
    R: ReviewApi,
{
    debug!(
        project = %config.project_id,
        branch = %config.branch_name,
        "running schema diff"
    );
    let diff = fetcher::schema_diff(
        control_plane,
        &config.project_id,
        &config.branch_name,
        config.role.as_deref(),
        config.database.as_deref(),
    )
    .await?;

    debug!("rendering diff summary");
    let summary = render::summarize(&diff, &config.project_id);

    debug!("publishing comment on the pull request");
    let comment_url = publisher::upsert_comment(review, pr, &summary).await?;

    info!(%comment_url, "schema diff published");
    Ok(PipelineOutput {
        sql_diff: diff.sql_diff,
        comment_url,
    })
}
