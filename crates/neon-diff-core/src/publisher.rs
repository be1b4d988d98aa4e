//! Idempotent pull-request comment publication.

use tracing::debug;

use crate::api::{PrComment, PullRequestContext, ReviewApi};
use crate::error::{DiffError, Result};
use crate::render::COMMENT_MARKER;

/// Outcome of scanning a pull request for the marker comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A marker-bearing comment exists; carries its id.
    Found(u64),
    /// No comment on the pull request carries the marker.
    Missing,
}

/// Selects the first marker-bearing comment in listing order.
///
/// A linear scan is fine here: pull requests carry few comments and this
/// runs at most once per CI invocation.
#[must_use]
pub fn find_marker_comment(comments: &[PrComment]) -> SearchOutcome {
    comments
        .iter()
        .find(|comment| {
            comment
                .body
                .as_deref()
                .is_some_and(|body| body.contains(COMMENT_MARKER))
        })
        .map_or(SearchOutcome::Missing, |comment| SearchOutcome::Found(comment.id))
}

/// Publishes `body` as the single marker comment of the pull request.
///
/// Updates the existing marker comment in place when one exists, otherwise
/// creates a new one, and returns the comment's URL. Running the pipeline
/// twice against an unchanged pull request converges to exactly one marker
/// comment whose body reflects the latest diff.
pub async fn upsert_comment<R: ReviewApi>(
    api: &R,
    pr: &PullRequestContext,
    body: &str,
) -> Result<String> {
    let listing = api.list_comments(pr).await?;
    if !listing.is_success() {
        return Err(DiffError::CommentListing(pr.number));
    }

    match find_marker_comment(&listing.data) {
        SearchOutcome::Found(comment_id) => {
            debug!(comment_id, "updating existing schema diff comment");
            let updated = api.update_comment(pr, comment_id, body).await?;
            if !updated.is_success() {
                return Err(DiffError::CommentUpdate(comment_id));
            }
            Ok(updated.data.url)
        }
        SearchOutcome::Missing => {
            debug!("creating schema diff comment");
            let created = api.create_comment(pr, body).await?;
            if !created.is_success() {
                return Err(DiffError::CommentCreate(pr.number));
            }
            Ok(created.data.url)
        }
    }
}
