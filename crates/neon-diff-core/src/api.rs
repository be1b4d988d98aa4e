//! Contracts for the two remote collaborators.
//!
//! The pipeline talks to the Neon control-plane API and the GitHub review
//! API exclusively through the [`ControlPlaneApi`] and [`ReviewApi`] traits.
//! The core therefore carries no HTTP dependency, and every component runs
//! against synthetic clients in tests.

use async_trait::async_trait;
use serde::Deserialize;

use crate::branch::{Branch, SchemaSnapshot};
use crate::error::Result;

/// Role used for schema introspection when none is supplied.
pub const DEFAULT_ROLE: &str = "neondb_owner";

/// Database name used when none is supplied.
pub const DEFAULT_DATABASE: &str = "neondb";

/// Public control-plane endpoint.
pub const DEFAULT_API_HOST: &str = "https://console.neon.tech/api/v2";

/// A completed remote call: the reported status plus the decoded body.
///
/// Success checking stays with the caller. A client returns the response
/// as-is even when the status is non-success; the body is then a default
/// value and must not be read.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status reported by the remote.
    pub status: u16,
    /// Decoded response body.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Creates a response from a status and body.
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }

    /// Whether the remote reported success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body of a branch listing call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchListing {
    /// Every branch of the project, in API response order.
    pub branches: Vec<Branch>,
}

/// Parameters of a single branch schema fetch.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRequest<'a> {
    /// Project the branch belongs to.
    pub project_id: &'a str,
    /// Branch whose schema is requested.
    pub branch_id: &'a str,
    /// Role used for introspection.
    pub role: &'a str,
    /// Database to introspect.
    pub db_name: &'a str,
}

/// The control-plane API surface the schema fetcher needs.
#[async_trait]
pub trait ControlPlaneApi: Send + Sync {
    /// Lists every branch of a project.
    async fn list_project_branches(&self, project_id: &str)
        -> Result<ApiResponse<BranchListing>>;

    /// Fetches the SQL schema of one branch.
    async fn get_branch_schema(
        &self,
        request: SchemaRequest<'_>,
    ) -> Result<ApiResponse<SchemaSnapshot>>;
}

/// The pull request a comment is published to.
///
/// Passed explicitly instead of being read from ambient CI globals, so the
/// publisher can run against synthetic contexts in tests.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number.
    pub number: u64,
}

/// A pull-request comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrComment {
    /// Comment identifier, unique within the repository.
    pub id: u64,
    /// Comment text; the review API may omit it.
    #[serde(default)]
    pub body: Option<String>,
    /// API URL of the comment.
    #[serde(default)]
    pub url: String,
}

/// The review API surface the comment publisher needs.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Lists every comment on the pull request, in API response order.
    async fn list_comments(
        &self,
        pr: &PullRequestContext,
    ) -> Result<ApiResponse<Vec<PrComment>>>;

    /// Replaces the body of an existing comment.
    async fn update_comment(
        &self,
        pr: &PullRequestContext,
        comment_id: u64,
        body: &str,
    ) -> Result<ApiResponse<PrComment>>;

    /// Creates a new comment on the pull request.
    async fn create_comment(
        &self,
        pr: &PullRequestContext,
        body: &str,
    ) -> Result<ApiResponse<PrComment>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_the_2xx_class() {
        assert!(ApiResponse::new(200, ()).is_success());
        assert!(ApiResponse::new(201, ()).is_success());
        assert!(!ApiResponse::new(199, ()).is_success());
        assert!(!ApiResponse::new(404, ()).is_success());
        assert!(!ApiResponse::new(500, ()).is_success());
    }
}
