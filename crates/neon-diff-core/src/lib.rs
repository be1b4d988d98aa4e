//! # neon-diff-core
//!
//! Computes a textual schema diff between a Neon database branch and its
//! parent, renders it as a Markdown summary, and publishes the summary as a
//! single idempotently updated comment on a pull request.
//!
//! The crate is transport-agnostic: the two remote collaborators (the Neon
//! control-plane API and the GitHub review API) are reached through the
//! [`api::ControlPlaneApi`] and [`api::ReviewApi`] traits, so the whole
//! pipeline runs against synthetic clients in tests.
//!
//! # Pipeline
//!
//! 1. **Fetcher** resolves the named branch and its parent within the
//!    project and fetches both SQL schema snapshots (concurrently).
//! 2. **Renderer** produces a unified diff and a Markdown summary carrying
//!    a fixed marker string.
//! 3. **Publisher** scans the pull request for a marker-bearing comment and
//!    updates it in place, or creates one when none exists.
//!
//! Control flows strictly forward; the first failure anywhere is terminal
//! for the run and surfaces with its original message.

pub mod api;
pub mod branch;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod publisher;
pub mod render;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{
        ApiResponse, BranchListing, ControlPlaneApi, PrComment, PullRequestContext, ReviewApi,
        SchemaRequest, DEFAULT_API_HOST, DEFAULT_DATABASE, DEFAULT_ROLE,
    };
    pub use crate::branch::{Branch, BranchDiff, SchemaSnapshot};
    pub use crate::error::{DiffError, ErrorKind, Result};
    pub use crate::pipeline::{run, PipelineConfig, PipelineOutput};
    pub use crate::publisher::{find_marker_comment, upsert_comment, SearchOutcome};
    pub use crate::render::{summarize, unified_diff, COMMENT_MARKER};
}
