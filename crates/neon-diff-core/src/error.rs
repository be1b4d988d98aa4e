//! Error types for the schema diff pipeline.

/// Broad classes of pipeline failure.
///
/// Every [`DiffError`] variant belongs to exactly one class. All errors are
/// terminal for the run; the class exists so callers and tests can assert on
/// the nature of a failure without matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A remote call completed but reported a non-success status.
    Upstream,
    /// An expected entity (branch, parent branch) was absent upstream.
    NotFound,
    /// A data-consistency precondition was violated upstream.
    InvalidState,
    /// The transport failed before a remote call could report a status.
    Transport,
}

/// Errors that can occur while diffing branch schemas and publishing the
/// result.
///
/// Messages are user-facing: the orchestrator reports the lowest-level
/// cause's message verbatim, without rewrapping.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The branch listing call reported a non-success status.
    #[error("Failed to list branches for project {0}")]
    BranchListing(String),

    /// No branch with the requested name exists in the project.
    #[error("Branch {branch} not found in project {project}")]
    BranchNotFound {
        /// The branch name that was looked up.
        branch: String,
        /// The project that was searched.
        project: String,
    },

    /// The requested branch is a root branch and cannot be diffed.
    #[error("Branch {0} has no parent")]
    NoParent(String),

    /// The branch references a parent id absent from the listing.
    #[error("Parent branch for {0} not found")]
    ParentNotFound(String),

    /// The schema fetch for the branch itself reported a non-success status.
    #[error("Failed to get schema for branch {branch} in project {project}")]
    BranchSchema {
        /// The branch whose schema was requested.
        branch: String,
        /// The project the branch belongs to.
        project: String,
    },

    /// The schema fetch for the parent branch reported a non-success status.
    #[error("Failed to get schema for parent of {branch} in project {project}")]
    ParentSchema {
        /// The child branch whose parent's schema was requested.
        branch: String,
        /// The project the branch belongs to.
        project: String,
    },

    /// The comment listing call reported a non-success status.
    #[error("Failed to list comments on pull request #{0}")]
    CommentListing(u64),

    /// The comment update call reported a non-success status.
    #[error("Failed to update comment {0}")]
    CommentUpdate(u64),

    /// The comment creation call reported a non-success status.
    #[error("Failed to create comment on pull request #{0}")]
    CommentCreate(u64),

    /// The HTTP transport failed before the remote call produced a status.
    #[error("{0}")]
    Transport(String),
}

impl DiffError {
    /// Returns the broad class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BranchListing(_)
            | Self::BranchSchema { .. }
            | Self::ParentSchema { .. }
            | Self::CommentListing(_)
            | Self::CommentUpdate(_)
            | Self::CommentCreate(_) => ErrorKind::Upstream,
            Self::BranchNotFound { .. } | Self::ParentNotFound(_) => ErrorKind::NotFound,
            Self::NoParent(_) => ErrorKind::InvalidState,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, DiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_reported_failures() {
        let err = DiffError::BranchNotFound {
            branch: "feature".into(),
            project: "proj-1".into(),
        };
        assert_eq!(err.to_string(), "Branch feature not found in project proj-1");

        let err = DiffError::NoParent("main".into());
        assert_eq!(err.to_string(), "Branch main has no parent");

        let err = DiffError::CommentUpdate(42);
        assert_eq!(err.to_string(), "Failed to update comment 42");
    }

    #[test]
    fn variants_map_to_their_class() {
        assert_eq!(
            DiffError::BranchListing("p".into()).kind(),
            ErrorKind::Upstream
        );
        assert_eq!(DiffError::ParentNotFound("b".into()).kind(), ErrorKind::NotFound);
        assert_eq!(DiffError::NoParent("b".into()).kind(), ErrorKind::InvalidState);
        assert_eq!(
            DiffError::Transport("connection reset".into()).kind(),
            ErrorKind::Transport
        );
    }
}
