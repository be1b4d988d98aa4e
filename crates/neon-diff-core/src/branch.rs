//! Data model for branch schema diffs.

use serde::Deserialize;

/// A database branch as reported by the control-plane API.
///
/// Branches are read-only inputs fetched fresh on every run; nothing is
/// persisted locally.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    /// Opaque unique identifier.
    pub id: String,
    /// Branch name, unique within a project but not globally.
    pub name: String,
    /// Identifier of the parent branch; absent for a project's root branch.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Whether the branch is protected. Display-only here.
    #[serde(default)]
    pub protected: bool,
}

/// The full SQL schema of a branch at the moment of the fetch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaSnapshot {
    /// SQL definition text. An absent body means an empty schema, not an
    /// error.
    #[serde(default)]
    pub sql: Option<String>,
}

impl SchemaSnapshot {
    /// Returns the SQL text, treating an absent body as empty.
    #[must_use]
    pub fn sql_or_empty(&self) -> &str {
        self.sql.as_deref().unwrap_or("")
    }
}

/// The rendered schema difference between a branch and its parent.
#[derive(Debug, Clone)]
pub struct BranchDiff {
    /// Unified diff from the parent schema to the child schema.
    pub sql_diff: String,
    /// The branch the child was created from.
    pub parent_branch: Branch,
    /// The branch compared against its parent.
    pub child_branch: Branch,
    /// Database role used for schema introspection.
    pub role: String,
    /// Target database name.
    pub database: String,
}
