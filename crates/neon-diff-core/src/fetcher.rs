//! Branch resolution and schema retrieval.

use std::collections::HashMap;

use tracing::debug;

use crate::api::{ControlPlaneApi, SchemaRequest, DEFAULT_DATABASE, DEFAULT_ROLE};
use crate::branch::{Branch, BranchDiff};
use crate::error::{DiffError, Result};
use crate::render;

/// Resolves `branch_name` and its parent within `project_id`, fetches both
/// schemas, and renders the unified diff between them.
///
/// Branch names are not guaranteed unique across the API; the first match in
/// listing order wins. Known limitation, kept deliberately rather than
/// guessing at stricter semantics the upstream does not provide.
///
/// The two schema fetches are independent and run concurrently; neither
/// starts before branch resolution completes, and rendering waits for both.
pub async fn schema_diff<C: ControlPlaneApi>(
    api: &C,
    project_id: &str,
    branch_name: &str,
    role: Option<&str>,
    database: Option<&str>,
) -> Result<BranchDiff> {
    let listing = api.list_project_branches(project_id).await?;
    if !listing.is_success() {
        return Err(DiffError::BranchListing(project_id.to_string()));
    }
    let branches = listing.data.branches;

    let child = branches
        .iter()
        .find(|branch| branch.name == branch_name)
        .ok_or_else(|| DiffError::BranchNotFound {
            branch: branch_name.to_string(),
            project: project_id.to_string(),
        })?;

    let parent_id = child
        .parent_id
        .as_deref()
        .ok_or_else(|| DiffError::NoParent(branch_name.to_string()))?;

    // One-time id index; parent resolution becomes a point lookup.
    let by_id: HashMap<&str, &Branch> =
        branches.iter().map(|branch| (branch.id.as_str(), branch)).collect();
    let parent = *by_id
        .get(parent_id)
        .ok_or_else(|| DiffError::ParentNotFound(branch_name.to_string()))?;

    let role = role.unwrap_or(DEFAULT_ROLE);
    let database = database.unwrap_or(DEFAULT_DATABASE);

    debug!(
        child = %child.id,
        parent = %parent.id,
        role,
        database,
        "resolved branch and parent"
    );

    // Fan out the two independent fetches, join before rendering.
    let (child_schema, parent_schema) = tokio::try_join!(
        api.get_branch_schema(SchemaRequest {
            project_id,
            branch_id: &child.id,
            role,
            db_name: database,
        }),
        api.get_branch_schema(SchemaRequest {
            project_id,
            branch_id: &parent.id,
            role,
            db_name: database,
        }),
    )?;
    if !child_schema.is_success() {
        return Err(DiffError::BranchSchema {
            branch: branch_name.to_string(),
            project: project_id.to_string(),
        });
    }
    if !parent_schema.is_success() {
        return Err(DiffError::ParentSchema {
            branch: branch_name.to_string(),
            project: project_id.to_string(),
        });
    }

    let file = format!("{database}-schema.sql");
    let sql_diff = render::unified_diff(
        &file,
        parent_schema.data.sql_or_empty(),
        child_schema.data.sql_or_empty(),
        &format!("Branch {}", parent.name),
        &format!("Branch {}", child.name),
    );

    Ok(BranchDiff {
        sql_diff,
        parent_branch: parent.clone(),
        child_branch: child.clone(),
        role: role.to_string(),
        database: database.to_string(),
    })
}
