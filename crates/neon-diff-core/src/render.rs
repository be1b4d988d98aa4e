//! Diff rendering.
//!
//! Produces a line-based unified diff between two schema snapshots and a
//! Markdown summary suitable for a pull-request comment. Both functions are
//! pure; only [`summarize`] embeds a generation timestamp, which is the one
//! intentionally non-deterministic field in the whole pipeline.

use chrono::Local;

use crate::branch::BranchDiff;

/// Fixed marker embedded in every summary, used to recognize our comment
/// across runs. Must never change between releases or idempotence breaks.
pub const COMMENT_MARKER: &str =
    "<!--- Neon database schema diff GitHub action comment identifier -->";

/// Context lines kept around each change when grouping hunks.
const CONTEXT: usize = 4;

// ================================================================
// Unified diff
// ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Keep,
    Delete,
    Insert,
}

/// Renders a unified diff from `old` to `new` under a synthetic filename.
///
/// `from_label` and `to_label` become the `---`/`+++` header annotations.
/// Identical inputs (including empty-vs-empty) yield the headers with no
/// hunks. Deterministic: identical arguments produce byte-identical output.
#[must_use]
pub fn unified_diff(
    file: &str,
    old: &str,
    new: &str,
    from_label: &str,
    to_label: &str,
) -> String {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let ops = line_ops(&old_lines, &new_lines);

    let mut out = String::new();
    out.push_str(&format!("Index: {file}\n"));
    out.push_str(&"=".repeat(67));
    out.push('\n');
    out.push_str(&format!("--- {file}\t{from_label}\n"));
    out.push_str(&format!("+++ {file}\t{to_label}\n"));

    for hunk in build_hunks(&ops) {
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        ));
        for line in &hunk.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Computes the full edit script between two line slices.
///
/// The common prefix and suffix are trimmed first so the quadratic LCS table
/// only covers the changed middle, which is small for typical schema edits.
fn line_ops<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<(Edit, &'a str)> {
    let mut prefix = 0;
    while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < old.len() - prefix
        && suffix < new.len() - prefix
        && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let mut ops = Vec::with_capacity(old.len().max(new.len()));
    ops.extend(old[..prefix].iter().map(|line| (Edit::Keep, *line)));
    ops.extend(middle_ops(
        &old[prefix..old.len() - suffix],
        &new[prefix..new.len() - suffix],
    ));
    ops.extend(old[old.len() - suffix..].iter().map(|line| (Edit::Keep, *line)));
    ops
}

/// LCS-based edit script for the trimmed middle segments.
///
/// Ties prefer deletions, so a replaced block renders as all `-` lines
/// followed by all `+` lines.
fn middle_ops<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<(Edit, &'a str)> {
    let n = old.len();
    let m = new.len();
    // lcs[i][j] = LCS length of old[i..] and new[j..], flattened row-major.
    let idx = |i: usize, j: usize| i * (m + 1) + j;
    let mut lcs = vec![0u32; (n + 1) * (m + 1)];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[idx(i, j)] = if old[i] == new[j] {
                lcs[idx(i + 1, j + 1)] + 1
            } else {
                lcs[idx(i + 1, j)].max(lcs[idx(i, j + 1)])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push((Edit::Keep, old[i]));
            i += 1;
            j += 1;
        } else if lcs[idx(i + 1, j)] >= lcs[idx(i, j + 1)] {
            ops.push((Edit::Delete, old[i]));
            i += 1;
        } else {
            ops.push((Edit::Insert, new[j]));
            j += 1;
        }
    }
    while i < n {
        ops.push((Edit::Delete, old[i]));
        i += 1;
    }
    while j < m {
        ops.push((Edit::Insert, new[j]));
        j += 1;
    }
    ops
}

#[derive(Debug)]
struct Hunk {
    old_start: usize,
    old_count: usize,
    new_start: usize,
    new_count: usize,
    lines: Vec<String>,
}

/// Groups the edit script into hunks with [`CONTEXT`] lines of context.
///
/// Changes whose context windows would touch are merged into one hunk. For
/// an empty side the start is the line before the hunk, per the unified
/// format convention.
fn build_hunks(ops: &[(Edit, &str)]) -> Vec<Hunk> {
    let changed: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, (edit, _))| *edit != Edit::Keep)
        .map(|(i, _)| i)
        .collect();
    if changed.is_empty() {
        return Vec::new();
    }

    // Running totals of old/new lines consumed before each op index.
    let mut olds_before = Vec::with_capacity(ops.len() + 1);
    let mut news_before = Vec::with_capacity(ops.len() + 1);
    let (mut old_line, mut new_line) = (0usize, 0usize);
    olds_before.push(0);
    news_before.push(0);
    for (edit, _) in ops {
        match edit {
            Edit::Keep => {
                old_line += 1;
                new_line += 1;
            }
            Edit::Delete => old_line += 1,
            Edit::Insert => new_line += 1,
        }
        olds_before.push(old_line);
        news_before.push(new_line);
    }

    // Inclusive op ranges of changes to render together.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let (mut start, mut end) = (changed[0], changed[0]);
    for &change in &changed[1..] {
        if change - end <= 2 * CONTEXT {
            end = change;
        } else {
            groups.push((start, end));
            start = change;
            end = change;
        }
    }
    groups.push((start, end));

    let mut hunks = Vec::with_capacity(groups.len());
    for (first, last) in groups {
        let lo = first.saturating_sub(CONTEXT);
        let hi = (last + CONTEXT).min(ops.len() - 1);

        let old_count = olds_before[hi + 1] - olds_before[lo];
        let new_count = news_before[hi + 1] - news_before[lo];
        let old_start = if old_count == 0 {
            olds_before[lo]
        } else {
            olds_before[lo] + 1
        };
        let new_start = if new_count == 0 {
            news_before[lo]
        } else {
            news_before[lo] + 1
        };

        let lines = ops[lo..=hi]
            .iter()
            .map(|(edit, text)| {
                let sigil = match edit {
                    Edit::Keep => ' ',
                    Edit::Delete => '-',
                    Edit::Insert => '+',
                };
                format!("{sigil}{text}")
            })
            .collect();

        hunks.push(Hunk {
            old_start,
            old_count,
            new_start,
            new_count,
            lines,
        });
    }
    hunks
}

// ================================================================
// Markdown summary
// ================================================================

/// Renders the pull-request comment body for a branch diff.
///
/// Embeds [`COMMENT_MARKER`] verbatim and unconditionally, along with the
/// branch names, ids and protection flags, the database and role, the diff
/// in a fenced `diff` block, and a generation timestamp. The timestamp is
/// the only non-deterministic part of the output.
#[must_use]
pub fn summarize(diff: &BranchDiff, project_id: &str) -> String {
    let now = Local::now();
    summary_with_timestamp(
        diff,
        project_id,
        &now.format("%-m/%-d/%Y %-I:%M:%S %p").to_string(),
    )
}

fn summary_with_timestamp(diff: &BranchDiff, project_id: &str, timestamp: &str) -> String {
    let parent = &diff.parent_branch;
    let child = &diff.child_branch;
    let parent_lock = if parent.protected { "🔒" } else { "" };
    let child_lock = if child.protected { "🔒" } else { "" };

    format!(
        "\n<!--- Schema diff between {parent_name} and {child_name} -->\n\
         {COMMENT_MARKER}\n\
         \n\
         # 🧩 Neon schema diff summary\n\
         \n\
         Schema diff between the branch ([{child_name}](https://console.neon.tech)) \
         and its parent ([{parent_name}](https://console.neon.tech)). You can also \
         checkout the [diff](https://console.neon.tech/app/projects/{project_id}/branches/{child_id}#compare-to-parent) \
         in the Neon console for more details.\n\
         \n\
         - Parent branch: {parent_name} ({parent_id}) {parent_lock}\n\
         - Current branch: {child_name} ({child_id}) {child_lock}\n\
         - Database: {database}\n\
         - Role: {role}\n\
         \n\
         ```diff\n\
         {sql_diff}\n\
         ```\n\
         \n\
         This comment was last updated at {timestamp}\n",
        parent_name = parent.name,
        child_name = child.name,
        parent_id = parent.id,
        child_id = child.id,
        database = diff.database,
        role = diff.role,
        sql_diff = diff.sql_diff,
    )
}
