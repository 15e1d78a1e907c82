//! Markdown building blocks shared by the per-event formatters.

use std::collections::BTreeMap;

/// One commit row as it appears in a push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLine {
    pub author: String,
    pub short_sha: String,
    pub message: String,
    pub url: String,
}

pub fn topic_with_branch(repo: &str, branch: &str) -> String {
    format!("{} / {}", repo, branch)
}

/// `<repo> / PR #1 Title` or `<repo> / Issue #3 Title`.
pub fn topic_with_item(repo: &str, kind: &str, number: u64, title: &str) -> String {
    format!("{} / {} #{} {}", repo, kind, number, title)
}

/// Renders at most `limit` rows followed by an overflow line for the rest.
pub fn render_commit_list(commits: &[CommitLine], limit: usize) -> String {
    let mut lines: Vec<String> = commits
        .iter()
        .take(limit)
        .map(|commit| format!("* {} ([{}]({}))", commit.message, commit.short_sha, commit.url))
        .collect();

    if commits.len() > limit {
        lines.push(format!("[and {} more commit(s)]", commits.len() - limit));
    }

    lines.join("\n")
}

/// Commit counts per author, alphabetically by name ignoring case. Names that
/// differ only in case keep their byte order.
pub fn count_by_author(commits: &[CommitLine]) -> Vec<(&str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for commit in commits {
        *counts.entry(commit.author.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
    counts.sort_by_key(|(name, _)| name.to_lowercase());
    counts
}

/// `Benjamin (1)`, `Benjamin (1) and John (1)`, `A (1), B (2) and C (1)`.
pub fn summarize_authors(commits: &[CommitLine]) -> String {
    let parts: Vec<String> = count_by_author(commits)
        .into_iter()
        .map(|(name, count)| format!("{} ({})", name, count))
        .collect();

    match parts.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

pub fn commit_or_commits(count: usize) -> &'static str {
    if count == 1 {
        "commit"
    } else {
        "commits"
    }
}

pub fn push_message(
    pusher: &str,
    compare_url: &str,
    branch: &str,
    commits: &[CommitLine],
    limit: usize,
) -> String {
    format!(
        "{} [pushed]({}) {} {} to branch {}. Commits by {}.\n\n{}",
        pusher,
        compare_url,
        commits.len(),
        commit_or_commits(commits.len()),
        branch,
        summarize_authors(commits),
        render_commit_list(commits, limit),
    )
}

pub fn create_branch_message(actor: &str, branch: &str, url: &str) -> String {
    format!("{} created [{}]({}) branch.", actor, branch, url)
}

/// Link text for a pull request or issue; the title is only embedded when the
/// topic no longer carries it.
pub fn item_link(kind: &str, number: u64, title: Option<&str>, url: &str) -> String {
    match title {
        Some(title) => format!("[{} #{} {}]({})", kind, number, title, url),
        None => format!("[{} #{}]({})", kind, number, url),
    }
}

pub fn pull_request_message(
    actor: &str,
    verb: &str,
    link: &str,
    head_branch: &str,
    base_branch: &str,
) -> String {
    format!(
        "{} {} {} from `{}` to `{}`.",
        actor, verb, link, head_branch, base_branch
    )
}

/// `~~~ quote` block, or a closing period when there is nothing to quote.
pub fn quoted_body(body: &str) -> String {
    if body.trim().is_empty() {
        ".".to_string()
    } else {
        format!(":\n\n~~~ quote\n{}\n~~~", body)
    }
}

pub fn issue_message(actor: &str, verb: &str, link: &str, assignee: Option<&str>, body: &str) -> String {
    let assignee = assignee
        .map(|name| format!(" (assigned to {})", name))
        .unwrap_or_default();
    format!("{} {} {}{}{}", actor, verb, link, assignee, quoted_body(body))
}
