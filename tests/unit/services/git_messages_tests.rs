use gogs_webhook::services::git_messages::{
    commit_or_commits, count_by_author, create_branch_message, issue_message, item_link,
    pull_request_message, push_message, quoted_body, render_commit_list, summarize_authors,
    topic_with_branch, topic_with_item, CommitLine,
};

fn line(author: &str, message: &str) -> CommitLine {
    CommitLine {
        author: author.to_string(),
        short_sha: "d8fce16".to_string(),
        message: message.to_string(),
        url: "http://localhost:3000/john/try-git/commit/d8fce16".to_string(),
    }
}

fn numbered(count: usize) -> Vec<CommitLine> {
    (0..count)
        .map(|i| line("John", &format!("Commit {}", i)))
        .collect()
}

#[test]
fn test_commit_row_format() {
    let rendered = render_commit_list(&[line("John", "Webhook Test")], 20);
    assert_eq!(
        rendered,
        "* Webhook Test ([d8fce16](http://localhost:3000/john/try-git/commit/d8fce16))"
    );
}

#[test]
fn test_commit_list_within_limit_keeps_order() {
    let commits = numbered(5);
    let rendered = render_commit_list(&commits, 5);
    let rows: Vec<&str> = rendered.lines().collect();

    assert_eq!(rows.len(), 5);
    for (i, row) in rows.iter().enumerate() {
        assert!(row.starts_with(&format!("* Commit {} (", i)));
    }
    assert!(!rendered.contains("more commit(s)"));
}

#[test]
fn test_commit_list_over_limit_is_truncated() {
    let commits = numbered(30);
    let rendered = render_commit_list(&commits, 10);
    let rows: Vec<&str> = rendered.lines().collect();

    assert_eq!(rows.len(), 11);
    assert_eq!(rows.iter().filter(|row| row.starts_with("* ")).count(), 10);
    assert!(rows[9].starts_with("* Commit 9 ("));
    assert_eq!(rows[10], "[and 20 more commit(s)]");
}

#[test]
fn test_commit_list_keeps_duplicates() {
    let commits = vec![line("John", "Same"), line("John", "Same")];
    assert_eq!(render_commit_list(&commits, 20).lines().count(), 2);
}

#[test]
fn test_authors_sorted_alphabetically() {
    let commits = vec![
        line("John", "a"),
        line("Benjamin", "b"),
        line("John", "c"),
        line("alice", "d"),
    ];

    assert_eq!(
        count_by_author(&commits),
        vec![("alice", 1), ("Benjamin", 1), ("John", 2)]
    );
    assert_eq!(
        summarize_authors(&commits),
        "alice (1), Benjamin (1) and John (2)"
    );
}

#[test]
fn test_author_counts_sum_to_total() {
    let commits = vec![
        line("Zed", "a"),
        line("Amy", "b"),
        line("Zed", "c"),
        line("Mo", "d"),
        line("Amy", "e"),
    ];
    let total: usize = count_by_author(&commits).iter().map(|(_, n)| n).sum();
    assert_eq!(total, commits.len());
}

#[test]
fn test_author_summary_shapes() {
    assert_eq!(summarize_authors(&[line("John", "a")]), "John (1)");
    assert_eq!(
        summarize_authors(&[line("John", "a"), line("Benjamin", "b")]),
        "Benjamin (1) and John (1)"
    );
    assert_eq!(summarize_authors(&[]), "");
}

#[test]
fn test_pluralization() {
    assert_eq!(commit_or_commits(1), "commit");
    assert_eq!(commit_or_commits(2), "commits");
    assert_eq!(commit_or_commits(30), "commits");
}

#[test]
fn test_push_message_counts_all_commits() {
    let commits = numbered(30);
    let message = push_message("john", "http://compare", "master", &commits, 20);

    assert!(message.starts_with(
        "john [pushed](http://compare) 30 commits to branch master. Commits by John (30).\n\n"
    ));
    assert!(message.ends_with("[and 10 more commit(s)]"));
}

#[test]
fn test_topics() {
    assert_eq!(topic_with_branch("try-git", "master"), "try-git / master");
    assert_eq!(
        topic_with_item("test", "Issue", 3, "New test issue"),
        "test / Issue #3 New test issue"
    );
}

#[test]
fn test_item_links() {
    assert_eq!(item_link("PR", 1, None, "http://pr"), "[PR #1](http://pr)");
    assert_eq!(
        item_link("PR", 1, Some("Title"), "http://pr"),
        "[PR #1 Title](http://pr)"
    );
}

#[test]
fn test_branch_and_pull_request_messages() {
    assert_eq!(
        create_branch_message("john", "my_feature", "http://src/my_feature"),
        "john created [my_feature](http://src/my_feature) branch."
    );
    assert_eq!(
        pull_request_message("john", "opened", "[PR #1](http://pr)", "feature", "master"),
        "john opened [PR #1](http://pr) from `feature` to `master`."
    );
}

#[test]
fn test_quoted_body() {
    assert_eq!(quoted_body("Test"), ":\n\n~~~ quote\nTest\n~~~");
    assert_eq!(quoted_body("line one\nline two"), ":\n\n~~~ quote\nline one\nline two\n~~~");
    assert_eq!(quoted_body(""), ".");
    assert_eq!(quoted_body("  \n"), ".");
}

#[test]
fn test_issue_message_with_assignee() {
    assert_eq!(
        issue_message("kostekIV", "assigned", "[Issue #3](http://i)", Some("kostekIV"), "Test"),
        "kostekIV assigned [Issue #3](http://i) (assigned to kostekIV):\n\n~~~ quote\nTest\n~~~"
    );
}
