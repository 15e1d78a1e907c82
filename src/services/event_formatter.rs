use crate::config::{IntegrationConfig, DEFAULT_COMMITS_LIMIT};
use crate::models::{
    CreatePayload, GogsEvent, IssueAction, IssueCommentAction, IssueCommentPayload,
    IssuesPayload, Notification, PullRequestAction, PullRequestPayload, PushPayload,
};
use crate::services::branch_filter::BranchFilter;
use crate::services::git_messages::{self, CommitLine};
use crate::utils::error::Result;

/// Per-request settings supplied by the receiving endpoint.
#[derive(Debug, Clone, Default)]
pub struct WebhookOptions {
    pub branches: BranchFilter,
    /// Replaces the derived topic of every notification.
    pub topic: Option<String>,
}

impl WebhookOptions {
    pub fn new(branches: Option<&str>, topic: Option<&str>) -> Self {
        Self {
            branches: BranchFilter::parse(branches),
            topic: topic
                .map(str::trim)
                .filter(|topic| !topic.is_empty())
                .map(str::to_string),
        }
    }

    pub fn from_config(config: &IntegrationConfig) -> Self {
        Self::new(config.branches.as_deref(), config.topic.as_deref())
    }

    fn topic_or(&self, derived: impl FnOnce() -> String) -> String {
        self.topic.clone().unwrap_or_else(derived)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Emit(Notification),
    /// The branch is not on the allow-list.
    Filtered { branch: String },
    /// Nothing worth reporting, e.g. a push without commits.
    Skipped { reason: String },
}

impl FormatOutcome {
    pub fn should_emit(&self) -> bool {
        matches!(self, FormatOutcome::Emit(_))
    }

    pub fn into_notification(self) -> Option<Notification> {
        match self {
            FormatOutcome::Emit(notification) => Some(notification),
            FormatOutcome::Filtered { .. } | FormatOutcome::Skipped { .. } => None,
        }
    }
}

/// Turns Gogs events into chat notifications. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct EventFormatter {
    commits_limit: usize,
}

impl Default for EventFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_COMMITS_LIMIT)
    }
}

impl EventFormatter {
    pub fn new(commits_limit: usize) -> Self {
        Self {
            commits_limit: commits_limit.max(1),
        }
    }

    pub fn from_config(config: &IntegrationConfig) -> Self {
        Self::new(config.commits_limit)
    }

    pub fn commits_limit(&self) -> usize {
        self.commits_limit
    }

    pub fn format(&self, event: &GogsEvent, options: &WebhookOptions) -> Result<FormatOutcome> {
        if event.kind().is_branch_filtered() {
            if let Some(branch) = event.branch() {
                if !options.branches.allows(branch) {
                    return Ok(FormatOutcome::Filtered {
                        branch: branch.to_string(),
                    });
                }
            }
        }

        match event {
            GogsEvent::Push(payload) => Ok(self.format_push(payload, options)),
            GogsEvent::Create(payload) => Ok(FormatOutcome::Emit(format_create(payload, options))),
            GogsEvent::PullRequest(payload) => {
                format_pull_request(payload, options).map(FormatOutcome::Emit)
            }
            GogsEvent::Issues(payload) => format_issue(payload, options).map(FormatOutcome::Emit),
            GogsEvent::IssueComment(payload) => {
                format_issue_comment(payload, options).map(FormatOutcome::Emit)
            }
        }
    }

    fn format_push(&self, payload: &PushPayload, options: &WebhookOptions) -> FormatOutcome {
        if payload.is_tag() {
            return FormatOutcome::Skipped {
                reason: format!("push to tag `{}`", payload.reference),
            };
        }
        if payload.commits.is_empty() {
            return FormatOutcome::Skipped {
                reason: "push without commits".to_string(),
            };
        }

        let branch = payload.branch();
        let commits: Vec<CommitLine> = payload
            .commits
            .iter()
            .map(|commit| CommitLine {
                author: commit.author_name().to_string(),
                short_sha: commit.short_sha().to_string(),
                message: commit.title().to_string(),
                url: commit.url.clone(),
            })
            .collect();

        let message = git_messages::push_message(
            payload.pusher().display_name(),
            &payload.compare_url(),
            branch,
            &commits,
            self.commits_limit,
        );
        let topic =
            options.topic_or(|| git_messages::topic_with_branch(&payload.repository.name, branch));

        FormatOutcome::Emit(Notification::new(topic, message))
    }
}

fn format_create(payload: &CreatePayload, options: &WebhookOptions) -> Notification {
    let branch = payload.branch();
    let message = git_messages::create_branch_message(
        payload.sender.display_name(),
        branch,
        &payload.repository.branch_url(branch),
    );
    let topic =
        options.topic_or(|| git_messages::topic_with_branch(&payload.repository.name, branch));

    Notification::new(topic, message)
}

fn format_pull_request(payload: &PullRequestPayload, options: &WebhookOptions) -> Result<Notification> {
    let pull_request = &payload.pull_request;
    let action = PullRequestAction::resolve(&payload.action, pull_request.merged)?;

    let actor = match (action, &pull_request.merged_by) {
        (PullRequestAction::Merged, Some(merged_by)) => merged_by.display_name(),
        _ => payload.sender.display_name(),
    };
    let title = options.topic.as_ref().map(|_| pull_request.title.as_str());
    let link = git_messages::item_link("PR", pull_request.number, title, &pull_request.html_url);

    let message = git_messages::pull_request_message(
        actor,
        action.verb(),
        &link,
        &pull_request.head_branch,
        &pull_request.base_branch,
    );
    let topic = options.topic_or(|| {
        git_messages::topic_with_item(
            &payload.repository.name,
            "PR",
            pull_request.topic_number(),
            &pull_request.title,
        )
    });

    Ok(Notification::new(topic, message))
}

fn format_issue(payload: &IssuesPayload, options: &WebhookOptions) -> Result<Notification> {
    let issue = &payload.issue;
    let action: IssueAction = payload.action.parse()?;

    let assignee = match (action, &issue.assignee) {
        (IssueAction::Assigned, Some(assignee)) => Some(assignee.display_name()),
        _ => None,
    };
    let title = options.topic.as_ref().map(|_| issue.title.as_str());
    let link = git_messages::item_link(
        "Issue",
        issue.number,
        title,
        &payload.repository.issue_url(issue.number),
    );

    let message = git_messages::issue_message(
        payload.sender.display_name(),
        action.verb(),
        &link,
        assignee,
        &issue.body,
    );
    let topic = options.topic_or(|| {
        git_messages::topic_with_item(&payload.repository.name, "Issue", issue.number, &issue.title)
    });

    Ok(Notification::new(topic, message))
}

fn format_issue_comment(
    payload: &IssueCommentPayload,
    options: &WebhookOptions,
) -> Result<Notification> {
    let issue = &payload.issue;
    let action: IssueCommentAction = payload.action.parse()?;

    let verb = match action {
        IssueCommentAction::New => format!("[commented]({}) on", payload.comment.html_url),
        IssueCommentAction::Edited => {
            format!("edited a [comment]({}) on", payload.comment.html_url)
        }
    };
    let title = options.topic.as_ref().map(|_| issue.title.as_str());
    let link = git_messages::item_link(
        "Issue",
        issue.number,
        title,
        &payload.repository.issue_url(issue.number),
    );

    let message = git_messages::issue_message(
        payload.sender.display_name(),
        &verb,
        &link,
        None,
        &payload.comment.body,
    );
    let topic = options.topic_or(|| {
        git_messages::topic_with_item(&payload.repository.name, "Issue", issue.number, &issue.title)
    });

    Ok(Notification::new(topic, message))
}
