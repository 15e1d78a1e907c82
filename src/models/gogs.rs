//! Webhook payloads as sent by Gogs. Only the fields the formatter reads are
//! modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::EventKind;
use crate::utils::error::{AppError, Result};

pub const BRANCH_REF_PREFIX: &str = "refs/heads/";
pub const TAG_REF_PREFIX: &str = "refs/tags/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.login
        } else {
            &self.username
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub owner: Option<User>,
}

impl Repository {
    pub fn branch_url(&self, branch: &str) -> String {
        format!("{}/src/{}", self.html_url, branch)
    }

    pub fn issue_url(&self, number: u64) -> String {
        format!("{}/issues/{}", self.html_url, number)
    }

    pub fn compare_url(&self, before: &str, after: &str) -> String {
        format!("{}/compare/{}...{}", self.html_url, before, after)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadCommit {
    pub id: String,
    pub message: String,
    pub url: String,
    pub author: CommitAuthor,
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl PayloadCommit {
    /// Account name when the author is a known user, otherwise the first word
    /// of the name recorded in the commit.
    pub fn author_name(&self) -> &str {
        if !self.author.username.is_empty() {
            return &self.author.username;
        }
        self.author
            .name
            .split_whitespace()
            .next()
            .unwrap_or(&self.author.name)
    }

    pub fn short_sha(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }

    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub reference: String,
    pub before: String,
    pub after: String,
    #[serde(default)]
    pub compare_url: String,
    #[serde(default)]
    pub commits: Vec<PayloadCommit>,
    pub repository: Repository,
    #[serde(default)]
    pub pusher: Option<User>,
    pub sender: User,
}

impl PushPayload {
    /// Branch name with `refs/heads/` stripped. Tag refs are returned as is;
    /// check [`PushPayload::is_tag`] first.
    pub fn branch(&self) -> &str {
        self.reference
            .strip_prefix(BRANCH_REF_PREFIX)
            .unwrap_or(&self.reference)
    }

    pub fn is_tag(&self) -> bool {
        self.reference.starts_with(TAG_REF_PREFIX)
    }

    /// The pushing user, falling back to the sender on older Gogs versions
    /// that omit `pusher`.
    pub fn pusher(&self) -> &User {
        self.pusher.as_ref().unwrap_or(&self.sender)
    }

    pub fn compare_url(&self) -> String {
        if self.compare_url.is_empty() {
            self.repository.compare_url(&self.before, &self.after)
        } else {
            self.compare_url.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayload {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub ref_type: String,
    pub repository: Repository,
    pub sender: User,
}

impl CreatePayload {
    pub fn branch(&self) -> &str {
        self.reference
            .strip_prefix(BRANCH_REF_PREFIX)
            .unwrap_or(&self.reference)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Instance-wide id. Gogs topics are keyed on this, not on `number`.
    #[serde(default)]
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub html_url: String,
    pub head_branch: String,
    pub base_branch: String,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub merged_by: Option<User>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestPayload {
    pub action: String,
    #[serde(default)]
    pub number: u64,
    pub pull_request: PullRequest,
    pub repository: Repository,
    pub sender: User,
}

impl PullRequest {
    /// Number shown in the topic: the `id`, or `number` when the payload
    /// carries no id.
    pub fn topic_number(&self) -> u64 {
        if self.id == 0 {
            self.number
        } else {
            self.id
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesPayload {
    pub action: String,
    #[serde(default)]
    pub number: u64,
    pub issue: Issue,
    pub repository: Repository,
    pub sender: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: u64,
    pub html_url: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCommentPayload {
    pub action: String,
    pub issue: Issue,
    pub comment: Comment,
    pub repository: Repository,
    pub sender: User,
}

#[derive(Debug, Clone)]
pub enum GogsEvent {
    Push(PushPayload),
    Create(CreatePayload),
    PullRequest(PullRequestPayload),
    Issues(IssuesPayload),
    IssueComment(IssueCommentPayload),
}

impl GogsEvent {
    pub fn parse(kind: EventKind, body: &str) -> Result<Self> {
        let event = match kind {
            EventKind::Push => GogsEvent::Push(from_body(kind, body)?),
            EventKind::Create => GogsEvent::Create(from_body(kind, body)?),
            EventKind::PullRequest => GogsEvent::PullRequest(from_body(kind, body)?),
            EventKind::Issues => GogsEvent::Issues(from_body(kind, body)?),
            EventKind::IssueComment => GogsEvent::IssueComment(from_body(kind, body)?),
        };
        Ok(event)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            GogsEvent::Push(_) => EventKind::Push,
            GogsEvent::Create(_) => EventKind::Create,
            GogsEvent::PullRequest(_) => EventKind::PullRequest,
            GogsEvent::Issues(_) => EventKind::Issues,
            GogsEvent::IssueComment(_) => EventKind::IssueComment,
        }
    }

    pub fn repository(&self) -> &Repository {
        match self {
            GogsEvent::Push(payload) => &payload.repository,
            GogsEvent::Create(payload) => &payload.repository,
            GogsEvent::PullRequest(payload) => &payload.repository,
            GogsEvent::Issues(payload) => &payload.repository,
            GogsEvent::IssueComment(payload) => &payload.repository,
        }
    }

    /// Branch the event is about, for kinds that have one.
    pub fn branch(&self) -> Option<&str> {
        match self {
            GogsEvent::Push(payload) if payload.is_tag() => None,
            GogsEvent::Push(payload) => Some(payload.branch()),
            GogsEvent::Create(payload) => Some(payload.branch()),
            GogsEvent::PullRequest(_) | GogsEvent::Issues(_) | GogsEvent::IssueComment(_) => None,
        }
    }
}

fn from_body<T>(kind: EventKind, body: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        AppError::malformed_payload(format!("invalid `{}` payload: {}", kind, e))
    })
}
