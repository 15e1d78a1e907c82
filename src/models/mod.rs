use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::{AppError, Result};

pub mod gogs;

pub use gogs::*;

/// Raw inbound request as handed over by the receiving endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// A formatted chat message and the topic it is grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub topic: String,
    pub message: String,
}

impl Notification {
    pub fn new(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub request_id: String,
    pub event: EventKind,
    /// `None` when the event was filtered out or carried nothing to report.
    pub notification: Option<Notification>,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl ProcessingResult {
    pub fn delivered(&self) -> bool {
        self.notification.is_some()
    }
}

/// Value of the `X-Gogs-Event` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Push,
    Create,
    PullRequest,
    Issues,
    IssueComment,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::Create => "create",
            EventKind::PullRequest => "pull_request",
            EventKind::Issues => "issues",
            EventKind::IssueComment => "issue_comment",
        }
    }

    /// Whether the branch allow-list constrains this kind of event.
    pub fn is_branch_filtered(&self) -> bool {
        match self {
            EventKind::Push => true,
            EventKind::Create
            | EventKind::PullRequest
            | EventKind::Issues
            | EventKind::IssueComment => false,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "push" => Ok(EventKind::Push),
            "create" => Ok(EventKind::Create),
            "pull_request" => Ok(EventKind::PullRequest),
            "issues" => Ok(EventKind::Issues),
            "issue_comment" => Ok(EventKind::IssueComment),
            other => Err(AppError::unsupported_event_kind(format!(
                "Gogs event `{}` is not supported",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestAction {
    Opened,
    Closed,
    Merged,
    Reopened,
    Edited,
    Assigned,
    Synchronized,
}

impl PullRequestAction {
    /// Gogs reports a merge as `closed` with the `merged` flag set.
    pub fn resolve(action: &str, merged: bool) -> Result<Self> {
        let action: Self = action.parse()?;
        match action {
            PullRequestAction::Closed if merged => Ok(PullRequestAction::Merged),
            other => Ok(other),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            PullRequestAction::Opened => "opened",
            PullRequestAction::Closed => "closed",
            PullRequestAction::Merged => "merged",
            PullRequestAction::Reopened => "reopened",
            PullRequestAction::Edited => "edited",
            PullRequestAction::Assigned => "assigned",
            PullRequestAction::Synchronized => "synchronized",
        }
    }
}

impl FromStr for PullRequestAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "opened" => Ok(PullRequestAction::Opened),
            "closed" => Ok(PullRequestAction::Closed),
            "merged" => Ok(PullRequestAction::Merged),
            "reopened" => Ok(PullRequestAction::Reopened),
            "edited" => Ok(PullRequestAction::Edited),
            "assigned" => Ok(PullRequestAction::Assigned),
            "synchronized" => Ok(PullRequestAction::Synchronized),
            other => Err(AppError::unsupported_event_kind(format!(
                "pull request action `{}` is not supported",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueAction {
    Opened,
    Reopened,
    Edited,
    Assigned,
    Closed,
}

impl IssueAction {
    pub fn verb(&self) -> &'static str {
        match self {
            IssueAction::Opened => "opened",
            IssueAction::Reopened => "reopened",
            IssueAction::Edited => "edited",
            IssueAction::Assigned => "assigned",
            IssueAction::Closed => "closed",
        }
    }
}

impl FromStr for IssueAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "opened" => Ok(IssueAction::Opened),
            "reopened" => Ok(IssueAction::Reopened),
            "edited" => Ok(IssueAction::Edited),
            "assigned" => Ok(IssueAction::Assigned),
            "closed" => Ok(IssueAction::Closed),
            other => Err(AppError::unsupported_event_kind(format!(
                "issue action `{}` is not supported",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCommentAction {
    New,
    Edited,
}

impl FromStr for IssueCommentAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created" => Ok(IssueCommentAction::New),
            "edited" => Ok(IssueCommentAction::Edited),
            other => Err(AppError::unsupported_event_kind(format!(
                "issue comment action `{}` is not supported",
                other
            ))),
        }
    }
}
