//! Event summaries for the activity feed
//!
//! Turns a GitHub event into a one-line description plus the URL that
//! should be shortened and appended to it.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::Event;

/// Text and link describing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub text: String,
    pub url: String,
}

impl EventSummary {
    fn new(text: String, url: String) -> Self {
        Self { text, url }
    }

    /// Final chat line with the (possibly shortened) URL appended
    pub fn line(&self, url: &str) -> String {
        format!("{} - {}", self.text, url)
    }
}

#[derive(Deserialize)]
struct HtmlLink {
    html_url: String,
}

#[derive(Deserialize)]
struct IssuesPayload {
    action: String,
    issue: HtmlLink,
}

#[derive(Deserialize)]
struct IssueCommentPayload {
    comment: HtmlLink,
}

#[derive(Deserialize)]
struct PushPayload {
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    commits: Vec<serde_json::Value>,
    before: String,
    head: String,
}

#[derive(Deserialize)]
struct ForkPayload {
    forkee: HtmlLink,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: HtmlLink,
}

#[derive(Deserialize)]
struct CreatePayload {
    ref_type: String,
    #[serde(rename = "ref", default)]
    git_ref: Option<String>,
}

fn payload<T: DeserializeOwned>(event: &Event) -> Option<T> {
    match serde_json::from_value(event.payload.clone()) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("Malformed {} payload in event {}: {}", event.event_type, event.id, e);
            None
        }
    }
}

/// Describe an event, `None` for event types the feed does not show
pub fn describe(event: &Event) -> Option<EventSummary> {
    let repo = &event.repo.name;
    let repo_url = format!("https://github.com/{}", repo);

    let summary = match event.event_type.as_str() {
        "IssuesEvent" => {
            let p: IssuesPayload = payload(event)?;
            EventSummary::new(format!("{} issue - {}", p.action, repo), p.issue.html_url)
        }
        "IssueCommentEvent" => {
            let p: IssueCommentPayload = payload(event)?;
            EventSummary::new(format!("Commented issue - {}", repo), p.comment.html_url)
        }
        "PushEvent" => {
            let p: PushPayload = payload(event)?;
            let size = p.size.unwrap_or(p.commits.len() as u64);
            EventSummary::new(
                format!("Pushed {} commits to {}", size, repo),
                format!("{}/compare/{}...{}", repo_url, p.before, p.head),
            )
        }
        "WatchEvent" => EventSummary::new(format!("Starred repository {}", repo), repo_url),
        "ForkEvent" => {
            let p: ForkPayload = payload(event)?;
            EventSummary::new(format!("Forked {}", repo), p.forkee.html_url)
        }
        "PullRequestEvent" => {
            let p: PullRequestPayload = payload(event)?;
            EventSummary::new(
                format!("{} pull request - {}", p.action, repo),
                p.pull_request.html_url,
            )
        }
        "CreateEvent" => {
            let p: CreatePayload = payload(event)?;
            let text = match p.git_ref {
                Some(git_ref) if p.ref_type != "repository" => {
                    format!("Created {} {} in {}", p.ref_type, git_ref, repo)
                }
                _ => format!("Created repository {}", repo),
            };
            EventSummary::new(text, repo_url)
        }
        other => {
            debug!("Skipping unsupported event type {}", other);
            return None;
        }
    };

    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(event_type: &str, payload: serde_json::Value) -> Event {
        serde_json::from_value(json!({
            "id": "1",
            "type": event_type,
            "actor": {"login": "octocat"},
            "repo": {"name": "octocat/hello"},
            "payload": payload,
            "created_at": "2024-05-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_issues_event() {
        let e = event(
            "IssuesEvent",
            json!({"action": "opened", "issue": {"html_url": "https://github.com/octocat/hello/issues/7"}}),
        );
        let summary = describe(&e).unwrap();
        assert_eq!(summary.text, "opened issue - octocat/hello");
        assert_eq!(summary.url, "https://github.com/octocat/hello/issues/7");
        assert_eq!(
            summary.line("https://is.gd/x"),
            "opened issue - octocat/hello - https://is.gd/x"
        );
    }

    #[test]
    fn test_issue_comment_event() {
        let e = event(
            "IssueCommentEvent",
            json!({"action": "created", "comment": {"html_url": "https://github.com/c/1"}}),
        );
        let summary = describe(&e).unwrap();
        assert_eq!(summary.text, "Commented issue - octocat/hello");
        assert_eq!(summary.url, "https://github.com/c/1");
    }

    #[test]
    fn test_push_event() {
        let e = event(
            "PushEvent",
            json!({"size": 3, "before": "aaa", "head": "bbb", "commits": []}),
        );
        let summary = describe(&e).unwrap();
        assert_eq!(summary.text, "Pushed 3 commits to octocat/hello");
        assert_eq!(summary.url, "https://github.com/octocat/hello/compare/aaa...bbb");
    }

    #[test]
    fn test_push_event_without_size_counts_commits() {
        let e = event(
            "PushEvent",
            json!({"before": "a", "head": "b", "commits": [{"sha": "1"}, {"sha": "2"}]}),
        );
        assert_eq!(describe(&e).unwrap().text, "Pushed 2 commits to octocat/hello");
    }

    #[test]
    fn test_watch_event() {
        let e = event("WatchEvent", json!({"action": "started"}));
        let summary = describe(&e).unwrap();
        assert_eq!(summary.text, "Starred repository octocat/hello");
        assert_eq!(summary.url, "https://github.com/octocat/hello");
    }

    #[test]
    fn test_fork_and_pull_request_events() {
        let fork = event("ForkEvent", json!({"forkee": {"html_url": "https://github.com/me/hello"}}));
        assert_eq!(
            describe(&fork).unwrap(),
            EventSummary::new("Forked octocat/hello".into(), "https://github.com/me/hello".into())
        );

        let pr = event(
            "PullRequestEvent",
            json!({"action": "closed", "pull_request": {"html_url": "https://github.com/p/2"}}),
        );
        assert_eq!(describe(&pr).unwrap().text, "closed pull request - octocat/hello");
    }

    #[test]
    fn test_create_event() {
        let branch = event("CreateEvent", json!({"ref_type": "branch", "ref": "dev"}));
        assert_eq!(describe(&branch).unwrap().text, "Created branch dev in octocat/hello");

        let repo = event("CreateEvent", json!({"ref_type": "repository", "ref": null}));
        assert_eq!(describe(&repo).unwrap().text, "Created repository octocat/hello");
    }

    #[test]
    fn test_unsupported_event_skipped() {
        assert!(describe(&event("GollumEvent", json!({"pages": []}))).is_none());
    }

    #[test]
    fn test_malformed_payload_skipped() {
        assert!(describe(&event("IssuesEvent", json!({"action": "opened"}))).is_none());
    }
}
