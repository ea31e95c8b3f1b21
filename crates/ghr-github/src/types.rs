//! GitHub REST API types
//!
//! Only the fields the chat commands read are modelled.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// A gist
///
/// Only the number of files is shown, so their contents are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct Gist {
    pub id: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub files: HashMap<String, IgnoredAny>,
}

impl Gist {
    /// The later of creation and last update
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.created_at.max(self.updated_at)
    }
}

/// An organization member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub login: String,
    pub html_url: String,
}

/// A repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// Sort by fork count, then watcher count (both descending), then name
pub fn sort_repositories(repos: &mut [Repository]) {
    repos.sort_by(listing_order);
}

/// Compare two repositories in listing order
pub fn listing_order(a: &Repository, b: &Repository) -> Ordering {
    b.forks_count
        .cmp(&a.forks_count)
        .then_with(|| b.watchers_count.cmp(&a.watchers_count))
        .then_with(|| a.name.cmp(&b.name))
}

/// A user activity event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Event type tag, e.g. `PushEvent`
    #[serde(rename = "type")]
    pub event_type: String,
    pub actor: Actor,
    pub repo: EventRepo,
    /// Type-specific payload, decoded by [`crate::event::describe`]
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/name`
    pub name: String,
}
