//! ghr-github: read-only GitHub REST API access
//!
//! Provides the [`GitHubApi`] seam used by the chat commands, a reqwest
//! implementation of it, the API record types and the event summarizer.

pub mod api;
pub mod error;
pub mod event;
pub mod types;

pub use api::{GitHubApi, GitHubClient};
pub use error::{GitHubError, Result};
pub use event::{EventSummary, describe};
pub use types::{Event, Gist, Member, Repository, sort_repositories};
