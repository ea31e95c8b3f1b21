//! ghr-plugin: GitHub chat commands
//!
//! Relays gists, organization members, repositories and user activity into
//! a chat channel, with links shortened through the configured services.
//!
//! | trigger      | usage                           |
//! |--------------|---------------------------------|
//! | `ghGist`     | `ghGist [user] [count]`         |
//! | `ghMembers`  | `ghMembers <org>`               |
//! | `ghRepos`    | `ghRepos [owner] [count]`       |
//! | `ghActivity` | `ghActivity [user] [count]`     |

pub mod commands;
pub mod plugin;

pub use commands::{ActivityCommand, GistCommand, MembersCommand, PluginContext, ReposCommand};
pub use plugin::GitHubPlugin;
