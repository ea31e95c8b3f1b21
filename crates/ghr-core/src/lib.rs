//! ghr-core: gh-relay core library
//!
//! Configuration, the chat host contract (channels and regex-triggered
//! commands), message templates, date formatting and the posting policy
//! shared by every gh-relay command.

pub mod command;
pub mod config;
pub mod date;
pub mod error;
pub mod output;
pub mod template;

pub use command::{Channel, Command, CommandRegistry, Invocation};
pub use config::{
    Config, DateConfig, GitHubConfig, LimitsConfig, MessageConfig, ShortUrlConfig,
    ThresholdConfig,
};
pub use date::DateFormatter;
pub use error::{Error, Result};
pub use output::post_items;
pub use template::{TemplateVars, render};
