//! Host contract traits
//!
//! `Channel` is implemented by the chat host, `Command` by plugins.

use async_trait::async_trait;

use crate::Result;

/// A chat channel the bot can talk to
#[async_trait]
pub trait Channel: Send + Sync {
    /// Post a message to the channel
    ///
    /// When `to` is set the message is addressed to that user.
    async fn say(&self, text: &str, to: Option<&str>) -> Result<()>;
}

/// A single matched chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Nickname of the sender
    pub from: String,
    /// The full message text
    pub message: String,
    /// Capture groups 1..n, `None` for groups that did not participate
    pub captures: Vec<Option<String>>,
}

impl Invocation {
    pub fn new(from: &str, message: &str, captures: Vec<Option<String>>) -> Self {
        Self {
            from: from.to_string(),
            message: message.to_string(),
            captures,
        }
    }

    /// Capture group by 1-based index, as in the regex
    pub fn group(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.captures.get(i))
            .and_then(|c| c.as_deref())
    }
}

/// A regex-triggered chat command
#[async_trait]
pub trait Command: Send + Sync {
    /// Unique command name
    fn name(&self) -> &str;

    /// Regular expression matched against the whole message
    fn pattern(&self) -> &str;

    /// Short usage line for help output
    fn usage(&self) -> &str;

    /// Run the command
    ///
    /// Failures a user should see are reported through `channel`; an `Err`
    /// means the channel itself could not be reached.
    async fn execute(&self, invocation: &Invocation, channel: &dyn Channel) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_group_indexing() {
        let invocation = Invocation::new(
            "alice",
            "ghGist bob",
            vec![Some("bob".to_string()), None],
        );

        assert_eq!(invocation.group(0), None);
        assert_eq!(invocation.group(1), Some("bob"));
        assert_eq!(invocation.group(2), None);
        assert_eq!(invocation.group(3), None);
    }
}
