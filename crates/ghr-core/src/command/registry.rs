//! Command registry for regex dispatch

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, info};

use crate::command::{Channel, Command, Invocation};
use crate::Result;

struct Route {
    regex: Regex,
    command: Arc<dyn Command>,
}

/// Ordered table of regex triggers and their commands
///
/// Patterns are tried in registration order; the first match wins.
pub struct CommandRegistry {
    routes: Vec<Route>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a command
    ///
    /// A command with the same name is replaced in place, keeping its
    /// position in the dispatch order.
    ///
    /// # Errors
    /// Returns an error if the command pattern is not a valid regex
    pub fn register(&mut self, command: Arc<dyn Command>) -> Result<()> {
        let regex = Regex::new(command.pattern())?;
        let route = Route { regex, command };

        match self
            .routes
            .iter_mut()
            .find(|r| r.command.name() == route.command.name())
        {
            Some(existing) => *existing = route,
            None => self.routes.push(route),
        }

        Ok(())
    }

    /// Get a command by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.routes
            .iter()
            .find(|r| r.command.name() == name)
            .map(|r| r.command.clone())
    }

    /// Pattern to command name mapping, in dispatch order
    pub fn routes(&self) -> Vec<(&str, &str)> {
        self.routes
            .iter()
            .map(|r| (r.regex.as_str(), r.command.name()))
            .collect()
    }

    /// Dispatch a channel message
    ///
    /// Returns `Ok(false)` when no pattern matched.
    pub async fn dispatch(&self, from: &str, message: &str, channel: &dyn Channel) -> Result<bool> {
        for route in &self.routes {
            let Some(caps) = route.regex.captures(message) else {
                continue;
            };

            let captures = caps
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()))
                .collect();
            let invocation = Invocation::new(from, message, captures);

            info!("Dispatching {} for {}", route.command.name(), from);
            route.command.execute(&invocation, channel).await?;
            return Ok(true);
        }

        debug!("No command matched message from {}", from);
        Ok(false)
    }

    /// Get the number of registered commands
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if no commands are registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Get all registered command names
    pub fn names(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.command.name()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingChannel {
        said: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        async fn say(&self, text: &str, to: Option<&str>) -> Result<()> {
            self.said
                .lock()
                .unwrap()
                .push((text.to_string(), to.map(|s| s.to_string())));
            Ok(())
        }
    }

    struct EchoCommand {
        name: &'static str,
        pattern: &'static str,
    }

    #[async_trait]
    impl Command for EchoCommand {
        fn name(&self) -> &str {
            self.name
        }

        fn pattern(&self) -> &str {
            self.pattern
        }

        fn usage(&self) -> &str {
            "echo <text>"
        }

        async fn execute(&self, invocation: &Invocation, channel: &dyn Channel) -> Result<()> {
            let text = format!(
                "{}:{}:{}",
                self.name,
                invocation.from,
                invocation.group(1).unwrap_or("-")
            );
            channel.say(&text, None).await
        }
    }

    fn echo(name: &'static str, pattern: &'static str) -> Arc<dyn Command> {
        Arc::new(EchoCommand { name, pattern })
    }

    #[tokio::test]
    async fn test_dispatch_first_match() {
        let mut registry = CommandRegistry::new();
        registry.register(echo("first", r"^echo(?: (\S+))?$")).unwrap();
        registry.register(echo("second", r"^echo")).unwrap();

        let channel = RecordingChannel::default();
        let matched = registry.dispatch("alice", "echo hi", &channel).await.unwrap();

        assert!(matched);
        let said = channel.said.lock().unwrap();
        assert_eq!(said.as_slice(), &[("first:alice:hi".to_string(), None)]);
    }

    #[tokio::test]
    async fn test_dispatch_optional_group_missing() {
        let mut registry = CommandRegistry::new();
        registry.register(echo("echo", r"^echo(?: (\S+))?$")).unwrap();

        let channel = RecordingChannel::default();
        registry.dispatch("bob", "echo", &channel).await.unwrap();

        assert_eq!(channel.said.lock().unwrap()[0].0, "echo:bob:-");
    }

    #[tokio::test]
    async fn test_dispatch_no_match() {
        let mut registry = CommandRegistry::new();
        registry.register(echo("echo", r"^echo$")).unwrap();

        let channel = RecordingChannel::default();
        let matched = registry.dispatch("bob", "hello there", &channel).await.unwrap();

        assert!(!matched);
        assert!(channel.said.lock().unwrap().is_empty());
    }

    #[test]
    fn test_register_invalid_pattern() {
        let mut registry = CommandRegistry::new();
        let result = registry.register(echo("broken", r"^echo(("));
        assert!(matches!(result, Err(crate::Error::InvalidPattern(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = CommandRegistry::new();
        registry.register(echo("a", r"^a$")).unwrap();
        registry.register(echo("b", r"^b$")).unwrap();
        registry.register(echo("a", r"^aa$")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.routes(), vec![("^aa$", "a"), ("^b$", "b")]);
        assert!(registry.get("a").is_some());
        assert!(registry.get("c").is_none());
    }
}
