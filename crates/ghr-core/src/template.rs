//! Message templates with `${name}` placeholders
//!
//! Templates come from the `[message]` config section. Every `${name}` is
//! replaced with the matching variable; unknown names render as empty
//! strings, the same way missing environment variables expand in config
//! files.

use std::collections::BTreeMap;
use std::fmt::Display;

use tracing::debug;

/// Named values available to a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    vars: BTreeMap<String, String>,
}

impl TemplateVars {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any previous value with the same name
    pub fn with(mut self, name: &str, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a variable in place
    pub fn insert(&mut self, name: &str, value: impl Display) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Render a template against a variable set
pub fn render(template: &str, vars: &TemplateVars) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match vars.get(name) {
                    Some(value) => result.push_str(value),
                    None => debug!("Template variable not set: {}", name),
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated placeholder stays literal
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
