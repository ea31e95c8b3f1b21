//! Plugin assembly

use std::sync::Arc;

use tracing::info;

use ghr_core::{Command, CommandRegistry, Config, DateFormatter, Error, Result};
use ghr_github::{GitHubApi, GitHubClient};
use ghr_shorturl::FallbackShortener;

use crate::commands::{ActivityCommand, GistCommand, MembersCommand, PluginContext, ReposCommand};

/// The GitHub plugin: four commands over one shared context
pub struct GitHubPlugin {
    ctx: Arc<PluginContext>,
}

impl GitHubPlugin {
    /// Create the plugin with explicit collaborators
    pub fn new(
        config: &Config,
        github: Arc<dyn GitHubApi>,
        shortener: FallbackShortener,
    ) -> Result<Self> {
        let dates = DateFormatter::from_config(&config.date)?;

        let ctx = PluginContext {
            github,
            shortener,
            dates,
            messages: config.message.clone(),
            thresholds: config.threshold.clone(),
            limits: config.limits.clone(),
        };

        Ok(Self { ctx: Arc::new(ctx) })
    }

    /// Create the plugin with the real GitHub client and shorteners
    pub fn from_config(config: &Config) -> Result<Self> {
        let github = GitHubClient::new(&config.github)
            .map_err(|e| Error::Config(format!("GitHub client: {}", e)))?;
        let shortener = FallbackShortener::from_config(&config.shorturl)
            .map_err(|e| Error::Config(format!("URL shortener: {}", e)))?;

        Self::new(config, Arc::new(github), shortener)
    }

    /// All commands of the plugin, in dispatch order
    pub fn commands(&self) -> Vec<Arc<dyn Command>> {
        vec![
            Arc::new(GistCommand::new(self.ctx.clone())),
            Arc::new(MembersCommand::new(self.ctx.clone())),
            Arc::new(ReposCommand::new(self.ctx.clone())),
            Arc::new(ActivityCommand::new(self.ctx.clone())),
        ]
    }

    /// Register every command with a host registry
    pub fn register(&self, registry: &mut CommandRegistry) -> Result<()> {
        for command in self.commands() {
            registry.register(command)?;
        }

        info!("Registered GitHub commands: {:?}", registry.names());
        Ok(())
    }

    /// Usage lines for help output
    pub fn usage(&self) -> Vec<String> {
        self.commands().iter().map(|c| c.usage().to_string()).collect()
    }
}
