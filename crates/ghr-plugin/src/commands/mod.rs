//! Chat commands relaying GitHub data

mod activity;
mod gist;
mod members;
mod repos;

use std::sync::Arc;

use tracing::warn;

use ghr_core::{
    Channel, DateFormatter, Invocation, LimitsConfig, MessageConfig, Result, TemplateVars,
    ThresholdConfig, render,
};
use ghr_github::{GitHubApi, GitHubError};
use ghr_shorturl::FallbackShortener;

pub use activity::ActivityCommand;
pub use gist::GistCommand;
pub use members::MembersCommand;
pub use repos::ReposCommand;

/// State shared by all commands of the plugin
pub struct PluginContext {
    pub github: Arc<dyn GitHubApi>,
    pub shortener: FallbackShortener,
    pub dates: DateFormatter,
    pub messages: MessageConfig,
    pub thresholds: ThresholdConfig,
    pub limits: LimitsConfig,
}

impl PluginContext {
    /// Target name and item count from `<prefix>(?: (\S+))?(?: (\d+))?`
    ///
    /// The target defaults to the sender. `None` for the count means the
    /// command was given none.
    fn target_and_count(&self, invocation: &Invocation) -> (String, Option<usize>) {
        let target = invocation
            .group(1)
            .unwrap_or(invocation.from.as_str())
            .to_string();

        let count = invocation.group(2).map(|raw| {
            raw.parse::<usize>()
                .unwrap_or(self.limits.max_count)
                .clamp(1, self.limits.max_count)
        });

        (target, count)
    }

    /// Report a GitHub failure to the requesting user
    async fn report_error(
        &self,
        channel: &dyn Channel,
        invocation: &Invocation,
        error: &GitHubError,
    ) -> Result<()> {
        warn!("GitHub request for {} failed: {}", invocation.from, error);
        let vars = TemplateVars::new().with("error", error.to_json());
        channel
            .say(&render(&self.messages.error, &vars), Some(&invocation.from))
            .await
    }

    /// Tell the requesting user there was nothing to show
    async fn report_empty(
        &self,
        channel: &dyn Channel,
        invocation: &Invocation,
        target: &str,
    ) -> Result<()> {
        let vars = TemplateVars::new().with("target", target);
        channel
            .say(&render(&self.messages.empty, &vars), Some(&invocation.from))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ghr_github::{Event, Gist, Member, Repository};

    struct NoGitHub;

    #[async_trait]
    impl GitHubApi for NoGitHub {
        async fn user_gists(&self, _: &str, _: usize) -> ghr_github::Result<Vec<Gist>> {
            Ok(Vec::new())
        }
        async fn org_members(&self, _: &str, _: usize) -> ghr_github::Result<Vec<Member>> {
            Ok(Vec::new())
        }
        async fn user_repos(&self, _: &str, _: usize) -> ghr_github::Result<Vec<Repository>> {
            Ok(Vec::new())
        }
        async fn user_events(&self, _: &str, _: usize) -> ghr_github::Result<Vec<Event>> {
            Ok(Vec::new())
        }
    }

    fn context() -> PluginContext {
        PluginContext {
            github: Arc::new(NoGitHub),
            shortener: FallbackShortener::default(),
            dates: DateFormatter::default(),
            messages: MessageConfig::default(),
            thresholds: ThresholdConfig::default(),
            limits: LimitsConfig {
                max_count: 10,
                ..LimitsConfig::default()
            },
        }
    }

    fn invocation(groups: &[Option<&str>]) -> Invocation {
        Invocation::new(
            "alice",
            "cmd",
            groups.iter().map(|g| g.map(|s| s.to_string())).collect(),
        )
    }

    #[test]
    fn test_target_defaults_to_sender() {
        let ctx = context();
        assert_eq!(
            ctx.target_and_count(&invocation(&[None, None])),
            ("alice".to_string(), None)
        );
    }

    #[test]
    fn test_target_and_count() {
        let ctx = context();
        assert_eq!(
            ctx.target_and_count(&invocation(&[Some("bob"), Some("3")])),
            ("bob".to_string(), Some(3))
        );
    }

    #[test]
    fn test_count_is_clamped() {
        let ctx = context();
        let (_, count) = ctx.target_and_count(&invocation(&[Some("bob"), Some("0")]));
        assert_eq!(count, Some(1));

        let (_, count) = ctx.target_and_count(&invocation(&[Some("bob"), Some("500")]));
        assert_eq!(count, Some(10));

        let (_, count) =
            ctx.target_and_count(&invocation(&[Some("bob"), Some("99999999999999999999999")]));
        assert_eq!(count, Some(10));
    }
}
