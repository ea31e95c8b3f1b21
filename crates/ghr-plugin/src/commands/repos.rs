//! `ghRepos [owner] [count]`: repositories ranked by forks and watchers

use std::sync::Arc;

use async_trait::async_trait;

use ghr_core::{Channel, Command, Invocation, Result, TemplateVars, post_items, render};
use ghr_github::sort_repositories;

use super::PluginContext;

/// Lists the repositories of a user or organization, most forked first
pub struct ReposCommand {
    ctx: Arc<PluginContext>,
}

impl ReposCommand {
    pub const PATTERN: &'static str = r"^ghRepos(?: (\S+))?(?: (\d+))?$";

    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for ReposCommand {
    fn name(&self) -> &str {
        "ghRepos"
    }

    fn pattern(&self) -> &str {
        Self::PATTERN
    }

    fn usage(&self) -> &str {
        "ghRepos [owner] [count] - repositories by forks and watchers"
    }

    async fn execute(&self, invocation: &Invocation, channel: &dyn Channel) -> Result<()> {
        let ctx = &self.ctx;
        let (owner, count) = ctx.target_and_count(invocation);

        let mut repos = match ctx.github.user_repos(&owner, ctx.limits.list_page_size).await {
            Ok(repos) => repos,
            Err(e) => return ctx.report_error(channel, invocation, &e).await,
        };

        if repos.is_empty() {
            return ctx.report_empty(channel, invocation, &owner).await;
        }

        // Rank the whole page before cutting it down
        sort_repositories(&mut repos);
        if let Some(count) = count {
            repos.truncate(count);
        }

        let urls: Vec<String> = repos.iter().map(|r| r.html_url.clone()).collect();
        let short_urls = ctx.shortener.shorten_all(&urls).await;

        let lines: Vec<String> = repos
            .iter()
            .zip(short_urls)
            .map(|(repo, url)| {
                let vars = TemplateVars::new()
                    .with("name", &repo.name)
                    .with("full_name", &repo.full_name)
                    .with("forks", repo.forks_count)
                    .with("watchers", repo.watchers_count)
                    .with("stars", repo.stargazers_count)
                    .with("url", url);
                render(&ctx.messages.repo, &vars)
            })
            .collect();

        post_items(channel, &lines, ctx.thresholds.repos, &ctx.messages.separator).await
    }
}
