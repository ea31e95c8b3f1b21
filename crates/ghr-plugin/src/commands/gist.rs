//! `ghGist [user] [count]`: latest gists of a user

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use ghr_core::{Channel, Command, Invocation, Result, TemplateVars, post_items, render};

use super::PluginContext;

/// Lists the most recent gists of a user
pub struct GistCommand {
    ctx: Arc<PluginContext>,
}

impl GistCommand {
    pub const PATTERN: &'static str = r"^ghGist(?: (\S+))?(?: (\d+))?$";

    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for GistCommand {
    fn name(&self) -> &str {
        "ghGist"
    }

    fn pattern(&self) -> &str {
        Self::PATTERN
    }

    fn usage(&self) -> &str {
        "ghGist [user] [count] - latest gists of a user"
    }

    async fn execute(&self, invocation: &Invocation, channel: &dyn Channel) -> Result<()> {
        let ctx = &self.ctx;
        let (user, count) = ctx.target_and_count(invocation);
        let count = count.unwrap_or(ctx.limits.default_count);

        debug!("Fetching {} gists of {}", count, user);

        let mut gists = match ctx.github.user_gists(&user, count).await {
            Ok(gists) => gists,
            Err(e) => return ctx.report_error(channel, invocation, &e).await,
        };

        if gists.is_empty() {
            return ctx.report_empty(channel, invocation, &user).await;
        }
        gists.truncate(count);

        let urls: Vec<String> = gists.iter().map(|g| g.html_url.clone()).collect();
        let short_urls = ctx.shortener.shorten_all(&urls).await;

        let lines: Vec<String> = gists
            .iter()
            .zip(short_urls)
            .map(|(gist, url)| {
                let vars = TemplateVars::new()
                    .with("url", url)
                    .with("date", ctx.dates.format(&gist.last_activity()))
                    .with("description", gist.description.as_deref().unwrap_or(""))
                    .with("files", gist.files.len());
                render(&ctx.messages.gist, &vars)
            })
            .collect();

        post_items(channel, &lines, ctx.thresholds.gist, &ctx.messages.separator).await
    }
}
