//! `ghActivity [user] [count]`: recent activity of a user

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use ghr_core::{Channel, Command, Invocation, Result, TemplateVars, post_items, render};
use ghr_github::{Event, EventSummary, describe};

use super::PluginContext;

/// Shows the latest supported events performed by a user
pub struct ActivityCommand {
    ctx: Arc<PluginContext>,
}

impl ActivityCommand {
    pub const PATTERN: &'static str = r"^ghActivity(?: (\S+))?(?: (\d+))?$";

    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for ActivityCommand {
    fn name(&self) -> &str {
        "ghActivity"
    }

    fn pattern(&self) -> &str {
        Self::PATTERN
    }

    fn usage(&self) -> &str {
        "ghActivity [user] [count] - recent activity of a user"
    }

    async fn execute(&self, invocation: &Invocation, channel: &dyn Channel) -> Result<()> {
        let ctx = &self.ctx;
        let (user, count) = ctx.target_and_count(invocation);
        let count = count.unwrap_or(ctx.limits.default_count);

        // A full page, since unsupported event types are dropped
        let events = match ctx.github.user_events(&user, ctx.limits.list_page_size).await {
            Ok(events) => events,
            Err(e) => return ctx.report_error(channel, invocation, &e).await,
        };

        let described: Vec<(&Event, EventSummary)> = events
            .iter()
            .filter_map(|event| describe(event).map(|summary| (event, summary)))
            .take(count)
            .collect();

        debug!(
            "{} of {} events of {} are shown",
            described.len(),
            events.len(),
            user
        );

        if described.is_empty() {
            return ctx.report_empty(channel, invocation, &user).await;
        }

        let urls: Vec<String> = described.iter().map(|(_, s)| s.url.clone()).collect();
        let short_urls = ctx.shortener.shorten_all(&urls).await;

        let lines: Vec<String> = described
            .iter()
            .zip(short_urls)
            .map(|((event, summary), url)| {
                let date = event
                    .created_at
                    .map(|ts| ctx.dates.format(&ts))
                    .unwrap_or_default();
                let vars = TemplateVars::new()
                    .with("event", summary.line(&url))
                    .with("date", date)
                    .with("actor", &event.actor.login)
                    .with("repo", &event.repo.name)
                    .with("type", &event.event_type);
                render(&ctx.messages.activity, &vars)
            })
            .collect();

        post_items(channel, &lines, ctx.thresholds.activity, &ctx.messages.separator).await
    }
}
