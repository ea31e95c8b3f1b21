//! `ghMembers <org>`: public members of an organization

use std::sync::Arc;

use async_trait::async_trait;

use ghr_core::{Channel, Command, Invocation, Result, TemplateVars, post_items, render};

use super::PluginContext;

/// Lists the public members of an organization
pub struct MembersCommand {
    ctx: Arc<PluginContext>,
}

impl MembersCommand {
    pub const PATTERN: &'static str = r"^ghMembers (\S+)$";

    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Command for MembersCommand {
    fn name(&self) -> &str {
        "ghMembers"
    }

    fn pattern(&self) -> &str {
        Self::PATTERN
    }

    fn usage(&self) -> &str {
        "ghMembers <org> - public members of an organization"
    }

    async fn execute(&self, invocation: &Invocation, channel: &dyn Channel) -> Result<()> {
        let ctx = &self.ctx;
        let Some(org) = invocation.group(1) else {
            return Ok(());
        };

        let members = match ctx.github.org_members(org, ctx.limits.list_page_size).await {
            Ok(members) => members,
            Err(e) => return ctx.report_error(channel, invocation, &e).await,
        };

        if members.is_empty() {
            return ctx.report_empty(channel, invocation, org).await;
        }

        let lines: Vec<String> = members
            .iter()
            .map(|member| {
                let vars = TemplateVars::new()
                    .with("login", &member.login)
                    .with("url", &member.html_url);
                render(&ctx.messages.member, &vars)
            })
            .collect();

        post_items(channel, &lines, ctx.thresholds.members, &ctx.messages.separator).await
    }
}
