//! gh-relay: GitHub chat commands on a local console
//!
//! Usage:
//!   gh-relay                    - Start the interactive console
//!   gh-relay --once "<message>" - Dispatch one message and exit
//!   gh-relay --help             - Show help

mod console;

use ghr_core::{CommandRegistry, Config};
use ghr_plugin::GitHubPlugin;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleChannel;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Interactive console
    Console { nick: String },
    /// Dispatch a single message
    Once { nick: String, message: String },
    /// Show help
    Help,
    /// Show version
    Version,
    /// Unusable arguments
    Invalid(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args(std::env::args().skip(1), default_nick());

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("gh-relay {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Invalid(reason) => {
            eprintln!("gh-relay: {}", reason);
            eprintln!("Try 'gh-relay --help' for more information.");
            std::process::exit(2);
        }
        _ => {}
    }

    // Logs go to stderr so they stay apart from channel output
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting gh-relay...");
    tracing::info!("GitHub API: {}", config.github.base_url);

    let plugin = GitHubPlugin::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create GitHub plugin: {}", e))?;

    let mut registry = CommandRegistry::new();
    plugin.register(&mut registry)?;

    match mode {
        RunMode::Console { nick } => {
            tracing::info!("Running console as {}", nick);
            console::run_console(&registry, &plugin.usage(), &nick).await
        }
        RunMode::Once { nick, message } => {
            let channel = ConsoleChannel::new();
            if !registry.dispatch(&nick, message.trim(), &channel).await? {
                eprintln!("No command matches: {}", message);
                std::process::exit(1);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// `RUST_LOG` when set and valid, else `info`
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Nick used when `--nick` is not given
fn default_nick() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "console".to_string())
}

/// Parse command line arguments
fn parse_args<I>(args: I, default_nick: String) -> RunMode
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut nick = default_nick;
    let mut once = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            "--nick" | "-n" => match args.next() {
                Some(value) if !value.trim().is_empty() => nick = value,
                _ => return RunMode::Invalid("--nick requires a name".to_string()),
            },
            "--once" | "-o" => match args.next() {
                Some(value) => once = Some(value),
                None => return RunMode::Invalid("--once requires a message".to_string()),
            },
            other => return RunMode::Invalid(format!("unknown argument '{}'", other)),
        }
    }

    match once {
        Some(message) => RunMode::Once { nick, message },
        None => RunMode::Console { nick },
    }
}

/// Print help message
fn print_help() {
    println!("gh-relay - GitHub chat commands");
    println!();
    println!("Usage:");
    println!("  gh-relay                     Start the interactive console");
    println!("  gh-relay --once <message>    Dispatch one message and exit");
    println!("  gh-relay --nick <name>       Sender nick (default: $USER)");
    println!("  gh-relay --help              Show this help message");
    println!("  gh-relay --version           Show version");
    println!();
    println!("Commands:");
    println!("  ghGist [user] [count]        Latest gists of a user");
    println!("  ghMembers <org>              Public members of an organization");
    println!("  ghRepos [owner] [count]      Repositories by forks and watchers");
    println!("  ghActivity [user] [count]    Recent activity of a user");
    println!();
    println!("Configuration is read from ./{} when present.", ghr_core::config::CONFIG_FILE);
    println!();
    println!("Environment Variables:");
    println!("  GITHUB_TOKEN           GitHub personal access token (optional)");
    println!("  GITHUB_API_URL         API base URL (default: https://api.github.com)");
    println!("  GH_RELAY_DATE_LOCALE   Locale for dates, e.g. fi_FI");
    println!("  GH_RELAY_DATE_FORMAT   strftime date format");
    println!("  SHORTURL_SERVICES      Comma separated shorteners (default: is.gd,v.gd,tinyurl)");
    println!("  BITLY_TOKEN            bit.ly access token");
    println!("  RUST_LOG               Log filter (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RunMode {
        parse_args(args.iter().map(|a| a.to_string()), "alice".to_string())
    }

    #[test]
    fn test_no_args_starts_console() {
        assert_eq!(
            parse(&[]),
            RunMode::Console {
                nick: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_once_with_nick() {
        assert_eq!(
            parse(&["--nick", "bob", "--once", "ghRepos rust-lang 3"]),
            RunMode::Once {
                nick: "bob".to_string(),
                message: "ghRepos rust-lang 3".to_string()
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]), RunMode::Help);
        assert_eq!(parse(&["--nick", "bob", "--version"]), RunMode::Version);
    }

    #[test]
    fn test_log_filter_respects_rust_log() {
        unsafe {
            std::env::set_var("RUST_LOG", "debug");
        }
        assert_eq!(log_filter().to_string(), "debug");

        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(log_filter().to_string(), "info");
    }

    #[test]
    fn test_invalid_args() {
        assert!(matches!(parse(&["--once"]), RunMode::Invalid(_)));
        assert!(matches!(parse(&["--nick", " "]), RunMode::Invalid(_)));
        assert!(matches!(parse(&["--server"]), RunMode::Invalid(_)));
    }
}
