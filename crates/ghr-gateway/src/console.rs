//! Interactive console host
//!
//! Every entered line is handed to the command registry as a channel
//! message from the console nick. Lines starting with `/` are console
//! commands.

use async_trait::async_trait;
use ghr_core::{Channel, CommandRegistry};
use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
    default_emacs_keybindings,
};
use std::borrow::Cow;
use tracing::{debug, info};

/// Console commands for completion and help
const CONSOLE_COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show available commands"),
    ("/routes", "List registered trigger patterns"),
    ("/quit", "Exit gh-relay"),
];

/// Text as printed for a channel message
pub fn format_reply(text: &str, to: Option<&str>) -> String {
    match to {
        Some(nick) => format!("{}: {}", nick, text),
        None => text.to_string(),
    }
}

/// Channel that prints messages to stdout
#[derive(Debug, Default)]
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    async fn say(&self, text: &str, to: Option<&str>) -> ghr_core::Result<()> {
        println!("{}", format_reply(text, to));
        Ok(())
    }
}

/// Completes console commands and GitHub triggers
#[derive(Clone)]
pub struct CommandCompleter {
    entries: Vec<(String, String)>,
}

impl CommandCompleter {
    pub fn new(triggers: &[(String, String)]) -> Self {
        let mut entries: Vec<(String, String)> = CONSOLE_COMMANDS
            .iter()
            .map(|(cmd, desc)| (cmd.to_string(), desc.to_string()))
            .collect();
        entries.extend(triggers.iter().cloned());
        Self { entries }
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let prefix = &line[..pos.min(line.len())];
        if prefix.is_empty() || prefix.contains(' ') {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(prefix))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.clone(),
                description: Some(desc.clone()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: !cmd.starts_with('/'),
                style: None,
            })
            .collect()
    }
}

/// Prompt showing the console nick
struct NickPrompt {
    nick: String,
    style: Style,
}

impl NickPrompt {
    fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_string(),
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for NickPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.style.paint(format!("<{}> ", self.nick)).to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Result of a console command
#[derive(Debug, PartialEq, Eq)]
enum ConsoleAction {
    /// Handled, read the next line
    Handled,
    /// Leave the console
    Quit,
    /// Not a console command, dispatch it
    Dispatch,
}

/// Handle `/help`, `/routes` and `/quit`
fn handle_console_command(
    input: &str,
    registry: &CommandRegistry,
    usage: &[String],
) -> ConsoleAction {
    match input.to_lowercase().as_str() {
        "/quit" | "/exit" | "/q" => ConsoleAction::Quit,
        "/help" | "/?" => {
            print_help(usage);
            ConsoleAction::Handled
        }
        "/routes" => {
            println!();
            for (pattern, name) in registry.routes() {
                println!("  {:<12} {}", name, pattern);
            }
            println!();
            ConsoleAction::Handled
        }
        lower if lower.starts_with('/') => {
            eprintln!("Unknown console command: {}. Try /help.", input);
            ConsoleAction::Handled
        }
        _ => ConsoleAction::Dispatch,
    }
}

/// Run the interactive console until `/quit` or Ctrl+D
pub async fn run_console(
    registry: &CommandRegistry,
    usage: &[String],
    nick: &str,
) -> anyhow::Result<()> {
    info!("Console ready with {} commands", registry.len());

    print_welcome(nick);

    let triggers: Vec<(String, String)> = usage
        .iter()
        .zip(registry.names())
        .map(|(line, name)| (name.to_string(), line.clone()))
        .collect();

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(60))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new(&triggers)))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(console_keybindings())));

    let prompt = NickPrompt::new(nick);
    let channel = ConsoleChannel::new();

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                match handle_console_command(input, registry, usage) {
                    ConsoleAction::Quit => break,
                    ConsoleAction::Handled => continue,
                    ConsoleAction::Dispatch => {}
                }

                match registry.dispatch(nick, input, &channel).await {
                    Ok(true) => {}
                    Ok(false) => debug!("Ignoring non-command line"),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    println!("Bye.");
    Ok(())
}

/// Emacs keybindings with Tab opening the completion menu
fn console_keybindings() -> Keybindings {
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("command_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings
}

fn print_welcome(nick: &str) {
    println!();
    println!("gh-relay console, speaking as {}", Color::Cyan.bold().paint(nick));
    println!("Type a GitHub command such as 'ghRepos rust-lang 3', or /help.");
    println!();
}

fn print_help(usage: &[String]) {
    println!();
    println!("GitHub commands:");
    for line in usage {
        println!("  {}", line);
    }
    println!();
    println!("Console commands:");
    for (cmd, desc) in CONSOLE_COMMANDS {
        println!("  {:<8} {}", cmd, desc);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghr_core::{Command, Invocation};
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl Command for Noop {
        fn name(&self) -> &str {
            "ghNoop"
        }
        fn pattern(&self) -> &str {
            r"^ghNoop$"
        }
        fn usage(&self) -> &str {
            "ghNoop"
        }
        async fn execute(&self, _: &Invocation, _: &dyn Channel) -> ghr_core::Result<()> {
            Ok(())
        }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Noop)).unwrap();
        registry
    }

    #[test]
    fn test_format_reply() {
        assert_eq!(format_reply("hello", None), "hello");
        assert_eq!(format_reply("Oh noes", Some("alice")), "alice: Oh noes");
    }

    #[test]
    fn test_console_commands() {
        let registry = registry();
        assert_eq!(handle_console_command("/quit", &registry, &[]), ConsoleAction::Quit);
        assert_eq!(handle_console_command("/QUIT", &registry, &[]), ConsoleAction::Quit);
        assert_eq!(
            handle_console_command("/routes", &registry, &[]),
            ConsoleAction::Handled
        );
        assert_eq!(
            handle_console_command("/bogus", &registry, &[]),
            ConsoleAction::Handled
        );
        assert_eq!(
            handle_console_command("ghNoop", &registry, &[]),
            ConsoleAction::Dispatch
        );
    }

    #[test]
    fn test_completer() {
        let mut completer =
            CommandCompleter::new(&[("ghGist".to_string(), "ghGist [user] [count]".to_string())]);

        let values: Vec<String> = completer.complete("/r", 2).into_iter().map(|s| s.value).collect();
        assert_eq!(values, vec!["/routes"]);

        let suggestions = completer.complete("ghG", 3);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].append_whitespace);

        assert!(completer.complete("ghGist bob", 10).is_empty());
        assert!(completer.complete("", 0).is_empty());
    }

    #[test]
    fn test_keybindings_keep_line_editing() {
        let keybindings = console_keybindings();

        for key in [
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::Tab,
        ] {
            assert!(
                keybindings.find_binding(KeyModifiers::NONE, key).is_some(),
                "no binding for {:?}",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_console_channel_say() {
        let channel = ConsoleChannel::new();
        channel.say("hello", Some("alice")).await.unwrap();
    }
}
