use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "tgids",
    about = "Find Telegram chat and forum topic IDs for a bot, and send test messages"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start TUI shell
    Run {
        /// Pre-fill the bot token field
        #[arg(long)]
        token: Option<String>,
    },
    /// Print chats and forum topics seen in the bot's recent updates
    Chats {
        /// Bot token from @BotFather
        #[arg(long)]
        token: String,
    },
    /// Send one test message, photo or document
    Send {
        /// Bot token from @BotFather
        #[arg(long)]
        token: String,
        #[arg(long, allow_negative_numbers = true)]
        chat_id: i64,
        /// Forum topic (message thread) id
        #[arg(long)]
        topic_id: Option<i64>,
        /// Message text, or the caption when a file is attached
        #[arg(long)]
        text: Option<String>,
        /// Image or document to upload (max 10MB)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run { token: None })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn defaults_to_run_when_command_is_missing() {
        let cli = Cli::parse_from(["tgids"]);

        assert!(matches!(
            cli.command_or_default(),
            Command::Run { token: None }
        ));
    }

    #[test]
    fn parses_run_with_token_and_config() {
        let cli = Cli::parse_from(["tgids", "run", "--token", "123:abc", "--config", "custom.toml"]);

        assert!(matches!(
            cli.command_or_default(),
            Command::Run { token: Some(ref token) } if token == "123:abc"
        ));
        assert_eq!(cli.config.as_deref(), Some(Path::new("custom.toml")));
    }

    #[test]
    fn chats_requires_token() {
        assert!(Cli::try_parse_from(["tgids", "chats"]).is_err());

        let cli = Cli::parse_from(["tgids", "chats", "--token", "123:abc"]);
        assert!(matches!(cli.command, Some(Command::Chats { .. })));
    }

    #[test]
    fn send_accepts_negative_chat_id_and_topic() {
        let cli = Cli::parse_from([
            "tgids",
            "send",
            "--token",
            "123:abc",
            "--chat-id",
            "-1001234567890",
            "--topic-id",
            "7",
            "--text",
            "hello",
        ]);

        match cli.command {
            Some(Command::Send {
                chat_id,
                topic_id,
                text,
                file,
                ..
            }) => {
                assert_eq!(chat_id, -1001234567890);
                assert_eq!(topic_id, Some(7));
                assert_eq!(text.as_deref(), Some("hello"));
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
