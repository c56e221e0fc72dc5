use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tripflow")]
#[command(version, about = "TripFlow - travel preparation chat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Relay server URL
    #[arg(
        long,
        global = true,
        env = "TRIPFLOW_SERVER_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    pub server: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default)
    Chat,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_bare_invocation() {
        let cli = Cli::try_parse_from(["tripflow"]).expect("parse bare invocation");
        assert!(cli.command.is_none());
        assert_eq!(cli.server, "http://127.0.0.1:3000");
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_chat_command() {
        let cli = Cli::try_parse_from(["tripflow", "chat"]).expect("parse chat");
        assert!(matches!(cli.command, Some(Commands::Chat)));
    }

    #[test]
    fn parses_server_flag() {
        let cli = Cli::try_parse_from(["tripflow", "--server", "http://example.com:8080"])
            .expect("parse server flag");
        assert_eq!(cli.server, "http://example.com:8080");
    }

    #[test]
    fn parses_verbose_flag() {
        let cli = Cli::try_parse_from(["tripflow", "-v", "chat"]).expect("parse verbose");
        assert!(cli.verbose);
    }
}
