use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::usecases::bootstrap::BootstrapOptions;

#[derive(Debug, Parser)]
#[command(name = "rtchat", about = "Realtime group chat in the terminal")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Relay endpoint URL, overrides `relay.endpoint_url`
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Initial display name, overrides `identity.display_name`
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the chat shell
    Run {
        /// Talk to an in-process relay instead of the network
        #[arg(long)]
        loopback: bool,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Run { loopback: false })
    }

    pub fn bootstrap_options(&self) -> BootstrapOptions {
        let Command::Run { loopback } = self.command_or_default();
        BootstrapOptions {
            config_path: self.config.clone(),
            endpoint: self.endpoint.clone(),
            display_name: self.name.clone(),
            loopback,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn defaults_to_networked_run_when_command_is_missing() {
        let cli = Cli::parse_from(["rtchat"]);

        assert_eq!(cli.command_or_default(), Command::Run { loopback: false });
    }

    #[test]
    fn parses_explicit_run_command_with_global_config() {
        let cli = Cli::parse_from(["rtchat", "run", "--config", "custom.toml"]);

        assert_eq!(
            cli.config
                .as_deref()
                .map(|p| p.to_string_lossy().to_string()),
            Some("custom.toml".to_owned())
        );
    }

    #[test]
    fn overrides_flow_into_bootstrap_options() {
        let cli = Cli::parse_from([
            "rtchat",
            "--endpoint",
            "http://localhost:3000",
            "--name",
            "Alice",
            "run",
            "--loopback",
        ]);

        let options = cli.bootstrap_options();

        assert_eq!(options.endpoint.as_deref(), Some("http://localhost:3000"));
        assert_eq!(options.display_name.as_deref(), Some("Alice"));
        assert!(options.loopback);
        assert_eq!(options.config_path, None);
    }
}
