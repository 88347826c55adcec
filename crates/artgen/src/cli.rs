//! Command-line entry points.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::info;

use crate::app::context::AppContext;
use crate::domain::model::{HostChoice, OsChoice};
use crate::infra::config::Config;
use crate::infra::logging::{self, LogTarget};
use crate::ui::app::UiApp;

#[derive(Debug, Parser)]
#[command(
    name = "artgen",
    author,
    version,
    about = "Assemble Atomic Red Team test IDs into an Ansible playbook",
    long_about = None
)]
pub struct Cli {
    /// Read configuration from this file instead of the user/workspace search path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a playbook without opening the form
    Generate(GenerateArgs),
    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// Target file; existing contents are replaced
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
    /// Operating system suffix for the vars key (defaults to config)
    #[arg(long, value_enum)]
    os: Option<OsChoice>,
    /// Inventory group to target (defaults to config)
    #[arg(long, value_enum)]
    hosts: Option<HostChoice>,
    /// Test ID to include; repeat to add more, order is preserved
    #[arg(short = 't', long = "tid", value_name = "TID")]
    tids: Vec<String>,
    /// Description written as a comment header
    #[arg(short, long, default_value = "")]
    description: String,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            None => {
                logging::init(LogTarget::default_file())?;
                let config = load_config(self.config.as_ref())?;
                let mut app = UiApp::new(AppContext::new(config));
                app.run()
            }
            Some(Command::Generate(args)) => {
                logging::init(LogTarget::Stderr)?;
                let config = load_config(self.config.as_ref())?;
                generate(AppContext::new(config), args)
            }
            Some(Command::Completions { shell }) => {
                let mut command = Cli::command();
                clap_complete::generate(shell, &mut command, "artgen", &mut io::stdout());
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn generate(mut context: AppContext, args: GenerateArgs) -> Result<()> {
    let form = context.form_mut();
    {
        let state = form.state_mut();
        state.filename = args.output.display().to_string();
        if let Some(os) = args.os {
            state.os = os;
        }
        if let Some(hosts) = args.hosts {
            state.hosts = hosts;
        }
        state.description = args.description;
    }
    for tid in args.tids {
        form.identifiers_mut().add(tid);
    }

    let outcome = context
        .generate()
        .with_context(|| format!("could not generate {}", args.output.display()))?;
    info!(path = %outcome.path.display(), "headless generate finished");
    println!("Wrote {} bytes to {}", outcome.bytes, outcome.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::try_parse_from([
            "artgen", "generate", "-o", "out.yml", "--os", "windows", "--hosts", "servers",
            "-t", "T1", "--tid", "T2",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.output, PathBuf::from("out.yml"));
                assert_eq!(args.os, Some(OsChoice::Windows));
                assert_eq!(args.hosts, Some(HostChoice::Servers));
                assert_eq!(args.tids, ["T1", "T2"]);
                assert!(args.description.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_os() {
        assert!(Cli::try_parse_from(["artgen", "generate", "-o", "x.yml", "--os", "beos"]).is_err());
    }
}
