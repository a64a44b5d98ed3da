use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use forklift_console::config::{self, ConsoleConfig};
use forklift_console::{logging, replay};
use forklift_submit::{DryRunApi, format_err_chain, submit_from_session};

#[derive(Parser)]
#[command(name = "forklift-console", about = "Forklift plan wizard tooling")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded action log and print the resulting draft
    Replay {
        /// JSON file with `context` and `actions`
        script: PathBuf,
        /// Also run plan submission against a dry-run API
        #[arg(long)]
        submit: bool,
    },
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    logging::init_tracing(config.log_filter.as_deref(), cli.json)?;

    match cli.command {
        Command::Replay { script, submit } => {
            let script = replay::load_script(&script)?;
            let outcome = replay::replay(script, config.settings).await?;

            if submit {
                let api = DryRunApi::new();
                if let Err(err) = submit_from_session(&outcome.session, &api).await {
                    eprintln!("submission failed: {}", format_err_chain(&err));
                }
                let draft = outcome.session.snapshot().await;
                println!("{}", serde_json::to_string_pretty(&*draft)?);
                println!("{}", serde_json::to_string_pretty(&api.calls().await)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&*outcome.draft)?);
            }
        }
        Command::InitConfig { force } => {
            let path = match cli.config {
                Some(path) => path,
                None => config::default_config_path()?,
            };
            if path.exists() && !force {
                return Err(eyre::eyre!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }
            config::save_config_to(&ConsoleConfig::default(), &path)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
