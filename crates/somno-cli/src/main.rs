use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use somno_instruments::{all_instruments, require_instrument};
use somno_monday::client::MondayConfig;

use somno_cli::config::{self, SomnoConfig};
use somno_cli::replay;

#[derive(Parser)]
#[command(name = "somno", version, about = "Sleep questionnaire scoring and submission")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatArg,

    /// Config file (default: <config dir>/com.somno.survey/config.json).
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Score a recorded answer sheet and save the results.
    Run {
        #[arg(value_name = "ANSWERS")]
        answers: PathBuf,

        /// Print the record that would be sent instead of sending it.
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// List the questionnaires, or show one questionnaire's items.
    Instruments {
        #[arg(value_name = "ID")]
        id: Option<String>,
    },

    /// Inspect or create the config file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the loaded config with the token redacted.
    Show,
    /// Write a new config file.
    Init {
        #[arg(long = "board-id")]
        board_id: String,
        #[arg(long = "token")]
        token: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match cli.command {
        Command::Run { answers, dry_run } => {
            replay::run(&answers, cli.config.as_deref(), dry_run, &mut std::io::stdout())
        }
        Command::Instruments { id } => instruments(id.as_deref()),
        Command::Config(ConfigCommand::Show) => {
            let config = config::load_config(cli.config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config::config_info(&config))?);
            Ok(())
        }
        Command::Config(ConfigCommand::Init { board_id, token }) => {
            let path = match cli.config {
                Some(path) => path,
                None => config::default_config_path()?,
            };
            let config = SomnoConfig {
                config_version: 0,
                monday: MondayConfig::new(token, board_id),
            };
            config::save_config(&config, &path)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(format: LogFormatArg) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Pretty => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

fn instruments(id: Option<&str>) -> Result<()> {
    match id {
        Some(id) => {
            let instrument = require_instrument(id)?;
            println!("{}", serde_json::to_string_pretty(instrument.items())?);
        }
        None => {
            for instrument in all_instruments() {
                println!(
                    "{:<10} {:<12} {}",
                    instrument.id(),
                    instrument.kind().key(),
                    instrument.name()
                );
            }
        }
    }
    Ok(())
}
