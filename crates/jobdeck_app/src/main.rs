mod app;
mod effects;
mod logging;
mod settings;
mod ui;

use clap::{Parser, Subcommand};
use jobdeck_engine::{EngineHandle, PollSettings};

use crate::app::App;
use crate::logging::LogDestination;

#[derive(Parser)]
#[command(author, version, about = "Operator console for the jobdeck job backend", long_about = None)]
struct Cli {
    /// Backend origin, overriding environment and saved settings.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Talk to the in-network origin (JOBDECK_API_URL_INTERNAL).
    #[arg(long, global = true)]
    internal: bool,
    /// Mirror the log file to the terminal.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard refreshed by the job-list poll
    Watch,
    /// One-shot job history with status counts
    History,
    /// Follow one job's detail view until it settles
    Show {
        /// Server-assigned job id
        id: i64,
    },
    /// Queue a whitelisted OS command job
    Run {
        /// One of: list, current_dir, whoami
        command_key: String,
    },
    /// Queue a crawl job for a URL
    Crawl {
        /// Absolute URL including http:// or https://
        url: String,
    },
    /// System-health summary
    Status,
    /// Persist a default backend origin for future runs
    SetUrl {
        url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (destination, level) = if cli.verbose {
        (LogDestination::Both, log::LevelFilter::Debug)
    } else {
        (LogDestination::File, log::LevelFilter::Info)
    };
    logging::initialize(destination, level);

    let settings_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));

    if let Commands::SetUrl { url } = &cli.command {
        settings::save_api_url(&settings_dir, url)?;
        println!("Saved backend origin: {url}");
        return Ok(());
    }

    let client_settings =
        settings::resolve_client_settings(cli.api_url.clone(), cli.internal, &settings_dir);
    let engine = EngineHandle::new(client_settings, PollSettings::default())?;
    let mut app = App::new(engine);

    match cli.command {
        Commands::Watch => app.run_watch(),
        Commands::History => app.run_history(),
        Commands::Show { id } => app.run_show(id),
        Commands::Run { command_key } => app.run_submit_command(command_key),
        Commands::Crawl { url } => app.run_submit_crawl(url),
        Commands::Status => app.run_status(),
        Commands::SetUrl { .. } => unreachable!("handled above"),
    }

    Ok(())
}
