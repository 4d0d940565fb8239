use anyhow::Context;
use clap::{Parser, Subcommand};
use lh_schedule::apis::create_source;
use lh_schedule::config::Config;
use lh_schedule::logging;
use lh_schedule::pipeline::query::{FilterSelection, Selection};
use lh_schedule::pipeline::schedule::PastShowPolicy;
use lh_schedule::pipeline::state::ScheduleBoard;
use lh_schedule::pipeline::{local_today, refresh};
use lh_schedule::presentation::ShowsPage;
use lh_schedule::server::{start_server, AppState};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lh_schedule")]
#[command(about = "Limited Hangout live show schedule")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the schedule once and print it
    Shows {
        /// Month key (YYYY-MM) or "all"
        #[arg(long, default_value = "all")]
        month: String,
        /// Exact city or "all"
        #[arg(long, default_value = "all")]
        city: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Serve the schedule as JSON over HTTP
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .and_then(Config::with_env_overrides)
        .with_context(|| format!("loading configuration from {}", cli.config))?;
    let _log_guard = logging::init_logging(&config.logging.dir);
    info!(encoding = config.source.encoding.as_str(), "Configuration loaded");

    let source = create_source(&config.source).context("building schedule source")?;
    let policy = PastShowPolicy::from_hide_flag(config.schedule.hide_past_shows);

    match cli.command {
        Commands::Shows { month, city, json } => {
            let mut board = ScheduleBoard::new(policy);
            board.set_selection(FilterSelection::new(
                Selection::parse(&month),
                Selection::parse(&city),
            ));

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            if !refresh(&mut board, source.as_ref(), &cancel, local_today()).await {
                warn!("Interrupted before the schedule finished loading");
                return Ok(());
            }

            let page = ShowsPage::from_board(&board);
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", page.render_text());
            }
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            start_server(AppState { source, policy }, port)
                .await
                .map_err(|e| anyhow::anyhow!("server failed: {e}"))?;
        }
    }
    Ok(())
}
