use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use hookboard::config::{self, Config};
use hookboard::dashboard::{run_dashboard, DashboardApp};
use hookboard::fetcher::FeedContentService;
use hookboard::service::{ContentService, MockContentService};
use hookboard::shell::Shell;

#[derive(Parser)]
#[command(name = "hookboard")]
#[command(about = "Content dashboard with viral hook suggestions", long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal dashboard (default)
    Dashboard,
    /// Scrape once and print the items
    Scrape {
        #[arg(long)]
        json: bool,
    },
    /// Generate hooks for an item id
    Hooks {
        #[arg(short, long)]
        id: String,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The dashboard owns the terminal, so its logs go to a file in the data dir.
fn init_file_logging() -> Result<()> {
    let path = config::data_dir()?.join("hookboard.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn build_service(config: &Config) -> Result<Arc<dyn ContentService>> {
    if config.feeds.is_empty() {
        Ok(Arc::new(MockContentService::new(
            config.scrape_delay(),
            config.hook_delay(),
        )))
    } else {
        let service = FeedContentService::new(config).context("Failed to build HTTP client")?;
        Ok(Arc::new(service))
    }
}

fn settings_rows(config: &Config) -> Vec<(String, String)> {
    let feeds = if config.feeds.is_empty() {
        "(mock feed)".to_string()
    } else {
        config.feeds.join(", ")
    };
    vec![
        ("feeds".to_string(), feeds),
        ("scrape_delay_ms".to_string(), config.scrape_delay_ms.to_string()),
        ("hook_delay_ms".to_string(), config.hook_delay_ms.to_string()),
        ("toast_duration_ms".to_string(), config.toast_duration_ms.to_string()),
        ("http_timeout_secs".to_string(), config.http_timeout_secs.to_string()),
        ("user_agent".to_string(), config.user_agent.clone()),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);

    match &command {
        Commands::Dashboard => init_file_logging()?,
        _ => init_stderr_logging(),
    }

    let config = Config::load(cli.config.as_deref())?;
    let service = build_service(&config)?;

    match command {
        Commands::Dashboard => {
            let shell = Shell::new(service, config.toast_duration());
            let mut app = DashboardApp::new(shell, settings_rows(&config));
            run_dashboard(&mut app).await?;
        }
        Commands::Scrape { json } => {
            let items = service.scrape_content().await.context("Failed to scrape content")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                println!("Fetched {} items:", items.len());
                for item in items {
                    println!("  [{}] {} ({}) - {}", item.id, item.title, item.source, item.timestamp);
                }
            }
        }
        Commands::Hooks { id } => {
            let hooks = service
                .generate_hooks(&id)
                .await
                .with_context(|| format!("Failed to generate hooks for {}", id))?;
            for hook in hooks {
                println!("  - {}", hook.text);
            }
        }
    }

    Ok(())
}
