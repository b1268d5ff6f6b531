//! CLI command definitions and handlers.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use devhub_core::api::ApiClient;
use devhub_core::config::DevhubConfig;
use devhub_db::Storage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub mod board;
pub mod connect;
pub mod dashboard;
pub mod feed;
pub mod widgets;

/// DevHub - developer services dashboard
#[derive(Parser)]
#[command(name = "devhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend URL (overrides config file and DEVHUB_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Data directory (defaults to ~/.devhub)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every visible widget in layout order
    Dashboard,

    /// Latest tech news
    News,

    /// Search job listings
    Jobs(feed::JobsArgs),

    /// Coding challenges
    Challenges(feed::ChallengesArgs),

    /// Community posts
    Posts(feed::PostsArgs),

    /// Tags available for filtering posts
    Tags,

    /// Manage the widget layout
    #[command(subcommand)]
    Widgets(widgets::WidgetCommands),

    /// Show a project board
    Board(board::BoardArgs),

    /// Connect an external account
    Connect(connect::ConnectArgs),
}

/// Resolved configuration and the clients built from it.
pub struct AppContext {
    pub config: DevhubConfig,
    pub client: ApiClient,
}

impl AppContext {
    fn build(api_url: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = match data_dir {
            Some(dir) => {
                let mut config = DevhubConfig::load_from_dir(&dir)?;
                config.apply_env(|key| std::env::var(key).ok());
                config.data_dir = dir;
                config
            }
            None => DevhubConfig::load()?,
        };
        if let Some(url) = api_url {
            config.api_url = url;
        }
        debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "Configuration resolved");

        let client = ApiClient::from_config(&config);
        Ok(Self { config, client })
    }

    /// Open the layout storage: Redis when configured, files otherwise.
    pub async fn storage(&self) -> Result<Arc<dyn Storage>> {
        match &self.config.redis_url {
            Some(url) => {
                let storage = devhub_db::init_redis_storage(url)
                    .await
                    .with_context(|| format!("Failed to connect to Redis at {}", url))?;
                Ok(Arc::new(storage))
            }
            None => {
                let dir = self.config.state_dir();
                let storage = devhub_db::FileStorage::open(&dir)
                    .await
                    .with_context(|| format!("Failed to open state directory {}", dir.display()))?;
                Ok(Arc::new(storage))
            }
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let ctx = AppContext::build(self.api_url, self.data_dir)?;

        match self.command {
            Commands::Dashboard => dashboard::execute(&ctx).await,
            Commands::News => feed::news(&ctx).await,
            Commands::Jobs(args) => feed::jobs(args, &ctx).await,
            Commands::Challenges(args) => feed::challenges(args, &ctx).await,
            Commands::Posts(args) => feed::posts(args, &ctx).await,
            Commands::Tags => feed::tags(&ctx).await,
            Commands::Widgets(cmd) => widgets::execute(cmd, &ctx).await,
            Commands::Board(args) => board::execute(args),
            Commands::Connect(args) => connect::execute(args, &ctx).await,
        }
    }
}
