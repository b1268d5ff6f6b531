//! Account connection commands.

use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use devhub_core::auth::{self, Provider};

use super::AppContext;

#[derive(Args)]
pub struct ConnectArgs {
    /// Service to connect (github, stackoverflow)
    pub provider: String,
}

pub async fn execute(args: ConnectArgs, ctx: &AppContext) -> Result<()> {
    let provider = Provider::from_str(&args.provider)
        .ok_or_else(|| anyhow!("Unknown provider '{}'. Use github or stackoverflow.", args.provider))?;

    match auth::connect(&ctx.client, provider).await {
        Some(url) => {
            println!(
                "{} Open this URL to connect {}:",
                "→".cyan().bold(),
                provider.display_name().bold()
            );
            println!("  {}", url.underline());
        }
        None => {
            println!(
                "{} Could not connect to {}. Is the backend running at {}?",
                "!".yellow().bold(),
                provider.display_name(),
                ctx.client.base_url().dimmed()
            );
        }
    }
    Ok(())
}
