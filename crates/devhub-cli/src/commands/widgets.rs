//! Widget layout commands.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use devhub_core::widget::model::WidgetKind;
use devhub_core::widget::WidgetLayoutStore;
use dialoguer::Confirm;

use super::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum WidgetCommands {
    /// Show the layout
    List,

    /// Show or hide a widget
    Toggle {
        /// Widget id (activity, github, stackoverflow, projects, news, jobs, challenges)
        id: String,
    },

    /// Move the widget at one position to another
    Move {
        /// Current position (0-based)
        from: usize,
        /// Target position (0-based)
        to: usize,
    },

    /// Restore the default layout
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn execute(cmd: WidgetCommands, ctx: &AppContext) -> Result<()> {
    let storage = ctx.storage().await?;
    let mut layout = WidgetLayoutStore::load(storage).await;

    match cmd {
        WidgetCommands::List => {}

        WidgetCommands::Toggle { id } => {
            let kind = parse_widget(&id)?;
            layout.toggle_visibility(kind).await?;
            let visible = layout.get(kind).is_some_and(|w| w.visible);
            println!(
                "{} {} is now {}",
                "✓".green().bold(),
                kind.default_title().cyan(),
                if visible { "visible".green() } else { "hidden".dimmed() }
            );
        }

        WidgetCommands::Move { from, to } => {
            layout.reorder(from, to).await?;
            println!(
                "{} Moved widget {} → {}",
                "✓".green().bold(),
                from.to_string().dimmed(),
                to.to_string().cyan()
            );
        }

        WidgetCommands::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Restore the default widget layout?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("{}", "Layout unchanged.".dimmed());
                return Ok(());
            }
            layout.reset().await?;
            println!("{} Layout reset", "✓".green().bold());
        }
    }

    println!();
    output::print_widgets(layout.widgets());
    Ok(())
}

fn parse_widget(id: &str) -> Result<WidgetKind> {
    WidgetKind::from_str(id).ok_or_else(|| {
        let known: Vec<&str> = WidgetKind::ALL.iter().map(|k| k.as_str()).collect();
        anyhow!("Unknown widget '{}'. Known widgets: {}", id, known.join(", "))
    })
}
