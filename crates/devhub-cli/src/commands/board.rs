//! Project board commands.
//!
//! Boards are in-memory demo data: every invocation starts from the seed
//! items, applies the requested move and selection, and renders.

use anyhow::{anyhow, bail, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use devhub_core::board::model::{BoardItem, BoardStatus};
use devhub_core::board::{BoardState, IssueBoard, TaskBoard};

use crate::output;

#[derive(Clone, Copy, ValueEnum)]
pub enum BoardKind {
    /// Task board (todo, inProgress, done)
    Tasks,
    /// Issue tracker (open, inProgress, resolved)
    Issues,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Which board to show
    #[arg(value_enum)]
    pub kind: BoardKind,

    /// Move an item: --move <ID> <STATUS>
    #[arg(long = "move", num_args = 2, value_names = ["ID", "STATUS"])]
    pub move_to: Option<Vec<String>>,

    /// Show the details of one item
    #[arg(long)]
    pub select: Option<String>,
}

pub fn execute(args: BoardArgs) -> Result<()> {
    match args.kind {
        BoardKind::Tasks => {
            let mut board = TaskBoard::demo();
            apply(&mut board, &args)?;
            output::print_task_board(&board);
        }
        BoardKind::Issues => {
            let mut board = IssueBoard::demo();
            apply(&mut board, &args)?;
            output::print_issue_board(&board);
        }
    }
    Ok(())
}

fn apply<T: BoardItem>(board: &mut BoardState<T>, args: &BoardArgs) -> Result<()> {
    if let Some(values) = &args.move_to {
        let [id, status] = values.as_slice() else {
            bail!("--move takes an item id and a status");
        };
        let status = parse_status::<T::Status>(status)?;
        if board.set_status(id, status) {
            println!(
                "{} Moved {} to {}",
                "✓".green().bold(),
                id.dimmed(),
                status.label().cyan()
            );
        } else {
            println!("{} No item '{}' on this board", "!".yellow().bold(), id);
        }
        println!();
    }

    if let Some(id) = &args.select {
        if !board.select(Some(id)) {
            println!("{} No item '{}' on this board", "!".yellow().bold(), id);
            println!();
        }
    }
    Ok(())
}

fn parse_status<S: BoardStatus>(value: &str) -> Result<S> {
    S::parse(value).ok_or_else(|| {
        let known: Vec<&str> = S::ALL.iter().map(|s| s.as_str()).collect();
        anyhow!("Unknown status '{}'. Use one of: {}", value, known.join(", "))
    })
}
