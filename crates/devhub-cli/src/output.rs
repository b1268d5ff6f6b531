//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use devhub_core::board::model::{BoardItem, BoardStatus, Issue, Priority, Task};
use devhub_core::board::{BoardState, IssueBoard, TaskBoard};
use devhub_core::feed::model::{Challenge, JobListing, NewsItem, Post};
use devhub_core::notification::model::NotificationKind;
use devhub_core::notification::NotificationStore;
use devhub_core::widget::model::{WidgetKind, WidgetSetting};
use unicode_width::UnicodeWidthStr;

/// Print a widget heading.
pub fn print_section(title: &str) {
    let width = term_width().min(80);
    let label = format!(" {} ", title);
    let rule = width.saturating_sub(UnicodeWidthStr::width(label.as_str()) + 2);
    println!("{}{}{}", "──".dimmed(), label.bold(), "─".repeat(rule).dimmed());
}

/// Print the widget layout.
pub fn print_widgets(widgets: &[WidgetSetting]) {
    println!("{:<5} {:<15} {:<20} {}", "Pos", "ID", "Title", "Visible");
    println!("{}", "─".repeat(50));

    for widget in widgets {
        let visible = if widget.visible {
            "yes".green()
        } else {
            "no".dimmed()
        };
        let title = pad_right(&truncate_visual(&widget.title, 20), 20);
        let title: ColoredString = if widget.visible {
            title.normal()
        } else {
            title.dimmed()
        };
        println!(
            "{:<5} {:<15} {} {}",
            widget.order,
            widget.id.as_str(),
            title,
            visible
        );
    }

    let shown = widgets.iter().filter(|w| w.visible).count();
    println!();
    println!("{} of {} widget(s) visible", shown, widgets.len());
}

/// Print the hint shown by account widgets that are not connected.
pub fn print_connect_hint(kind: WidgetKind) {
    println!(
        "{} Not connected. Run 'devhub connect {}' to link your account.",
        "○".dimmed(),
        kind.as_str()
    );
}

/// Print the user-facing error of a failed feed.
pub fn print_feed_error(error: Option<&str>) {
    println!(
        "{} {}",
        "✗".red().bold(),
        error.unwrap_or("Failed to fetch data").red()
    );
}

pub fn print_news(items: &[NewsItem]) {
    if items.is_empty() {
        println!("{}", "No news available.".dimmed());
        return;
    }

    let width = term_width();
    for item in items {
        println!(
            "{} {}",
            "▪".cyan(),
            truncate_visual(&item.title, width.saturating_sub(2)).bold()
        );
        println!(
            "  {} {} {}",
            item.source.yellow(),
            "·".dimmed(),
            item.category.dimmed()
        );
        if !item.description.is_empty() {
            println!("  {}", truncate_visual(&item.description, width.saturating_sub(2)));
        }
        println!("  {}", item.url.underline().dimmed());
    }
}

pub fn print_jobs(jobs: &[JobListing]) {
    if jobs.is_empty() {
        println!("{}", "No jobs match these filters.".dimmed());
        return;
    }

    println!(
        "{} {} {}",
        pad_right("Title", 30),
        pad_right("Company", 20),
        "Details"
    );
    println!("{}", "─".repeat(term_width().min(80)));

    for job in jobs {
        let mut details = vec![job.job_type.clone(), job.location.clone()];
        if job.remote {
            details.push("remote".to_string());
        }
        if let Some(salary) = &job.salary {
            details.push(salary.clone());
        }
        println!(
            "{} {} {}",
            pad_right(&truncate_visual(&job.title, 30), 30).bold(),
            pad_right(&truncate_visual(&job.company, 20), 20).cyan(),
            details.join(" · ").dimmed()
        );
    }

    println!();
    println!("{} job(s)", jobs.len());
}

fn difficulty_colored(difficulty: &str) -> ColoredString {
    match difficulty.to_lowercase().as_str() {
        "easy" => difficulty.green(),
        "medium" => difficulty.yellow(),
        "hard" => difficulty.red(),
        _ => difficulty.normal(),
    }
}

pub fn print_challenges(challenges: &[Challenge]) {
    if challenges.is_empty() {
        println!("{}", "No challenges found.".dimmed());
        return;
    }

    let width = term_width();
    for challenge in challenges {
        println!(
            "{} {} {}",
            challenge.title.bold(),
            difficulty_colored(&challenge.difficulty),
            format!("{} pts", challenge.points).dimmed()
        );
        println!("  {}", challenge.category.cyan());
        println!("  {}", truncate_visual(&challenge.description, width.saturating_sub(2)));
        for example in &challenge.examples {
            println!(
                "    {} {} {} {}",
                "in:".dimmed(),
                example.input,
                "out:".dimmed(),
                example.output
            );
        }
    }
}

pub fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("{}", "No posts found.".dimmed());
        return;
    }

    let width = term_width();
    for post in posts {
        println!(
            "{} {}",
            "▪".cyan(),
            truncate_visual(&post.title, width.saturating_sub(2)).bold()
        );
        println!(
            "  {} {} {} {} {} reactions, {} comments",
            post.author.yellow(),
            "·".dimmed(),
            post.read_time.dimmed(),
            "·".dimmed(),
            post.reactions,
            post.comments_count
        );
        if !post.tags.is_empty() {
            let tags: Vec<String> = post.tags.iter().map(|t| format!("#{}", t)).collect();
            println!("  {}", tags.join(" ").blue());
        }
    }
}

/// Print the tag chips, highlighting the active one.
pub fn print_tags(tags: &[String], active: Option<&str>) {
    if tags.is_empty() {
        println!("{}", "No tags available.".dimmed());
        return;
    }

    let chips: Vec<String> = tags
        .iter()
        .map(|tag| {
            if Some(tag.as_str()) == active {
                format!("#{}", tag).on_blue().white().bold().to_string()
            } else {
                format!("#{}", tag).blue().to_string()
            }
        })
        .collect();
    println!("{}", chips.join(" "));
}

/// Print notifications, newest first, with the unread count.
pub fn print_notifications(store: &NotificationStore) {
    println!(
        "{} {}",
        "Notifications".bold(),
        format!("({} unread)", store.unread_count()).dimmed()
    );

    if store.is_empty() {
        println!("{}", "  Nothing new.".dimmed());
        return;
    }

    for notification in store.notifications() {
        let marker = match notification.kind {
            NotificationKind::Info => "ℹ".blue(),
            NotificationKind::Success => "✓".green(),
            NotificationKind::Warning => "!".yellow(),
            NotificationKind::Error => "✗".red(),
        };
        let message: ColoredString = if notification.read {
            notification.message.as_str().dimmed()
        } else {
            notification.message.as_str().normal()
        };
        println!(
            "  {} {} {}",
            marker,
            message,
            notification.created_at.format("%H:%M:%S").to_string().dimmed()
        );
    }
}

pub fn print_task_board(board: &TaskBoard) {
    print_board(board, |_: &Task| "  ".normal());
    if let Some(task) = board.selected() {
        print_detail(task, None);
    }
}

pub fn print_issue_board(board: &IssueBoard) {
    print_board(board, |issue: &Issue| priority_indicator(issue.priority));
    if let Some(issue) = board.selected() {
        print_detail(issue, Some(issue.priority));
    }
}

fn priority_indicator(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "! ".yellow(),
        Priority::Medium => "· ".dimmed(),
        Priority::Low => "  ".dimmed(),
    }
}

fn column_colored<S: BoardStatus>(status: S, label: String) -> ColoredString {
    match S::ALL.iter().position(|s| *s == status) {
        Some(0) => label.blue().bold(),
        Some(1) => label.yellow().bold(),
        Some(2) => label.green().bold(),
        _ => label.normal(),
    }
}

/// Print a three-column board, compact on narrow terminals.
fn print_board<T: BoardItem>(board: &BoardState<T>, indicator: impl Fn(&T) -> ColoredString) {
    let width = term_width();
    if width < 60 {
        print_board_compact(board, &indicator);
    } else {
        print_board_wide(board, width, &indicator);
    }
}

fn print_board_wide<T: BoardItem>(
    board: &BoardState<T>,
    term_w: usize,
    indicator: &impl Fn(&T) -> ColoredString,
) {
    let columns = board.columns();
    let col_width = ((term_w - 4) / 3).clamp(12, 35);
    let title_width = col_width - 3;

    let rule = |left: &str, mid: &str, right: &str| {
        let segment = "─".repeat(col_width);
        println!(
            "{}",
            format!("{}{}{}", left, [segment.as_str(); 3].join(mid), right).dimmed()
        );
    };

    rule("┌", "┬", "┐");
    print!("{}", "│".dimmed());
    for (i, col) in columns.iter().enumerate() {
        let plain = truncate_visual(
            &format!("{} {}", col.status.label().to_uppercase(), col.items.len()),
            col_width,
        );
        let padding = col_width - UnicodeWidthStr::width(plain.as_str());
        let left_pad = padding / 2;
        print!(
            "{}{}{}",
            " ".repeat(left_pad),
            column_colored(col.status, plain),
            " ".repeat(padding - left_pad)
        );
        if i < 2 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());
    rule("├", "┼", "┤");

    let rows = columns.iter().map(|c| c.items.len()).max().unwrap_or(0);
    for row in 0..rows {
        print!("{}", "│".dimmed());
        for (ci, col) in columns.iter().enumerate() {
            match col.items.get(row) {
                Some(item) => {
                    let title = pad_right(&truncate_visual(item.title(), title_width), title_width);
                    let title: ColoredString = match ci {
                        1 => title.yellow(),
                        2 => title.green().dimmed(),
                        _ => title.normal(),
                    };
                    print!("{} {}", indicator(item), title);
                }
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < 2 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }
    rule("└", "┴", "┘");

    let total = board.items().len();
    let done = columns[2].items.len();
    if total > 0 {
        println!(
            " {} {} items {} {} {} ({}%)",
            "■".cyan(),
            total.to_string().bold(),
            "·".dimmed(),
            done.to_string().green(),
            columns[2].status.label().to_lowercase(),
            done * 100 / total
        );
    }
}

fn print_board_compact<T: BoardItem>(
    board: &BoardState<T>,
    indicator: &impl Fn(&T) -> ColoredString,
) {
    for col in board.columns() {
        if col.items.is_empty() {
            continue;
        }
        let header = format!("{} {}", col.status.label().to_uppercase(), col.items.len());
        println!(" {} {}", "▸".dimmed(), column_colored(col.status, header));
        for item in col.items {
            println!("   {} {} {}", indicator(item), item.title(), item.id().dimmed());
        }
        println!();
    }
}

/// Print the detail view of the selected item.
fn print_detail<T: BoardItem>(item: &T, priority: Option<Priority>) {
    println!();
    println!("{} {}", item.title().cyan().bold(), format!("({})", item.id()).dimmed());
    println!("{}: {}", "Status".bold(), item.status().label().yellow());
    if let Some(priority) = priority {
        println!("{}: {}", "Priority".bold(), priority.as_str());
    }
    if !item.description().is_empty() {
        println!();
        println!("{}", item.description());
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_visual_keeps_short_strings() {
        assert_eq!(truncate_visual("Jobs", 10), "Jobs");
        assert_eq!(truncate_visual("Coding Challenges", 8), "Coding..");
        assert_eq!(truncate_visual("abc", 2), "..");
    }

    #[test]
    fn test_pad_right_uses_visual_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("✓", 3), "✓  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
