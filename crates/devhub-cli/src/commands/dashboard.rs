//! Dashboard command: every visible widget, in layout order.
//!
//! Notifications live only for one run. Feed outcomes are added and listed
//! at the end; nothing marks them read or clears them before exit.

use anyhow::Result;
use colored::Colorize;
use devhub_core::board::{IssueBoard, TaskBoard};
use devhub_core::feed::source::{
    ChallengesSource, FeedSource, JobsSource, NewsSource, PostsSource,
};
use devhub_core::feed::{FeedLoader, FeedStatus};
use devhub_core::notification::model::NotificationKind;
use devhub_core::notification::NotificationStore;
use devhub_core::widget::model::WidgetKind;
use devhub_core::widget::WidgetLayoutStore;

use super::AppContext;
use crate::output;

pub async fn execute(ctx: &AppContext) -> Result<()> {
    let storage = ctx.storage().await?;
    let layout = WidgetLayoutStore::load(storage).await;
    let mut notifications = NotificationStore::new();

    let mut posts = FeedLoader::new(PostsSource::new(ctx.client.clone()));
    let mut news = FeedLoader::new(NewsSource::new(ctx.client.clone()));
    let mut jobs = FeedLoader::new(JobsSource::new(ctx.client.clone()));
    let mut challenges = FeedLoader::new(ChallengesSource::new(ctx.client.clone()));

    let visible: Vec<WidgetKind> = layout.visible_widgets().map(|w| w.id).collect();
    for kind in &visible {
        match kind {
            WidgetKind::Activity => {
                posts.refresh();
            }
            WidgetKind::News => {
                news.refresh();
            }
            WidgetKind::Jobs => {
                jobs.refresh();
            }
            WidgetKind::Challenges => {
                challenges.refresh();
            }
            WidgetKind::Github | WidgetKind::Stackoverflow | WidgetKind::Projects => {}
        }
    }

    let spinner = super::feed::spinner("Loading dashboard...".to_string());

    let tags = if visible.contains(&WidgetKind::Activity) {
        let (tags, ..) = futures::join!(
            ctx.client.get_tags(),
            posts.settle(),
            news.settle(),
            jobs.settle(),
            challenges.settle()
        );
        tags
    } else {
        futures::join!(news.settle(), jobs.settle(), challenges.settle());
        Vec::new()
    };
    spinner.finish_and_clear();

    record_outcome(&mut notifications, &posts);
    record_outcome(&mut notifications, &news);
    record_outcome(&mut notifications, &jobs);
    record_outcome(&mut notifications, &challenges);

    if visible.is_empty() {
        println!(
            "{}",
            "Every widget is hidden. Show one with 'devhub widgets toggle <id>'.".dimmed()
        );
    }

    for kind in visible {
        output::print_section(layout.get(kind).map_or(kind.default_title(), |w| w.title.as_str()));
        match kind {
            WidgetKind::Activity => {
                output::print_tags(&tags, posts.filters().tag.as_deref());
                render_feed(&posts, output::print_posts);
            }
            WidgetKind::Github | WidgetKind::Stackoverflow => {
                output::print_connect_hint(kind);
            }
            WidgetKind::Projects => {
                output::print_task_board(&TaskBoard::demo());
                println!();
                output::print_issue_board(&IssueBoard::demo());
            }
            WidgetKind::News => render_feed(&news, output::print_news),
            WidgetKind::Jobs => render_feed(&jobs, output::print_jobs),
            WidgetKind::Challenges => render_feed(&challenges, output::print_challenges),
        }
        println!();
    }

    output::print_notifications(&notifications);
    Ok(())
}

/// Turn a settled feed into a notification. Feeds that never loaded are
/// skipped.
fn record_outcome<S: FeedSource>(notifications: &mut NotificationStore, feed: &FeedLoader<S>) {
    match feed.status() {
        FeedStatus::Success => notifications.add(
            format!("Loaded {} {}", feed.data().len(), feed.name()),
            NotificationKind::Success,
        ),
        FeedStatus::Error => notifications.add(
            feed.error().unwrap_or("Failed to fetch").to_string(),
            NotificationKind::Error,
        ),
        FeedStatus::Idle | FeedStatus::Loading => {}
    }
}

fn render_feed<S: FeedSource>(feed: &FeedLoader<S>, print: fn(&[S::Item])) {
    match feed.status() {
        FeedStatus::Error => output::print_feed_error(feed.error()),
        _ => print(feed.data()),
    }
}
