//! Feed commands: news, jobs, challenges, posts, tags.

use anyhow::{anyhow, Result};
use clap::Args;
use devhub_core::feed::model::{Difficulty, JobFilters, JobType, PostFilters};
use devhub_core::feed::source::{
    ChallengesSource, FeedSource, JobsSource, NewsSource, PostsSource,
};
use devhub_core::feed::{FeedLoader, FeedStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use super::AppContext;
use crate::output;

#[derive(Args)]
pub struct JobsArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Job type (all, full-time, contract)
    #[arg(short = 't', long = "type", default_value = "all")]
    pub job_type: String,

    /// Remote positions only
    #[arg(long)]
    pub remote: bool,
}

#[derive(Args)]
pub struct ChallengesArgs {
    /// Difficulty (all, easy, medium, hard)
    #[arg(short, long, default_value = "all")]
    pub difficulty: String,
}

#[derive(Args)]
pub struct PostsArgs {
    /// Only posts with this tag
    #[arg(short, long)]
    pub tag: Option<String>,
}

/// Start a steady-ticking spinner with `message`.
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Refresh a feed and wait for it behind a spinner.
pub async fn load<S: FeedSource>(feed: &mut FeedLoader<S>) -> FeedStatus {
    let spinner = spinner(format!("Loading {}...", feed.name()));
    feed.refresh();
    let status = feed.settle().await;

    spinner.finish_and_clear();
    status
}

pub async fn news(ctx: &AppContext) -> Result<()> {
    let mut feed = FeedLoader::new(NewsSource::new(ctx.client.clone()));
    if load(&mut feed).await == FeedStatus::Success {
        output::print_news(feed.data());
    } else {
        output::print_feed_error(feed.error());
    }
    Ok(())
}

pub async fn jobs(args: JobsArgs, ctx: &AppContext) -> Result<()> {
    let job_type = JobType::from_str(&args.job_type)
        .ok_or_else(|| anyhow!("Unknown job type '{}'. Use all, full-time or contract.", args.job_type))?;
    let filters = JobFilters {
        search: args.search,
        job_type,
        remote: args.remote,
    };

    let mut feed = FeedLoader::with_filters(Arc::new(JobsSource::new(ctx.client.clone())), filters);
    if load(&mut feed).await == FeedStatus::Success {
        output::print_jobs(feed.data());
    } else {
        output::print_feed_error(feed.error());
    }
    Ok(())
}

pub async fn challenges(args: ChallengesArgs, ctx: &AppContext) -> Result<()> {
    let difficulty = parse_difficulty(&args.difficulty)?;
    let mut feed = FeedLoader::with_filters(
        Arc::new(ChallengesSource::new(ctx.client.clone())),
        difficulty,
    );
    if load(&mut feed).await == FeedStatus::Success {
        output::print_challenges(feed.data());
    } else {
        output::print_feed_error(feed.error());
    }
    Ok(())
}

pub async fn posts(args: PostsArgs, ctx: &AppContext) -> Result<()> {
    let filters = PostFilters {
        tag: args.tag.filter(|t| !t.is_empty()),
    };
    let mut feed = FeedLoader::with_filters(Arc::new(PostsSource::new(ctx.client.clone())), filters);
    if load(&mut feed).await == FeedStatus::Success {
        output::print_posts(feed.data());
    } else {
        output::print_feed_error(feed.error());
    }
    Ok(())
}

pub async fn tags(ctx: &AppContext) -> Result<()> {
    let tags = ctx.client.get_tags().await;
    output::print_tags(&tags, None);
    Ok(())
}

fn parse_difficulty(value: &str) -> Result<Difficulty> {
    Difficulty::from_str(value)
        .ok_or_else(|| anyhow!("Unknown difficulty '{}'. Use all, easy, medium or hard.", value))
}
