//! fa-scrape main entry point
//!
//! Command-line front end over [`FaClient`]. Every command prints its result
//! as JSON on stdout; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fa_scrape::config::{load_config, ClientConfig};
use fa_scrape::models::{CommentOrigin, NoteFolder, SearchParams};
use fa_scrape::paginate::Listing;
use fa_scrape::{FaClient, Paginator};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// fa-scrape: a FurAffinity scraping client
///
/// Fetches FurAffinity pages with the given session cookies and prints the
/// extracted records as JSON. Both site themes are supported.
#[derive(Parser, Debug)]
#[command(name = "fa-scrape")]
#[command(version)]
#[command(about = "A FurAffinity scraping client", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Session cookie header; overrides the config file
    #[arg(long, env = "FA_COOKIES", hide_env_values = true)]
    cookies: Option<String>,

    /// IANA timezone the account displays dates in
    #[arg(long)]
    timezone: Option<String>,

    /// Fail on the first 5xx instead of retrying
    #[arg(long)]
    no_retry: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// How much of a listing to fetch
#[derive(clap::Args, Debug, Clone, Copy)]
struct PageArgs {
    /// Fetch only this page
    #[arg(long, conflicts_with = "max_pages")]
    page: Option<u32>,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// New submissions from watched users
    Inbox {
        /// Resume from a cursor path printed by an earlier run
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// A user's gallery
    Gallery {
        user: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// A user's scraps
    Scraps {
        user: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// A user's favorites
    Favorites {
        user: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// A user's profile page
    User { user: String },
    /// A user's journal listing
    Journals {
        user: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// Users that a user watches
    Watching {
        user: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// Users watching a user
    Watchers {
        user: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// View, favorite and comment counts for a user's submissions
    Stats { user: String },
    /// A submission and its comments
    Submission { id: u64 },
    /// A journal and its comments
    Journal { id: u64 },
    /// Raw text of one comment
    Comment {
        id: u64,
        #[arg(long, value_enum, default_value_t = OriginArg::Submission)]
        origin: OriginArg,
    },
    /// The message center
    Messages,
    /// The note inbox
    Notes,
    /// A single note
    Note { id: u64 },
    /// Move notes to another folder
    MoveNotes {
        /// Destination folder: unread, restore, archive or trash
        #[arg(long)]
        to: NoteFolder,
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Search submissions
    Search {
        query: String,
        /// Search filters as JSON; omitted fields keep the site defaults
        #[arg(long)]
        params: Option<String>,
        #[command(flatten)]
        pages: PageArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OriginArg {
    Submission,
    Journal,
}

impl From<OriginArg> for CommentOrigin {
    fn from(origin: OriginArg) -> Self {
        match origin {
            OriginArg::Submission => CommentOrigin::Submission,
            OriginArg::Journal => CommentOrigin::Journal,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let client = FaClient::new(config).context("Failed to create client")?;

    match run(&client, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("{:#}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fa_scrape=info,warn"),
            1 => EnvFilter::new("fa_scrape=debug,info"),
            2 => EnvFilter::new("fa_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    if let Some(cookies) = &cli.cookies {
        config.cookies = Some(cookies.clone());
    }
    if let Some(timezone) = &cli.timezone {
        config.timezone = Some(timezone.clone());
    }
    if cli.no_retry {
        config.disable_retry = true;
    }
    if config.cookies.is_none() {
        tracing::warn!("No cookies configured; most pages need a logged-in session");
    }

    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Walks a paginator, stopping early after `max_pages` pages
async fn drain<L>(mut paginator: Paginator<'_, L>, max_pages: Option<usize>) -> anyhow::Result<()>
where
    L: Listing,
    L::Item: Serialize,
{
    let mut items = Vec::new();
    let mut pages = 0;

    while max_pages.map_or(true, |max| pages < max) {
        match paginator.next_batch().await? {
            Some(batch) => {
                pages += 1;
                tracing::info!("Page {}: {} items", pages, batch.len());
                items.extend(batch);
            }
            None => break,
        }
    }

    if let Some(cursor) = paginator.cursor() {
        tracing::info!("More pages remain; resume from {}", cursor);
    }
    print_json(&items)
}

async fn run(client: &FaClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Inbox { from, max_pages } => match from {
            Some(path) => {
                let listing = fa_scrape::paginate::SubmissionInbox;
                let paginator =
                    Paginator::resume(client, listing, fa_scrape::Cursor::path(path));
                drain(paginator, max_pages).await
            }
            None => drain(client.get_submissions(), max_pages).await,
        },
        Command::Gallery { user, pages } => match pages.page {
            Some(n) => print_json(&client.get_user_gallery_page(&user, n).await?),
            None => drain(client.get_user_gallery(&user), pages.max_pages).await,
        },
        Command::Scraps { user, pages } => match pages.page {
            Some(n) => print_json(&client.get_user_scraps_page(&user, n).await?),
            None => drain(client.get_user_scraps(&user), pages.max_pages).await,
        },
        Command::Favorites { user, pages } => match pages.page {
            Some(n) => print_json(&client.get_user_favorites_page(&user, n).await?),
            None => drain(client.get_user_favorites(&user), pages.max_pages).await,
        },
        Command::User { user } => print_json(&client.get_user_page(&user).await?),
        Command::Journals { user, pages } => match pages.page {
            Some(n) => print_json(&client.get_user_journals_page(&user, n).await?),
            None => drain(client.get_user_journals(&user), pages.max_pages).await,
        },
        Command::Watching { user, pages } => match pages.page {
            Some(n) => print_json(&client.get_user_watching_page(&user, n).await?),
            None => drain(client.get_user_watching(&user), pages.max_pages).await,
        },
        Command::Watchers { user, pages } => match pages.page {
            Some(n) => print_json(&client.get_user_watchers_page(&user, n).await?),
            None => drain(client.get_user_watchers(&user), pages.max_pages).await,
        },
        Command::Stats { user } => print_json(&client.get_submission_statistics(&user).await?),
        Command::Submission { id } => {
            let submission = client.get_submission(id).await?;
            let navigation = FaClient::navigation_from_submission(&submission.data);
            tracing::debug!(
                "Previous: {:?}, next: {:?}",
                navigation.previous,
                navigation.next
            );
            print_json(&submission)
        }
        Command::Journal { id } => print_json(&client.get_journal(id).await?),
        Command::Comment { id, origin } => {
            print_json(&client.get_comment_text(id, origin.into()).await?)
        }
        Command::Messages => print_json(&client.get_messages().await?),
        Command::Notes => print_json(&client.get_notes().await?),
        Command::Note { id } => print_json(&client.get_note(id).await?),
        Command::MoveNotes { to, ids } => {
            client.move_notes(&ids, to).await?;
            tracing::info!("Moved {} notes to {}", ids.len(), to.as_str());
            Ok(())
        }
        Command::Search {
            query,
            params,
            pages,
        } => {
            let params: SearchParams = match params {
                Some(json) => serde_json::from_str(&json).context("Invalid --params JSON")?,
                None => SearchParams::default(),
            };
            match pages.page {
                Some(n) => print_json(&client.get_search_page(&query, &params, n).await?),
                None => drain(client.search(&query, params), pages.max_pages).await,
            }
        }
    }
}
