//! Pushpad CLI
//!
//! Command-line access to the Pushpad API. Credentials come from
//! `PUSHPAD_AUTH_TOKEN` / `PUSHPAD_PROJECT_ID` (or a `.env` file).

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pushpad::{
    DeliveryOptions, Notification, Pushpad, PushpadConfig, SubscriptionQuery, Tags,
};

/// Pushpad - web push notifications from the command line
#[derive(Parser)]
#[command(name = "pushpad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project to operate on (overrides PUSHPAD_PROJECT_ID)
    #[arg(long, global = true)]
    project_id: Option<u64>,

    /// Service host (overrides PUSHPAD_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the signature of a uid
    Sign {
        /// User identifier
        uid: String,
    },

    /// Print the signed subscription management link of a uid
    Link {
        /// User identifier
        uid: String,
    },

    /// Send a notification to every subscriber
    Broadcast {
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        tags: TagArgs,
    },

    /// Send a notification to specific users
    Send {
        /// Target uid (repeatable)
        #[arg(long = "uid", required = true)]
        uids: Vec<String>,
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        tags: TagArgs,
    },

    /// Show a notification and its statistics
    Notification {
        /// Notification id
        id: u64,
    },

    /// Cancel a scheduled notification
    Cancel {
        /// Notification id
        id: u64,
    },

    /// Count subscriptions
    Count {
        /// Only subscriptions of this uid (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
        #[command(flatten)]
        tags: TagArgs,
    },

    /// List subscriptions
    Subscriptions {
        /// Page number
        #[arg(short, long)]
        page: Option<u64>,
        /// Only subscriptions of this uid (repeatable)
        #[arg(long = "uid")]
        uids: Vec<String>,
        #[command(flatten)]
        tags: TagArgs,
    },

    /// List projects
    Projects,

    /// List senders
    Senders,
}

#[derive(Args)]
struct MessageArgs {
    /// Notification body
    #[arg(short, long)]
    body: String,
    /// Notification title
    #[arg(short, long)]
    title: Option<String>,
    /// URL opened on click
    #[arg(long)]
    target_url: Option<String>,
    /// Time to live in seconds
    #[arg(long)]
    ttl: Option<u64>,
}

impl MessageArgs {
    fn notification(self) -> Notification {
        let mut notification = Notification::new(self.body);
        if let Some(title) = self.title {
            notification = notification.with_title(title);
        }
        if let Some(url) = self.target_url {
            notification = notification.with_target_url(url);
        }
        if let Some(ttl) = self.ttl {
            notification = notification.with_ttl(ttl);
        }
        notification
    }
}

#[derive(Args)]
struct TagArgs {
    /// Tag (repeatable)
    #[arg(long = "tag", conflicts_with = "tag_expr")]
    tags: Vec<String>,
    /// Boolean tag expression, e.g. "sports && !travel"
    #[arg(long)]
    tag_expr: Option<String>,
}

impl TagArgs {
    fn into_tags(self) -> Option<Tags> {
        match self.tag_expr {
            Some(expr) => Some(Tags::expression(expr)),
            None if !self.tags.is_empty() => Some(Tags::List(self.tags)),
            None => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pushpad=debug,info"
    } else {
        "pushpad=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = PushpadConfig::from_env().context("Failed to load configuration")?;
    if let Some(project_id) = cli.project_id {
        config = config.with_project_id(project_id);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    debug!(?config, "Loaded configuration");

    let pushpad = Pushpad::new(config).context("Failed to build client")?;

    match cli.command {
        Commands::Sign { uid } => cmd_sign(&pushpad, &uid),
        Commands::Link { uid } => cmd_link(&pushpad, &uid),
        Commands::Broadcast { message, tags } => {
            cmd_deliver(&pushpad, message, None, tags).await
        }
        Commands::Send { uids, message, tags } => {
            cmd_deliver(&pushpad, message, Some(uids), tags).await
        }
        Commands::Notification { id } => cmd_notification(&pushpad, id).await,
        Commands::Cancel { id } => cmd_cancel(&pushpad, id).await,
        Commands::Count { uids, tags } => cmd_count(&pushpad, uids, tags).await,
        Commands::Subscriptions { page, uids, tags } => {
            cmd_subscriptions(&pushpad, page, uids, tags).await
        }
        Commands::Projects => cmd_projects(&pushpad).await,
        Commands::Senders => cmd_senders(&pushpad).await,
    }
}

fn audience_query(uids: Vec<String>, tags: TagArgs) -> SubscriptionQuery {
    let mut query = SubscriptionQuery::new().with_uids(uids);
    if let Some(tags) = tags.into_tags() {
        query = query.with_tags(tags);
    }
    query
}

/// Print a uid signature
fn cmd_sign(pushpad: &Pushpad, uid: &str) -> Result<()> {
    let signature = pushpad.signature_for(uid).context("Failed to sign uid")?;
    println!("{} {}", "uid_signature:".dimmed(), signature);
    Ok(())
}

/// Print a signed subscription link
fn cmd_link(pushpad: &Pushpad, uid: &str) -> Result<()> {
    let url = pushpad
        .subscription_edit_url(uid, None)
        .context("Failed to build subscription link")?;
    println!("{url}");
    Ok(())
}

/// Broadcast or send to uids
async fn cmd_deliver(
    pushpad: &Pushpad,
    message: MessageArgs,
    uids: Option<Vec<String>>,
    tags: TagArgs,
) -> Result<()> {
    let mut notification = message.notification();
    let mut options = DeliveryOptions::new();
    if let Some(tags) = tags.into_tags() {
        options = options.with_tags(tags);
    }

    let notifications = pushpad.notifications();
    let response = match uids {
        Some(uids) => {
            println!("{} {} user(s)", "📨 Sending to".cyan().bold(), uids.len());
            notifications.deliver_to(&mut notification, uids, &options).await
        }
        None => {
            println!("{}", "📢 Broadcasting...".cyan().bold());
            notifications.broadcast(&mut notification, &options).await
        }
    }
    .context("Failed to deliver notification")?;

    println!("\n{}", "✅ Notification created:".green().bold());
    if let Some(id) = notification.id {
        println!("   {} {}", "Id:".yellow(), id);
    }
    if let Some(scheduled) = notification.scheduled_count {
        println!("   {} {}", "Scheduled:".dimmed(), scheduled);
    }
    debug!(%response, "Delivery response");

    Ok(())
}

/// Show a notification
async fn cmd_notification(pushpad: &Pushpad, id: u64) -> Result<()> {
    let notification = pushpad
        .notifications()
        .find(id)
        .await
        .context("Failed to fetch notification")?;

    println!("{}", serde_json::to_string_pretty(&notification)?);
    Ok(())
}

/// Cancel a scheduled notification
async fn cmd_cancel(pushpad: &Pushpad, id: u64) -> Result<()> {
    let notification = Notification::default().with_id(id);
    pushpad
        .notifications()
        .cancel(&notification)
        .await
        .context("Failed to cancel notification")?;

    println!("{} #{}", "✅ Cancelled notification".green(), id);
    Ok(())
}

/// Count subscriptions
async fn cmd_count(pushpad: &Pushpad, uids: Vec<String>, tags: TagArgs) -> Result<()> {
    let count = pushpad
        .subscriptions()
        .count(&audience_query(uids, tags))
        .await
        .context("Failed to count subscriptions")?;

    println!("{} {}", "Subscriptions:".green().bold(), count);
    Ok(())
}

/// List subscriptions
async fn cmd_subscriptions(
    pushpad: &Pushpad,
    page: Option<u64>,
    uids: Vec<String>,
    tags: TagArgs,
) -> Result<()> {
    let mut query = audience_query(uids, tags);
    if let Some(page) = page {
        query = query.with_page(page);
    }

    let subscriptions = pushpad
        .subscriptions()
        .find_all(&query)
        .await
        .context("Failed to list subscriptions")?;

    if subscriptions.is_empty() {
        println!("{}", "No subscriptions found.".yellow());
        return Ok(());
    }

    for subscription in &subscriptions {
        println!(
            "   {} {}  {} {}  {} [{}]",
            "#".dimmed(),
            subscription.id.unwrap_or_default(),
            "uid:".dimmed(),
            subscription.uid.as_deref().unwrap_or("-"),
            "tags:".dimmed(),
            subscription.tags.join(", ")
        );
    }
    Ok(())
}

/// List projects
async fn cmd_projects(pushpad: &Pushpad) -> Result<()> {
    let projects = pushpad
        .projects()
        .find_all()
        .await
        .context("Failed to list projects")?;

    for project in &projects {
        println!(
            "   {} {}  {}  {}",
            "#".dimmed(),
            project.id.unwrap_or_default(),
            project.name.as_deref().unwrap_or("-").bold(),
            project.website.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// List senders
async fn cmd_senders(pushpad: &Pushpad) -> Result<()> {
    let senders = pushpad
        .senders()
        .find_all()
        .await
        .context("Failed to list senders")?;

    for sender in &senders {
        println!(
            "   {} {}  {}",
            "#".dimmed(),
            sender.id.unwrap_or_default(),
            sender.name.as_deref().unwrap_or("-").bold()
        );
    }
    Ok(())
}
