//! CLI commands implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::civic::{LookupError, RepresentativeLookup, StaticDistrictResolver, StaticLegislatorDirectory};
use crate::config::{load_settings, Config, Settings};
use crate::geocode::{NominatimGeocoder, Suggester};
use crate::ingest::{FeedSource, HttpFeedFetcher, IngestRunner};
use crate::models::{ContactMethod, ContactStatus, NewContactAction, TemplateCategory};
use crate::outreach::{
    builtin_templates, engagement_stats, format_template, template_by_id, Dispatcher,
    EngagementLog, JsonFileEngagementLog, Sender, SimulatedDispatcher,
};
use crate::store::{ContentApiStore, ContentStore};

#[derive(Parser)]
#[command(name = "stairwell")]
#[command(about = "Single Stair NC advocacy toolkit")]
#[command(version)]
pub struct Cli {
    /// Config file path (default: stairwell.{toml,yaml,json} in CWD)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and write a starter config
    Init,

    /// Fetch configured feeds and import new items into the content store
    Ingest {
        /// Ingest a single feed URL instead of the configured list
        #[arg(long)]
        feed: Option<String>,
        /// Label for --feed (default: "Ad hoc")
        #[arg(long)]
        label: Option<String>,
        /// Process feeds without writing to the store
        #[arg(long)]
        dry_run: bool,
    },

    /// List the most recently published stored items
    Ls {
        /// Maximum items to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output format: table or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Set or clear the featured flag on a stored item
    Feature {
        /// Store document id
        item_id: String,
        /// Clear the flag instead of setting it
        #[arg(long)]
        clear: bool,
    },

    /// Look up the legislators for an NC street address
    Lookup {
        /// Address, e.g. "123 Main St, Durham, NC 27701"
        #[arg(required = true)]
        address: Vec<String>,
    },

    /// Suggest address completions for a partial query
    Suggest {
        /// Partial address text
        query: String,
    },

    /// List the built-in message templates
    Templates {
        /// Filter by category: email, letter, phone_script
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Send a templated message to a legislator (simulated)
    Send {
        /// Sender address, e.g. "123 Main St, Durham, NC 27701"
        #[arg(long)]
        address: String,
        /// Template id (see `stairwell templates`)
        #[arg(long)]
        template: String,
        /// Sender name
        #[arg(long)]
        name: String,
        /// Sender email (required for the email method)
        #[arg(long)]
        email: Option<String>,
        /// Contact method: email, letter, phone, social
        #[arg(long, default_value = "email")]
        method: String,
        /// Shorthand for --method phone
        #[arg(long, conflicts_with = "method")]
        phone: bool,
    },

    /// Show engagement statistics
    Stats,

    /// Show system status
    Status,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, config) = load_settings(cli.config.as_deref(), cli.data_dir)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Init => cmd_init(&settings, &config).await,
        Commands::Ingest {
            feed,
            label,
            dry_run,
        } => cmd_ingest(&settings, &config, feed.as_deref(), label.as_deref(), dry_run).await,
        Commands::Ls { limit, format } => cmd_ls(&settings, &config, limit, &format).await,
        Commands::Feature { item_id, clear } => {
            cmd_feature(&settings, &config, &item_id, clear).await
        }
        Commands::Lookup { address } => cmd_lookup(&settings, &address.join(" ")).await,
        Commands::Suggest { query } => cmd_suggest(&settings, &query).await,
        Commands::Templates { category } => cmd_templates(category.as_deref()),
        Commands::Send {
            address,
            template,
            name,
            email,
            method,
            phone,
        } => {
            let method = if phone { "phone".to_string() } else { method };
            cmd_send(
                &settings,
                &address,
                &template,
                &name,
                email.as_deref(),
                &method,
            )
            .await
        }
        Commands::Stats => cmd_stats(&settings),
        Commands::Status => cmd_status(&settings, &config).await,
    }
}

fn build_store(settings: &Settings, config: &Config) -> anyhow::Result<ContentApiStore> {
    let creds = config.store_credentials();
    Ok(ContentApiStore::new(
        &creds.url,
        &creds.dataset,
        &creds.token,
        &creds.api_version,
        &settings.user_agent,
        settings.timeout(),
    )?)
}

fn build_geocoder(settings: &Settings) -> anyhow::Result<NominatimGeocoder> {
    Ok(NominatimGeocoder::new(
        &settings.geocoder_url,
        &settings.user_agent,
        settings.timeout(),
    )?)
}

async fn cmd_init(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    if let Some(path) = &config.source_path {
        println!(
            "{} Using existing config: {}",
            style("✓").green(),
            path.display()
        );
    } else {
        let starter_path = settings.data_dir.join("stairwell.toml");
        if starter_path.exists() {
            println!(
                "{} Starter config already exists: {}",
                style("!").yellow(),
                starter_path.display()
            );
        } else {
            std::fs::write(&starter_path, Config::starter_toml())?;
            println!(
                "{} Wrote starter config: {}",
                style("✓").green(),
                starter_path.display()
            );
            println!("  Edit it in place; it is picked up automatically.");
        }
    }

    let creds = config.store_credentials();
    if creds.url.is_empty() || creds.dataset.is_empty() || creds.token.is_empty() {
        println!(
            "{} Store credentials not set. Configure [store] or export \
             STAIRWELL_STORE_URL, STAIRWELL_STORE_DATASET, STAIRWELL_STORE_TOKEN.",
            style("!").yellow()
        );
    }

    println!(
        "{} Initialized Stairwell in {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    Ok(())
}

async fn cmd_ingest(
    settings: &Settings,
    config: &Config,
    feed_override: Option<&str>,
    label: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    // Credentials are checked here, before any feed is fetched.
    let store = build_store(settings, config)?;

    let fetcher = HttpFeedFetcher::new(&settings.user_agent, settings.timeout())?
        .with_delay(Duration::from_millis(settings.request_delay_ms));

    let feeds: Vec<FeedSource> = match feed_override {
        Some(url) => vec![FeedSource::new(url, label.unwrap_or("Ad hoc"))],
        None => config.feeds(),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!(
        "Ingesting {} feed{}{}...",
        feeds.len(),
        if feeds.len() == 1 { "" } else { "s" },
        if dry_run { " (dry run)" } else { "" }
    ));

    let report = IngestRunner::new(&store, &fetcher)
        .with_lock_path(settings.ingest_lock_path())
        .dry_run(dry_run)
        .run(&feeds)
        .await;
    pb.finish_and_clear();

    let report = report?;

    println!(
        "{} Ingestion complete: {} imported, {} skipped, {} failed",
        style("✓").green(),
        style(report.imported).green(),
        report.skipped,
        report.failed
    );

    if !report.feed_failures.is_empty() {
        println!("\n{} Some feeds failed:", style("!").yellow());
        for failure in &report.feed_failures {
            println!("  - {} ({}): {}", failure.label, failure.url, failure.error);
        }
    }

    Ok(())
}

async fn cmd_ls(
    settings: &Settings,
    config: &Config,
    limit: usize,
    format: &str,
) -> anyhow::Result<()> {
    let store = build_store(settings, config)?;
    let items = store.list_recent(limit).await?;

    if items.is_empty() {
        println!("{} No items found", style("!").yellow());
        return Ok(());
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        _ => {
            // Table format (default)
            println!(
                "\n{:<36}  {:<40}  {:<12}  {:<5}  Tags",
                "ID", "Title", "Published", "Feat."
            );
            println!("{}", "-".repeat(110));

            for item in &items {
                println!(
                    "{:<36}  {:<40}  {:<12}  {:<5}  {}",
                    truncate(&item.id, 36),
                    truncate(&item.title, 40),
                    item.published_at.format("%Y-%m-%d"),
                    if item.featured { "yes" } else { "" },
                    item.tags.join(", ")
                );
            }

            println!("\n{} items", items.len());
        }
    }

    Ok(())
}

async fn cmd_feature(
    settings: &Settings,
    config: &Config,
    item_id: &str,
    clear: bool,
) -> anyhow::Result<()> {
    let store = build_store(settings, config)?;
    store.set_featured(item_id, !clear).await?;

    if clear {
        println!("{} Cleared featured flag on {}", style("✓").green(), item_id);
    } else {
        println!("{} Featured {}", style("✓").green(), item_id);
    }
    Ok(())
}

async fn cmd_lookup(settings: &Settings, address: &str) -> anyhow::Result<()> {
    let geocoder = build_geocoder(settings)?;
    let lookup = RepresentativeLookup::new(&geocoder, &StaticDistrictResolver, &StaticLegislatorDirectory);

    let result = match lookup.lookup(address).await {
        Ok(result) => result,
        Err(e @ (LookupError::InvalidAddress | LookupError::GeocodeFailed)) => {
            println!("{} {}", style("✗").red(), e);
            return Ok(());
        }
        Err(LookupError::Internal(msg)) => {
            println!("{} Lookup failed: {}", style("✗").red(), msg);
            return Ok(());
        }
    };

    println!(
        "{} {} ({:.4}, {:.4})",
        style("✓").green(),
        result.address.to_query(),
        result.coordinates.latitude,
        result.coordinates.longitude
    );

    println!("\n{}", style("Districts").bold());
    for district in &result.districts {
        println!("  {} [{}]", district.name, district.kind.as_str());
    }

    println!("\n{}", style("Legislators").bold());
    for legislator in &result.legislators {
        println!(
            "  {} ({}) — {}",
            style(&legislator.name).cyan(),
            legislator.party.display_name(),
            legislator.title
        );
        if let Some(email) = &legislator.contact.email {
            println!("    email: {}", email);
        }
        if let Some(phone) = legislator.contact.any_phone() {
            println!("    phone: {}", phone);
        }
        println!("    position: {}", legislator.position.as_str());
    }

    Ok(())
}

async fn cmd_suggest(settings: &Settings, query: &str) -> anyhow::Result<()> {
    let geocoder = build_geocoder(settings)?;
    let suggester = Suggester::new(&geocoder);

    let suggestions = match suggester.suggest(query).await {
        Ok(suggestions) => suggestions,
        Err(e) => {
            println!("{} Suggestion lookup failed: {}", style("✗").red(), e);
            return Ok(());
        }
    };

    if suggestions.is_empty() {
        println!("{} No suggestions", style("!").yellow());
        return Ok(());
    }

    for suggestion in &suggestions {
        println!("{}", suggestion.value);
        println!("  {}", style(&suggestion.label).dim());
    }

    Ok(())
}

fn cmd_templates(category: Option<&str>) -> anyhow::Result<()> {
    let filter = match category {
        Some(raw) => match TemplateCategory::parse(raw) {
            Some(cat) => Some(cat),
            None => {
                println!(
                    "{} Unknown category '{}'. Valid: email, letter, phone_script",
                    style("✗").red(),
                    raw
                );
                return Ok(());
            }
        },
        None => None,
    };

    println!(
        "\n{:<16}  {:<20}  {:<14}  Tone",
        "ID", "Title", "Category"
    );
    println!("{}", "-".repeat(64));

    for template in builtin_templates() {
        if filter.is_some_and(|cat| template.category != cat) {
            continue;
        }
        println!(
            "{:<16}  {:<20}  {:<14}  {}",
            template.id,
            truncate(&template.title, 20),
            template.category.as_str(),
            template.tone.as_str()
        );
    }

    Ok(())
}

async fn cmd_send(
    settings: &Settings,
    address: &str,
    template_id: &str,
    name: &str,
    email: Option<&str>,
    method: &str,
) -> anyhow::Result<()> {
    let Some(method) = ContactMethod::parse(method) else {
        println!(
            "{} Unknown method '{}'. Valid: email, letter, phone, social",
            style("✗").red(),
            method
        );
        return Ok(());
    };

    let Some(template) = template_by_id(template_id) else {
        println!(
            "{} Unknown template '{}'. See `stairwell templates`.",
            style("✗").red(),
            template_id
        );
        return Ok(());
    };

    let geocoder = build_geocoder(settings)?;
    let lookup = RepresentativeLookup::new(&geocoder, &StaticDistrictResolver, &StaticLegislatorDirectory);
    let result = match lookup.lookup(address).await {
        Ok(result) => result,
        Err(e) => {
            println!("{} {}", style("✗").red(), e);
            return Ok(());
        }
    };

    // Prefer a legislator reachable over the chosen method.
    let legislator = result
        .legislators
        .iter()
        .find(|l| match method {
            ContactMethod::Email => l.contact.email.is_some(),
            ContactMethod::Letter => l.contact.mailing_address.is_some(),
            ContactMethod::Phone => l.contact.any_phone().is_some(),
            ContactMethod::Social => l.social.as_ref().is_some_and(|s| !s.is_empty()),
        })
        .or_else(|| result.legislators.first());
    let Some(legislator) = legislator else {
        println!("{} No legislators resolved for that address", style("✗").red());
        return Ok(());
    };

    let district_name = result
        .districts
        .iter()
        .find(|d| d.id == legislator.district_id)
        .map(|d| d.name.as_str())
        .unwrap_or(legislator.district_id.as_str());

    let message = format_template(
        template,
        name,
        &legislator.name,
        district_name,
        &result.address.city,
    );

    let sender = Sender {
        name: name.to_string(),
        email: email.map(str::to_string),
    };
    let dispatcher = SimulatedDispatcher::new();
    let dispatched = match method {
        ContactMethod::Email => dispatcher.send_email(legislator, &sender, &message).await,
        ContactMethod::Letter => dispatcher.send_letter(legislator, &sender, &message).await,
        ContactMethod::Phone => dispatcher.call(legislator, &message).await,
        ContactMethod::Social => dispatcher.post_social(legislator, &message.body).await,
    };

    // The engagement log records the attempt either way.
    let log = JsonFileEngagementLog::new(settings.engagement_log_path());
    let action = NewContactAction {
        user_name: name.to_string(),
        user_email: email.map(str::to_string),
        legislator_id: legislator.id.clone(),
        legislator_name: legislator.name.clone(),
        method,
        template_id: Some(template.id.clone()),
        template_title: Some(template.title.clone()),
        message: message.body.clone(),
        status: ContactStatus::Pending,
        notes: None,
        response: None,
    };
    match dispatched {
        Ok(receipt) => {
            log.append(NewContactAction {
                status: ContactStatus::Sent,
                notes: Some(format!("tracking {}", receipt.tracking_id)),
                ..action
            })?;

            println!(
                "{} Sent '{}' to {} via {} (simulated)",
                style("✓").green(),
                template.title,
                style(&legislator.name).cyan(),
                method
            );
            println!("  tracking id: {}", receipt.tracking_id);
        }
        Err(e) => {
            log.append(NewContactAction {
                status: ContactStatus::Failed,
                notes: Some(e.to_string()),
                ..action
            })?;

            println!("{} {}", style("✗").red(), e);
        }
    }

    Ok(())
}

fn cmd_stats(settings: &Settings) -> anyhow::Result<()> {
    let log = JsonFileEngagementLog::new(settings.engagement_log_path());
    let stats = engagement_stats(&log)?;

    println!("\n{}", style("Engagement").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Total actions:", stats.total_actions);

    for (method, count) in &stats.by_method {
        println!("{:<20} {}", format!("  {}:", method), count);
    }
    for (status, count) in &stats.by_status {
        println!("{:<20} {}", format!("  {}:", status), count);
    }

    if !stats.recent_activity.is_empty() {
        println!("\n{}", style("Recent activity").bold());
        for action in &stats.recent_activity {
            println!(
                "  {}  {}  {} ({})",
                action.created_at.format("%Y-%m-%d %H:%M"),
                action.legislator_name,
                action.method,
                action.status.as_str()
            );
        }
    }

    Ok(())
}

async fn cmd_status(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Stairwell Status").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Data directory:", settings.data_dir.display());

    let feeds = config.feeds();
    println!("{:<20} {}", "Configured feeds:", feeds.len());
    for feed in &feeds {
        let state = if feed.enabled { "" } else { " (disabled)" };
        println!("  {} — {}{}", feed.label, feed.url, state);
    }

    match build_store(settings, config) {
        Ok(store) => match store.count_items().await {
            Ok(count) => {
                println!("{:<20} {}", "Stored items:", count);
                match store.has_featured().await {
                    Ok(true) => println!("{:<20} yes", "Featured item:"),
                    Ok(false) => println!("{:<20} no", "Featured item:"),
                    Err(_) => {}
                }
            }
            Err(e) => {
                println!("{} Store unreachable: {}", style("✗").red(), e);
            }
        },
        Err(e) => {
            println!("{} {}", style("!").yellow(), e);
        }
    }

    let log = JsonFileEngagementLog::new(settings.engagement_log_path());
    match engagement_stats(&log) {
        Ok(stats) => println!("{:<20} {}", "Engagements:", stats.total_actions),
        Err(e) => println!("{} Engagement log unreadable: {}", style("✗").red(), e),
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_ingest_flags() {
        let cli = Cli::try_parse_from([
            "stairwell",
            "ingest",
            "--feed",
            "https://example.org/rss",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Ingest {
                feed,
                label,
                dry_run,
            } => {
                assert_eq!(feed.as_deref(), Some("https://example.org/rss"));
                assert!(label.is_none());
                assert!(dry_run);
            }
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["stairwell", "status", "--data-dir", "/tmp/sw", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/sw")));
    }

    #[test]
    fn test_cli_lookup_collects_address_words() {
        let cli =
            Cli::try_parse_from(["stairwell", "lookup", "123 Main St,", "Durham,", "NC 27701"])
                .unwrap();
        match cli.command {
            Commands::Lookup { address } => {
                assert_eq!(address.join(" "), "123 Main St, Durham, NC 27701");
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_cli_send_phone_shorthand() {
        let cli = Cli::try_parse_from([
            "stairwell",
            "send",
            "--address",
            "123 Main St, Durham, NC 27701",
            "--template",
            "phone-script",
            "--name",
            "Pat Doe",
            "--phone",
        ])
        .unwrap();
        match cli.command {
            Commands::Send { method, phone, .. } => {
                assert!(phone);
                // Default method is overridden at dispatch when --phone is set
                assert_eq!(method, "email");
            }
            _ => panic!("expected send"),
        }

        // --phone and an explicit --method are mutually exclusive
        assert!(Cli::try_parse_from([
            "stairwell",
            "send",
            "--address",
            "a, b",
            "--template",
            "t",
            "--name",
            "n",
            "--method",
            "letter",
            "--phone",
        ])
        .is_err());
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long headline", 10), "a very ...");
    }
}
