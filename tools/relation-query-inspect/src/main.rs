//! Relation query inspector.
//!
//! Runs a relation list query type against a repository fixture and prints
//! the resulting locations, the count and the location queries the handler
//! sent to the search backend.
//!
//! Usage:
//!   cargo run -p relation-query-inspect -- --fixture demos/site.yaml --query demos/related.yaml

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use layouts_memory_repository::{MemoryRepository, RepositoryFixture, StaticContentProvider};
use layouts_relation_query::repository::Location;
use layouts_relation_query::search::LocationQuery;
use layouts_relation_query::{
    HandlerSettings, Profile, QueryParameters, QueryTypeRegistry, Repository,
};

/// Inspector arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository fixture (YAML or JSON).
    #[arg(long, env = "RELATION_QUERY_FIXTURE")]
    fixture: PathBuf,

    /// Query parameters (YAML or JSON mapping).
    #[arg(long)]
    query: PathBuf,

    /// Query type identifier.
    #[arg(long, default_value = "relation_list")]
    query_type: String,

    /// Query type declarations.
    #[arg(long, default_value = "config/query_types.yaml")]
    declarations: PathBuf,

    /// Content id used as the current content.
    #[arg(long)]
    current_content: Option<i64>,

    /// Number of results to skip.
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Maximum number of results.
    #[arg(long)]
    limit: Option<usize>,

    /// Overrides RELATION_QUERY_PROFILE.
    #[arg(long)]
    profile: Option<Profile>,

    /// Comma separated language list, overrides RELATION_QUERY_LANGUAGES.
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Inspection report.
#[derive(Debug, Serialize)]
struct Report {
    query_type: String,
    contextual: bool,
    count: usize,
    locations: Vec<Location>,
    backend_queries: Vec<LocationQuery>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let settings = settings(&args)?;
    info!(profile = ?settings.profile, languages = ?settings.languages, "settings loaded");

    let fixture = RepositoryFixture::load(&args.fixture)?;
    let repository = Arc::new(MemoryRepository::from_fixture(fixture)?);

    let current = match args.current_content {
        Some(id) => Some(
            repository
                .content(id)
                .with_context(|| format!("current content {id} is not in the fixture"))?,
        ),
        None => None,
    };

    let mut registry = QueryTypeRegistry::with_relation_handlers(
        Repository::from_shared(repository.clone()),
        Arc::new(StaticContentProvider::new(current)),
        settings,
    );
    let declarations = read(&args.declarations)?;
    // Warnings are already logged by the registry.
    registry.load_yaml(&declarations).context("Invalid query type declarations")?;

    let Some(handler) = registry.handler(&args.query_type) else {
        bail!(
            "query type '{}' is not declared (available: {})",
            args.query_type,
            registry.identifiers().join(", ")
        );
    };

    let query = load_query(&args.query)?;
    debug!(parameters = query.len(), "query loaded");

    let locations = handler
        .get_values(&query, args.offset, args.limit)
        .await
        .context("Failed to load values")?;
    let count = handler
        .get_count(&query)
        .await
        .context("Failed to load count")?;

    let report = Report {
        query_type: args.query_type.clone(),
        contextual: handler.is_contextual(&query),
        count,
        locations,
        backend_queries: repository.queries(),
    };

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_text(&report, &repository)?,
    }

    Ok(())
}

fn settings(args: &Args) -> Result<HandlerSettings> {
    let mut settings = HandlerSettings::from_env().context("failed to load configuration")?;
    if let Some(profile) = args.profile {
        settings = settings.with_profile(profile);
    }
    if let Some(languages) = &args.languages {
        settings = settings.with_languages(languages.iter().map(String::as_str));
    }
    Ok(settings)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_query(path: &Path) -> Result<QueryParameters> {
    let source = read(path)?;
    let query = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&source)?,
        _ => serde_yml::from_str(&source)?,
    };
    Ok(query)
}

fn print_text(report: &Report, repository: &MemoryRepository) -> Result<()> {
    println!("Query type: {}", report.query_type);
    println!("Contextual: {}", report.contextual);
    println!("Count:      {}", report.count);
    println!();

    println!("Locations ({}):", report.locations.len());
    for location in &report.locations {
        let name = repository
            .content(location.content_id)
            .map(|c| c.info.name)
            .unwrap_or_default();
        println!(
            "  #{:<6} content {:<6} {}",
            location.id, location.content_id, name
        );
    }
    println!();

    println!("Backend queries ({}):", report.backend_queries.len());
    for query in &report.backend_queries {
        println!("  {}", serde_json::to_string(query)?);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,layouts_relation_query=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
