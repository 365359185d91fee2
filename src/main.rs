//! # Catalog Query Driver
//!
//! ## Purpose
//! Command-line entry point for the catalog discovery engine. Loads a record
//! collection from a JSON file, maps CLI flags onto query criteria, runs the
//! pipeline, and prints the JSON response envelope.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file, record file (JSON array), query flags
//! - **Output**: JSON envelope on stdout; error envelope on stderr
//! - **Modes**: Paged query (default), facet statistics, map clustering,
//!   autocomplete suggestions
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Load the record collection
//! 4. Build the query request from flags
//! 5. Run the requested pipeline mode and print the envelope

use clap::{Arg, ArgAction, Command};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use catalog_discovery::{
    cluster,
    config::EngineConfig,
    errors::{CatalogError, Result},
    facets, pipeline,
    pipeline::{ApiError, ApiResponse, QueryRequest},
    search, CatalogRecord, FilterCriteria,
};

fn main() {
    if let Err(e) = run() {
        let envelope = ApiError::from(&e);
        let body = serde_json::to_string_pretty(&envelope)
            .unwrap_or_else(|_| format!("{{\"success\":false,\"error\":\"{}\"}}", e));
        eprintln!("{}", body);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = Command::new("catalog-query")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Catalog Platform Team")
        .about("Query a catalog record collection: filter, search, facet, and cluster")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("catalog-discovery.toml"),
        )
        .arg(
            Arg::new("records")
                .short('r')
                .long("records")
                .value_name("FILE")
                .help("JSON file containing the record collection")
                .required(true),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Free-text search query"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("CATEGORY")
                .action(ArgAction::Append)
                .help("Filter by category (repeatable)"),
        )
        .arg(
            Arg::new("industry")
                .long("industry")
                .value_name("INDUSTRY")
                .action(ArgAction::Append)
                .help("Filter by industry (repeatable)"),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .value_name("STATUS")
                .action(ArgAction::Append)
                .help("Filter by lifecycle status (repeatable)"),
        )
        .arg(
            Arg::new("country")
                .long("country")
                .value_name("COUNTRY")
                .action(ArgAction::Append)
                .help("Filter by country (repeatable)"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .value_name("TAG")
                .action(ArgAction::Append)
                .help("Filter by tag, any match (repeatable)"),
        )
        .arg(
            Arg::new("featured")
                .long("featured")
                .action(ArgAction::SetTrue)
                .help("Only featured records"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_name("KEY")
                .help("Sort key, e.g. title-asc, created-desc, featured"),
        )
        .arg(
            Arg::new("page")
                .short('p')
                .long("page")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("1-based page number"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Page size"),
        )
        .arg(
            Arg::new("facets")
                .long("facets")
                .action(ArgAction::SetTrue)
                .help("Print facet statistics for the matching set"),
        )
        .arg(
            Arg::new("cluster")
                .long("cluster")
                .value_name("ZOOM")
                .value_parser(clap::value_parser!(u8))
                .help("Print map clusters of the matching set at a zoom level"),
        )
        .arg(
            Arg::new("suggest")
                .long("suggest")
                .value_name("PREFIX")
                .help("Print autocomplete suggestions for a partial query"),
        )
        .get_matches();

    // Load configuration
    let config_path = matches
        .get_one::<String>("config")
        .expect("config has a default value");
    let config = EngineConfig::from_file(config_path)?;

    // Initialize logging
    init_logging(&config);

    // Load the record collection
    let records_path = matches
        .get_one::<String>("records")
        .expect("records is required");
    let records = load_records(records_path)?;
    info!(
        count = records.len(),
        path = records_path,
        "Record collection loaded"
    );

    let request = build_request(&matches)?;

    // Suggestions are independent of the query pipeline
    if let Some(prefix) = matches.get_one::<String>("suggest") {
        let refs: Vec<&CatalogRecord> = records.iter().collect();
        let suggestions = search::suggest(&refs, prefix, config.search.suggestion_limit);
        return print_envelope(&ApiResponse::new(suggestions));
    }

    if matches.get_flag("facets") {
        let matching = pipeline::matching(&records, &request, &config)?;
        let stats = facets::compute_stats(&matching);
        return print_envelope(&ApiResponse::new(stats));
    }

    if let Some(zoom) = matches.get_one::<u8>("cluster") {
        let matching = pipeline::matching(&records, &request, &config)?;
        let outcome = cluster::cluster(&matching, *zoom);
        return print_envelope(&ApiResponse::new(outcome));
    }

    let result = pipeline::execute(&records, &request, &config)?;
    print_envelope(&ApiResponse::new(result))
}

/// Initialize logging and tracing
fn init_logging(config: &EngineConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let fmt_layer = if config.logging.json_format {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

/// Load a JSON array of records
fn load_records(path: &str) -> Result<Vec<CatalogRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<CatalogRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Map CLI flags onto a query request, rejecting unknown enum tokens
fn build_request(matches: &clap::ArgMatches) -> Result<QueryRequest> {
    let mut filters = FilterCriteria::default();

    filters.categories = parse_many(matches, "category")?;
    filters.industries = parse_many(matches, "industry")?;
    filters.statuses = parse_many(matches, "status")?;
    filters.countries = collect_strings(matches, "country");
    filters.tags = collect_strings(matches, "tag");
    if matches.get_flag("featured") {
        filters.is_featured = Some(true);
    }

    let sort = matches
        .get_one::<String>("sort")
        .map(|s| s.parse())
        .transpose()?;

    Ok(QueryRequest {
        filters,
        search: matches.get_one::<String>("query").cloned(),
        sort,
        page: matches.get_one::<usize>("page").copied(),
        limit: matches.get_one::<usize>("limit").copied(),
    })
}

/// Parse repeated enum-valued flags through their FromStr impls
fn parse_many<T>(matches: &clap::ArgMatches, id: &str) -> Result<Option<Vec<T>>>
where
    T: std::str::FromStr<Err = CatalogError>,
{
    match matches.get_many::<String>(id) {
        None => Ok(None),
        Some(values) => values
            .map(|v| v.parse())
            .collect::<Result<Vec<T>>>()
            .map(Some),
    }
}

fn collect_strings(matches: &clap::ArgMatches, id: &str) -> Option<Vec<String>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
}

fn print_envelope<T: serde::Serialize>(envelope: &ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}
