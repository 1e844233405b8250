use anyhow::{anyhow, bail, Context, Result};
use catalog::sample::demo_marketplace;
use catalog::{MarketplaceIndex, ServiceData, UserId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{search_services, EngineConfig, RecommendationEngine, ServiceRecommendation};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// booking-recs - Service Marketplace Recommendation Engine
#[derive(Parser)]
#[command(name = "booking-recs")]
#[command(about = "Hybrid content + collaborative recommendations for service bookings", long_about = None)]
struct Cli {
    /// Directory holding services.json and behaviors.json (demo marketplace when omitted)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Engine config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get service recommendations for a customer
    Recommend {
        /// Customer to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return (config default when omitted)
        #[arg(long)]
        limit: Option<usize>,

        /// Show the score breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Show the most booked services in a location
    Trending {
        /// Location label, e.g. "Lagos"
        #[arg(long)]
        location: String,

        /// Number of services to return (config default when omitted)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a customer's profile and booking history
    User {
        #[arg(long)]
        user_id: UserId,
    },

    /// Search services by title, category or tag
    Search {
        /// Text to search for (case-insensitive substring match)
        #[arg(long)]
        query: String,
    },

    /// List the customers most similar to a customer
    Similar {
        #[arg(long)]
        user_id: UserId,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let index = Arc::new(load_index(cli.data_dir.as_ref())?);
    let (services, users, bookings) = index.counts();
    println!(
        "{} Loaded {} services, {} customers, {} bookings in {:?}",
        "✓".green(),
        services,
        users,
        bookings,
        start.elapsed()
    );

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = Arc::new(RecommendationEngine::from_config(config));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            explain,
        } => handle_recommend(&index, &engine, &user_id, limit, explain)?,
        Commands::Trending { location, limit } => handle_trending(&index, &engine, &location, limit),
        Commands::User { user_id } => handle_user(&index, &user_id)?,
        Commands::Search { query } => handle_search(&index, &query),
        Commands::Similar { user_id } => handle_similar(&index, &engine, &user_id)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(index, engine, requests, concurrent).await?,
    }

    Ok(())
}

/// Load the marketplace from `data_dir`, or the demo marketplace
fn load_index(data_dir: Option<&PathBuf>) -> Result<MarketplaceIndex> {
    match data_dir {
        Some(dir) => {
            println!("Loading marketplace from {}...", dir.display());
            MarketplaceIndex::load_from_files(dir)
                .with_context(|| format!("Failed to load marketplace from {}", dir.display()))
        }
        None => {
            info!("No --data-dir given, using the demo marketplace");
            demo_marketplace().context("Failed to build demo marketplace")
        }
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    index: &MarketplaceIndex,
    engine: &RecommendationEngine,
    user_id: &str,
    limit: Option<usize>,
    explain: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(engine.config().default_limit);
    let recommendations = engine.recommend_for(index, user_id, limit)?;

    if recommendations.is_empty() {
        println!("No recommendations for {user_id}");
        return Ok(());
    }
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'trending' command
fn handle_trending(
    index: &MarketplaceIndex,
    engine: &RecommendationEngine,
    location: &str,
    limit: Option<usize>,
) {
    let trending = engine.trending_for(index, location, limit);

    println!("{}", format!("Trending in {location}:").bold().blue());
    if trending.is_empty() {
        println!("  No bookings recorded in {location}");
        println!("  Known locations: {}", index.locations().join(", "));
        return;
    }
    for (rank, service) in trending.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), format_service(service));
    }
}

/// Handle the 'user' command
fn handle_user(index: &MarketplaceIndex, user_id: &str) -> Result<()> {
    let user = index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;
    let prefs = &user.preferences;

    println!("{}", format!("User ID: {}", user.user_id).bold().blue());
    println!("{}Location: {}", "• ".green(), user.location);
    let categories: Vec<String> = prefs
        .categories
        .iter()
        .map(|c| format!("{} ({} services)", c, index.get_services_by_category(c).len()))
        .collect();
    println!("{}Preferred categories: {}", "• ".green(), categories.join(", "));
    println!(
        "{}Price range: {:.0} - {:.0}",
        "• ".green(),
        prefs.price_range.min,
        prefs.price_range.max
    );
    if !prefs.providers.is_empty() {
        println!("{}Preferred providers: {}", "• ".green(), prefs.providers.join(", "));
    }
    if !user.search_history.is_empty() {
        println!("{}Searches: {}", "• ".cyan(), user.search_history.join(", "));
    }

    println!("Booked services:");
    print_service_ids(index, &user.booked_services);
    println!("Viewed services:");
    print_service_ids(index, &user.viewed_services);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: &MarketplaceIndex, query: &str) {
    let matches = search_services(index.services(), query);

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  No services found");
    }
    for service in matches.iter().take(20) {
        println!("{}: {}", service.id, format_service(service));
    }
}

/// Handle the 'similar' command
fn handle_similar(index: &MarketplaceIndex, engine: &RecommendationEngine, user_id: &str) -> Result<()> {
    let neighbors = engine.neighbors_of(index, user_id)?;

    println!("{}", format!("Customers similar to {user_id}:").bold().blue());
    if neighbors.is_empty() {
        println!("  No similar customers found");
    }
    for neighbor in &neighbors {
        println!(
            "  - {} ({}) similarity {:.2}",
            neighbor.user_id, neighbor.location, neighbor.similarity
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    index: Arc<MarketplaceIndex>,
    engine: Arc<RecommendationEngine>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let population = index.behaviors().len();
    if requests == 0 || population == 0 {
        bail!("Benchmark needs at least one request and one customer");
    }

    // Sample customers at random
    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| index.behaviors()[rand::random_range(0..population)].user_id.clone())
        .collect();

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for user_id in user_ids {
        let index = index.clone();
        let engine = engine.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || {
                let limit = engine.config().default_limit;
                engine.recommend_for(&index, &user_id, limit)
            })
            .await??;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// One-line summary of a service
fn format_service(service: &ServiceData) -> String {
    format!(
        "{} [{}] {} - {:.0} - rated {:.1}",
        service.title, service.category, service.location, service.price, service.rating
    )
}

fn print_service_ids(index: &MarketplaceIndex, ids: &[String]) {
    if ids.is_empty() {
        println!("  (none)");
    }
    for id in ids {
        match index.get_service(id) {
            Some(service) => println!("  - {}", format_service(service)),
            None => println!("  - {} (not in catalog)", id),
        }
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[ServiceRecommendation], explain: bool) {
    println!("{}", "Recommended Services:".bold().blue());
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] {} - {:.0} - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.category,
            rec.location,
            rec.price,
            rec.score
        );
        for reason in &rec.reasons {
            println!("   {} {}", "•".cyan(), reason);
        }
        if explain {
            println!(
                "   content {:.3}, collaborative {:.3}, rating {:.1}",
                rec.content_score, rec.collaborative_score, rec.rating
            );
        }
    }
}
