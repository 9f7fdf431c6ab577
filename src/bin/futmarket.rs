//! futmarket — command-line client for FUT market prices.

use clap::{Parser, Subcommand};
use futmarket::{FutClient, FullPlayer, Platform, SearchOptions, SortOrder};

/// Futmarket CLI
#[derive(Parser)]
#[command(name = "futmarket")]
#[command(version)]
#[command(about = "FIFA Ultimate Team player market prices")]
struct Args {
    /// Game platform (PS, PC, XB)
    #[arg(short, long, env = "FUTMARKET_PLATFORM", default_value = "PS")]
    platform: Platform,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Get a player's price by database id
    Price {
        /// Player database id
        player_id: u64,
    },

    /// Get prices for several players at once
    Prices {
        /// Player database ids
        player_ids: Vec<u64>,
        /// Fan out in concurrent batches instead of one request
        #[arg(long)]
        concurrent: bool,
    },

    /// Search players with filters
    Search {
        /// Minimum rating
        #[arg(long)]
        min_rating: Option<u32>,
        /// Maximum rating
        #[arg(long)]
        max_rating: Option<u32>,
        /// Position codes, comma-separated (e.g. "ST,CAM")
        #[arg(long)]
        position: Option<String>,
        /// Nation id
        #[arg(long)]
        nation: Option<u64>,
        /// League id
        #[arg(long)]
        league: Option<u64>,
        /// Club id
        #[arg(long)]
        club: Option<u64>,
        /// Minimum price
        #[arg(long)]
        min_price: Option<u64>,
        /// Maximum price
        #[arg(long)]
        max_price: Option<u64>,
        /// Result page
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Sort key (e.g. "rating", "price"), descending
        #[arg(long)]
        sort: Option<String>,
    },

    /// Current Team of the Week
    Totw,

    /// Latest players added to the database
    Latest,

    /// Trending players
    Popular,

    /// All leagues and their clubs
    Leagues,

    /// Card version catalogue
    Versions,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let platform = args.platform;
    let client = FutClient::builder().build()?;

    match args.command {
        Command::Price { player_id } => {
            let price = client.player_price(player_id, platform).await?;
            println!("player #{player_id} ({platform})");
            println!("  current: {}", format_price(price.price));
            println!("  min:     {}", format_price(price.min_price));
            println!("  max:     {}", format_price(price.max_price));
            if !price.updated.is_empty() {
                println!("  updated: {}", price.updated);
            }
        }

        Command::Prices {
            player_ids,
            concurrent,
        } => {
            let prices = if concurrent {
                client.player_prices_concurrent(&player_ids, platform).await?
            } else {
                client.player_prices(&player_ids, platform).await?
            };
            println!("{:>10}  {:>10}  {:>10}  {:>10}", "id", "price", "min", "max");
            for id in &player_ids {
                if let Some(p) = prices.get(id) {
                    println!(
                        "{:>10}  {:>10}  {:>10}  {:>10}",
                        id,
                        format_price(p.price),
                        format_price(p.min_price),
                        format_price(p.max_price)
                    );
                }
            }
        }

        Command::Search {
            min_rating,
            max_rating,
            position,
            nation,
            league,
            club,
            min_price,
            max_price,
            page,
            sort,
        } => {
            let mut options = SearchOptions::default().platform(platform).page(page);
            options.min_rating = min_rating;
            options.max_rating = max_rating;
            options.nation = nation;
            options.league = league;
            options.club = club;
            options.min_price = min_price;
            options.max_price = max_price;
            if let Some(position) = position {
                options.position = position
                    .split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
            }
            if let Some(sort) = sort {
                options = options.sort(sort, SortOrder::Descending);
            }

            let players = client.search(&options).await?;
            if players.is_empty() {
                println!("no players found");
            } else {
                print_player_table(&players, platform);
                println!("{} players on page {page}", players.len());
            }
        }

        Command::Totw => {
            let players = client.totw().await?;
            if players.is_empty() {
                println!("no TOTW available");
            } else {
                print_player_table(&players, platform);
            }
        }

        Command::Latest => {
            let players = client.latest_players().await?;
            print_player_table(&players, platform);
        }

        Command::Popular => {
            let players = client.popular_players().await?;
            println!(
                "{:>10}  {:<28} {:>6}  {:>10}  {:>10}",
                "id", "name", "rating", "PS", "PC"
            );
            for p in players {
                println!(
                    "{:>10}  {:<28} {:>6}  {:>10}  {:>10}",
                    p.futbin_id,
                    truncate(&p.name, 28),
                    p.rating,
                    format_price(p.price_ps),
                    format_price(p.price_pc)
                );
            }
        }

        Command::Leagues => {
            let leagues = client.leagues_and_clubs().await?;
            println!("{:>6}  {:<36} {:>6}", "id", "league", "clubs");
            for league in &leagues {
                println!(
                    "{:>6}  {:<36} {:>6}",
                    league.league_id,
                    truncate(&league.name, 36),
                    league.clubs.len()
                );
            }
            println!("{} leagues", leagues.len());
        }

        Command::Versions => {
            let versions = client.card_versions().await?;
            println!("{:<20} {:<30} {:<14}", "key", "name", "img");
            for v in &versions {
                println!(
                    "{:<20} {:<30} {:<14}",
                    truncate(&v.key, 20),
                    truncate(&v.name, 30),
                    v.img
                );
            }
        }
    }

    Ok(())
}

fn print_player_table(players: &[FullPlayer], platform: Platform) {
    println!(
        "{:>10}  {:<24} {:>6}  {:<4} {:<18} {:>10}",
        "id", "name", "rating", "pos", "club", "price"
    );
    for p in players {
        let price = match platform {
            Platform::Pc => p.price_pc,
            _ => p.price_ps,
        };
        println!(
            "{:>10}  {:<24} {:>6}  {:<4} {:<18} {:>10}",
            p.futbin_id,
            truncate(p.display_name(), 24),
            p.rating,
            p.position,
            truncate(&p.club, 18),
            format_price(price)
        );
    }
}

/// Format a coin amount with a K/M suffix.
fn format_price(price: u64) -> String {
    if price >= 1_000_000 {
        format!("{:.1}M", price as f64 / 1_000_000.0)
    } else if price >= 1_000 {
        format!("{:.1}K", price as f64 / 1_000.0)
    } else {
        price.to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(2)).collect();
        format!("{cut}..")
    }
}
