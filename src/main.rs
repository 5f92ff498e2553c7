//! Park Sim - headless runner
//!
//! Builds the demo park, admits guests and runs simulation ticks, then
//! prints a summary of the park's state.

use std::path::PathBuf;

use clap::Parser;
use park_sim::core::config::SimulationConfig;
use park_sim::core::error::Result;
use park_sim::navigation::GridPathfinder;
use park_sim::park::catalog::ContentCatalog;
use park_sim::park::layout::demo_park;
use park_sim::simulation::rating::ParkSummary;
use park_sim::simulation::spawn::spawn_guests;
use park_sim::simulation::tick::{run_simulation_tick, SimulationEvent};

/// Headless park simulation
#[derive(Parser, Debug)]
#[command(name = "park_sim")]
#[command(about = "Run the theme park simulation and report the outcome")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 5000)]
    ticks: u64,

    /// Time units per tick
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML file with ride and shop types
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Ticks between progress reports (0 disables them)
    #[arg(long, default_value_t = 1000)]
    report_every: u64,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("park_sim=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => ContentCatalog::load(path)?,
        None => ContentCatalog::with_defaults(),
    };

    let pathfinder = GridPathfinder::new(config.max_path_length);
    let mut world = demo_park(config, catalog, seed)?;
    tracing::info!(seed, ticks = args.ticks, "Park Sim starting...");

    let mut departures = 0usize;
    let mut purchases = 0usize;
    for _ in 0..args.ticks {
        spawn_guests(&mut world);
        let events = run_simulation_tick(&mut world, &pathfinder, args.dt);

        for event in &events {
            match event {
                SimulationEvent::GuestLeft { .. } => departures += 1,
                SimulationEvent::Purchase { .. } => purchases += 1,
                _ => {}
            }
        }

        if args.report_every > 0 && world.current_tick % args.report_every == 0 {
            tracing::info!(
                tick = world.current_tick,
                guests = world.guest_count(),
                rating = world.park_rating,
                cash = world.finances.cash,
                "progress"
            );
        }
    }

    let summary = ParkSummary::from_world(&world);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n=== PARK SIM ===");
        println!("Seed:            {}", seed);
        println!("Ticks:           {}", summary.tick);
        println!("Guests in park:  {}", summary.guests);
        println!("  queuing:       {}", summary.queuing);
        println!("  riding:        {}", summary.riding);
        println!("Guests departed: {}", departures);
        println!("Park rating:     {}", summary.park_rating);
        println!("Avg happiness:   {:.1}", summary.average_happiness);
        println!("Cash:            {}", summary.cash);
        println!("Riders served:   {}", summary.total_riders);
        println!("Shop sales:      {} ({} this run)", summary.total_shop_sales, purchases);
        println!("Months closed:   {}", summary.months_closed);
    }

    Ok(())
}
