//! Command-line front end for the route optimizer.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use u_ecoroute::constructive::FirstSolutionStrategy;
use u_ecoroute::logging::init_logger;
use u_ecoroute::models::KpiWeights;
use u_ecoroute::optimizer::{optimize_route, OptimizerConfig};
use u_ecoroute::{Error, Result};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    CheapestInsertion,
    PathCheapestArc,
}

impl From<Strategy> for FirstSolutionStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::CheapestInsertion => Self::CheapestInsertion,
            Strategy::PathCheapestArc => Self::PathCheapestArc,
        }
    }
}

/// Optimize a delivery tour over distance, time, CO2 and congestion.
#[derive(Debug, Parser)]
#[command(name = "ecoroute", version)]
struct Args {
    /// Coordinates as `x,y;x,y;...`, the first pair being the depot.
    #[arg(long)]
    coords: Option<String>,
    /// Use synthetic nodes even when coordinates are given.
    #[arg(long)]
    mock: bool,
    /// Number of synthetic customers.
    #[arg(long, default_value_t = 8)]
    customers: usize,
    /// Seed for synthetic nodes and congestion.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Vehicles available.
    #[arg(long, default_value_t = 1)]
    vehicles: usize,
    /// CO2 emission factor in kg/km.
    #[arg(long, default_value_t = 0.25)]
    emission_factor: f64,
    /// Average speed in km/h.
    #[arg(long, default_value_t = 40.0)]
    avg_speed: f64,
    /// Distance weight.
    #[arg(long, default_value_t = 1.0)]
    w_distance: f64,
    /// Time weight.
    #[arg(long, default_value_t = 1.0)]
    w_time: f64,
    /// CO2 weight.
    #[arg(long, default_value_t = 1.0)]
    w_co2: f64,
    /// Congestion weight.
    #[arg(long, default_value_t = 1.0)]
    w_congestion: f64,
    /// Search budget in seconds.
    #[arg(long, default_value_t = 3.0)]
    time_limit: f64,
    /// Initial tour heuristic.
    #[arg(long, value_enum, default_value_t = Strategy::CheapestInsertion)]
    strategy: Strategy,
    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn parse_coords(s: &str) -> Result<Vec<(f64, f64)>> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| Error::invalid_input(format!("expected `x,y`, got `{pair}`")))?;
            let parse = |v: &str| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|e| Error::invalid_input(format!("bad coordinate `{v}`: {e}")))
            };
            Ok((parse(x)?, parse(y)?))
        })
        .collect()
}

fn build_config(args: &Args) -> Result<OptimizerConfig> {
    let time_limit = Duration::try_from_secs_f64(args.time_limit).map_err(|e| {
        Error::invalid_input(format!(
            "time limit must be a non-negative number of seconds, got {}: {e}",
            args.time_limit
        ))
    })?;

    let mut config = OptimizerConfig::default()
        .with_mock_customers(args.customers)
        .with_seed(args.seed)
        .with_vehicle_count(args.vehicles)
        .with_emission_factor(args.emission_factor)
        .with_avg_speed(args.avg_speed)
        .with_weights(KpiWeights::new(
            args.w_distance,
            args.w_time,
            args.w_co2,
            args.w_congestion,
        ))
        .with_first_solution(args.strategy.into())
        .with_time_limit(time_limit);

    if let Some(coords) = &args.coords {
        config = config.with_coordinates(parse_coords(coords)?);
    }
    Ok(config.with_mock(args.mock || args.coords.is_none()))
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let result = optimize_route(&config)?;

    if args.json {
        let out = serde_json::to_string_pretty(&result)
            .map_err(|e| Error::config(format!("failed to serialize result: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if !result.is_feasible() {
        log::warn!("no feasible route found");
        println!("WARNING: {}", result.route_string());
        return Ok(());
    }

    let m = result.metrics.rounded();
    println!("Route: {}", result.route_string());
    println!("Distance (km):    {}", m.distance_km);
    println!("Time (hr):        {}", m.time_hr);
    println!("CO2 (kg):         {}", m.co2_kg);
    println!("Congestion index: {}", m.congestion_index);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logger(args.log_level, false) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
