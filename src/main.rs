use anyhow::{Context, Result};
use biogrid_lib::app::{self, Command, Host};
use biogrid_lib::model::config::{AppConfig, Variant};
use biogrid_lib::model::metrics::{init_logging, Metrics};
use biogrid_lib::model::snapshot::PopulationStats;
use biogrid_lib::model::Simulation;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Ticks run by the headless mode when `--ticks` is not given.
const DEFAULT_HEADLESS_TICKS: u64 = 1000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rule set to run
    #[arg(short, long, value_enum)]
    variant: Option<VariantArg>,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// World seed (random when neither given here nor in the config)
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    rows: Option<u16>,

    #[arg(long)]
    cols: Option<u16>,

    /// Ticks per second in realtime mode
    #[arg(long)]
    tps: Option<u64>,

    /// Number of ticks to run before printing the final population
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Drive ticks through the host at the configured rate
    #[arg(long)]
    realtime: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    Territorial,
    Trophic,
    Diffusive,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Territorial => Variant::Territorial,
            VariantArg::Trophic => Variant::Trophic,
            VariantArg::Diffusive => Variant::Diffusive,
        }
    }
}

#[derive(Serialize, Debug)]
struct Summary {
    variant: Variant,
    seed: u64,
    tick: u64,
    fingerprint: String,
    population: PopulationStats,
}

fn effective_config(args: &Args) -> Result<AppConfig> {
    let mut config = app::load_config(&args.config)?;
    if let Some(variant) = args.variant {
        config.world.variant = variant.into();
    }
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(rows) = args.rows {
        config.world.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.world.cols = cols;
    }
    if let Some(tps) = args.tps {
        config.ticks_per_second = tps;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run_headless(sim: &mut Simulation, ticks: u64) {
    let metrics = Metrics::new();
    for _ in 0..ticks {
        let start = Instant::now();
        let report = sim.step();
        let living = sim.population().living();
        metrics.record_tick(start.elapsed(), &report, living);
    }
    tracing::info!(
        ticks = metrics.tick_count(),
        mean_tick_us = metrics.mean_tick().as_micros() as u64,
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "headless run finished"
    );
}

async fn run_realtime(sim: Simulation, tick_rate: u64, ticks: Option<u64>) -> Result<Simulation> {
    let handle = Host::spawn(sim, tick_rate);
    match ticks {
        Some(target) => {
            handle.send(Command::Resume)?;
            let target = handle.status().tick + target;
            handle.wait_for(|s| s.tick >= target).await?;
        }
        None => {
            tokio::signal::ctrl_c().await.context("waiting for Ctrl+C")?;
            tracing::info!("Ctrl+C received, shutting down");
        }
    }
    Ok(handle.shutdown().await?)
}

fn print_summary(summary: &Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    let p = &summary.population;
    println!("variant:     {:?}", summary.variant);
    println!("seed:        {}", summary.seed);
    println!("tick:        {}", summary.tick);
    println!("fingerprint: {}", summary.fingerprint);
    match summary.variant {
        Variant::Territorial => {
            println!("prey:        {}", p.prey);
            println!("predators:   {}", p.predators);
        }
        Variant::Trophic => {
            println!("producers:   {}", p.producers);
            println!("consumers:   {}", p.consumers);
            println!("decomposers: {}", p.decomposers);
        }
        Variant::Diffusive => println!("mean level:  {:.4}", p.mean_level),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = effective_config(&args)?;

    if args.dump_config {
        print!("{}", app::render_config(&config)?);
        return Ok(());
    }

    let fingerprint = config.fingerprint();
    tracing::info!(%fingerprint, variant = ?config.world.variant, "configuration");

    let mut sim = Simulation::from_config(&config)?;
    if args.realtime {
        sim = run_realtime(sim, config.ticks_per_second, args.ticks).await?;
    } else {
        run_headless(&mut sim, args.ticks.unwrap_or(DEFAULT_HEADLESS_TICKS));
    }

    let summary = Summary {
        variant: sim.variant(),
        seed: sim.seed(),
        tick: sim.tick(),
        fingerprint,
        population: sim.population(),
    };
    print_summary(&summary, args.json)
}
