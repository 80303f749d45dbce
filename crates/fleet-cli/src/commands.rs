use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use fleet_server::{FleetServer, ServerConfig};
use fleet_service::VehicleService;
use fleet_store::{load_vehicles, InMemoryVehicleStore};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Inspect(args) => cmd_inspect(args, &cli.format),
    }
}

/// Merge the optional config file with command-line overrides.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data) = &args.data {
        config.data_path = Some(data.clone());
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let server = FleetServer::new(config)?;
    println!(
        "{} fleet server on {}",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold()
    );
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Per-brand totals from a seed file.
#[derive(Debug, PartialEq)]
struct BrandSummary {
    brand: String,
    count: usize,
    average_speed: f64,
}

fn summarize(service: &VehicleService) -> anyhow::Result<Vec<BrandSummary>> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for vehicle in service.find_all()?.into_values() {
        *counts.entry(vehicle.attributes.brand).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(brand, count)| -> anyhow::Result<BrandSummary> {
            let average_speed = service.average_speed_by_brand(&brand)?;
            Ok(BrandSummary {
                brand,
                count,
                average_speed,
            })
        })
        .collect()
}

fn cmd_inspect(args: InspectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let vehicles = load_vehicles(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;
    let total = vehicles.len();
    let service = VehicleService::new(Arc::new(InMemoryVehicleStore::with_vehicles(vehicles)));
    let brands = summarize(&service)?;

    match format {
        OutputFormat::Json => {
            let brands: Vec<_> = brands
                .iter()
                .map(|b| json!({"brand": b.brand, "count": b.count, "average_speed": b.average_speed}))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({"vehicles": total, "brands": brands}))?
            );
        }
        OutputFormat::Text => {
            println!(
                "{} {} vehicles in {}",
                "✓".green().bold(),
                total.to_string().bold(),
                args.path.display()
            );
            for b in &brands {
                println!(
                    "  {:<16} {:>5}  avg speed {:.1}",
                    b.brand.yellow(),
                    b.count,
                    b.average_speed
                );
            }
        }
    }
    Ok(())
}
