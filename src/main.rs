//! Realm Census - Entry Point
//!
//! Recomputes derived region statistics for a world, either from a single
//! world file or from a directory of per-entity records, and prints them as
//! JSON or as info-panel text.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use realm_census::aggregate::{recompute_all, recompute_and_store, Census, DerivedStatistics};
use realm_census::catalog::LanguageCatalog;
use realm_census::core::error::Result;
use realm_census::core::{CensusConfig, EntityId, EntityKind};
use realm_census::world::{load_world_file, save_world_file, EntityStore, RecordDirectory};

/// Region census - roll settlement and terrain data up into region statistics
#[derive(Parser, Debug)]
#[command(name = "realm-census")]
#[command(about = "Recompute population, race, culture, language and terrain statistics for regions")]
struct Args {
    /// World file (JSON) holding every entity
    #[arg(long, conflicts_with = "records", required_unless_present = "records")]
    world: Option<PathBuf>,

    /// Directory with one JSON record per entity
    #[arg(long)]
    records: Option<PathBuf>,

    /// Culture catalog: a JSON file or a directory of culture records
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Census config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Region to recompute
    #[arg(long, required_unless_present = "all")]
    region: Option<String>,

    /// Recompute every region
    #[arg(long, conflicts_with = "region")]
    all: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Entries shown per distribution in text output
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Write results back onto the region records
    #[arg(long)]
    write: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("realm_census=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CensusConfig::load(path)?,
        None => CensusConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => LanguageCatalog::load(path)?,
        None => LanguageCatalog::new(),
    };

    if let Some(dir) = &args.records {
        let mut records = RecordDirectory::open(dir)?;
        let region_ids = if args.all {
            region_records(&records)?
        } else {
            vec![region_arg(&args)]
        };
        let mut results = Vec::with_capacity(region_ids.len());
        for region_id in region_ids {
            let statistics = if args.write {
                recompute_and_store(&mut records, &catalog, &config, &region_id)?
            } else {
                Census::new(&records, &catalog, &config).recompute(&region_id)?
            };
            let label = label_of(&records, &region_id)?;
            results.push((region_id, label, statistics));
        }
        print_results(&results, &args)?;
        return Ok(());
    }

    let Some(world_path) = &args.world else {
        return Ok(());
    };
    let mut world = load_world_file(world_path)?;

    let results = if args.all {
        recompute_all(&mut world, &catalog, &config)?;
        world
            .iter()
            .filter_map(|entity| {
                let stats = entity.statistics()?.clone();
                Some((entity.id.clone(), entity.label().to_string(), stats))
            })
            .collect()
    } else {
        let region_id = region_arg(&args);
        let statistics = recompute_and_store(&mut world, &catalog, &config, &region_id)?;
        let label = label_of(&world, &region_id)?;
        vec![(region_id, label, statistics)]
    };

    print_results(&results, &args)?;

    if args.write {
        save_world_file(&world, world_path)?;
    }
    Ok(())
}

fn region_arg(args: &Args) -> EntityId {
    EntityId::from(args.region.clone().unwrap_or_default())
}

/// Ids of every region record in the directory
fn region_records(records: &RecordDirectory) -> Result<Vec<EntityId>> {
    let mut regions = Vec::new();
    for id in records.ids()? {
        if records
            .lookup(&id)?
            .is_some_and(|entity| entity.kind() == EntityKind::Region)
        {
            regions.push(id);
        }
    }
    Ok(regions)
}

fn label_of<S: EntityStore>(store: &S, id: &EntityId) -> Result<String> {
    Ok(store
        .lookup(id)?
        .map(|entity| entity.label().to_string())
        .unwrap_or_else(|| id.to_string()))
}

fn print_results(results: &[(EntityId, String, DerivedStatistics)], args: &Args) -> Result<()> {
    match args.format {
        Format::Json => {
            let map: serde_json::Map<String, serde_json::Value> = results
                .iter()
                .map(|(id, _, stats)| Ok((id.to_string(), serde_json::to_value(stats)?)))
                .collect::<Result<_>>()?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        Format::Text => {
            for (id, label, stats) in results {
                println!("=== {} ({}) ===", label, id);
                println!("{}", stats.summary(args.limit));
                println!();
            }
        }
    }
    Ok(())
}
