use std::path::PathBuf;

use anyhow::Result;

use t20_strike_optimizer::dataset::DeliveryTable;
use t20_strike_optimizer::delivery::typed_deliveries;
use t20_strike_optimizer::enrich;
use t20_strike_optimizer::run_rate::current_run_rate;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let path = parse_data_path_arg().unwrap_or_else(enrich::default_dataset_path);

    let mut table = DeliveryTable::read(&path)?;
    println!("Read {} rows from {}", table.row_count(), path.display());

    let rows = enrich::enrich_run_rate(&mut table);
    table.write_atomic(&path)?;

    println!(
        "Added {} column to {} ({rows} rows)",
        enrich::RUN_RATE_COLUMN,
        path.display()
    );

    let deliveries = typed_deliveries(&table);
    println!("Sample values (first 10 rows):");
    for d in deliveries.iter().take(10) {
        println!(
            "  Over {}.{} | Runs: {} | Cumulative: {} | CRR: {:.2}",
            d.over,
            d.ball,
            d.batter_runs,
            d.cumulative_runs,
            current_run_rate(d.over, d.ball, d.cumulative_runs)
        );
    }

    Ok(())
}

fn parse_data_path_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--data=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--data" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
