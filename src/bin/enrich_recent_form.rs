use std::path::PathBuf;

use anyhow::Result;

use t20_strike_optimizer::dataset::DeliveryTable;
use t20_strike_optimizer::enrich;
use t20_strike_optimizer::recent_form::trailing_strike_rate;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let path = parse_data_path_arg().unwrap_or_else(enrich::default_dataset_path);

    let mut table = DeliveryTable::read(&path)?;
    let out = enrich::enrich_recent_form(&mut table);
    table.write_atomic(&path)?;

    println!("Recent-form enrichment complete");
    println!("Dataset: {}", path.display());
    println!(
        "Rows: {} | Batter-innings: {} | Batters: {}",
        out.rows,
        out.form.len(),
        out.histories.len()
    );

    println!("Sample batter histories (first 3 batters with 5+ innings):");
    let mut batters: Vec<&String> = out
        .histories
        .iter()
        .filter(|(_, history)| history.len() >= 5)
        .map(|(batter, _)| batter)
        .collect();
    batters.sort();

    for batter in batters.into_iter().take(3) {
        let history = &out.histories[batter];
        println!("  {batter} ({} innings):", history.len());
        for (i, record) in history.iter().enumerate() {
            let own_sr = if record.balls > 0 {
                f64::from(record.runs) / f64::from(record.balls) * 100.0
            } else {
                0.0
            };
            println!(
                "    {} | Runs: {:>3} | Balls: {:>3} | Innings SR: {:>6.1} | Last5 SR: {:>6.1}",
                record.date,
                record.runs,
                record.balls,
                own_sr,
                trailing_strike_rate(history, i)
            );
        }
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
