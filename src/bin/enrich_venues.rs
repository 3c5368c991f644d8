use std::path::PathBuf;

use anyhow::Result;

use t20_strike_optimizer::dataset::DeliveryTable;
use t20_strike_optimizer::enrich;
use t20_strike_optimizer::venue::VenueLabel;
use t20_strike_optimizer::venue_report;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let path = parse_data_path_arg().unwrap_or_else(enrich::default_dataset_path);

    let mut table = DeliveryTable::read(&path)?;
    let out = enrich::enrich_venue_types(&mut table);
    table.write_atomic(&path)?;

    println!("Venue enrichment complete");
    println!("Dataset: {}", path.display());
    println!("Rows: {} | Venues: {}", out.rows, out.stats.len());

    let mut counts = [0usize; 3];
    for label in out.labels.values() {
        match label {
            VenueLabel::SpinFriendly => counts[0] += 1,
            VenueLabel::PaceFriendly => counts[1] += 1,
            VenueLabel::Neutral => counts[2] += 1,
        }
    }
    println!("Classification breakdown:");
    println!("  {}: {}", VenueLabel::SpinFriendly.as_str(), counts[0]);
    println!("  {}: {}", VenueLabel::PaceFriendly.as_str(), counts[1]);
    println!("  {}: {}", VenueLabel::Neutral.as_str(), counts[2]);

    // Busiest venues first.
    let mut ordered: Vec<(&String, usize)> = out
        .stats
        .iter()
        .map(|(venue, acc)| (venue, acc.match_count()))
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("{:<55} | {:<7} | {:<15}", "Venue", "Matches", "Classification");
    println!("{}", "-".repeat(85));
    for (venue, matches) in ordered {
        let label = out
            .labels
            .get(venue)
            .copied()
            .unwrap_or(enrich::FALLBACK_VENUE_LABEL);
        let display: String = venue.chars().take(53).collect();
        println!("{display:<55} | {matches:<7} | {:<15}", label.as_str());
    }

    if let Some(report_path) = parse_report_path_arg() {
        let report = venue_report::export_venue_report(&report_path, &out.stats, &out.labels)?;
        println!(
            "Report: {} ({} venues)",
            report_path.display(),
            report.venues
        );
    }

    Ok(())
}

fn parse_data_path_arg() -> Option<PathBuf> {
    parse_path_arg("--data")
}

fn parse_report_path_arg() -> Option<PathBuf> {
    parse_path_arg("--report")
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
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
