use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::dataset::DeliveryTable;
use crate::delivery::typed_deliveries;
use crate::recent_form::{
    InningsRecord, batter_histories, innings_records, recent_form_from_histories,
};
use crate::run_rate::current_run_rate;
use crate::venue::{VenueAccumulator, VenueLabel, aggregate_venues, venue_labels};

pub const VENUE_TYPE_COLUMN: &str = "Venue_Type";
pub const RECENT_FORM_COLUMN: &str = "Batter_Last5_SR";
pub const RUN_RATE_COLUMN: &str = "Current_Run_Rate";

// Fallbacks for keys never seen during aggregation.
pub const FALLBACK_VENUE_LABEL: VenueLabel = VenueLabel::Neutral;
pub const FALLBACK_RECENT_SR: f64 = 0.0;

pub const DATASET_PATH_ENV: &str = "T20_DATASET_PATH";
const DEFAULT_DATASET_PATH: &str = "Data/T20_ball_by_ball.csv";

pub fn default_dataset_path() -> PathBuf {
    env::var(DATASET_PATH_ENV)
        .ok()
        .map(|raw| PathBuf::from(raw.trim().to_string()))
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH))
}

pub struct VenueEnrichment {
    pub rows: usize,
    pub stats: HashMap<String, VenueAccumulator>,
    pub labels: HashMap<String, VenueLabel>,
}

pub struct RecentFormEnrichment {
    pub rows: usize,
    pub histories: HashMap<String, Vec<InningsRecord>>,
    pub form: HashMap<(String, String), f64>,
}

/// Pass one: aggregate per-venue bowling-type stats. Pass two: stamp every
/// row's venue label into `Venue_Type`, overwriting any previous run.
pub fn enrich_venue_types(table: &mut DeliveryTable) -> VenueEnrichment {
    let deliveries = typed_deliveries(table);
    let stats = aggregate_venues(&deliveries);
    let labels = venue_labels(&stats);

    let col = table.ensure_column(VENUE_TYPE_COLUMN);
    for (row, d) in deliveries.iter().enumerate() {
        let label = labels
            .get(&d.venue)
            .copied()
            .unwrap_or(FALLBACK_VENUE_LABEL);
        table.set_value(row, col, label.as_str().to_string());
    }

    VenueEnrichment {
        rows: deliveries.len(),
        stats,
        labels,
    }
}

/// Stamp each row with the batter's trailing strike rate as of that match.
pub fn enrich_recent_form(table: &mut DeliveryTable) -> RecentFormEnrichment {
    let deliveries = typed_deliveries(table);
    let histories = batter_histories(innings_records(&deliveries));
    let form = recent_form_from_histories(&histories);

    let col = table.ensure_column(RECENT_FORM_COLUMN);
    for (row, d) in deliveries.iter().enumerate() {
        let key = (d.match_id.clone(), d.batter.clone());
        let sr = form.get(&key).copied().unwrap_or(FALLBACK_RECENT_SR);
        table.set_value(row, col, format!("{sr:.2}"));
    }

    RecentFormEnrichment {
        rows: deliveries.len(),
        histories,
        form,
    }
}

/// Stamp each row with the cumulative run rate at that delivery.
pub fn enrich_run_rate(table: &mut DeliveryTable) -> usize {
    let deliveries = typed_deliveries(table);

    let col = table.ensure_column(RUN_RATE_COLUMN);
    for (row, d) in deliveries.iter().enumerate() {
        let rate = current_run_rate(d.over, d.ball, d.cumulative_runs);
        table.set_value(row, col, format!("{rate:.2}"));
    }

    deliveries.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DeliveryTable;

    fn table_with(headers: &[&str], rows: &[&[&str]]) -> DeliveryTable {
        DeliveryTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn run_rate_column_is_added_and_overwritten() {
        let mut table = table_with(
            &["Over", "Ball", "Cumulative_Runs"],
            &[&["0", "0", "0"], &["1", "0", "6"]],
        );
        enrich_run_rate(&mut table);
        let col = table.column(RUN_RATE_COLUMN).unwrap();
        assert_eq!(table.value(0, col), "0.00");
        assert_eq!(table.value(1, col), "6.00");

        // Second run overwrites the same column.
        enrich_run_rate(&mut table);
        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.value(1, col), "6.00");
    }

    #[test]
    fn venue_pass_falls_back_to_neutral() {
        // One match at one venue: under the sample floor, label Neutral.
        let mut table = table_with(
            &["File", "Venue", "Bowler_Type", "Total_Runs_This_Ball", "Wicket"],
            &[&["m1.json", "MCG", "Right arm Fast", "4", "No"]],
        );
        let out = enrich_venue_types(&mut table);
        assert_eq!(out.rows, 1);
        let col = table.column(VENUE_TYPE_COLUMN).unwrap();
        assert_eq!(table.value(0, col), "Neutral");
    }

    #[test]
    fn recent_form_pass_totals_every_row() {
        let mut table = table_with(
            &["File", "Match_Date", "Batter", "Batter_Runs", "Extras_Type"],
            &[
                &["m1.json", "2023-01-01", "V Kohli", "4", "N/A"],
                &["m2.json", "2023-01-09", "V Kohli", "0", "N/A"],
            ],
        );
        let out = enrich_recent_form(&mut table);
        assert_eq!(out.rows, 2);
        let col = table.column(RECENT_FORM_COLUMN).unwrap();
        assert_eq!(table.value(0, col), "0.00");
        assert_eq!(table.value(1, col), "400.00");
    }
}
