use std::collections::HashMap;

use crate::delivery::Delivery;
use crate::run_rate::round2;

/// Trailing window length, in innings.
pub const RECENT_FORM_WINDOW: usize = 5;

/// One batter's innings in one match: runs off the bat and balls faced.
#[derive(Debug, Clone, Default)]
pub struct InningsRecord {
    pub match_id: String,
    pub date: String,
    pub runs: u32,
    pub balls: u32,
}

/// Fold deliveries into per-(match, batter) innings records.
///
/// A delivery always contributes its batter runs; it counts as a ball faced
/// unless its extras type is exactly "Wide". No-balls, byes and leg-byes are
/// still balls faced by the batter.
pub fn innings_records(deliveries: &[Delivery]) -> HashMap<(String, String), InningsRecord> {
    let mut records: HashMap<(String, String), InningsRecord> = HashMap::new();

    for d in deliveries {
        let key = (d.match_id.clone(), d.batter.clone());
        let record = records.entry(key).or_default();
        record.match_id = d.match_id.clone();
        record.date = d.match_date.clone();
        record.runs += d.batter_runs;
        if d.extras_type != "Wide" {
            record.balls += 1;
        }
    }

    records
}

/// Group innings records by batter, each history ascending by (date, match
/// id). Match dates are ISO strings, so plain string ordering is
/// chronological; the match id breaks ties for same-day matches.
pub fn batter_histories(
    records: HashMap<(String, String), InningsRecord>,
) -> HashMap<String, Vec<InningsRecord>> {
    let mut histories: HashMap<String, Vec<InningsRecord>> = HashMap::new();
    for ((_, batter), record) in records {
        histories.entry(batter).or_default().push(record);
    }
    for history in histories.values_mut() {
        history.sort_by(|a, b| a.date.cmp(&b.date).then(a.match_id.cmp(&b.match_id)));
    }
    histories
}

/// Strike rate over the up-to-5 innings strictly before `index`. 0.0 when no
/// prior innings exist or the window has no balls faced.
pub fn trailing_strike_rate(history: &[InningsRecord], index: usize) -> f64 {
    let start = index.saturating_sub(RECENT_FORM_WINDOW);
    let window = &history[start..index];
    if window.is_empty() {
        return 0.0;
    }
    let runs: u32 = window.iter().map(|r| r.runs).sum();
    let balls: u32 = window.iter().map(|r| r.balls).sum();
    if balls == 0 {
        return 0.0;
    }
    round2(f64::from(runs) / f64::from(balls) * 100.0)
}

/// Recent-form value for every (match, batter) pair behind the histories.
pub fn recent_form_from_histories(
    histories: &HashMap<String, Vec<InningsRecord>>,
) -> HashMap<(String, String), f64> {
    let mut out = HashMap::new();
    for (batter, history) in histories {
        for (i, record) in history.iter().enumerate() {
            out.insert(
                (record.match_id.clone(), batter.clone()),
                trailing_strike_rate(history, i),
            );
        }
    }
    out
}

/// Recent-form value for every (match, batter) pair in the input.
pub fn compute_recent_form(deliveries: &[Delivery]) -> HashMap<(String, String), f64> {
    recent_form_from_histories(&batter_histories(innings_records(deliveries)))
}
