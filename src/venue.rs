use std::collections::{HashMap, HashSet};

use crate::bowling::{BowlingCategory, classify_bowler_type};
use crate::delivery::{Delivery, is_wicket_flag};

/// Venues with fewer distinct matches than this are Neutral regardless of
/// their bowling numbers.
pub const MIN_VENUE_MATCHES: usize = 3;

// Fixed design band on spin_avg / pace_avg; not configurable.
const SPIN_FRIENDLY_MAX_RATIO: f64 = 0.85;
const PACE_FRIENDLY_MIN_RATIO: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenueLabel {
    SpinFriendly,
    PaceFriendly,
    Neutral,
}

impl VenueLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            VenueLabel::SpinFriendly => "Spin Friendly",
            VenueLabel::PaceFriendly => "Pace Friendly",
            VenueLabel::Neutral => "Neutral",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Spin Friendly" => Some(VenueLabel::SpinFriendly),
            "Pace Friendly" => Some(VenueLabel::PaceFriendly),
            "Neutral" => Some(VenueLabel::Neutral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BowlingTypeTotals {
    pub balls: u64,
    pub runs: u64,
    pub wickets: u64,
}

impl BowlingTypeTotals {
    /// Runs conceded per wicket; infinite when no wicket fell.
    pub fn bowling_average(&self) -> f64 {
        if self.wickets == 0 {
            f64::INFINITY
        } else {
            self.runs as f64 / self.wickets as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VenueAccumulator {
    pub pace: BowlingTypeTotals,
    pub spin: BowlingTypeTotals,
    matches: HashSet<String>,
}

impl VenueAccumulator {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// One pass over the dataset, accumulating pace/spin bowling performance per
/// venue. The distinct-match set grows on every delivery; runs, balls and
/// wickets only on deliveries with a known bowling category.
pub fn aggregate_venues(deliveries: &[Delivery]) -> HashMap<String, VenueAccumulator> {
    let mut stats: HashMap<String, VenueAccumulator> = HashMap::new();

    for d in deliveries {
        let acc = stats.entry(d.venue.clone()).or_default();
        acc.matches.insert(d.match_id.clone());

        let totals = match classify_bowler_type(&d.bowler_type) {
            BowlingCategory::Pace => &mut acc.pace,
            BowlingCategory::Spin => &mut acc.spin,
            BowlingCategory::Unknown => continue,
        };

        // Wides and no-balls stay out of the ball count, but their runs still
        // count as conceded. The average is runs per wicket, legality aside.
        if is_legal_delivery(&d.extras_type) {
            totals.balls += 1;
        }
        totals.runs += u64::from(d.total_runs);
        if is_bowler_credited_wicket(d) {
            totals.wickets += 1;
        }
    }

    stats
}

pub fn classify_venue(acc: &VenueAccumulator) -> VenueLabel {
    if acc.match_count() < MIN_VENUE_MATCHES {
        return VenueLabel::Neutral;
    }
    if acc.pace.wickets == 0 && acc.spin.wickets == 0 {
        return VenueLabel::Neutral;
    }
    // One type never took a wicket: the other is the sole wicket-taker here.
    if acc.pace.wickets == 0 {
        return VenueLabel::SpinFriendly;
    }
    if acc.spin.wickets == 0 {
        return VenueLabel::PaceFriendly;
    }

    let ratio = acc.spin.bowling_average() / acc.pace.bowling_average();
    if ratio < SPIN_FRIENDLY_MAX_RATIO {
        VenueLabel::SpinFriendly
    } else if ratio > PACE_FRIENDLY_MIN_RATIO {
        VenueLabel::PaceFriendly
    } else {
        VenueLabel::Neutral
    }
}

pub fn venue_labels(stats: &HashMap<String, VenueAccumulator>) -> HashMap<String, VenueLabel> {
    stats
        .iter()
        .map(|(venue, acc)| (venue.clone(), classify_venue(acc)))
        .collect()
}

fn is_legal_delivery(extras_type: &str) -> bool {
    let extras = extras_type.to_lowercase();
    let is_wide = extras.contains("wides");
    let is_no_ball = extras.contains("no ball") || extras.contains("noballs");
    !(is_wide || is_no_ball)
}

// Dismissals that go against the fielding side, not the bowler.
const NON_BOWLER_DISMISSALS: &[&str] = &["run out", "retired", "obstructing"];

fn is_bowler_credited_wicket(d: &Delivery) -> bool {
    if !is_wicket_flag(&d.wicket) {
        return false;
    }
    let mode = d.wicket_mode.to_lowercase();
    !NON_BOWLER_DISMISSALS.iter().any(|m| mode.contains(m))
}
