use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Bowling-style group a delivery is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BowlingCategory {
    Pace,
    Spin,
    Unknown,
}

impl BowlingCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            BowlingCategory::Pace => "Pace",
            BowlingCategory::Spin => "Spin",
            BowlingCategory::Unknown => "Unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Pace" => Some(BowlingCategory::Pace),
            "Spin" => Some(BowlingCategory::Spin),
            _ => None,
        }
    }
}

const SPIN_KEYWORDS: &[&str] = &[
    "spin",
    "orthodox",
    "legbreak",
    "offbreak",
    "googly",
    "slow",
    "wrist spin",
    "chinaman",
];

const PACE_KEYWORDS: &[&str] = &["fast", "medium", "seam", "swing"];

// Combination styles where keyword matching alone would misfile the bowler.
static SPIN_OVERRIDES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "Right arm Medium, Legbreak",
        "Right arm Medium, Right arm Offbreak",
        "Left arm Medium, Slow Left arm Orthodox",
        "Left arm Fast medium, Slow Left arm Orthodox",
    ])
});

static PACE_OVERRIDES: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);

const PLACEHOLDER_STYLES: &[&str] = &["", "N/A", "| Umpire = True"];

/// Map a free-text bowling-style description to {Pace, Spin, Unknown}.
///
/// Overrides are consulted before keyword matching. When both keyword sets
/// match and no override applies, the style is filed as Spin: in mixed
/// descriptions the spin component is usually the secondary skill being
/// highlighted. Policy choice, not a cricketing rule.
pub fn classify_bowler_type(bowler_type: &str) -> BowlingCategory {
    if PLACEHOLDER_STYLES.contains(&bowler_type) {
        return BowlingCategory::Unknown;
    }

    if SPIN_OVERRIDES.contains(bowler_type) {
        return BowlingCategory::Spin;
    }
    if PACE_OVERRIDES.contains(bowler_type) {
        return BowlingCategory::Pace;
    }

    let lower = bowler_type.to_lowercase();
    let is_spin = SPIN_KEYWORDS.iter().any(|kw| lower.contains(kw));
    let is_pace = PACE_KEYWORDS.iter().any(|kw| lower.contains(kw));

    match (is_spin, is_pace) {
        (true, false) => BowlingCategory::Spin,
        (false, true) => BowlingCategory::Pace,
        (true, true) => BowlingCategory::Spin,
        (false, false) => BowlingCategory::Unknown,
    }
}
