use crate::dataset::DeliveryTable;

/// One ball faced, as produced by the extraction collaborator.
///
/// Numeric fields parse leniently: a malformed or missing cell reads as zero
/// so a single bad row never aborts a full-dataset pass.
#[derive(Debug, Clone, Default)]
pub struct Delivery {
    pub match_id: String,
    pub match_date: String,
    pub venue: String,
    pub inning: u32,
    pub over: u32,
    pub ball: u32,
    pub batter: String,
    pub bowler: String,
    pub bowler_type: String,
    pub batter_runs: u32,
    pub extras_type: String,
    pub total_runs: u32,
    pub cumulative_runs: u32,
    pub wicket: String,
    pub wicket_mode: String,
}

/// Resolved column indices for the delivery fields the core reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Columns {
    file: Option<usize>,
    match_date: Option<usize>,
    venue: Option<usize>,
    inning: Option<usize>,
    over: Option<usize>,
    ball: Option<usize>,
    batter: Option<usize>,
    bowler: Option<usize>,
    bowler_type: Option<usize>,
    batter_runs: Option<usize>,
    extras_type: Option<usize>,
    total_runs: Option<usize>,
    cumulative_runs: Option<usize>,
    wicket: Option<usize>,
    wicket_mode: Option<usize>,
}

impl Columns {
    pub fn resolve(table: &DeliveryTable) -> Self {
        Self {
            file: table.column("File"),
            match_date: table.column("Match_Date"),
            venue: table.column("Venue"),
            inning: table.column("Inning"),
            over: table.column("Over"),
            ball: table.column("Ball"),
            batter: table.column("Batter"),
            bowler: table.column("Bowler"),
            bowler_type: table.column("Bowler_Type"),
            batter_runs: table.column("Batter_Runs"),
            extras_type: table.column("Extras_Type"),
            total_runs: table.column("Total_Runs_This_Ball"),
            cumulative_runs: table.column("Cumulative_Runs"),
            wicket: table.column("Wicket"),
            wicket_mode: table.column("Wicket_Mode"),
        }
    }
}

impl Delivery {
    pub fn from_row(table: &DeliveryTable, cols: &Columns, row: usize) -> Self {
        let text = |col: Option<usize>| {
            col.map(|idx| table.value(row, idx).to_string())
                .unwrap_or_default()
        };
        let count = |col: Option<usize>| parse_count(col.map(|idx| table.value(row, idx)).unwrap_or(""));

        Self {
            match_id: text(cols.file),
            match_date: text(cols.match_date),
            venue: text(cols.venue),
            inning: count(cols.inning),
            over: count(cols.over),
            ball: count(cols.ball),
            batter: text(cols.batter),
            bowler: text(cols.bowler),
            bowler_type: text(cols.bowler_type),
            batter_runs: count(cols.batter_runs),
            extras_type: text(cols.extras_type),
            total_runs: count(cols.total_runs),
            cumulative_runs: count(cols.cumulative_runs),
            wicket: text(cols.wicket),
            wicket_mode: text(cols.wicket_mode),
        }
    }
}

pub fn typed_deliveries(table: &DeliveryTable) -> Vec<Delivery> {
    let cols = Columns::resolve(table);
    (0..table.row_count())
        .map(|row| Delivery::from_row(table, &cols, row))
        .collect()
}

/// Whether the raw wicket flag marks a dismissal at all. Placeholder values
/// from the extraction source mean "no wicket".
pub fn is_wicket_flag(raw: &str) -> bool {
    !matches!(raw, "No" | "0" | "" | "N/A")
}

pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}
