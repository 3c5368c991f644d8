use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::venue::{VenueAccumulator, VenueLabel};

pub struct VenueReport {
    pub venues: usize,
    pub spin_friendly: usize,
    pub pace_friendly: usize,
    pub neutral: usize,
}

/// Write the venue classification workbook: one sheet with the per-venue
/// accumulator columns, one with the label breakdown.
pub fn export_venue_report(
    path: &Path,
    stats: &HashMap<String, VenueAccumulator>,
    labels: &HashMap<String, VenueLabel>,
) -> Result<VenueReport> {
    let mut venue_rows = vec![vec![
        "Venue".to_string(),
        "Matches".to_string(),
        "Pace Balls".to_string(),
        "Pace Runs".to_string(),
        "Pace Wkts".to_string(),
        "Pace Avg".to_string(),
        "Spin Balls".to_string(),
        "Spin Runs".to_string(),
        "Spin Wkts".to_string(),
        "Spin Avg".to_string(),
        "Classification".to_string(),
    ]];

    // Busiest venues first, as in the pipeline's console summary.
    let mut ordered: Vec<(&String, &VenueAccumulator)> = stats.iter().collect();
    ordered.sort_by(|a, b| b.1.match_count().cmp(&a.1.match_count()).then(a.0.cmp(b.0)));

    let mut report = VenueReport {
        venues: ordered.len(),
        spin_friendly: 0,
        pace_friendly: 0,
        neutral: 0,
    };

    for (venue, acc) in ordered {
        let label = labels
            .get(venue)
            .copied()
            .unwrap_or(VenueLabel::Neutral);
        match label {
            VenueLabel::SpinFriendly => report.spin_friendly += 1,
            VenueLabel::PaceFriendly => report.pace_friendly += 1,
            VenueLabel::Neutral => report.neutral += 1,
        }
        venue_rows.push(vec![
            venue.clone(),
            acc.match_count().to_string(),
            acc.pace.balls.to_string(),
            acc.pace.runs.to_string(),
            acc.pace.wickets.to_string(),
            format_average(acc.pace.bowling_average()),
            acc.spin.balls.to_string(),
            acc.spin.runs.to_string(),
            acc.spin.wickets.to_string(),
            format_average(acc.spin.bowling_average()),
            label.as_str().to_string(),
        ]);
    }

    let breakdown_rows = vec![
        vec!["Classification".to_string(), "Venues".to_string()],
        vec![
            VenueLabel::SpinFriendly.as_str().to_string(),
            report.spin_friendly.to_string(),
        ],
        vec![
            VenueLabel::PaceFriendly.as_str().to_string(),
            report.pace_friendly.to_string(),
        ],
        vec![
            VenueLabel::Neutral.as_str().to_string(),
            report.neutral.to_string(),
        ],
        Vec::new(),
        vec!["Generated".to_string(), Utc::now().to_rfc3339()],
    ];

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Venues")?;
        write_rows(sheet, &venue_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Breakdown")?;
        write_rows(sheet, &breakdown_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save venue report {}", path.display()))?;

    Ok(report)
}

fn format_average(avg: f64) -> String {
    if avg.is_finite() {
        format!("{avg:.2}")
    } else {
        "-".to_string()
    }
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .context("write worksheet cell")?;
        }
    }
    Ok(())
}
