use std::cmp::Ordering;

use anyhow::Result;

use crate::bowling::BowlingCategory;
use crate::model::{
    CLASS_BOUNDARY, CLASS_PRESSURE, CLASS_STRIKE_ROTATION, FeatureRow, FeatureValue,
    ProbabilityModel,
};
use crate::run_rate::round2;
use crate::venue::VenueLabel;

/// Default trailing strike rate for a candidate the caller has no form for.
pub const DEFAULT_RECENT_SR: f64 = 100.0;
/// Default for the optional strike-rate-vs-bowling-type feature.
pub const DEFAULT_VS_TYPE_SR: f64 = 100.0;

// Fixed scoring policy over percent-scale probabilities.
const BOUNDARY_WEIGHT: f64 = 1.5;
const ROTATION_WEIGHT: f64 = 1.0;
const PRESSURE_WEIGHT: f64 = 1.0;

/// Immutable match context for one scoring request.
#[derive(Debug, Clone, Copy)]
pub struct MatchScenario {
    pub over: u32,
    pub wickets: u32,
    pub run_rate: f64,
    pub inning: u8,
    pub venue: VenueLabel,
    pub bowler_group: BowlingCategory,
}

#[derive(Debug, Clone)]
pub struct BatterCandidate {
    pub name: String,
    pub recent_sr: Option<f64>,
    pub vs_type_sr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub rank: u32,
    pub name: String,
    pub pressure: f64,
    pub strike_rotation: f64,
    pub boundary: f64,
    pub tactical_score: f64,
}

/// Score and rank the candidates for the scenario.
///
/// One feature row per candidate, one batch model call, then the tactical
/// score over percent-scale probabilities. Sort is stable, so exact ties
/// keep their input order; ranks are 1-based positions after sorting. Every
/// input candidate appears exactly once in the output.
pub fn rank_batters(
    scenario: &MatchScenario,
    candidates: &[BatterCandidate],
    model: &dyn ProbabilityModel,
) -> Result<Vec<ScoredCandidate>> {
    let rows: Vec<FeatureRow> = candidates
        .iter()
        .map(|c| feature_row(scenario, c))
        .collect();
    let probs = model.predict_proba(&rows)?;

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .zip(&probs)
        .map(|(candidate, p)| {
            let pressure = p[CLASS_PRESSURE] * 100.0;
            let rotation = p[CLASS_STRIKE_ROTATION] * 100.0;
            let boundary = p[CLASS_BOUNDARY] * 100.0;
            let score =
                boundary * BOUNDARY_WEIGHT + rotation * ROTATION_WEIGHT - pressure * PRESSURE_WEIGHT;
            ScoredCandidate {
                rank: 0,
                name: candidate.name.clone(),
                pressure: round2(pressure),
                strike_rotation: round2(rotation),
                boundary: round2(boundary),
                tactical_score: round2(score),
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.tactical_score
            .partial_cmp(&a.tactical_score)
            .unwrap_or(Ordering::Equal)
    });
    for (idx, candidate) in scored.iter_mut().enumerate() {
        candidate.rank = idx as u32 + 1;
    }

    Ok(scored)
}

fn feature_row(scenario: &MatchScenario, candidate: &BatterCandidate) -> FeatureRow {
    FeatureRow::from([
        (
            "Over".to_string(),
            FeatureValue::Number(f64::from(scenario.over)),
        ),
        (
            "Cumulative_Wickets".to_string(),
            FeatureValue::Number(f64::from(scenario.wickets)),
        ),
        (
            "Current_Run_Rate".to_string(),
            FeatureValue::Number(scenario.run_rate),
        ),
        (
            "Inning".to_string(),
            FeatureValue::Number(f64::from(scenario.inning)),
        ),
        (
            "Venue_Type".to_string(),
            FeatureValue::Label(scenario.venue.as_str().to_string()),
        ),
        (
            "Bowler_Group".to_string(),
            FeatureValue::Label(scenario.bowler_group.as_str().to_string()),
        ),
        (
            "Batter_Last5_SR".to_string(),
            FeatureValue::Number(candidate.recent_sr.unwrap_or(DEFAULT_RECENT_SR)),
        ),
        (
            "Batter_vs_BowlerType_SR".to_string(),
            FeatureValue::Number(candidate.vs_type_sr.unwrap_or(DEFAULT_VS_TYPE_SR)),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureRow;

    /// Replays canned probability vectors, in input order.
    struct FixedModel {
        probs: Vec<[f64; 3]>,
    }

    impl ProbabilityModel for FixedModel {
        fn feature_names(&self) -> Vec<&str> {
            Vec::new()
        }

        fn predict_proba(&self, rows: &[FeatureRow]) -> Result<Vec<[f64; 3]>> {
            assert_eq!(rows.len(), self.probs.len());
            Ok(self.probs.clone())
        }
    }

    fn scenario() -> MatchScenario {
        MatchScenario {
            over: 9,
            wickets: 3,
            run_rate: 7.5,
            inning: 2,
            venue: VenueLabel::Neutral,
            bowler_group: BowlingCategory::Spin,
        }
    }

    fn candidate(name: &str) -> BatterCandidate {
        BatterCandidate {
            name: name.to_string(),
            recent_sr: Some(120.0),
            vs_type_sr: None,
        }
    }

    #[test]
    fn tactical_scores_and_ranks() {
        let model = FixedModel {
            probs: vec![[0.5, 0.3, 0.2], [0.1, 0.3, 0.6], [0.3, 0.3, 0.4]],
        };
        let scored = rank_batters(
            &scenario(),
            &[candidate("A"), candidate("B"), candidate("C")],
            &model,
        )
        .unwrap();

        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].name, "B");
        assert_eq!(scored[0].tactical_score, 50.0);
        assert_eq!(scored[1].name, "C");
        assert_eq!(scored[1].tactical_score, 30.0);
        assert_eq!(scored[2].name, "A");
        assert_eq!(scored[2].tactical_score, 10.0);
        assert_eq!(
            scored.iter().map(|s| s.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let model = FixedModel {
            probs: vec![[0.2, 0.3, 0.5], [0.2, 0.3, 0.5]],
        };
        let scored =
            rank_batters(&scenario(), &[candidate("First"), candidate("Second")], &model).unwrap();
        assert_eq!(scored[0].name, "First");
        assert_eq!(scored[1].name, "Second");
    }

    #[test]
    fn probabilities_reported_as_percentages() {
        let model = FixedModel {
            probs: vec![[0.125, 0.375, 0.5]],
        };
        let scored = rank_batters(&scenario(), &[candidate("A")], &model).unwrap();
        assert_eq!(scored[0].pressure, 12.5);
        assert_eq!(scored[0].strike_rotation, 37.5);
        assert_eq!(scored[0].boundary, 50.0);
    }

    #[test]
    fn defaults_fill_missing_strike_rates() {
        let row = feature_row(
            &scenario(),
            &BatterCandidate {
                name: "A".to_string(),
                recent_sr: None,
                vs_type_sr: None,
            },
        );
        assert_eq!(
            row["Batter_Last5_SR"],
            FeatureValue::Number(DEFAULT_RECENT_SR)
        );
        assert_eq!(
            row["Batter_vs_BowlerType_SR"],
            FeatureValue::Number(DEFAULT_VS_TYPE_SR)
        );
    }
}
