use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::bowling::BowlingCategory;
use crate::model::ProbabilityModel;
use crate::scorer::{BatterCandidate, MatchScenario, ScoredCandidate, rank_batters};
use crate::venue::VenueLabel;

/// One available batter in a scoring request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterInfo {
    pub name: String,
    pub sr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sr_vs_type: Option<f64>,
}

/// Wire shape of a scoring request, field names as served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRequest {
    #[serde(rename = "Over")]
    pub over: u32,
    #[serde(rename = "Cumulative_Wickets")]
    pub cumulative_wickets: u32,
    #[serde(rename = "Current_Run_Rate")]
    pub current_run_rate: f64,
    #[serde(rename = "Inning")]
    pub inning: u8,
    #[serde(rename = "Venue_Type")]
    pub venue_type: String,
    #[serde(rename = "Bowler_Group")]
    pub bowler_group: String,
    pub available_batters: Vec<BatterInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedBatter {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Batter")]
    pub batter: String,
    #[serde(rename = "Boundary_Prob")]
    pub boundary_prob: f64,
    #[serde(rename = "Strike_Rotation")]
    pub strike_rotation: f64,
    #[serde(rename = "Pressure_Prob")]
    pub pressure_prob: f64,
    #[serde(rename = "Middle_Over_Score")]
    pub middle_over_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub optimized_order: Vec<RankedBatter>,
}

impl ScenarioRequest {
    pub fn scenario(&self) -> Result<MatchScenario> {
        if !matches!(self.inning, 1 | 2) {
            return Err(anyhow!("inning must be 1 or 2, got {}", self.inning));
        }
        let venue = VenueLabel::parse(&self.venue_type)
            .ok_or_else(|| anyhow!("unknown venue type '{}'", self.venue_type))?;
        let bowler_group = BowlingCategory::parse(&self.bowler_group)
            .ok_or_else(|| anyhow!("bowler group must be Pace or Spin, got '{}'", self.bowler_group))?;

        Ok(MatchScenario {
            over: self.over,
            wickets: self.cumulative_wickets,
            run_rate: self.current_run_rate,
            inning: self.inning,
            venue,
            bowler_group,
        })
    }

    pub fn candidates(&self) -> Vec<BatterCandidate> {
        self.available_batters
            .iter()
            .map(|b| BatterCandidate {
                name: b.name.clone(),
                recent_sr: Some(b.sr),
                vs_type_sr: b.sr_vs_type,
            })
            .collect()
    }
}

/// Full request -> response transformation around the injected model.
pub fn optimize_order(
    request: &ScenarioRequest,
    model: &dyn ProbabilityModel,
) -> Result<OptimizeResponse> {
    let scenario = request.scenario()?;
    let candidates = request.candidates();
    let scored = rank_batters(&scenario, &candidates, model)?;
    Ok(OptimizeResponse {
        optimized_order: scored.into_iter().map(ranked_batter).collect(),
    })
}

fn ranked_batter(s: ScoredCandidate) -> RankedBatter {
    RankedBatter {
        rank: s.rank,
        batter: s.name,
        boundary_prob: s.boundary,
        strike_rotation: s.strike_rotation,
        pressure_prob: s.pressure,
        middle_over_score: s.tactical_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST_JSON: &str = r#"{
        "Over": 12,
        "Cumulative_Wickets": 4,
        "Current_Run_Rate": 7.83,
        "Inning": 2,
        "Venue_Type": "Spin Friendly",
        "Bowler_Group": "Spin",
        "available_batters": [
            {"name": "V Kohli", "sr": 132.4},
            {"name": "H Pandya", "sr": 145.1}
        ]
    }"#;

    #[test]
    fn request_wire_shape_parses() {
        let req = serde_json::from_str::<ScenarioRequest>(REQUEST_JSON).unwrap();
        assert_eq!(req.over, 12);
        assert_eq!(req.available_batters.len(), 2);
        assert_eq!(req.available_batters[0].name, "V Kohli");

        let scenario = req.scenario().unwrap();
        assert_eq!(scenario.venue, VenueLabel::SpinFriendly);
        assert_eq!(scenario.bowler_group, BowlingCategory::Spin);
    }

    #[test]
    fn invalid_enums_are_rejected() {
        let mut req = serde_json::from_str::<ScenarioRequest>(REQUEST_JSON).unwrap();
        req.bowler_group = "Unknown".to_string();
        assert!(req.scenario().is_err());

        let mut req = serde_json::from_str::<ScenarioRequest>(REQUEST_JSON).unwrap();
        req.inning = 3;
        assert!(req.scenario().is_err());

        let mut req = serde_json::from_str::<ScenarioRequest>(REQUEST_JSON).unwrap();
        req.venue_type = "Swampy".to_string();
        assert!(req.scenario().is_err());
    }

    #[test]
    fn response_serializes_with_wire_field_names() {
        let response = OptimizeResponse {
            optimized_order: vec![RankedBatter {
                rank: 1,
                batter: "V Kohli".to_string(),
                boundary_prob: 41.2,
                strike_rotation: 39.0,
                pressure_prob: 19.8,
                middle_over_score: 81.2,
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        for field in [
            "optimized_order",
            "Rank",
            "Batter",
            "Boundary_Prob",
            "Strike_Rotation",
            "Pressure_Prob",
            "Middle_Over_Score",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }
}
