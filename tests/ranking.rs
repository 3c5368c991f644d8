use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use t20_strike_optimizer::api::{OptimizeResponse, ScenarioRequest, optimize_order};
use t20_strike_optimizer::model::StrikeModel;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn bundled_model() -> StrikeModel {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("assets");
    path.push("strike_optimizer_v1.json");
    let raw = fs::read_to_string(path).expect("bundled artifact should be readable");
    StrikeModel::from_json(&raw).expect("bundled artifact should load")
}

fn fixture_request() -> ScenarioRequest {
    let raw = fs::read_to_string(fixture_path("scenario_request.json"))
        .expect("request fixture should be readable");
    serde_json::from_str(&raw).expect("request fixture should parse")
}

#[test]
fn every_candidate_is_ranked_exactly_once() {
    let model = bundled_model();
    let request = fixture_request();
    let response = optimize_order(&request, &model).expect("scoring should succeed");

    let order = &response.optimized_order;
    assert_eq!(order.len(), request.available_batters.len());

    let names: HashSet<&str> = order.iter().map(|r| r.batter.as_str()).collect();
    assert_eq!(names.len(), order.len());
    for batter in &request.available_batters {
        assert!(names.contains(batter.name.as_str()));
    }

    for (idx, entry) in order.iter().enumerate() {
        assert_eq!(entry.rank, idx as u32 + 1);
        let sum = entry.boundary_prob + entry.strike_rotation + entry.pressure_prob;
        assert!((sum - 100.0).abs() < 0.05, "probabilities sum to {sum}");
    }
    for pair in order.windows(2) {
        assert!(pair[0].middle_over_score >= pair[1].middle_over_score);
    }
}

#[test]
fn stronger_recent_form_ranks_higher() {
    let model = bundled_model();
    let mut request = fixture_request();
    request.available_batters.truncate(2);
    request.available_batters[0].name = "In Form".to_string();
    request.available_batters[0].sr = 180.0;
    request.available_batters[0].sr_vs_type = None;
    request.available_batters[1].name = "Cold".to_string();
    request.available_batters[1].sr = 60.0;
    request.available_batters[1].sr_vs_type = None;

    let response = optimize_order(&request, &model).expect("scoring should succeed");
    assert_eq!(response.optimized_order[0].batter, "In Form");
    assert_eq!(response.optimized_order[1].batter, "Cold");
}

#[test]
fn scoring_is_deterministic() {
    let model = bundled_model();
    let request = fixture_request();
    let first = optimize_order(&request, &model).expect("scoring should succeed");
    let second = optimize_order(&request, &model).expect("scoring should succeed");
    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn response_json_round_trips() {
    let model = bundled_model();
    let request = fixture_request();
    let response = optimize_order(&request, &model).expect("scoring should succeed");

    let json = serde_json::to_string(&response).unwrap();
    let back: OptimizeResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back.optimized_order.len(), response.optimized_order.len());
    assert_eq!(back.optimized_order[0].rank, 1);
}
