use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use t20_strike_optimizer::api::{ScenarioRequest, optimize_order};
use t20_strike_optimizer::model::load_strike_model;

/// Offline serving surface: a scenario request in, the ranked order out.
/// The HTTP transport in front of this is a separate concern.
fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let raw = match parse_request_path_arg() {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("read scenario request {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read scenario request from stdin")?;
            buf
        }
    };

    let request =
        serde_json::from_str::<ScenarioRequest>(&raw).context("parse scenario request json")?;
    let model = load_strike_model()?;
    let response = optimize_order(&request, &model)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn parse_request_path_arg() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--request=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--request" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
        // A bare path argument also works.
        if !arg.starts_with("--") {
            return Some(PathBuf::from(arg));
        }
    }
    None
}
