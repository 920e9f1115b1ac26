pub mod analyze;
pub mod dice;
pub mod impact;
pub mod insanity;

use std::path::Path;

use dmd_mechanics::EngineConfig;
use serde::Serialize;

/// Read a file, naming it in the error.
fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Load the engine configuration, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_json(&read_file(path)?)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}
