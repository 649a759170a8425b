//! Browser entry points. Each call takes a JSON `PuzzleConfig` and runs an
//! independent generation, so concurrent callers never share state.

use js_sys::Array;
use jigsaw_core::{PuzzleConfig, PuzzleError, Rendered, generate};
use wasm_bindgen::prelude::*;

fn render(config_json: &str) -> Result<Rendered, PuzzleError> {
    let config = PuzzleConfig::from_json(config_json)?;
    let puzzle = generate(&config)?;
    Ok(Rendered::new(&puzzle, &config))
}

fn rendered_json(config_json: &str) -> Result<String, PuzzleError> {
    Ok(serde_json::to_string(&render(config_json)?)?)
}

/// Runs a generation and returns every output as a JSON string with
/// `piece_count`, `tile_counts`, `document`, `merged_document` and `paths`.
#[wasm_bindgen]
pub fn generate_puzzle(config_json: &str) -> Result<String, JsValue> {
    rendered_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Per-piece path data, for callers composing their own overlay.
#[wasm_bindgen]
pub fn piece_paths(config_json: &str) -> Result<Array, JsValue> {
    let rendered = render(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(rendered
        .paths
        .iter()
        .map(|d| JsValue::from_str(d))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let config = r#"{"ncols": 4, "nrows": 4, "seed": 123, "min_piece_len": 1, "max_piece_len": 3}"#;
        let out = rendered_json(config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["piece_count"], 11);
    }

    #[test]
    fn invalid_config_reports_error() {
        let err = rendered_json(r#"{"ncols": 1}"#).unwrap_err();
        assert!(err.to_string().contains("at least 2x2"));
    }
}
