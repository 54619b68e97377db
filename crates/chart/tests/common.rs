use std::path::{Path, PathBuf};

use tachart_config::ConfigStore;
use tachart_indicators::Engine;
use tachart_types::Candle;
use tempfile::TempDir;

/// Shipped sample store: one instance (id 1) of every built-in type name.
pub const SAMPLE_STORE: &str = include_str!("../../../config/indicators.json");

/// Small store mixing a valid SMA, an unregistered type name and an RSI
/// instance without its window length.
pub const MIXED_STORE: &str = r#"{
  "indicators": [
    {
      "identifier": "SMA",
      "instances": [
        {
          "id": 1,
          "params": [
            { "name": "TimeFrame", "type": "integer", "value": "14" },
            { "name": "Color", "type": "color", "value": "RED" },
            { "name": "Stroke", "type": "stroke", "value": "THIN" },
            { "name": "Shape", "type": "shape", "value": "NONE" }
          ]
        }
      ]
    },
    {
      "identifier": "Ichimoku",
      "instances": [ { "id": 1, "category": "ICHIMOKU", "params": [] } ]
    },
    {
      "identifier": "RSI",
      "instances": [
        {
          "id": 2,
          "category": "VOLUME",
          "params": [
            { "name": "Color", "value": "BLUE" },
            { "name": "Stroke", "value": "THIN" },
            { "name": "Shape", "value": "NONE" }
          ]
        }
      ]
    }
  ]
}"#;

pub fn write_store(path: &Path, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, text)?;
    Ok(())
}

/// Writes `text` into a fresh directory and opens it.
pub fn open_store(text: &str) -> (TempDir, PathBuf, ConfigStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indicators.json");
    write_store(&path, text).unwrap();
    let store = ConfigStore::open(&path).unwrap();
    (dir, path, store)
}

/// Deterministic trending, oscillating bars with varying volume.
pub fn candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + t * 0.3 + (t * 0.5).sin() * 4.0;
            let open = close - (t * 0.9).cos();
            Candle {
                timestamp_ns: i as i64 * 60_000_000_000,
                open,
                high: close.max(open) + 1.0,
                low: close.min(open) - 1.0,
                close,
                volume: 1_000.0 + (i % 5) as f64 * 250.0,
            }
        })
        .collect()
}

pub fn engine() -> Engine {
    Engine::new(candles(120))
}
