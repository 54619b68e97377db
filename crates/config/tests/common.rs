use std::path::Path;

/// Store document with SMA instances 1, 3 and 4, an RSI instance in the
/// VOLUME category and an empty WMA group.
pub const SAMPLE_STORE: &str = r#"{
  "indicators": [
    {
      "identifier": "SMA",
      "description": "Simple moving average of the close price",
      "instances": [
        {
          "id": 1,
          "params": [
            { "name": "TimeFrame", "type": "integer", "value": "14" },
            { "name": "Color", "type": "color", "value": "RED" },
            { "name": "Stroke", "type": "stroke", "value": "THIN" },
            { "name": "Shape", "type": "shape", "value": "NONE" }
          ]
        },
        {
          "id": 3,
          "category": "CUSTOM",
          "params": [
            { "name": "TimeFrame", "type": "integer", "value": "50" }
          ]
        },
        { "id": 4, "category": "", "params": [] }
      ]
    },
    {
      "identifier": "RSI",
      "instances": [
        {
          "id": 2,
          "category": "VOLUME",
          "params": [
            { "name": "TimeFrame", "value": "9" }
          ]
        }
      ]
    },
    { "identifier": "WMA", "description": "", "instances": [] }
  ]
}"#;

pub fn write_store(path: &Path, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, text)?;
    Ok(())
}
