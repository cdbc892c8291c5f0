use std::{fs::File, io::BufReader, path::Path};

use crate::error::{OpcfxError, OpcfxResult};

/// Parsed layout document: one JSON metadata node per addressable pixel, in
/// file order. Owned here for the lifetime of the runner; `PixelInfo` refers
/// back into it by index.
#[derive(Clone, Debug)]
pub struct Layout {
    entries: Vec<serde_json::Value>,
}

impl Layout {
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> OpcfxResult<Self> {
        let f = File::open(path)
            .map_err(|e| OpcfxError::layout(format!("open '{}': {e}", path.display())))?;
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| OpcfxError::layout(format!("parse '{}': {e}", path.display())))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> OpcfxResult<Self> {
        let serde_json::Value::Array(entries) = value else {
            return Err(OpcfxError::layout("top-level value must be an array"));
        };
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> &serde_json::Value {
        &self.entries[index]
    }

    /// Build the pixel list: one `PixelInfo` per entry, indices dense in
    /// file order.
    pub fn pixels(&self) -> Vec<PixelInfo> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| PixelInfo::from_entry(index, entry))
            .collect()
    }
}

/// Immutable per-pixel record: buffer index, spatial position, and whether
/// the pixel participates in color computation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelInfo {
    /// Position in the frame buffer and in the layout array.
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// False for non-object layout entries (e.g. `null` marking an unwired
    /// output channel). Inactive pixels stay black but keep their slot.
    pub active: bool,
}

impl PixelInfo {
    pub fn from_entry(index: usize, entry: &serde_json::Value) -> Self {
        let mut p = Self {
            index,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            active: entry.is_object(),
        };

        // Missing or malformed coordinates degrade to 0 rather than failing
        // the whole load.
        if let Some(point) = entry.get("point").and_then(|v| v.as_array()) {
            let coord = |i: usize| point.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
            p.x = coord(0);
            p.y = coord(1);
            p.z = coord(2);
        }

        p
    }
}
