//! Test helpers for composing park source layers on disk.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Write raw bytes to a UTF-8 path, panicking with context on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
}

/// Closed square ring in state-plane feet.
fn square(origin_x: f64, origin_y: f64, side: f64) -> Value {
    json!([[
        [origin_x, origin_y],
        [origin_x, origin_y + side],
        [origin_x + side, origin_y + side],
        [origin_x + side, origin_y],
        [origin_x, origin_y]
    ]])
}

fn boundary(name: &str, pma: Value, origin: (f64, f64)) -> Value {
    json!({
        "type": "Feature",
        "properties": {"NAME": name, "PMA": pma, "PARKSBND_AREA": 87_120.0, "OBJECTID": pma},
        "geometry": {"type": "Polygon", "coordinates": square(origin.0, origin.1, 1_000.0)}
    })
}

/// Boundary layer with two valid parks and one feature missing its `PMA`.
pub(super) fn boundary_layer() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            boundary("Cal Anderson Park", json!(281), (1_270_000.0, 220_000.0)),
            boundary("Volunteer Park", json!(4017), (1_266_000.0, 230_000.0)),
            boundary("Orphaned Triangle", Value::Null, (1_268_000.0, 225_000.0))
        ]
    })
}

/// Sign layer with a rainbow sign for park 281 and an entry sign for 4017.
pub(super) fn sign_layer() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"SIGN_TP": "RAINBOW", "PMAID": "281"},
                "geometry": {"type": "Point", "coordinates": [1_271_188.780_121_375, 222_452.292_803_635_94]}
            },
            {
                "type": "Feature",
                "properties": {"SIGN_TP": "ENTRY", "PMAID": "4017"},
                "geometry": {"type": "Point", "coordinates": [1_266_500.0, 230_500.0]}
            }
        ]
    })
}

/// A data directory laid out with the default file names.
pub(super) struct DataDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DataDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    /// Data directory populated with the default boundary and sign layers.
    pub(super) fn with_default_layers() -> Self {
        let data = Self::new();
        data.write_json(crate::DEFAULT_BOUNDARIES_FILE, &boundary_layer());
        data.write_json(crate::DEFAULT_SIGNS_FILE, &sign_layer());
        data
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn boundaries(&self) -> Utf8PathBuf {
        self.root.join(crate::DEFAULT_BOUNDARIES_FILE)
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join(crate::DEFAULT_DATABASE_FILE)
    }

    pub(super) fn write_json(&self, name: &str, contents: &Value) -> Utf8PathBuf {
        let path = self.root.join(name);
        let text = serde_json::to_vec_pretty(contents).expect("serialise layer");
        write_utf8(&path, &text);
        path
    }
}
