use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};

/// State-plane position of the rainbow sign at Cal Anderson Park.
pub const SIGN_POSITION: [f64; 2] = [1_271_188.780_121_375, 222_452.292_803_635_94];

/// Write `contents` as a GeoJSON file named `name` inside `dir`.
pub fn write_layer(dir: &Utf8Path, name: &str, contents: &Value) -> Utf8PathBuf {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(contents).expect("serialise layer");
    fs::write(&path, text).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
    path
}

/// Closed square ring in state-plane feet.
pub fn square(origin_x: f64, origin_y: f64, side: f64) -> Value {
    json!([[
        [origin_x, origin_y],
        [origin_x, origin_y + side],
        [origin_x + side, origin_y + side],
        [origin_x + side, origin_y],
        [origin_x, origin_y]
    ]])
}

/// Boundary layer with two named parks and one placeholder boundary.
pub fn boundary_layer() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"NAME": "Cal Anderson Park", "PMA": 281, "PARKSBND_AREA": 323_215.2, "OBJECTID": 1},
                "geometry": {"type": "Polygon", "coordinates": square(1_270_000.0, 220_000.0, 1_000.0)}
            },
            {
                "type": "Feature",
                "properties": {"NAME": "Volunteer Park", "PMA": 4017, "PARKSBND_AREA": 2_112_537.0, "OBJECTID": 2},
                "geometry": {"type": "Polygon", "coordinates": square(1_266_000.0, 230_000.0, 1_500.0)}
            },
            {
                "type": "Feature",
                "properties": {"NAME": "Unknown Park", "PMA": 9999, "OBJECTID": 3},
                "geometry": {"type": "Polygon", "coordinates": square(1_268_000.0, 225_000.0, 500.0)}
            }
        ]
    })
}

/// Sign layer with one rainbow sign for `pma_id` and one unrelated sign.
pub fn sign_layer(pma_id: &str) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"SIGN_TP": "RAINBOW", "PMAID": pma_id},
                "geometry": {"type": "Point", "coordinates": SIGN_POSITION}
            },
            {
                "type": "Feature",
                "properties": {"SIGN_TP": "ENTRY", "PMAID": "4017"},
                "geometry": {"type": "Point", "coordinates": [1_266_500.0, 230_500.0]}
            }
        ]
    })
}
