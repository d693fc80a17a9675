//! Unit tests for boundary ingestion.

use std::io;

use super::*;
use crate::projection::CoordinateProjector;
use parks_core::test_support::MemoryParkStore;
use rstest::{fixture, rstest};
use serde_json::{Value as JsonValue, json};

const SIGN_X: f64 = 1_271_188.780_121_375;
const SIGN_Y: f64 = 222_452.292_803_635_94;

#[fixture]
fn ingestor() -> ParkIngestor {
    ParkIngestor::new(GeometryTransformer::new(
        CoordinateProjector::new().expect("projection definitions parse"),
    ))
}

fn square_ring(origin_x: f64, origin_y: f64, side: f64) -> JsonValue {
    json!([[
        [origin_x, origin_y],
        [origin_x, origin_y + side],
        [origin_x + side, origin_y + side],
        [origin_x + side, origin_y],
        [origin_x, origin_y]
    ]])
}

fn boundary(properties: JsonValue, geometry: JsonValue) -> SourceFeature {
    SourceFeature::from_json(json!({
        "type": "Feature",
        "properties": properties,
        "geometry": geometry
    }))
}

fn downtown_boundary(name: &str, pma: JsonValue) -> SourceFeature {
    boundary(
        json!({"NAME": name, "PMA": pma, "PARKSBND_AREA": 87_120.0, "OBJECTID": 12}),
        json!({"type": "Polygon", "coordinates": square_ring(1_270_000.0, 220_000.0, 1_000.0)}),
    )
}

fn rainbow_sign(pma_id: &str, geometry: JsonValue) -> SourceFeature {
    SourceFeature::from_json(json!({
        "type": "Feature",
        "properties": {"SIGN_TP": "RAINBOW", "PMAID": pma_id},
        "geometry": geometry
    }))
}

fn sign_point() -> JsonValue {
    json!({"type": "Point", "coordinates": [SIGN_X, SIGN_Y]})
}

fn stored(store: &MemoryParkStore, pma_id: &str) -> ParkRecord {
    store
        .get(pma_id)
        .expect("memory store is infallible")
        .unwrap_or_else(|| panic!("park {pma_id} stored"))
}

#[rstest]
fn accepted_boundary_becomes_a_full_record(ingestor: ParkIngestor) {
    let signs = SignIndex::build(&[rainbow_sign("281", sign_point())]);
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(
        &[downtown_boundary("Cal Anderson Park", json!(281))],
        &signs,
        &mut store,
    );

    assert_eq!(report.created, 1);
    let record = stored(&store, "281");
    assert_eq!(record.name, "Cal Anderson Park");
    assert_eq!(record.acres, Some(2.0));
    assert_eq!(record.external_id.as_deref(), Some("12"));
    assert!(record.has_rainbow_sign());
    let sign = record
        .rainbow_sign_locations
        .first()
        .copied()
        .expect("sign location");
    assert!((sign.x + 122.33).abs() < 1.0e-6, "sign longitude {}", sign.x);
    assert!((sign.y - 47.6).abs() < 1.0e-6, "sign latitude {}", sign.y);

    // Vertex average of the closed square ring.
    let expected = ingestor
        .transformer
        .projector()
        .project(1_270_400.0, 220_400.0)
        .expect("projects");
    assert!((record.location.x - expected.x).abs() < 1.0e-9);
    assert!((record.location.y - expected.y).abs() < 1.0e-9);

    let geometry: geojson::Geometry =
        serde_json::from_str(record.boundary_geojson.as_deref().expect("boundary stored"))
            .expect("boundary is GeoJSON");
    let geojson::Value::Polygon(rings) = geometry.value else {
        panic!("expected a polygon boundary");
    };
    let ring = rings.first().expect("outer ring");
    assert_eq!(ring.len(), 5);
    assert!(ring.iter().all(|position| {
        position.len() == 2 && ServiceArea::SEATTLE.contains(Coord {
            x: position[0],
            y: position[1],
        })
    }));
}

#[rstest]
fn mixed_batch_counts_every_outcome(ingestor: ParkIngestor) {
    let signs = SignIndex::build(&[rainbow_sign("281", sign_point())]);
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(
        &[
            downtown_boundary("Cal Anderson Park", json!(281)),
            downtown_boundary("Volunteer Park", json!("4017")),
            downtown_boundary("Unknown Park", json!(99)),
        ],
        &signs,
        &mut store,
    );

    assert_eq!(
        report,
        IngestReport {
            created: 2,
            updated: 0,
            skipped: 1,
            with_signs: 1,
            without_signs: 1,
        }
    );
    assert!(!stored(&store, "4017").has_rainbow_sign());
    assert_eq!(store.count().expect("count"), 2);
}

#[rstest]
fn second_run_updates_instead_of_creating(ingestor: ParkIngestor) {
    let boundaries = [
        downtown_boundary("Cal Anderson Park", json!(281)),
        downtown_boundary("Volunteer Park", json!(4017)),
    ];
    let signs = SignIndex::default();
    let mut store = MemoryParkStore::default();
    ingestor.ingest(&boundaries, &signs, &mut store);
    let first: Vec<_> = store.records().cloned().collect();

    let report = ingestor.ingest(&boundaries, &signs, &mut store);
    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 2);
    let second: Vec<_> = store.records().cloned().collect();
    assert_eq!(first, second);
}

#[rstest]
#[case::missing_name(json!({"PMA": 281}))]
#[case::empty_name(json!({"NAME": "", "PMA": 281}))]
#[case::placeholder_name(json!({"NAME": "Unknown Park", "PMA": 281}))]
#[case::missing_pma(json!({"NAME": "Cal Anderson Park"}))]
#[case::null_pma(json!({"NAME": "Cal Anderson Park", "PMA": null}))]
fn filtered_features_skip_before_sign_lookup(ingestor: ParkIngestor, #[case] properties: JsonValue) {
    let feature = boundary(
        properties,
        json!({"type": "Polygon", "coordinates": square_ring(1_270_000.0, 220_000.0, 1_000.0)}),
    );
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(&[feature], &SignIndex::default(), &mut store);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.with_signs + report.without_signs, 0);
    assert_eq!(store.count().expect("count"), 0);
}

#[rstest]
#[case::far_away_square(json!({"type": "Polygon", "coordinates": square_ring(0.0, 0.0, 2.0)}))]
#[case::line(json!({"type": "LineString", "coordinates": [[1270000.0, 220000.0], [1271000.0, 221000.0]]}))]
#[case::missing(JsonValue::Null)]
#[case::undecodable(json!({"type": "Polygon", "coordinates": "nope"}))]
fn out_of_area_features_skip_after_sign_lookup(ingestor: ParkIngestor, #[case] geometry: JsonValue) {
    let feature = boundary(json!({"NAME": "Somewhere Else", "PMA": 7}), geometry);
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(&[feature], &SignIndex::default(), &mut store);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.without_signs, 1);
    assert_eq!(store.count().expect("count"), 0);
}

#[rstest]
fn multipolygon_boundary_uses_first_polygon(ingestor: ParkIngestor) {
    let feature = boundary(
        json!({"NAME": "Discovery Park", "PMA": 12}),
        json!({"type": "MultiPolygon", "coordinates": [
            square_ring(1_270_000.0, 220_000.0, 1_000.0),
            square_ring(0.0, 0.0, 2.0)
        ]}),
    );
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(&[feature], &SignIndex::default(), &mut store);
    assert_eq!(report.created, 1);
    let record = stored(&store, "12");
    assert_eq!(record.acres, None);
    assert_eq!(record.external_id, None);
    assert!(
        record
            .boundary_geojson
            .as_deref()
            .is_some_and(|text| text.contains("MultiPolygon"))
    );
}

#[rstest]
fn signs_keep_source_order(ingestor: ParkIngestor) {
    let signs = SignIndex::build(&[
        rainbow_sign("281", sign_point()),
        rainbow_sign(
            "281",
            json!({"type": "Point", "coordinates": [1_278_936.449_547_771_6, 240_544.753_534_062_47]}),
        ),
    ]);
    let mut store = MemoryParkStore::default();
    ingestor.ingest(
        &[downtown_boundary("Cal Anderson Park", json!(281))],
        &signs,
        &mut store,
    );
    let latitudes: Vec<f64> = stored(&store, "281")
        .rainbow_sign_locations
        .iter()
        .map(|location| (location.y * 100.0).round() / 100.0)
        .collect();
    assert_eq!(latitudes, vec![47.6, 47.65]);
}

#[rstest]
fn bad_sign_geometry_skips_park_after_counting(ingestor: ParkIngestor) {
    let signs = SignIndex::build(&[rainbow_sign(
        "281",
        json!({"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]}),
    )]);
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(
        &[downtown_boundary("Cal Anderson Park", json!(281))],
        &signs,
        &mut store,
    );
    assert_eq!(report.skipped, 1);
    assert_eq!(report.with_signs, 1);
    assert_eq!(store.count().expect("count"), 0);
}

#[rstest]
fn invalid_area_skips_park(ingestor: ParkIngestor) {
    let feature = boundary(
        json!({"NAME": "Cal Anderson Park", "PMA": 281, "PARKSBND_AREA": "large"}),
        json!({"type": "Polygon", "coordinates": square_ring(1_270_000.0, 220_000.0, 1_000.0)}),
    );
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(&[feature], &SignIndex::default(), &mut store);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.without_signs, 1);
}

#[rstest]
fn narrower_service_area_rejects_downtown(ingestor: ParkIngestor) {
    let ingestor = ingestor.with_service_area(ServiceArea {
        min_lon: -122.0,
        max_lon: -121.0,
        min_lat: 47.0,
        max_lat: 48.0,
    });
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(
        &[downtown_boundary("Cal Anderson Park", json!(281))],
        &SignIndex::default(),
        &mut store,
    );
    assert_eq!(report.skipped, 1);
}

#[derive(Default)]
struct FailingStore {
    attempts: usize,
}

impl ParkStore for FailingStore {
    type Error = io::Error;

    fn upsert(&mut self, _record: &ParkRecord) -> Result<UpsertOutcome, Self::Error> {
        self.attempts += 1;
        Err(io::Error::other("disk full"))
    }

    fn clear(&mut self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn get(&self, _pma_id: &str) -> Result<Option<ParkRecord>, Self::Error> {
        Ok(None)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

#[rstest]
fn store_failures_skip_and_continue(ingestor: ParkIngestor) {
    let mut store = FailingStore::default();
    let report = ingestor.ingest(
        &[
            downtown_boundary("Cal Anderson Park", json!(281)),
            downtown_boundary("Volunteer Park", json!(4017)),
        ],
        &SignIndex::default(),
        &mut store,
    );
    assert_eq!(store.attempts, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.stored(), 0);
}

#[rstest]
#[case::capitol_hill(-122.33, 47.6, true)]
#[case::pacific(-130.0, 10.0, false)]
fn centroid_location_decides_acceptance(
    ingestor: ParkIngestor,
    #[case] longitude: f64,
    #[case] latitude: f64,
    #[case] accepted: bool,
) {
    let centre = ingestor
        .transformer
        .projector()
        .unproject(longitude, latitude)
        .expect("unprojects");
    // Open ring, so the vertex average is exactly the centre.
    let ring = json!([[
        [centre.x - 500.0, centre.y - 500.0],
        [centre.x - 500.0, centre.y + 500.0],
        [centre.x + 500.0, centre.y + 500.0],
        [centre.x + 500.0, centre.y - 500.0]
    ]]);
    let feature = boundary(
        json!({"NAME": "Probe Park", "PMA": 5}),
        json!({"type": "Polygon", "coordinates": ring}),
    );
    let mut store = MemoryParkStore::default();
    let report = ingestor.ingest(&[feature], &SignIndex::default(), &mut store);
    assert_eq!(report.created, usize::from(accepted));
    assert_eq!(report.skipped, usize::from(!accepted));
    if accepted {
        let record = stored(&store, "5");
        assert!((record.location.x - longitude).abs() < 1.0e-6);
        assert!((record.location.y - latitude).abs() < 1.0e-6);
    }
}
