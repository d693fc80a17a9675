//! SQLite-backed park store.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

use crate::park::SignLocationsError;
use crate::{ParkRecord, ParkStore, UpsertOutcome};

const CREATE_PARKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS parks (
    id INTEGER PRIMARY KEY,
    pma_id TEXT NOT NULL UNIQUE CHECK (length(trim(pma_id)) > 0),
    name TEXT NOT NULL CHECK (length(name) > 0),
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    acres REAL,
    external_id TEXT UNIQUE,
    boundary_geojson TEXT,
    has_rainbow_sign INTEGER NOT NULL DEFAULT 0,
    rainbow_sign_locations TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_NAME_INDEX: &str = "CREATE INDEX IF NOT EXISTS parks_name_idx ON parks (name)";

const UPSERT_PARK: &str = "INSERT INTO parks (
        pma_id,
        name,
        latitude,
        longitude,
        acres,
        external_id,
        boundary_geojson,
        has_rainbow_sign,
        rainbow_sign_locations
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT (pma_id) DO UPDATE SET
        name = excluded.name,
        latitude = excluded.latitude,
        longitude = excluded.longitude,
        acres = excluded.acres,
        external_id = excluded.external_id,
        boundary_geojson = excluded.boundary_geojson,
        has_rainbow_sign = excluded.has_rainbow_sign,
        rainbow_sign_locations = excluded.rainbow_sign_locations,
        updated_at = CURRENT_TIMESTAMP";

const SELECT_COLUMNS: &str = "SELECT pma_id, name, latitude, longitude, acres, external_id,
    boundary_geojson, rainbow_sign_locations FROM parks";

/// Errors raised by [`SqliteParkStore`].
#[derive(Debug, Error)]
pub enum SqliteParkStoreError {
    /// Failed to create the parent directory for the database file.
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Location of the database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the `parks` table or its indexes failed.
    #[error("failed to initialise parks schema")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A statement failed while reading or writing parks.
    #[error("failed to {operation}")]
    Sqlite {
        /// Short description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Sign locations could not be encoded or decoded.
    #[error("invalid rainbow sign locations for park {pma_id}")]
    SignLocations {
        /// Key of the affected park.
        pma_id: String,
        /// JSON conversion failure.
        #[source]
        source: SignLocationsError,
    },
    /// A count did not fit in `usize`.
    #[error("park count {count} is out of range")]
    CountOutOfRange {
        /// Value returned by SQLite.
        count: i64,
    },
}

/// Park store persisted in a single SQLite table keyed by `pma_id`.
///
/// Each upsert runs in its own transaction, so records written before a
/// failure stay committed.
pub struct SqliteParkStore {
    connection: Connection,
}

impl fmt::Debug for SqliteParkStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteParkStore")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

impl SqliteParkStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Utf8Path) -> Result<Self, SqliteParkStoreError> {
        parks_fs::ensure_parent_dir(path).map_err(|source| {
            SqliteParkStoreError::CreateDirectory {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| SqliteParkStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_connection(connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, SqliteParkStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteParkStoreError::Open {
                path: Utf8PathBuf::from(":memory:"),
                source,
            })?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, SqliteParkStoreError> {
        connection
            .execute_batch(&format!("{CREATE_PARKS_TABLE};\n{CREATE_NAME_INDEX};"))
            .map_err(|source| SqliteParkStoreError::CreateSchema { source })?;
        Ok(Self { connection })
    }

    /// Every stored park ordered by name, then key.
    pub fn parks(&self) -> Result<Vec<ParkRecord>, SqliteParkStoreError> {
        let mut statement = self
            .connection
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY name, pma_id"))
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "prepare park listing",
                source,
            })?;
        let rows = statement
            .query_map([], StoredPark::from_row)
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "list parks",
                source,
            })?;

        let mut parks = Vec::new();
        for row in rows {
            let stored = row.map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "read park row",
                source,
            })?;
            parks.push(stored.into_record()?);
        }
        Ok(parks)
    }
}

impl ParkStore for SqliteParkStore {
    type Error = SqliteParkStoreError;

    fn upsert(&mut self, record: &ParkRecord) -> Result<UpsertOutcome, Self::Error> {
        let sign_locations =
            record
                .sign_locations_json()
                .map_err(|source| SqliteParkStoreError::SignLocations {
                    pma_id: record.pma_id.clone(),
                    source,
                })?;

        let transaction =
            self.connection
                .transaction()
                .map_err(|source| SqliteParkStoreError::Sqlite {
                    operation: "begin upsert transaction",
                    source,
                })?;

        let existed = transaction
            .query_row(
                "SELECT 1 FROM parks WHERE pma_id = ?1",
                [record.pma_id.as_str()],
                |_| Ok(()),
            )
            .optional()
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "look up existing park",
                source,
            })?
            .is_some();

        transaction
            .execute(
                UPSERT_PARK,
                params![
                    record.pma_id,
                    record.name,
                    record.latitude(),
                    record.longitude(),
                    record.acres,
                    record.external_id,
                    record.boundary_geojson,
                    record.has_rainbow_sign(),
                    sign_locations,
                ],
            )
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "upsert park",
                source,
            })?;

        transaction
            .commit()
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "commit upsert transaction",
                source,
            })?;

        let outcome = if existed {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        };
        debug!("{outcome:?} park {} ({})", record.pma_id, record.name);
        Ok(outcome)
    }

    fn clear(&mut self) -> Result<usize, Self::Error> {
        self.connection
            .execute("DELETE FROM parks", [])
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "clear parks",
                source,
            })
    }

    fn get(&self, pma_id: &str) -> Result<Option<ParkRecord>, Self::Error> {
        let stored = self
            .connection
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE pma_id = ?1"),
                [pma_id],
                StoredPark::from_row,
            )
            .optional()
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "fetch park",
                source,
            })?;
        stored.map(StoredPark::into_record).transpose()
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM parks", [], |row| row.get(0))
            .map_err(|source| SqliteParkStoreError::Sqlite {
                operation: "count parks",
                source,
            })?;
        usize::try_from(count).map_err(|_| SqliteParkStoreError::CountOutOfRange { count })
    }
}

/// Raw column values before the sign location JSON is decoded.
struct StoredPark {
    pma_id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    acres: Option<f64>,
    external_id: Option<String>,
    boundary_geojson: Option<String>,
    rainbow_sign_locations: Option<String>,
}

impl StoredPark {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            pma_id: row.get(0)?,
            name: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            acres: row.get(4)?,
            external_id: row.get(5)?,
            boundary_geojson: row.get(6)?,
            rainbow_sign_locations: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<ParkRecord, SqliteParkStoreError> {
        let rainbow_sign_locations =
            ParkRecord::parse_sign_locations(self.rainbow_sign_locations.as_deref()).map_err(
                |source| SqliteParkStoreError::SignLocations {
                    pma_id: self.pma_id.clone(),
                    source,
                },
            )?;
        Ok(ParkRecord {
            pma_id: self.pma_id,
            name: self.name,
            location: Coord {
                x: self.longitude,
                y: self.latitude,
            },
            acres: self.acres,
            external_id: self.external_id,
            boundary_geojson: self.boundary_geojson,
            rainbow_sign_locations,
        })
    }
}
