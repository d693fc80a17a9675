//! Load command implementation for the parks CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parks_core::{ParkStore, SqliteParkStore};
use parks_data::{
    CoordinateProjector, GeometryTransformer, IngestReport, ParkIngestor, SignIndex,
    read_feature_collection,
};
use parks_fs::PathKind;
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BOUNDARIES, ARG_CLEAR, ARG_DATA_DIR, ARG_DATABASE, ARG_SIGNS, CliError,
    DEFAULT_BOUNDARIES_FILE, DEFAULT_DATA_DIR, DEFAULT_DATABASE_FILE, DEFAULT_SIGNS_FILE,
};

/// CLI arguments for the `load` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read the park boundary and park sign GeoJSON layers, convert \
                 them to WGS84, match rainbow signs to parks, and upsert one \
                 record per park into the SQLite park database. Paths can come \
                 from CLI flags, configuration files, or environment variables.",
    about = "Import park boundaries and rainbow sign locations"
)]
#[ortho_config(prefix = "PARKS")]
pub(crate) struct LoadArgs {
    /// Directory holding the default source layers and database.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the park boundary GeoJSON layer.
    #[arg(long = ARG_BOUNDARIES, value_name = "path")]
    #[serde(default)]
    pub(crate) boundaries: Option<Utf8PathBuf>,
    /// Override the path to the park sign GeoJSON layer.
    #[arg(long = ARG_SIGNS, value_name = "path")]
    #[serde(default)]
    pub(crate) signs: Option<Utf8PathBuf>,
    /// Override the path to the SQLite park database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Delete every stored park before loading.
    #[arg(long = ARG_CLEAR)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) clear: bool,
}

impl LoadArgs {
    pub(crate) fn into_config(self) -> Result<LoadConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(LoadConfig::from(merged))
    }
}

/// Resolved `load` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadConfig {
    /// Park boundary layer.
    pub(crate) boundaries: Utf8PathBuf,
    /// Park sign layer.
    pub(crate) signs: Utf8PathBuf,
    /// SQLite park database.
    pub(crate) database: Utf8PathBuf,
    /// Whether to delete stored parks before loading.
    pub(crate) clear: bool,
}

impl LoadConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.boundaries, ARG_BOUNDARIES)?;
        Self::require_existing(&self.signs, ARG_SIGNS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match parks_fs::inspect_path(path) {
            Ok(PathKind::File) => Ok(()),
            Ok(PathKind::Directory | PathKind::Other) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl From<LoadArgs> for LoadConfig {
    fn from(args: LoadArgs) -> Self {
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let boundaries = args
            .boundaries
            .unwrap_or_else(|| data_dir.join(DEFAULT_BOUNDARIES_FILE));
        let signs = args
            .signs
            .unwrap_or_else(|| data_dir.join(DEFAULT_SIGNS_FILE));
        let database = args
            .database
            .unwrap_or_else(|| data_dir.join(DEFAULT_DATABASE_FILE));
        Self {
            boundaries,
            signs,
            database,
            clear: args.clear,
        }
    }
}

pub(crate) fn run_load(args: LoadArgs) -> Result<IngestReport, CliError> {
    let mut stdout = std::io::stdout().lock();
    run_load_with(args, &mut stdout)
}

pub(crate) fn run_load_with(
    args: LoadArgs,
    writer: &mut dyn Write,
) -> Result<IngestReport, CliError> {
    let config = resolve_load_config(args)?;
    execute_load(&config, writer)
}

fn resolve_load_config(args: LoadArgs) -> Result<LoadConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Read both layers, then open the store and ingest.
///
/// Both layers are parsed before the database is opened, so an unreadable
/// input never leaves a cleared store behind.
pub(crate) fn execute_load(
    config: &LoadConfig,
    writer: &mut dyn Write,
) -> Result<IngestReport, CliError> {
    let boundaries = read_feature_collection(&config.boundaries)?;
    info!(
        "Loaded {} park features from {}",
        boundaries.len(),
        config.boundaries
    );
    let sign_features = read_feature_collection(&config.signs)?;
    let signs = SignIndex::build(&sign_features);
    info!(
        "Found {} rainbow signs across {} parks",
        signs.sign_count(),
        signs.park_count()
    );

    let projector = CoordinateProjector::new().map_err(CliError::BuildProjector)?;
    let ingestor = ParkIngestor::new(GeometryTransformer::new(projector));

    let mut store =
        SqliteParkStore::open(&config.database).map_err(|source| CliError::OpenStore {
            path: config.database.clone(),
            source,
        })?;
    if config.clear {
        let removed = store.clear().map_err(|source| CliError::ClearStore {
            path: config.database.clone(),
            source,
        })?;
        info!("Cleared {removed} existing parks");
    }

    let report = ingestor.ingest(&boundaries, &signs, &mut store);
    writeln!(writer, "{report}").map_err(CliError::WriteSummary)?;
    Ok(report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<LoadConfig, CliError> {
    let merged = LoadArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(LoadConfig::from(merged))
}
