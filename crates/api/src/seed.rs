// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV catalog loader.
//!
//! A seed directory holds `resorts.csv`, `areas.csv` (or `area.csv`), and
//! any number of `*-runs.csv` files. Child rows name their parent by its
//! 1-based row position in the parent file. Run files are concatenated in
//! file-name order, so their combined row positions are stable.

use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use slopesense_domain::{CatalogSeed, NewResort, SeedArea, SeedRun};
use slopesense_persistence::{CatalogCounts, Persistence, PersistenceError};
use tracing::{debug, info};

const RESORTS_FILE: &str = "resorts.csv";
const AREAS_FILES: &[&str] = &["areas.csv", "area.csv"];
const RUNS_SUFFIX: &str = "-runs.csv";

const RESORT_HEADERS: &[&str] = &["resort_name"];
const AREA_HEADERS: &[&str] = &["resort_id"];
const RUN_HEADERS: &[&str] = &["area_id", "run_name"];

const TRUTHY: &[&str] = &["true", "1", "t", "yes", "y"];

/// Errors raised while loading a seed catalog.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed file {0} not found")]
    MissingFile(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file} is missing required columns: {columns}")]
    MissingColumns { file: String, columns: String },

    #[error("{file} row {row}: {message}")]
    InvalidRow {
        file: String,
        row: usize,
        message: String,
    },

    #[error("failed to store catalog: {0}")]
    Store(#[from] PersistenceError),
}

/// Loads every seed file in `dir` into an empty catalog.
///
/// A store that already holds resorts is left alone and `None` is returned,
/// so reports and favourite resorts survive a restart with the same seed
/// directory configured. Nothing is written unless every file parses and
/// every parent index resolves.
///
/// # Errors
///
/// Returns an error if a file is missing or malformed, a child row names a
/// parent that does not exist, or the store fails.
pub fn seed_catalog(
    persistence: &mut Persistence,
    dir: &Path,
) -> Result<Option<CatalogCounts>, SeedError> {
    let existing: usize = persistence.list_resorts()?.len();
    if existing > 0 {
        info!(
            resorts = existing,
            dir = %dir.display(),
            "Catalog already present; skipping seed"
        );
        return Ok(None);
    }

    let seed: CatalogSeed = load_catalog_dir(dir)?;
    let counts: CatalogCounts = persistence.replace_catalog(&seed)?;

    info!(
        resorts = counts.resorts,
        areas = counts.areas,
        runs = counts.runs,
        dir = %dir.display(),
        "Seeded catalog"
    );

    Ok(Some(counts))
}

/// Reads a seed directory into a [`CatalogSeed`].
///
/// # Errors
///
/// Returns an error if a file is missing or malformed, or a child row names
/// a parent that does not exist.
pub fn load_catalog_dir(dir: &Path) -> Result<CatalogSeed, SeedError> {
    let resorts_path: PathBuf = dir.join(RESORTS_FILE);
    let resorts: Vec<NewResort> = parse_resorts(RESORTS_FILE, open(&resorts_path)?)?;

    let areas_path: PathBuf = AREAS_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| SeedError::MissingFile(dir.join(AREAS_FILES[0])))?;
    let areas_name: String = file_label(&areas_path);
    let areas: Vec<SeedArea> = parse_areas(&areas_name, open(&areas_path)?)?;

    let mut runs: Vec<SeedRun> = Vec::new();
    let mut run_origins: Vec<(String, usize)> = Vec::new();
    for path in run_files(dir)? {
        let name: String = file_label(&path);
        let parsed: Vec<SeedRun> = parse_runs(&name, open(&path)?)?;
        debug!(file = %name, runs = parsed.len(), "Parsed run file");
        run_origins.extend((1..=parsed.len()).map(|row| (name.clone(), row)));
        runs.extend(parsed);
    }

    let seed: CatalogSeed = CatalogSeed {
        resorts,
        areas,
        runs,
    };
    check_parents(&seed, &areas_name, &run_origins)?;
    Ok(seed)
}

/// Parses `resorts.csv`.
///
/// # Errors
///
/// Returns an error if the file is malformed or a row has no name.
pub fn parse_resorts<R: Read>(file: &str, reader: R) -> Result<Vec<NewResort>, SeedError> {
    read_rows(file, reader, RESORT_HEADERS, |row| {
        Ok(NewResort {
            resort_name: row.required("resort_name")?,
            city: row.get("city"),
            state: row.get("state"),
            website: row.get("website"),
            total_acres: row.get("total_acres").and_then(|v| v.parse::<i32>().ok()),
            canyon_name: row.get("canyon_name"),
            ski_patrol_phone: row.get("ski_patrol_phone"),
            has_night_skiing: row.flag("night_skiing"),
        })
    })
}

/// Parses `areas.csv`.
///
/// # Errors
///
/// Returns an error if the file is malformed or a row has no valid
/// `resort_id`.
pub fn parse_areas<R: Read>(file: &str, reader: R) -> Result<Vec<SeedArea>, SeedError> {
    read_rows(file, reader, AREA_HEADERS, |row| {
        Ok(SeedArea {
            resort_index: row.index("resort_id")?,
            base_area: row.get("base_area"),
            zone_name: row.get("area_name"),
        })
    })
}

/// Parses one `*-runs.csv` file.
///
/// # Errors
///
/// Returns an error if the file is malformed or a row has no name or no
/// valid `area_id`.
pub fn parse_runs<R: Read>(file: &str, reader: R) -> Result<Vec<SeedRun>, SeedError> {
    read_rows(file, reader, RUN_HEADERS, |row| {
        Ok(SeedRun {
            area_index: row.index("area_id")?,
            run_name: row.required("run_name")?,
            difficulty: row.get("difficulty"),
            is_open: row.flag("is_open"),
            is_terrain_park: row.flag("is_terrain_park"),
            backcountry_access: row.flag("backcountry_access"),
            bootpack_req: row.flag("bootpack_req"),
        })
    })
}

/// Interprets a seed boolean cell.
#[must_use]
pub fn seed_flag(raw: Option<&str>) -> bool {
    raw.map(str::trim)
        .is_some_and(|v| TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(v)))
}

/// One data row with its header map.
struct SeedRow<'a> {
    file: &'a str,
    row: usize,
    record: &'a StringRecord,
    headers: &'a HashMap<String, usize>,
}

impl SeedRow<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|&idx| self.record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, SeedError> {
        self.get(name)
            .ok_or_else(|| self.invalid(format!("{name} is required")))
    }

    fn index(&self, name: &str) -> Result<usize, SeedError> {
        let raw: String = self.required(name)?;
        raw.parse::<usize>()
            .ok()
            .filter(|idx| *idx > 0)
            .ok_or_else(|| {
                self.invalid(format!(
                    "{name} must be a positive row number (got '{raw}')"
                ))
            })
    }

    fn flag(&self, name: &str) -> bool {
        seed_flag(self.get(name).as_deref())
    }

    fn invalid(&self, message: String) -> SeedError {
        SeedError::InvalidRow {
            file: self.file.to_string(),
            row: self.row,
            message,
        }
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn read_rows<R, T, F>(
    file: &str,
    reader: R,
    required: &[&str],
    parse: F,
) -> Result<Vec<T>, SeedError>
where
    R: Read,
    F: Fn(&SeedRow<'_>) -> Result<T, SeedError>,
{
    let csv_error = |source: csv::Error| SeedError::Csv {
        file: file.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: HashMap<String, usize> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !headers.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(SeedError::MissingColumns {
            file: file.to_string(),
            columns: missing.join(", "),
        });
    }

    let mut rows: Vec<T> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record: StringRecord = result.map_err(csv_error)?;
        rows.push(parse(&SeedRow {
            file,
            row: idx + 1,
            record: &record,
            headers: &headers,
        })?);
    }

    Ok(rows)
}

/// Confirms every child row names a parent that exists.
///
/// `run_origins` holds the source file and row of each run, in order.
fn check_parents(
    seed: &CatalogSeed,
    areas_file: &str,
    run_origins: &[(String, usize)],
) -> Result<(), SeedError> {
    if let Some(row) = seed.first_orphan_area() {
        let index: usize = seed.areas[row - 1].resort_index;
        return Err(SeedError::InvalidRow {
            file: areas_file.to_string(),
            row,
            message: format!(
                "resort_id {index} does not exist ({} resorts loaded)",
                seed.resorts.len()
            ),
        });
    }

    if let Some(position) = seed.first_orphan_run() {
        let index: usize = seed.runs[position - 1].area_index;
        let (file, row): (String, usize) = run_origins
            .get(position - 1)
            .cloned()
            .unwrap_or_else(|| (String::from("runs"), position));
        return Err(SeedError::InvalidRow {
            file,
            row,
            message: format!(
                "area_id {index} does not exist ({} areas loaded)",
                seed.areas.len()
            ),
        });
    }

    Ok(())
}

fn run_files(dir: &Path) -> Result<Vec<PathBuf>, SeedError> {
    let io_error = |source: std::io::Error| SeedError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path: PathBuf = entry.map_err(io_error)?.path();
        if path.is_file() && file_label(&path).ends_with(RUNS_SUFFIX) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn open(path: &Path) -> Result<File, SeedError> {
    if !path.is_file() {
        return Err(SeedError::MissingFile(path.to_path_buf()));
    }
    File::open(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
