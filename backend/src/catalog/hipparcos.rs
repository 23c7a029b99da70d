//! Reader for the Hipparcos main catalogue (`hip_main.dat`).
//!
//! Records are `|`-separated; only the identifier, magnitude and astrometry
//! fields are read. Positions are ICRS at epoch J1991.25.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use qtty::Degrees;
use tracing::{debug, info, warn};

use super::StarCatalog;
use crate::error::{SkyMapError, SkyMapResult};
use crate::models::{CatalogPosition, HipparcosId, StarCatalogEntry};

/// Catalogue epoch of Hipparcos positions, Julian years.
pub const HIPPARCOS_EPOCH: f64 = 1991.25;

/// CDS copy of the main Hipparcos catalogue (ESA SP-1200, I/239).
pub const HIPPARCOS_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";

const FIELD_HIP: usize = 1;
const FIELD_VMAG: usize = 5;
const FIELD_RA: usize = 8;
const FIELD_DEC: usize = 9;
const FIELD_PARALLAX: usize = 11;
const FIELD_PM_RA: usize = 12;
const FIELD_PM_DEC: usize = 13;

/// Load a catalogue file from disk.
pub fn load<P: AsRef<Path>>(path: P) -> SkyMapResult<StarCatalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SkyMapError::catalog(path, 0, format!("Failed to open catalog file: {}", e))
    })?;
    let catalog = parse(BufReader::new(file), path)?;
    info!(
        "Loaded {} stars ({} naked-eye) from {}",
        catalog.len(),
        catalog.naked_eye().count(),
        path.display()
    );
    Ok(catalog)
}

/// Load `primary`, or `fallback` when `primary` does not exist.
pub fn load_with_fallback(primary: &Path, fallback: &Path) -> SkyMapResult<StarCatalog> {
    if primary.exists() {
        return load(primary);
    }
    warn!(
        "Catalog {} not found, falling back to {}",
        primary.display(),
        fallback.display()
    );
    load(fallback)
}

/// Parse catalogue records from any reader.
///
/// `source` is used only in error messages. Blank lines and lines starting
/// with `#` are ignored; records without a position or a magnitude are
/// skipped.
pub fn parse<R: BufRead>(reader: R, source: impl Into<PathBuf>) -> SkyMapResult<StarCatalog> {
    let source = source.into();
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_record(trimmed, &source, line_no)? {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(
            "Skipped {} records without astrometry in {}",
            skipped,
            source.display()
        );
    }
    Ok(StarCatalog::new(entries))
}

fn parse_record(line: &str, source: &Path, line_no: usize) -> SkyMapResult<Option<StarCatalogEntry>> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() <= FIELD_PM_DEC {
        return Err(SkyMapError::catalog(
            source,
            line_no,
            format!("expected at least {} fields, found {}", FIELD_PM_DEC + 1, fields.len()),
        ));
    }

    let number = |field: usize, name: &str| -> SkyMapResult<Option<f64>> {
        let raw = fields[field];
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>().map(Some).map_err(|_| {
            SkyMapError::catalog(source, line_no, format!("invalid {} '{}'", name, raw))
        })
    };

    let hip = fields[FIELD_HIP].parse::<u32>().map_err(|_| {
        SkyMapError::catalog(
            source,
            line_no,
            format!("invalid HIP number '{}'", fields[FIELD_HIP]),
        )
    })?;

    let (Some(magnitude), Some(ra), Some(dec)) = (
        number(FIELD_VMAG, "Vmag")?,
        number(FIELD_RA, "RAdeg")?,
        number(FIELD_DEC, "DEdeg")?,
    ) else {
        return Ok(None);
    };

    if !(0.0..360.0).contains(&ra) || !(-90.0..=90.0).contains(&dec) {
        return Err(SkyMapError::catalog(
            source,
            line_no,
            format!("position out of range (ra={}, dec={})", ra, dec),
        ));
    }

    Ok(Some(StarCatalogEntry {
        id: HipparcosId::new(hip),
        magnitude,
        position: CatalogPosition {
            ra: Degrees::new(ra),
            dec: Degrees::new(dec),
            pm_ra_mas_per_year: number(FIELD_PM_RA, "pmRA")?.unwrap_or(0.0),
            pm_dec_mas_per_year: number(FIELD_PM_DEC, "pmDE")?.unwrap_or(0.0),
            parallax_mas: number(FIELD_PARALLAX, "Plx")?.unwrap_or(0.0),
            epoch_year: HIPPARCOS_EPOCH,
        },
    }))
}
