//! Service configuration file support.
//!
//! Configuration is read from a TOML file and then overridden from the
//! environment. Every section is optional; missing values fall back to
//! [`SkyMapConfig::default`].

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::astro::Atmosphere;
use crate::error::{SkyMapError, SkyMapResult};
use crate::models::CelestialBody;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyMapConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub sky: SkySettings,
    /// Marker colour per body name.
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Star catalogue settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Full Hipparcos catalogue in `hip_main.dat` layout.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    /// Source of `path` when it is missing; needs the `catalog-download` feature.
    #[serde(default = "default_catalog_url")]
    pub url: Option<String>,
    /// Naked-eye extract loaded when `path` is unavailable.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: PathBuf,
}

/// What to plot and the defaults offered by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkySettings {
    #[serde(default = "default_bodies")]
    pub bodies: Vec<String>,
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_hour")]
    pub default_hour: u32,
    /// Absent means altitudes are geometric (no refraction).
    #[serde(default)]
    pub refraction: Option<RefractionSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefractionSettings {
    #[serde(default = "default_temperature_c")]
    pub temperature_c: f64,
    #[serde(default = "default_pressure_mbar")]
    pub pressure_mbar: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/hip_main.dat")
}

fn default_catalog_url() -> Option<String> {
    Some(crate::catalog::hipparcos::HIPPARCOS_URL.to_string())
}

fn default_fallback_path() -> PathBuf {
    PathBuf::from("data/bright_stars.dat")
}

fn default_bodies() -> Vec<String> {
    CelestialBody::DEFAULT_SELECTION
        .iter()
        .map(|b| b.name().to_string())
        .collect()
}

fn default_location() -> String {
    "San Francisco".to_string()
}

fn default_hour() -> u32 {
    22
}

fn default_temperature_c() -> f64 {
    10.0
}

fn default_pressure_mbar() -> f64 {
    1010.0
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            url: default_catalog_url(),
            fallback_path: default_fallback_path(),
        }
    }
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            bodies: default_bodies(),
            default_location: default_location(),
            default_hour: default_hour(),
            refraction: None,
        }
    }
}

impl SkyMapConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SkyMapConfig)` if successful
    /// * `Err(SkyMapError::Configuration)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> SkyMapResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SkyMapError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> SkyMapResult<Self> {
        let config: SkyMapConfig = toml::from_str(content).map_err(|e| {
            SkyMapError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `skymap.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> SkyMapResult<Self> {
        let search_paths = [
            PathBuf::from("skymap.toml"),
            PathBuf::from("backend/skymap.toml"),
            PathBuf::from("../skymap.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(SkyMapError::Configuration(
            "No skymap.toml found in standard locations".to_string(),
        ))
    }

    /// Resolve the configuration the server starts with.
    ///
    /// `SKYMAP_CONFIG` names the file explicitly; otherwise the default
    /// locations are searched and built-in defaults are used when none
    /// exists. Environment overrides are applied last.
    pub fn load() -> SkyMapResult<Self> {
        let mut config = match env::var("SKYMAP_CONFIG") {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => match Self::from_default_location() {
                Ok(config) => config,
                Err(_) => {
                    info!("No skymap.toml found, using built-in defaults");
                    Self::default()
                }
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `SKYMAP_CATALOG_PATH` from the environment.
    pub fn apply_env_overrides(&mut self) -> SkyMapResult<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                SkyMapError::Configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }
        if let Ok(path) = env::var("SKYMAP_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> SkyMapResult<()> {
        self.bodies()?;
        if self.sky.default_hour > 23 {
            return Err(SkyMapError::Configuration(format!(
                "sky.default_hour must be 0-23, got {}",
                self.sky.default_hour
            )));
        }
        crate::services::locations::lookup(&self.sky.default_location).map_err(|e| {
            SkyMapError::Configuration(format!("sky.default_location: {}", e))
        })?;
        if let Some(r) = &self.sky.refraction {
            if !(r.pressure_mbar.is_finite() && r.pressure_mbar >= 0.0) {
                return Err(SkyMapError::Configuration(format!(
                    "sky.refraction.pressure_mbar must be non-negative, got {}",
                    r.pressure_mbar
                )));
            }
            if !(r.temperature_c.is_finite() && r.temperature_c > -273.0) {
                return Err(SkyMapError::Configuration(format!(
                    "sky.refraction.temperature_c out of range: {}",
                    r.temperature_c
                )));
            }
        }
        Ok(())
    }

    /// Configured bodies, in plotting order.
    pub fn bodies(&self) -> SkyMapResult<Vec<CelestialBody>> {
        self.sky
            .bodies
            .iter()
            .map(|name| {
                name.parse().map_err(|e: SkyMapError| {
                    SkyMapError::Configuration(format!("sky.bodies: {}", e))
                })
            })
            .collect()
    }

    /// Refraction model, if enabled.
    pub fn atmosphere(&self) -> Option<Atmosphere> {
        self.sky.refraction.as_ref().map(|r| Atmosphere {
            temperature_c: r.temperature_c,
            pressure_mbar: r.pressure_mbar,
        })
    }

    /// Catalogue path, falling back to the crate directory for relative paths
    /// that do not exist from the working directory.
    pub fn catalog_path(&self) -> PathBuf {
        resolve_in_crate(&self.catalog.path)
    }

    /// Download source of the full catalogue; an empty `url` disables it.
    pub fn catalog_url(&self) -> Option<&str> {
        self.catalog.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Bundled extract path, resolved like [`SkyMapConfig::catalog_path`].
    pub fn fallback_catalog_path(&self) -> PathBuf {
        resolve_in_crate(&self.catalog.fallback_path)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn resolve_in_crate(path: &Path) -> PathBuf {
    if path.is_relative() && !path.exists() {
        let in_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
        if in_crate.exists() {
            return in_crate;
        }
    }
    path.to_path_buf()
}
