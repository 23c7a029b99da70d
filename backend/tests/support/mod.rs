#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use skymap::catalog::hipparcos;
use skymap::config::SkyMapConfig;
use skymap::services::SkyMapService;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Bright-star extract shipped with the crate.
pub fn bright_stars_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/bright_stars.dat")
}

/// Service over the shipped catalogue with default configuration.
pub fn default_service() -> Arc<SkyMapService> {
    let catalog = hipparcos::load(bright_stars_path()).expect("bright star catalog loads");
    let service = SkyMapService::with_catalog(&SkyMapConfig::default(), catalog)
        .expect("default configuration is valid");
    Arc::new(service)
}

/// One `hip_main.dat` record with the fields the reader uses.
pub fn hip_record(hip: u32, vmag: &str, ra: &str, dec: &str, plx: &str, pm_ra: &str, pm_dec: &str) -> String {
    format!(
        "H|{:>12}| |00 00 00.00|+00 00 00.0|{:>5}| |H|{:>12}|{:>12}| |{:>7}|{:>8}|{:>8}|",
        hip, vmag, ra, dec, plx, pm_ra, pm_dec
    )
}

/// Runs `f` with environment variables temporarily modified.
///
/// Access to the process environment is serialised across test threads, and
/// previous values are restored even if `f` panics.
///
/// `changes` is a list of `(key, value)` pairs: `Some(v)` sets the variable,
/// `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (key, value) in changes {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }

        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}
