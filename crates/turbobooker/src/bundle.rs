//! Location of the bundled resource set
//!
//! Configuration, test data and schema documents ship in the crate's
//! `resources/` directory. A different directory can be selected with the
//! `TURBOBOOKER_RESOURCES` environment variable.

use std::path::{Path, PathBuf};

use crate::{
    RESOURCES_ENV,
    error::{Error, Result},
};

/// Root of the resource set.
pub fn resource_dir() -> PathBuf {
    match std::env::var(RESOURCES_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => Path::new(env!("CARGO_MANIFEST_DIR")).join("resources"),
    }
}

/// Absolute path of a named resource, e.g. `test-data/config.json`.
pub fn resource_path(name: &str) -> PathBuf {
    resource_dir().join(name.trim_start_matches('/'))
}

/// Read a named resource as UTF-8 text.
pub fn read_resource(name: &str) -> Result<String> {
    let path = resource_path(name);
    std::fs::read_to_string(&path).map_err(|e| {
        Error::Config(format!(
            "Failed to read resource '{}' from {}: {}",
            name,
            path.display(),
            e
        ))
    })
}
