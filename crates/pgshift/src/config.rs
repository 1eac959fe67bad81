//! Configuration file handling.
//!
//! Looks for `.config/pgshift.json` in the current directory or any parent
//! directory.

pub use pgshift_config::{Config, Filter};

use crate::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};

const CONFIG_FILE: &str = ".config/pgshift.json";

/// Load configuration from `.config/pgshift.json`, searching up from the
/// current directory.
pub fn load() -> Result<(Config, Utf8PathBuf)> {
    let cwd = std::env::current_dir().map_err(|source| Error::Io {
        path: Utf8PathBuf::from("."),
        source,
    })?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| Error::NonUtf8Path {
        path: e.into_path_buf(),
    })?;
    load_from(&cwd)
}

/// Load configuration, searching up from `start`.
pub fn load_from(start: &Utf8Path) -> Result<(Config, Utf8PathBuf)> {
    let path = find_config_file(start)?;
    tracing::debug!(%path, "loading config");
    let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse(&content).map_err(|message| Error::Config {
        path: path.clone(),
        message,
    })?;
    Ok((config, path))
}

fn parse(content: &str) -> std::result::Result<Config, String> {
    facet_json::from_str::<Config>(content).map_err(|e| e.to_string())
}

fn find_config_file(start: &Utf8Path) -> Result<Utf8PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| Error::ConfigNotFound {
            start: start.to_owned(),
        })
}
