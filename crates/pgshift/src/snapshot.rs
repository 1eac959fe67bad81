//! Reading schema snapshots.
//!
//! A snapshot is the JSON form of [`Schema`]: one array per object kind, with
//! every optional or collection field allowed to be left out.

use crate::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use pgshift_schema::Schema;

/// Parse a snapshot held in memory.
pub fn parse(content: &str) -> Result<Schema> {
    parse_at(content, Utf8Path::new("<memory>"))
}

/// Read and parse the snapshot at `path`.
pub fn load(path: impl AsRef<Utf8Path>) -> Result<Schema> {
    let path = path.as_ref();
    tracing::debug!(%path, "loading snapshot");
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_at(&content, path)
}

fn parse_at(content: &str, path: &Utf8Path) -> Result<Schema> {
    facet_json::from_str::<Schema>(content).map_err(|e| Error::Snapshot {
        path: Utf8PathBuf::from(path),
        message: e.to_string(),
    })
}
