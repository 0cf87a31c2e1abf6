//! On-disk JSON snapshot: `{"actors": [...], "scorecards": [...]}`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use scorecard_core::identity::Actor;
use scorecard_core::scorecard::Scorecard;

use crate::store::StoreError;

/// Full contents of a store at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub scorecards: Vec<Scorecard>,
}

impl Snapshot {
    /// Read a snapshot file. Returns `Ok(None)` if it does not exist.
    pub async fn load(path: &Path) -> Result<Option<Self>, StoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Write the snapshot next to `path` and rename it into place, so a
    /// reader never observes a partial file.
    pub async fn write(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(self)?;
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
