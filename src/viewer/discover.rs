use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ShotError, ShotResult};

/// File suffix of shot documents picked up by directory discovery.
pub const SHOT_SUFFIX: &str = ".shot.json";

/// A shot file found on disk together with its recorded start time.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredShot {
    pub path: PathBuf,
    /// Inner `time` value; `0.0` when missing or not numeric.
    pub time: f64,
}

/// Lists `*.shot.json` files in `dir`, most recent first.
///
/// Files that cannot be read or parsed are skipped with a warning. Equal
/// times are ordered by path.
pub fn discover_recent_shots(dir: &Path) -> ShotResult<Vec<DiscoveredShot>> {
    let entries = fs::read_dir(dir).map_err(|err| ShotError::io(dir, err))?;

    let mut found = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let is_shot = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(SHOT_SUFFIX));
        if !is_shot || !path.is_file() {
            continue;
        }

        match read_shot_time(&path) {
            Ok(time) => found.push(DiscoveredShot { path, time }),
            Err(err) => warn!(path = %path.display(), error = %err, "failed to read shot time"),
        }
    }

    found.sort_by(|lhs, rhs| {
        rhs.time
            .total_cmp(&lhs.time)
            .then_with(|| lhs.path.cmp(&rhs.path))
    });
    debug!(dir = %dir.display(), count = found.len(), "discovered shots");
    Ok(found)
}

fn read_shot_time(path: &Path) -> ShotResult<f64> {
    let text = fs::read_to_string(path).map_err(|err| ShotError::io(path, err))?;
    let document: Value = serde_json::from_str(&text)?;
    Ok(document.get("time").and_then(Value::as_f64).unwrap_or(0.0))
}
