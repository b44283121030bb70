use std::env;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "WAITDASH_DATA_DIR";
const DATA_DIR_NAMES: [&str; 3] = ["WaitDash", "com.waitdash.app", "waitdash"];
const DB_FILE: &str = "waitdash.sqlite";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

/// Picks the data directory: an explicit `WAITDASH_DATA_DIR` wins, then any
/// application-support candidate that already holds a database, then the
/// default fresh location.
pub fn resolve_data_dir() -> Result<DataDirResolution, String> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        let dir = PathBuf::from(dir);
        let matched_existing = dir.join(DB_FILE).exists();
        return Ok(DataDirResolution {
            dir,
            matched_existing,
        });
    }

    let base = app_support_dir()?;
    let existing = DATA_DIR_NAMES
        .iter()
        .map(|name| base.join(name))
        .find(|candidate| candidate.join(DB_FILE).exists());
    Ok(match existing {
        Some(dir) => DataDirResolution {
            dir,
            matched_existing: true,
        },
        None => DataDirResolution {
            dir: base.join("waitdash"),
            matched_existing: false,
        },
    })
}

fn app_support_dir() -> Result<PathBuf, String> {
    let home = env::var("HOME").map_err(|err| format!("resolve HOME: {err}"))?;
    Ok(PathBuf::from(home)
        .join("Library")
        .join("Application Support"))
}
