use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PORT: u16 = 3856;

/// On-disk CLI settings, kept next to the database so everything for one
/// install lives in one directory. Written with defaults on first run so
/// users have a file to edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub port: u16,
    /// Replaces the default event-log location under the data dir when set.
    pub logs_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            logs_dir: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create(dir: &Path) -> Result<ConfigLoad, String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create config dir {}: {err}", dir.display()))?;
    let file = dir.join(CONFIG_FILE);

    if let Some(contents) = read_existing(&file)? {
        let config = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {err}", file.display()))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    let config = CliConfig::default();
    let rendered =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {err}"))?;
    fs::write(&file, rendered).map_err(|err| format!("write config {}: {err}", file.display()))?;
    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn read_existing(file: &Path) -> Result<Option<String>, String> {
    if !file.exists() {
        return Ok(None);
    }
    fs::read_to_string(file)
        .map(Some)
        .map_err(|err| format!("read config {}: {err}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_writes_defaults() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let load = load_or_create(temp_dir.path()).expect("load");
        assert!(load.created);
        assert_eq!(load.config.port, DEFAULT_PORT);
        assert!(load.config.logs_dir.is_none());
        assert!(load.file.exists());

        // Second run reads the file it just wrote.
        let reload = load_or_create(temp_dir.path()).expect("reload");
        assert!(!reload.created);
        assert_eq!(reload.config.port, DEFAULT_PORT);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "logs_dir = \"/tmp/waitdash-logs\"\n",
        )
        .expect("write config");

        let load = load_or_create(temp_dir.path()).expect("load");
        assert!(!load.created);
        assert_eq!(load.config.port, DEFAULT_PORT);
        assert_eq!(
            load.config.logs_dir.as_deref(),
            Some(Path::new("/tmp/waitdash-logs"))
        );
    }
}
